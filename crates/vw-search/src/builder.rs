//! Query builder
//!
//! Tree of search blocks, each with an ordered list of attribute fields.
//!
//! # Invariants
//! - at least one block at the root
//! - every block has between 1 and `max_fields` fields
//! - a field's value is set only from its resolved domain
//! - a new field can only follow a field whose attribute is chosen
//!
//! Attempts to break an invariant are ignored and reported as `false` / `None`;
//! they are never errors.

use crate::query::{AttributeFilter, BlockQuery, StructuredQuery};
use crate::resolver::DomainResolution;
use std::sync::Arc;
use vw_model::{BlockId, FieldId};

/// Fields allowed per block
pub const MAX_FIELDS_PER_BLOCK: usize = 4;

/// Load state of a field's value domain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DomainState {
    /// No attribute chosen
    #[default]
    Unset,
    /// Fetch in flight
    Pending,
    /// Domain available
    Ready,
    /// Fetch failed; the value selector stays disabled
    Failed(String),
}

/// Proof that a domain fetch was requested for a field
///
/// Hand it back to [`QueryBuilder::apply_domain`] with the result. Only the
/// most recent ticket of a field is honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTicket {
    /// Field the fetch is for
    pub field: FieldId,
    /// Attribute to fetch
    pub attribute: String,
    token: u64,
}

/// One `(attribute, value)` row of a block
#[derive(Debug, Clone)]
pub struct AttributeField {
    id: FieldId,
    name: Option<String>,
    value: Option<String>,
    domain: Arc<[String]>,
    state: DomainState,
    pending: Option<u64>,
}

impl AttributeField {
    fn new() -> Self {
        Self {
            id: FieldId::new(),
            name: None,
            value: None,
            domain: Arc::from(Vec::new()),
            state: DomainState::Unset,
            pending: None,
        }
    }

    /// Field id
    #[inline]
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Chosen attribute
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Chosen value
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Values selectable for the chosen attribute
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Domain load state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &DomainState {
        &self.state
    }

    /// Whether the value selector should be enabled
    #[inline]
    #[must_use]
    pub fn is_value_selectable(&self) -> bool {
        self.state == DomainState::Ready && !self.domain.is_empty()
    }

    /// Whether both attribute and value are chosen
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.value.is_some()
    }

    fn filter(&self) -> Option<AttributeFilter> {
        match (&self.name, &self.value) {
            (Some(name), Some(value)) => Some(AttributeFilter {
                name: name.clone(),
                value: value.clone(),
            }),
            _ => None,
        }
    }
}

/// One search block
#[derive(Debug, Clone)]
pub struct QueryBlock {
    id: BlockId,
    term: String,
    fields: Vec<AttributeField>,
}

impl QueryBlock {
    fn new() -> Self {
        Self {
            id: BlockId::new(),
            term: String::new(),
            fields: vec![AttributeField::new()],
        }
    }

    /// Block id
    #[inline]
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Free-text term
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Fields in order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[AttributeField] {
        &self.fields
    }

    /// Look up a field
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&AttributeField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether fields can be removed from this block
    #[inline]
    #[must_use]
    pub fn has_removable_fields(&self) -> bool {
        self.fields.len() > 1
    }

    fn query(&self) -> BlockQuery {
        BlockQuery {
            term: self.term.trim().to_string(),
            attributes: self.fields.iter().filter_map(AttributeField::filter).collect(),
        }
    }
}

/// Root of the query tree
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    blocks: Vec<QueryBlock>,
    max_fields: usize,
    next_token: u64,
}

impl QueryBuilder {
    /// One empty block with one empty field
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_fields(MAX_FIELDS_PER_BLOCK)
    }

    /// Builder with a different field cap (at least 1)
    #[must_use]
    pub fn with_max_fields(max_fields: usize) -> Self {
        Self {
            blocks: vec![QueryBlock::new()],
            max_fields: max_fields.max(1),
            next_token: 0,
        }
    }

    /// Field cap per block
    #[inline]
    #[must_use]
    pub fn max_fields(&self) -> usize {
        self.max_fields
    }

    /// Blocks in order
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &[QueryBlock] {
        &self.blocks
    }

    /// Look up a block
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&QueryBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Look up a field in any block
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&AttributeField> {
        self.blocks.iter().find_map(|b| b.field(id))
    }

    /// Whether blocks can be removed
    #[inline]
    #[must_use]
    pub fn has_removable_blocks(&self) -> bool {
        self.blocks.len() > 1
    }

    /// Append an empty block
    pub fn add_block(&mut self) -> BlockId {
        let block = QueryBlock::new();
        let id = block.id;
        self.blocks.push(block);
        tracing::debug!("Added search block {}", id);
        id
    }

    /// Remove a block unless it is the last one
    pub fn remove_block(&mut self, id: BlockId) -> bool {
        if self.blocks.len() <= 1 {
            return false;
        }
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        self.blocks.len() != before
    }

    /// Replace a block's free-text term
    pub fn set_term(&mut self, block: BlockId, term: impl Into<String>) -> bool {
        match self.block_mut(block) {
            Some(b) => {
                b.term = term.into();
                true
            }
            None => false,
        }
    }

    /// Whether `field` is the row that may spawn a new one: last in its block
    /// while the block is below the cap
    #[must_use]
    pub fn is_last_field(&self, field: FieldId) -> bool {
        self.blocks.iter().any(|b| {
            b.fields.len() < self.max_fields && b.fields.last().is_some_and(|f| f.id == field)
        })
    }

    /// Whether [`add_field`](Self::add_field) would succeed
    #[must_use]
    pub fn can_add_field(&self, block: BlockId) -> bool {
        self.block(block).is_some_and(|b| {
            b.fields.len() < self.max_fields && b.fields.last().is_some_and(|f| f.name.is_some())
        })
    }

    /// Append an empty field
    ///
    /// Only below the cap and only after a field whose attribute is chosen.
    pub fn add_field(&mut self, block: BlockId) -> Option<FieldId> {
        if !self.can_add_field(block) {
            return None;
        }
        let field = AttributeField::new();
        let id = field.id;
        self.block_mut(block)?.fields.push(field);
        Some(id)
    }

    /// Remove a field unless it is the only one in its block
    pub fn remove_field(&mut self, block: BlockId, field: FieldId) -> bool {
        let Some(b) = self.block_mut(block) else {
            return false;
        };
        if b.fields.len() <= 1 {
            return false;
        }
        let before = b.fields.len();
        b.fields.retain(|f| f.id != field);
        b.fields.len() != before
    }

    /// Choose the attribute of a field
    ///
    /// Clears the value, disables the value selector and returns the ticket
    /// for the domain fetch. Any earlier ticket for this field becomes stale.
    pub fn set_field_name(
        &mut self,
        field: FieldId,
        name: impl Into<String>,
    ) -> Option<DomainTicket> {
        let token = self.next_token;
        let name = name.into();
        let f = self.field_mut(field)?;
        f.name = Some(name.clone());
        f.value = None;
        f.domain = Arc::from(Vec::new());
        f.state = DomainState::Pending;
        f.pending = Some(token);
        self.next_token += 1;
        Some(DomainTicket {
            field,
            attribute: name,
            token,
        })
    }

    /// Deliver the result of a domain fetch
    ///
    /// Returns `false` when the ticket is stale (the field got a newer
    /// attribute, or was removed); the field is left untouched.
    pub fn apply_domain(&mut self, ticket: &DomainTicket, resolution: &DomainResolution) -> bool {
        let Some(f) = self.field_mut(ticket.field) else {
            tracing::debug!("Dropping domain for removed field {}", ticket.field);
            return false;
        };
        if f.pending != Some(ticket.token) {
            tracing::warn!(
                "Discarding stale domain for '{}' on field {}",
                ticket.attribute,
                ticket.field
            );
            return false;
        }
        f.pending = None;
        match &resolution.error {
            None => {
                f.domain = Arc::clone(&resolution.values);
                f.state = DomainState::Ready;
            }
            Some(message) => {
                f.domain = Arc::from(Vec::new());
                f.state = DomainState::Failed(message.clone());
            }
        }
        true
    }

    /// Choose the value of a field
    ///
    /// Ignored unless the domain is resolved and contains `value`.
    pub fn set_field_value(&mut self, field: FieldId, value: &str) -> bool {
        let Some(f) = self.field_mut(field) else {
            return false;
        };
        if f.state != DomainState::Ready || !f.domain.iter().any(|v| v == value) {
            tracing::debug!("Ignoring value '{}' outside the domain of field {}", value, field);
            return false;
        }
        f.value = Some(value.to_string());
        true
    }

    /// Flat query of every block that constrains something
    #[must_use]
    pub fn to_query(&self) -> StructuredQuery {
        StructuredQuery {
            blocks: self
                .blocks
                .iter()
                .map(QueryBlock::query)
                .filter(|q| !q.is_empty())
                .collect(),
        }
    }

    fn block_mut(&mut self, id: BlockId) -> Option<&mut QueryBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut AttributeField> {
        self.blocks
            .iter_mut()
            .find_map(|b| b.fields.iter_mut().find(|f| f.id == id))
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
