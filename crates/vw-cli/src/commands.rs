//! Subcommand implementations
//!
//! Each command returns the JSON it would print so it can be tested without
//! capturing stdout.

use crate::block_arg::BlockArg;
use crate::cli::{QueryArgs, RenderArgs, SettingsArgs};
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use vw_core::{CatalogState, JsonCatalogSource, ReaderConfig, ReaderSession, SearchForm};
use vw_model::Document;
use vw_render::{document_title, export_layers, layer_switches};
use vw_search::{SearchRequest, SearchScope, StaticDomainSource};
use vw_settings::{keys, FileBackend, PersistentSettingsStore, SettingsRecord};

/// Reader configuration from `--config`, or defaults
pub fn load_config(path: Option<&Path>) -> Result<ReaderConfig> {
    match path {
        Some(path) => ReaderConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ReaderConfig::default()),
    }
}

async fn start_session(session: &mut ReaderSession, catalog: &Path) -> Result<()> {
    let source = JsonCatalogSource::file(catalog);
    if let CatalogState::Failed(message) = session.start(&source).await {
        bail!("layer catalog {}: {}", catalog.display(), message);
    }
    Ok(())
}

/// `vw render`
pub async fn run_render(config: ReaderConfig, args: &RenderArgs) -> Result<Value> {
    let mut session = ReaderSession::from_config(config);
    start_session(&mut session, &args.catalog).await?;

    for id in &args.show {
        session.toggle_layer(id.as_str(), true);
    }
    for id in &args.hide {
        session.toggle_layer(id.as_str(), false);
    }
    session.set_condensed(args.condensed);

    let raw = std::fs::read_to_string(&args.document)
        .with_context(|| format!("reading document {}", args.document.display()))?;
    let document: Document = serde_json::from_str(&raw)
        .with_context(|| format!("parsing document {}", args.document.display()))?;

    let visibility = session.visibility();
    let catalog = visibility.catalog();
    Ok(json!({
        "title": document_title(&document),
        "plan": session.render(&document),
        "switches": layer_switches(catalog, visibility, &document),
        "export": export_layers(catalog, visibility),
        "shownCategories": visibility.shown_category_count(),
    }))
}

/// `vw settings`
pub async fn run_settings(config: ReaderConfig, args: &SettingsArgs) -> Result<Value> {
    let config = config.with_settings_path(&args.path);
    let record = match &args.catalog {
        Some(catalog) => {
            let mut session = ReaderSession::from_config(config);
            start_session(&mut session, catalog).await?;
            session.settings().record().clone()
        }
        None => {
            let mut store = PersistentSettingsStore::new(Arc::new(FileBackend::new(&args.path)));
            let defaults = SettingsRecord::standard()
                .with(keys::TRANSLITERATION, config.default_transliteration.as_str());
            store.load(defaults).clone()
        }
    };
    Ok(serde_json::to_value(&record)?)
}

/// `vw query`
pub async fn run_query(config: ReaderConfig, args: &QueryArgs) -> Result<Value> {
    let transliteration = args
        .transliteration
        .clone()
        .unwrap_or_else(|| config.default_transliteration.clone());

    if let Some(input) = &args.smart {
        return Ok(serde_json::to_value(SearchRequest::smart(input, transliteration))?);
    }

    let raw = std::fs::read_to_string(&args.domains)
        .with_context(|| format!("reading domains {}", args.domains.display()))?;
    let source = StaticDomainSource::from_json(&raw)
        .with_context(|| format!("parsing domains {}", args.domains.display()))?;
    let form = SearchForm::from_config(&config, Arc::new(source));

    for (i, block) in args.blocks.iter().enumerate() {
        fill_block(&form, i, block).await;
    }

    let request = form.request(SearchScope::new(args.book, args.hymn), &transliteration);
    if request.is_empty() {
        tracing::warn!("Search request constrains nothing");
    }
    Ok(serde_json::to_value(request)?)
}

/// Replay one `--block` through the form the way a user would fill it in
async fn fill_block(form: &SearchForm, index: usize, arg: &BlockArg) {
    let block = if index == 0 {
        form.edit(|b| b.blocks()[0].id())
    } else {
        form.add_block()
    };
    form.set_term(block, &arg.term);

    for (position, (name, value)) in arg.attributes.iter().enumerate() {
        let field = if position == 0 {
            form.edit(|b| b.block(block).map(|blk| blk.fields()[0].id()))
        } else {
            form.edit(|b| b.add_field(block))
        };
        let Some(field) = field else {
            tracing::warn!("Block {} is full, dropping {}={}", index + 1, name, value);
            continue;
        };
        if !form.select_attribute(field, name).await {
            tracing::warn!("Attribute '{}' superseded before its values arrived", name);
            continue;
        }
        if !form.select_value(field, value) {
            tracing::warn!("'{}' is not a value of '{}', dropped", value, name);
        }
    }
}
