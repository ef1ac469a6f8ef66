//! `--block` argument syntax
//!
//! `term:name=value,name=value`. The term may be empty (`:casus=nom`); without
//! a colon the whole argument is the term.

use std::str::FromStr;

/// One search block given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockArg {
    /// Free-text term
    pub term: String,
    /// `(attribute, value)` pairs in order
    pub attributes: Vec<(String, String)>,
}

/// Malformed `--block` argument
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected name=value, got '{0}'")]
pub struct BlockArgError(String);

impl FromStr for BlockArg {
    type Err = BlockArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((term, rest)) = s.split_once(':') else {
            return Ok(Self {
                term: s.to_string(),
                attributes: Vec::new(),
            });
        };

        let attributes = rest
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
                    Ok((name.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(BlockArgError(pair.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            term: term.to_string(),
            attributes,
        })
    }
}
