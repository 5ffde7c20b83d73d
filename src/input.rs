//! Parsing of the free-text fields students type into the tabs and shell.

use crate::{
    error::{DiscreteError, Result},
    set_ops::FiniteSet,
};

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn parse_element(token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| DiscreteError::InvalidElement(token.to_string()))
}

/// Comma- or whitespace-separated integers, e.g. `"64, 34, 25"`.
pub fn parse_sequence(text: &str) -> Result<Vec<i64>> {
    tokens(text).map(parse_element).collect()
}

/// Like [`parse_sequence`], with optional surrounding braces. Repeated
/// elements collapse into one.
pub fn parse_set(text: &str) -> Result<FiniteSet<i64>> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    tokens(inner).map(parse_element).collect()
}

pub fn parse_target(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DiscreteError::EmptyInput("missing target value".to_string()));
    }
    parse_element(trimmed)
}
