//! Column-change requests and the text surgery on definition strings.
//!
//! A definition is the serialized form of a column's attributes, e.g.
//! `INTEGER NOT NULL DEFAULT 0 UNIQUE REFERENCES "accounts" ("id")`.
//! Each helper pulls one clause out and returns what is left, so the
//! order in which the generator calls them matters.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeDefinition;
use crate::error::{DdlError, Result};

static DEFAULT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bDEFAULT\s+").expect("valid DEFAULT regex"));

static TRAILING_UNIQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\bUNIQUE;*\s*$").expect("valid UNIQUE regex"));

/// Clause keywords that end a `DEFAULT` value.
const DEFAULT_TERMINATORS: [&str; 3] = ["UNIQUE", "PRIMARY KEY", "REFERENCES"];

/// One column of a change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    /// Column name.
    pub name: String,
    /// Serialized attribute definition.
    pub definition: String,
    /// The column's existing type. A definition that repeats it is not a type change.
    #[serde(default)]
    pub current_type: Option<String>,
}

impl ColumnChange {
    /// Creates a change from a raw definition string.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            current_type: None,
        }
    }

    /// Creates a change from structured attributes.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedDataType`] when the attribute's type
    /// cannot be rendered.
    pub fn from_attribute(name: impl Into<String>, attribute: &AttributeDefinition) -> Result<Self> {
        Ok(Self::new(name, attribute.to_definition()?))
    }

    /// Declares the column's existing type.
    #[must_use]
    pub fn current_type(mut self, sql_type: impl Into<String>) -> Self {
        self.current_type = Some(sql_type.into());
        self
    }
}

/// Joins two pieces of a definition with a single space, trimming only
/// where they meet. Whitespace inside the pieces is left alone.
pub(crate) fn splice(before: &str, after: &str) -> String {
    let before = before.trim();
    let after = after.trim();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}

/// Removes the first occurrence of `token`, if present.
pub(crate) fn remove_first(definition: &str, token: &str) -> Option<String> {
    definition
        .find(token)
        .map(|pos| splice(&definition[..pos], &definition[pos + token.len()..]))
}

/// Removes the first `NOT NULL`, if present.
pub(crate) fn strip_not_null(definition: &str) -> Option<String> {
    remove_first(definition, "NOT NULL")
}

/// Splits out the `DEFAULT` clause, returning `(value, residual)`.
///
/// Only the part before `REFERENCES` is searched, so `ON DELETE SET DEFAULT`
/// is never mistaken for a default. The value runs until the next clause
/// keyword or `;` outside quotes and parentheses.
pub(crate) fn split_default(definition: &str) -> Option<(String, String)> {
    let searchable = definition
        .find("REFERENCES")
        .map_or(definition, |pos| &definition[..pos]);
    let keyword = DEFAULT_KEYWORD.find(searchable)?;
    let value_start = keyword.end();
    let value_end = value_start + default_value_len(&definition[value_start..]);

    let value = definition[value_start..value_end].trim().to_string();
    let residual = splice(&definition[..keyword.start()], &definition[value_end..]);
    Some((value, residual))
}

fn default_value_len(rest: &str) -> usize {
    let mut in_quote = false;
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => depth = depth.saturating_sub(1),
            ';' if !in_quote && depth == 0 => return i,
            c if c.is_whitespace() && !in_quote && depth == 0 => {
                let next = rest[i..].trim_start();
                if DEFAULT_TERMINATORS
                    .iter()
                    .any(|kw| starts_with_keyword(next, kw))
                {
                    return i;
                }
            }
            _ => {}
        }
    }
    rest.len()
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|after| after.is_empty() || after.starts_with([' ', ';', '\t', '\n']))
}

/// Length of a leading `ENUM(...)` clause, honouring quoted labels.
///
/// Returns `Ok(None)` when the definition is not an enum.
pub(crate) fn enum_clause_len(column: &str, definition: &str) -> Result<Option<usize>> {
    let Some(rest) = definition.strip_prefix("ENUM(") else {
        return Ok(None);
    };
    let mut in_quote = false;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some("ENUM(".len() + i + 1));
                }
            }
            _ => {}
        }
    }
    Err(DdlError::MalformedDefinition {
        column: column.to_string(),
        message: "unterminated ENUM(...) clause".to_string(),
    })
}

/// Removes a `UNIQUE` (optionally followed by semicolons) that ends the
/// definition or immediately precedes its `REFERENCES` clause.
pub(crate) fn strip_unique(definition: &str) -> Option<String> {
    let (head, tail) = definition
        .find("REFERENCES")
        .map_or((definition, ""), |pos| definition.split_at(pos));
    TRAILING_UNIQUE
        .is_match(head)
        .then(|| splice(&TRAILING_UNIQUE.replace(head, ""), tail))
}

/// The `REFERENCES ...` tail, without trailing semicolons.
pub(crate) fn references_clause(definition: &str) -> Option<&str> {
    definition
        .find("REFERENCES")
        .map(|pos| definition[pos..].trim_end().trim_end_matches(';').trim_end())
}

/// Whether a residual type clause names the type the column already has.
///
/// `schema` is the schema enum types of the table live in; a residual
/// qualified with it still matches an unqualified `current_type`.
pub(crate) fn is_current_type(residual: &str, current_type: Option<&str>, schema: &str) -> bool {
    let residual = normalize_type(residual);
    if residual.is_empty() {
        return true;
    }
    let Some(current) = current_type.map(normalize_type) else {
        return false;
    };
    residual == current || residual == format!("{}.{current}", normalize_type(schema))
}

fn normalize_type(sql_type: &str) -> String {
    sql_type
        .replace('"', "")
        .trim_end_matches(';')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
