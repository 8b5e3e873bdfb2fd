//! Identifier quoting and literal escaping.

use crate::table::TableRef;

/// Wraps an identifier in double quotes, dropping any quotes it already has.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    let bare: String = name.chars().filter(|c| *c != '"').collect();
    format!("\"{bare}\"")
}

/// Quotes a possibly dotted identifier one segment at a time.
#[must_use]
pub fn quote_identifiers(name: &str) -> String {
    name.split('.')
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// Quotes a table reference. Plain names are split on dots; qualified
/// references keep their delimiter between the quoted parts.
#[must_use]
pub fn quote_table(table: &TableRef) -> String {
    match table {
        TableRef::Name(name) => quote_identifiers(name),
        TableRef::Qualified {
            schema,
            name,
            delimiter,
        } => format!(
            "{}{delimiter}{}",
            quote_identifier(schema),
            quote_identifier(name)
        ),
    }
}

/// Escapes a string literal by doubling single quotes.
#[must_use]
pub fn escape_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Converts a camel-cased name to snake case (`userId` -> `user_id`).
#[must_use]
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        if c == '-' {
            out.push('_');
        } else {
            out.push(c.to_ascii_lowercase());
        }
        prev = Some(c);
    }
    out
}
