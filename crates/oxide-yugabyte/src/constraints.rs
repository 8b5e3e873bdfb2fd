//! Deferred constraint checking.

use serde::{Deserialize, Serialize};

use crate::quote::quote_identifier;

/// Constraints a `SET CONSTRAINTS` statement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintTarget {
    /// Every deferrable constraint.
    #[default]
    All,
    /// The listed constraints.
    Named(Vec<String>),
}

impl ConstraintTarget {
    /// Renders the target list.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::All => "ALL".to_string(),
            Self::Named(names) => names
                .iter()
                .map(|name| quote_identifier(name))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// When constraint checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintMode {
    /// At commit.
    Deferred,
    /// After each statement.
    Immediate,
}

impl ConstraintMode {
    /// The `SET CONSTRAINTS` statement this mode corresponds to.
    #[must_use]
    pub fn statement(self, target: &ConstraintTarget) -> String {
        let mode = match self {
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
        };
        format!("SET CONSTRAINTS {} {mode}", target.to_sql())
    }
}
