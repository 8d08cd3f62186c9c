use super::TableId;
use crate::{Error, Result};

use std::fmt;

/// A foreign key constraint.
///
/// Column references are ordinals: `columns` into the owning table,
/// `ref_columns` into the referenced table. Both lists have equal length
/// and all referenced columns belong to `ref_table`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKey {
    /// Constraint name.
    pub symbol: String,

    /// The owning table.
    pub table: TableId,

    /// Ordinals of the referencing columns in the owning table.
    pub columns: Vec<usize>,

    /// The referenced table. Non-owning.
    pub ref_table: TableId,

    /// Ordinals of the referenced columns in the referenced table.
    pub ref_columns: Vec<usize>,

    pub on_update: Option<RefAction>,

    pub on_delete: Option<RefAction>,
}

/// Referential action taken when a referenced row is updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl RefAction {
    pub const ALL: [RefAction; 5] = [
        RefAction::NoAction,
        RefAction::Restrict,
        RefAction::Cascade,
        RefAction::SetNull,
        RefAction::SetDefault,
    ];

    /// Canonical SQL spelling, e.g. `NO ACTION`.
    pub fn as_str(self) -> &'static str {
        match self {
            RefAction::NoAction => "NO ACTION",
            RefAction::Restrict => "RESTRICT",
            RefAction::Cascade => "CASCADE",
            RefAction::SetNull => "SET NULL",
            RefAction::SetDefault => "SET DEFAULT",
        }
    }

    /// Identifier-safe spelling with each space replaced by an underscore.
    pub fn var(self) -> &'static str {
        match self {
            RefAction::NoAction => "NO_ACTION",
            RefAction::Restrict => "RESTRICT",
            RefAction::Cascade => "CASCADE",
            RefAction::SetNull => "SET_NULL",
            RefAction::SetDefault => "SET_DEFAULT",
        }
    }

    /// Decodes the identifier-safe spelling by reversing the substitution.
    pub fn from_var(token: &str) -> Result<Self> {
        let spelled = token.replace('_', " ");
        RefAction::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(&spelled))
            .ok_or_else(|| {
                Error::conversion(format!("unsupported referential action {token:?}"))
            })
    }
}

impl fmt::Display for RefAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
