use super::Expr;

/// A table or view index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    pub name: String,

    /// When `true`, indexed entries are unique.
    pub unique: bool,

    /// Key parts in order.
    pub parts: Vec<IndexPart>,

    pub comment: Option<String>,
}

/// A single key part of an index or primary key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPart {
    /// Position of the part within the key, starting at zero.
    pub seq_no: usize,

    /// When `true`, the part is ordered descending.
    pub desc: bool,

    pub key: PartKey,
}

/// What a key part indexes: a column of the owning table or view, or a raw
/// expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartKey {
    /// Ordinal of a column in the owning table or view.
    Column(usize),

    Expr(Expr),
}

impl IndexPart {
    pub fn column(seq_no: usize, ordinal: usize) -> Self {
        Self {
            seq_no,
            desc: false,
            key: PartKey::Column(ordinal),
        }
    }

    pub fn expr(seq_no: usize, expr: Expr) -> Self {
        Self {
            seq_no,
            desc: false,
            key: PartKey::Expr(expr),
        }
    }
}
