use super::{Expr, Type};

/// A table or view column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub name: String,

    /// The dialect storage type, produced by the dialect's type codec.
    pub ty: Type,

    pub nullable: bool,

    pub default: Option<Expr>,

    pub generated: Option<GeneratedExpr>,

    pub comment: Option<String>,
}

/// A generated-column expression and its storage kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedExpr {
    pub expr: String,

    /// Storage kind token, e.g. `STORED` or `VIRTUAL`. Dialect-specific.
    pub ty: String,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
            generated: None,
            comment: None,
        }
    }
}
