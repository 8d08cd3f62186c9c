/// A default or index expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A literal value carried as text.
    Literal(String),

    /// Unevaluated dialect-specific text carried through untouched.
    Raw(String),
}
