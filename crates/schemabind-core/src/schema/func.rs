/// A stored function. The body is dialect-specific and carried verbatim.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Func {
    pub name: String,

    pub body: Option<String>,

    pub comment: Option<String>,
}

/// A stored procedure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proc {
    pub name: String,

    pub body: Option<String>,

    pub comment: Option<String>,
}
