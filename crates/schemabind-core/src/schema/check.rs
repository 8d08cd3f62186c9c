/// A check constraint. The expression is carried verbatim and never
/// validated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Check {
    pub name: String,

    pub expr: String,
}
