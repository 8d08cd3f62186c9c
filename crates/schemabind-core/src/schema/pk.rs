use super::IndexPart;

/// An unnamed unique key over columns of the owning table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimaryKey {
    /// Key parts in order.
    pub parts: Vec<IndexPart>,
}
