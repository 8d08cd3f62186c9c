/// Database-level storage types as seen by dialect callbacks.
///
/// The mapping engine never interprets these; they are produced and
/// consumed by the caller-supplied type codec and carried through the
/// graph unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// A boolean value.
    Boolean,

    /// A signed integer of `n` bytes.
    Integer(u8),

    /// An IEEE-754 floating point number of `n` bytes.
    Float(u8),

    /// Decimal number with optional precision and scale.
    Numeric(Option<(u32, u32)>),

    /// Unconstrained text type.
    Text,

    /// Text type with an explicit maximum length.
    VarChar(u64),

    /// Unconstrained binary type.
    Blob,

    /// A civil date in the Gregorian calendar.
    Date,

    /// An instant in time with fractional seconds precision (0-9 digits).
    Timestamp(u8),

    /// Dialect-specific type carried as its source text.
    Custom(String),
}
