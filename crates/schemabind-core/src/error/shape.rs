use core::fmt;

/// A required or mutually-exclusive field violation in a declaration, e.g.
/// an index declaring both a column list and explicit parts, or a foreign
/// key whose referencing and referenced column counts differ.
#[derive(Debug)]
pub(super) struct ShapeError {
    pub(super) message: String,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
