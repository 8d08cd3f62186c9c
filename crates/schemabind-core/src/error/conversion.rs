use core::fmt;

/// A literal or expression value that cannot be decoded into an expression
/// or encoded back into a configuration value.
#[derive(Debug)]
pub(super) struct ConversionError {
    pub(super) message: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
