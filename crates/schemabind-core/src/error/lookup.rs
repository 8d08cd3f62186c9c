use core::fmt;

/// A named entity lookup that found no match, or more than one.
#[derive(Debug)]
pub(super) struct LookupError {
    /// Entity kind searched for, e.g. `schema`, `table`, `view`.
    pub(super) kind: &'static str,
    pub(super) name: String,
    pub(super) failure: LookupFailure,
}

#[derive(Debug, PartialEq)]
pub(super) enum LookupFailure {
    NotFound,
    Ambiguous,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failure {
            LookupFailure::NotFound => {
                write!(f, "{} {:?} not found", self.kind, self.name)
            }
            LookupFailure::Ambiguous => {
                write!(f, "multiple {}s named {:?}", self.kind, self.name)
            }
        }
    }
}
