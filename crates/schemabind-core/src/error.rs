mod conversion;
mod lookup;
mod reference;
mod shape;

use conversion::ConversionError;
use lookup::{LookupError, LookupFailure};
use reference::ReferenceError;
use shape::ShapeError;

/// An error produced while building or emitting a schema graph.
///
/// Every failure in a multi-step operation aborts it immediately; outer
/// steps wrap the error with enough context (entity kind, name, field) to
/// localize the offending declaration.
pub struct Error {
    inner: Box<ErrorInner>,
}

struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    /// A malformed or unresolvable reference.
    Reference(ReferenceError),
    /// A named schema, table, or view was not found, or found more than
    /// once.
    Lookup(LookupError),
    /// A required or mutually-exclusive field violation.
    Shape(ShapeError),
    /// A literal or expression value that cannot be converted.
    Conversion(ConversionError),
    /// An opaque error from a caller-supplied dialect callback, propagated
    /// unchanged.
    Dialect(anyhow::Error),
    /// A context frame wrapping an underlying cause.
    Context(String),
}

impl Error {
    pub fn reference(reason: impl Into<String>) -> Self {
        ErrorKind::Reference(ReferenceError {
            reason: reason.into(),
        })
        .into()
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        ErrorKind::Lookup(LookupError {
            kind,
            name: name.into(),
            failure: LookupFailure::NotFound,
        })
        .into()
    }

    pub fn ambiguous(kind: &'static str, name: impl Into<String>) -> Self {
        ErrorKind::Lookup(LookupError {
            kind,
            name: name.into(),
            failure: LookupFailure::Ambiguous,
        })
        .into()
    }

    pub fn shape(message: impl Into<String>) -> Self {
        ErrorKind::Shape(ShapeError {
            message: message.into(),
        })
        .into()
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        ErrorKind::Conversion(ConversionError {
            message: message.into(),
        })
        .into()
    }

    /// Wraps this error with a context frame.
    ///
    /// Context is displayed outermost first, ending with the root cause.
    pub fn context(self, frame: impl Into<String>) -> Self {
        Error {
            inner: Box::new(ErrorInner {
                kind: ErrorKind::Context(frame.into()),
                cause: Some(self),
            }),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.root_kind(), ErrorKind::Reference(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_kind(),
            ErrorKind::Lookup(LookupError {
                failure: LookupFailure::NotFound,
                ..
            })
        )
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self.root_kind(),
            ErrorKind::Lookup(LookupError {
                failure: LookupFailure::Ambiguous,
                ..
            })
        )
    }

    pub fn is_shape(&self) -> bool {
        matches!(self.root_kind(), ErrorKind::Shape(_))
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self.root_kind(), ErrorKind::Conversion(_))
    }

    pub fn is_dialect(&self) -> bool {
        matches!(self.root_kind(), ErrorKind::Dialect(_))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = Some(self);
        core::iter::from_fn(move || {
            let next = err?;
            err = next.inner.cause.as_ref();
            Some(next)
        })
    }

    /// The innermost error kind, looking through context frames.
    fn root_kind(&self) -> &ErrorKind {
        &self.chain().last().unwrap().inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner.kind {
            ErrorKind::Dialect(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(&err.inner.kind, f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Reference(err) => core::fmt::Display::fmt(err, f),
            Lookup(err) => core::fmt::Display::fmt(err, f),
            Shape(err) => core::fmt::Display::fmt(err, f),
            Conversion(err) => core::fmt::Display::fmt(err, f),
            Dialect(err) => core::fmt::Display::fmt(err, f),
            Context(frame) => f.write_str(frame),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            inner: Box::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::from(ErrorKind::Dialect(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn context_chain_display() {
        let err = Error::not_found("table", "users")
            .context("cannot resolve reference")
            .context("cannot convert view \"v\"");

        assert_eq!(
            err.to_string(),
            "cannot convert view \"v\": cannot resolve reference: table \"users\" not found"
        );
    }

    #[test]
    fn predicates_look_through_context() {
        let err = Error::ambiguous("view", "v").context("outer");
        assert!(err.is_ambiguous());
        assert!(!err.is_not_found());

        let err = Error::shape("missing definition").context("outer");
        assert!(err.is_shape());
    }

    #[test]
    fn anyhow_bridge() {
        let err: Error = anyhow::anyhow!("unsupported storage type").into();
        assert!(err.is_dialect());
        assert_eq!(err.to_string(), "unsupported storage type");
    }

    #[test]
    fn lookup_display() {
        assert_eq!(
            Error::not_found("schema", "public").to_string(),
            "schema \"public\" not found"
        );
        assert_eq!(
            Error::ambiguous("table", "t").to_string(),
            "multiple tables named \"t\""
        );
    }
}
