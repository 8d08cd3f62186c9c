mod error;
pub use error::Error;

pub mod schema;
pub use schema::Realm;

/// A Result type alias that uses schemabind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
