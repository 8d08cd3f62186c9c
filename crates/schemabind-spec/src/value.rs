use crate::reference::Ref;
use schemabind_core::{Error, Result};

/// A typed configuration value carried by an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),

    /// Unevaluated dialect-specific expression text, carried verbatim.
    RawExpr(String),

    Ref(Ref),

    List(Vec<Value>),
}

impl Value {
    /// A short name for the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::RawExpr(_) => "raw expression",
            Value::Ref(_) => "reference",
            Value::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A keyed attribute on a declarative entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn refs(key: impl Into<String>, refs: impl IntoIterator<Item = Ref>) -> Self {
        Self::new(key, Value::List(refs.into_iter().map(Value::Ref).collect()))
    }

    /// The attribute's string value.
    pub fn as_str(&self) -> Result<&str> {
        self.value.as_str().ok_or_else(|| {
            Error::conversion(format!(
                "attribute {:?}: expected a string value, got {}",
                self.key,
                self.value.kind()
            ))
        })
    }

    /// The references carried by the attribute's list value.
    pub fn as_refs(&self) -> Result<Vec<&Ref>> {
        let Value::List(items) = &self.value else {
            return Err(Error::conversion(format!(
                "attribute {:?}: expected a list of references, got {}",
                self.key,
                self.value.kind()
            )));
        };
        items
            .iter()
            .map(|item| match item {
                Value::Ref(r) => Ok(r),
                other => Err(Error::conversion(format!(
                    "attribute {:?}: expected a reference, got {}",
                    self.key,
                    other.kind()
                ))),
            })
            .collect()
    }
}

/// Read access to an entity's attribute bag.
pub trait Attrs {
    fn attrs(&self) -> &[Attr];

    fn attr(&self, key: &str) -> Option<&Attr> {
        self.attrs().iter().find(|attr| attr.key == key)
    }
}
