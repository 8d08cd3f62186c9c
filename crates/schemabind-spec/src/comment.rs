//! Copies the single well-known `comment` attribute between the
//! declarative and graph representations. Absence on one side implies
//! absence on the other; at most one comment per entity.

use crate::value::{Attr, Attrs};
use schemabind_core::Result;

/// Reads the `comment` attribute from a declarative entity.
pub fn from_attrs<A: Attrs + ?Sized>(spec: &A) -> Result<Option<String>> {
    match spec.attr("comment") {
        Some(attr) => Ok(Some(attr.as_str()?.to_string())),
        None => Ok(None),
    }
}

/// Emits the `comment` attribute when the entity carries one.
pub fn to_attrs(comment: Option<&str>, attrs: &mut Vec<Attr>) {
    if let Some(text) = comment {
        attrs.push(Attr::string("comment", text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::SchemaSpec;

    #[test]
    fn absent_on_one_side_means_absent_on_the_other() {
        let spec = SchemaSpec::default();
        assert_eq!(from_attrs(&spec).unwrap(), None);

        let mut attrs = vec![];
        to_attrs(None, &mut attrs);
        assert!(attrs.is_empty());
    }

    #[test]
    fn copies_text_both_ways() {
        let spec = SchemaSpec {
            name: "public".into(),
            attrs: vec![Attr::string("comment", "main schema")],
        };
        assert_eq!(from_attrs(&spec).unwrap().as_deref(), Some("main schema"));

        let mut attrs = vec![];
        to_attrs(Some("main schema"), &mut attrs);
        assert_eq!(attrs, vec![Attr::string("comment", "main schema")]);
    }
}
