//! Bidirectional conversion between configuration values and default
//! expressions.
//!
//! Decode and encode are intentionally asymmetric: a literal whose text
//! carries a recognized hex/binary/bit-string prefix is reclassified as a
//! raw expression on encode. The prefix list and the check order below are
//! load-bearing: reordering them changes how boundary strings classify
//! (e.g. a quoted `'true'` stays a string while a bare `TRUE` becomes a
//! bool).

use crate::value::Value;
use schemabind_core::schema::Expr;
use schemabind_core::{Error, Result};

/// Literal prefixes that force re-emission as a raw expression.
const RAW_PREFIXES: [&str; 8] = ["0x", "0X", "0b", "0B", "b'", "B'", "x'", "X'"];

/// Decodes a configuration value into a default expression. `None` means
/// no default.
pub fn decode(value: Option<&Value>) -> Result<Option<Expr>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let expr = match value {
        Value::String(s) => Expr::Literal(s.clone()),
        Value::Int(i) => Expr::Literal(i.to_string()),
        Value::Float(f) => Expr::Literal(f.to_string()),
        Value::Bool(b) => Expr::Literal(b.to_string()),
        Value::RawExpr(x) => Expr::Raw(x.clone()),
        other => {
            return Err(Error::conversion(format!(
                "unsupported value kind for default: {}",
                other.kind()
            )))
        }
    };
    Ok(Some(expr))
}

/// Encodes an expression back into a configuration value.
pub fn encode(expr: &Expr) -> Result<Value> {
    let text = match expr {
        Expr::Raw(x) => return Ok(Value::RawExpr(x.clone())),
        Expr::Literal(text) => text,
    };
    if RAW_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        return Ok(Value::RawExpr(text.clone()));
    }
    if is_quoted(text, ['\'', '"']) {
        return Ok(Value::String(unquote(text)));
    }
    if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(text.eq_ignore_ascii_case("true")));
    }
    if text.contains('.') {
        let f = text.parse::<f64>().map_err(|_| {
            Error::conversion(format!("invalid numeric literal {text:?}"))
        })?;
        return Ok(Value::Float(f));
    }
    if is_integer_literal(text) {
        let i = text.parse::<i64>().map_err(|_| {
            Error::conversion(format!("integer literal {text:?} out of range"))
        })?;
        return Ok(Value::Int(i));
    }
    Err(Error::conversion(format!(
        "unsupported literal value {text:?}"
    )))
}

fn is_quoted(s: &str, quotes: [char; 2]) -> bool {
    s.len() >= 2
        && quotes
            .iter()
            .any(|&quote| s.starts_with(quote) && s.ends_with(quote))
}

/// Strips the outer quote pair and collapses doubled inner quotes of the
/// same kind.
fn unquote(s: &str) -> String {
    let quote = &s[..1];
    s[1..s.len() - 1].replace(&format!("{quote}{quote}"), quote)
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
