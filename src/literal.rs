//! Rendering of arguments as SQL literals and identifiers.

use std::sync::LazyLock;

use regex::Regex;

use crate::arg::Arg;
use crate::connection::EscapeText;
use crate::error::Error;

const IDENT_QUOTE: char = '`';

static NUMERIC_PREFIX: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
});

/// Renders a value as a SQL literal.
///
/// Text goes through the connection escaper and is single-quoted, collections are
/// handed to [`escape_array`].
///
/// # Examples
///
/// ```
/// use sqlx_query_template::literal::escape_value;
/// use sqlx_query_template::{Arg, MySqlEscaper};
///
/// let esc = MySqlEscaper::new();
/// assert_eq!(escape_value(&esc, &Arg::Null)?, "NULL");
/// assert_eq!(escape_value(&esc, &Arg::from("a'b"))?, r"'a\'b'");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn escape_value<E>(escaper: &E, value: &Arg) -> crate::Result<String>
where
    E: EscapeText + ?Sized,
{
    match value {
        Arg::Null => Ok(String::from("NULL")),
        Arg::Bool(b) => Ok(String::from(if *b { "1" } else { "0" })),
        Arg::Int(n) => Ok(n.to_string()),
        Arg::Float(f) => float_literal(*f),
        Arg::Text(s) => Ok(format!("'{}'", escaper.escape_text(s))),
        Arg::List(_) | Arg::Map(_) => escape_array(escaper, value),
        Arg::Skip => Err(Error::UnsupportedValueType(value.kind())),
    }
}

fn float_literal(f: f64) -> crate::Result<String> {
    if f.is_finite() {
        Ok(f.to_string())
    } else {
        Err(Error::NonFiniteFloat(f))
    }
}

/// Quotes a single identifier with backticks, doubling embedded backticks.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] for an empty name or one containing NUL,
/// neither of which MySQL accepts even when quoted.
pub fn escape_identifier_str(name: &str) -> crate::Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidIdentifier(name.to_owned()));
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push(IDENT_QUOTE);
    for c in name.chars() {
        if c == IDENT_QUOTE {
            out.push(IDENT_QUOTE);
        }
        out.push(c);
    }
    out.push(IDENT_QUOTE);
    Ok(out)
}

/// Quotes an identifier, or each identifier of a collection joined with `", "`.
///
/// ```
/// use sqlx_query_template::literal::escape_identifier;
/// use sqlx_query_template::Arg;
///
/// assert_eq!(escape_identifier(&Arg::from("name"))?, "`name`");
/// assert_eq!(escape_identifier(&Arg::from(vec!["id", "name"]))?, "`id`, `name`");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn escape_identifier(ident: &Arg) -> crate::Result<String> {
    match ident {
        Arg::Text(name) => escape_identifier_str(name),
        Arg::Int(n) => escape_identifier_str(&n.to_string()),
        Arg::List(items) => join(items.iter().map(escape_identifier)),
        Arg::Map(pairs) => join(pairs.iter().map(|(_, v)| escape_identifier(v))),
        Arg::Skip | Arg::Null | Arg::Bool(_) | Arg::Float(_) => {
            Err(Error::UnsupportedValueType(ident.kind()))
        }
    }
}

/// Renders a collection: a list as comma-separated literals, a map as
/// comma-separated `` `key` = value `` assignments.
///
/// ```
/// use sqlx_query_template::literal::escape_array;
/// use sqlx_query_template::{Arg, MySqlEscaper};
///
/// let esc = MySqlEscaper::new();
/// assert_eq!(escape_array(&esc, &Arg::from(vec![1, 2, 3]))?, "1, 2, 3");
/// assert_eq!(
///     escape_array(&esc, &Arg::map([("x", 1), ("y", 2)]))?,
///     "`x` = 1, `y` = 2"
/// );
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn escape_array<E>(escaper: &E, array: &Arg) -> crate::Result<String>
where
    E: EscapeText + ?Sized,
{
    match array {
        Arg::List(items) => join(items.iter().map(|v| escape_value(escaper, v))),
        Arg::Map(pairs) => join(pairs.iter().map(|(k, v)| -> crate::Result<String> {
            Ok(format!(
                "{} = {}",
                escape_identifier_str(k)?,
                escape_value(escaper, v)?
            ))
        })),
        _ => Err(Error::UnsupportedValueType(array.kind())),
    }
}

fn join<I>(parts: I) -> crate::Result<String>
where
    I: Iterator<Item = crate::Result<String>>,
{
    Ok(parts.collect::<crate::Result<Vec<_>>>()?.join(", "))
}

/// Loose integer conversion used by `?d`.
///
/// Text contributes its leading numeric prefix (`"12abc"` is 12, `"abc"` is 0),
/// floats truncate toward zero and saturate at the `i64` bounds.
pub fn coerce_int(value: &Arg) -> crate::Result<i64> {
    match value {
        Arg::Null => Ok(0),
        Arg::Bool(b) => Ok(i64::from(*b)),
        Arg::Int(n) => Ok(*n),
        Arg::Float(f) => Ok(truncate(*f)),
        Arg::Text(s) => {
            let prefix = numeric_prefix(s)?;
            if prefix.is_empty() {
                Ok(0)
            } else if prefix.bytes().all(|b| b.is_ascii_digit() || b == b'+' || b == b'-') {
                Ok(prefix.parse::<i64>().unwrap_or_else(|_| {
                    if prefix.starts_with('-') {
                        i64::MIN
                    } else {
                        i64::MAX
                    }
                }))
            } else {
                Ok(truncate(prefix.parse::<f64>().unwrap_or(0.0)))
            }
        }
        Arg::Skip | Arg::List(_) | Arg::Map(_) => Err(Error::UnsupportedValueType(value.kind())),
    }
}

/// Loose float conversion used by `?f`.
pub fn coerce_float(value: &Arg) -> crate::Result<f64> {
    match value {
        Arg::Null => Ok(0.0),
        Arg::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        #[allow(clippy::cast_precision_loss)]
        Arg::Int(n) => Ok(*n as f64),
        Arg::Float(f) => Ok(*f),
        Arg::Text(s) => Ok(numeric_prefix(s)?.parse::<f64>().unwrap_or(0.0)),
        Arg::Skip | Arg::List(_) | Arg::Map(_) => Err(Error::UnsupportedValueType(value.kind())),
    }
}

// `as` saturates at the bounds and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

fn numeric_prefix(s: &str) -> crate::Result<&str> {
    let regex = NUMERIC_PREFIX
        .as_ref()
        .map_err(|e| Error::Parse(e.clone()))?;
    let trimmed = s.trim_start();
    Ok(regex.find(trimmed).map_or("", |m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MySqlEscaper;

    fn value(arg: Arg) -> String {
        escape_value(&MySqlEscaper::new(), &arg).unwrap()
    }

    #[test]
    fn test_escape_value_scalars() {
        assert_eq!(value(Arg::Null), "NULL");
        assert_eq!(value(Arg::Bool(true)), "1");
        assert_eq!(value(Arg::Bool(false)), "0");
        assert_eq!(value(Arg::Int(-42)), "-42");
        assert_eq!(value(Arg::Float(1.5)), "1.5");
        assert_eq!(value(Arg::Float(3.0)), "3");
    }

    #[test]
    fn test_escape_value_text_is_quoted_and_escaped() {
        assert_eq!(value(Arg::from("Jack")), "'Jack'");
        assert_eq!(value(Arg::from("a'b")), r"'a\'b'");
        assert_eq!(value(Arg::from("")), "''");
    }

    #[test]
    fn test_escape_value_rejects_non_finite() {
        let esc = MySqlEscaper::new();
        assert!(matches!(
            escape_value(&esc, &Arg::Float(f64::NAN)),
            Err(Error::NonFiniteFloat(_))
        ));
        assert!(matches!(
            escape_value(&esc, &Arg::Float(f64::INFINITY)),
            Err(Error::NonFiniteFloat(_))
        ));
    }

    #[test]
    fn test_escape_value_rejects_nested_skip() {
        let esc = MySqlEscaper::new();
        assert!(matches!(
            escape_value(&esc, &Arg::List(vec![Arg::Int(1), Arg::Skip])),
            Err(Error::UnsupportedValueType("skip"))
        ));
    }

    #[test]
    fn test_escape_value_delegates_collections() {
        assert_eq!(value(Arg::from(vec!["a", "b"])), "'a', 'b'");
    }

    #[test]
    fn test_escape_identifier_doubles_backticks() {
        assert_eq!(escape_identifier_str("we`ird").unwrap(), "`we``ird`");
    }

    #[test]
    fn test_escape_identifier_nested_lists() {
        let ident = Arg::List(vec![
            Arg::from("a"),
            Arg::List(vec![Arg::from("b"), Arg::from("c")]),
        ]);
        assert_eq!(escape_identifier(&ident).unwrap(), "`a`, `b`, `c`");
    }

    #[test]
    fn test_escape_identifier_accepts_int() {
        assert_eq!(escape_identifier(&Arg::Int(5)).unwrap(), "`5`");
    }

    #[test]
    fn test_escape_identifier_rejects_bad_names() {
        assert!(matches!(
            escape_identifier(&Arg::from("")),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            escape_identifier(&Arg::from("a\0b")),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            escape_identifier(&Arg::Null),
            Err(Error::UnsupportedValueType("null"))
        ));
    }

    #[test]
    fn test_escape_array_list_and_map() {
        let esc = MySqlEscaper::new();
        assert_eq!(
            escape_array(&esc, &Arg::from(vec![1, 2, 3])).unwrap(),
            "1, 2, 3"
        );
        let set = Arg::map([
            ("name", Arg::from("Jack")),
            ("email", Arg::Null),
            ("active", Arg::Bool(true)),
        ]);
        assert_eq!(
            escape_array(&esc, &set).unwrap(),
            "`name` = 'Jack', `email` = NULL, `active` = 1"
        );
    }

    #[test]
    fn test_escape_array_empty_list() {
        let esc = MySqlEscaper::new();
        assert_eq!(escape_array(&esc, &Arg::List(Vec::new())).unwrap(), "");
    }

    #[test]
    fn test_escape_array_map_key_is_escaped_once() {
        let esc = MySqlEscaper::new();
        let set = Arg::map([("a`b", "it's")]);
        assert_eq!(escape_array(&esc, &set).unwrap(), r"`a``b` = 'it\'s'");
    }

    #[test]
    fn test_escape_array_rejects_scalar() {
        let esc = MySqlEscaper::new();
        assert!(matches!(
            escape_array(&esc, &Arg::Int(1)),
            Err(Error::UnsupportedValueType("int"))
        ));
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int(&Arg::Null).unwrap(), 0);
        assert_eq!(coerce_int(&Arg::Bool(true)).unwrap(), 1);
        assert_eq!(coerce_int(&Arg::Float(-2.9)).unwrap(), -2);
        assert_eq!(coerce_int(&Arg::Float(f64::NAN)).unwrap(), 0);
        assert_eq!(coerce_int(&Arg::from("12abc")).unwrap(), 12);
        assert_eq!(coerce_int(&Arg::from("  -7")).unwrap(), -7);
        assert_eq!(coerce_int(&Arg::from("1e3")).unwrap(), 1000);
        assert_eq!(coerce_int(&Arg::from("3.99")).unwrap(), 3);
        assert_eq!(coerce_int(&Arg::from("abc")).unwrap(), 0);
        assert_eq!(
            coerce_int(&Arg::from("99999999999999999999")).unwrap(),
            i64::MAX
        );
        assert!(coerce_int(&Arg::List(Vec::new())).is_err());
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float(&Arg::Int(2)).unwrap(), 2.0);
        assert_eq!(coerce_float(&Arg::from("2.5kg")).unwrap(), 2.5);
        assert_eq!(coerce_float(&Arg::from(".5")).unwrap(), 0.5);
        assert_eq!(coerce_float(&Arg::from("x")).unwrap(), 0.0);
        assert!(coerce_float(&Arg::map([("a", 1)])).is_err());
    }
}
