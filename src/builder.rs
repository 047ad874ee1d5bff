use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::arg::{Arg, SKIP_MARKER};
use crate::connection::EscapeText;
use crate::error::Error;
use crate::literal::{coerce_float, coerce_int, escape_array, escape_identifier, escape_value};

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\?([\p{L}#])?"));

fn placeholder_regex() -> crate::Result<&'static Regex> {
    PLACEHOLDER.as_ref().map_err(|e| Error::Parse(e.clone()))
}

/// One piece of a substituted template.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<'t> {
    /// Template text, copied verbatim. `offset` is its byte position in the template.
    Text { text: &'t str, offset: usize },
    /// A rendered literal or identifier. Never scanned for braces.
    Literal(String),
    /// A placeholder whose argument was the skip sentinel.
    Skip { offset: usize },
}

/// Output of the substitution pass: the template with every placeholder replaced.
///
/// Its `Display` form is the intermediate query string, with skipped placeholders
/// written as [`SKIP_MARKER`].
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution<'t> {
    fragments: Vec<Fragment<'t>>,
}

impl<'t> Substitution<'t> {
    /// The fragments in template order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment<'t>] {
        &self.fragments
    }

    /// Whether any placeholder was skipped.
    #[must_use]
    pub fn has_skips(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f, Fragment::Skip { .. }))
    }

    pub(crate) fn from_fragments(fragments: Vec<Fragment<'t>>) -> Self {
        Self { fragments }
    }
}

impl fmt::Display for Substitution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            match fragment {
                Fragment::Text { text, .. } => f.write_str(text)?,
                Fragment::Literal(literal) => f.write_str(literal)?,
                Fragment::Skip { .. } => f.write_str(SKIP_MARKER)?,
            }
        }
        Ok(())
    }
}

/// Counts the placeholders in a template.
///
/// # Examples
///
/// ```
/// use sqlx_query_template::builder::count_placeholders;
///
/// assert_eq!(count_placeholders("SELECT ?# FROM t WHERE id IN (?a) AND x = ?d")?, 3);
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn count_placeholders(template: &str) -> crate::Result<usize> {
    Ok(placeholder_regex()?.find_iter(template).count())
}

/// Replaces every placeholder of `template` with its rendered argument.
///
/// Placeholders are `?` optionally followed by a specifier: `d` (integer), `f` (float),
/// `#` (identifier) or `a` (list / set); any other letter, ASCII or not, is rejected.
/// Arguments are consumed in textual order and their count must match the number of
/// placeholders.
///
/// # Errors
///
/// * [`Error::ArgumentCountMismatch`] if `args` and the placeholders differ in number
/// * [`Error::InvalidSpecifier`] for any other letter after `?`
/// * rendering errors from the escapers
///
/// # Examples
///
/// ```
/// use sqlx_query_template::builder::substitute;
/// use sqlx_query_template::{args, skip, MySqlEscaper};
///
/// let s = substitute(&MySqlEscaper::new(), "SELECT ?# FROM t {WHERE id = ?d}", &args!["name", skip()])?;
/// assert_eq!(s.to_string(), "SELECT `name` FROM t {WHERE id = __SKIP__}");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn substitute<'t, E>(
    escaper: &E,
    template: &'t str,
    args: &[Arg],
) -> crate::Result<Substitution<'t>>
where
    E: EscapeText + ?Sized,
{
    let regex = placeholder_regex()?;
    let expected = regex.find_iter(template).count();
    if expected != args.len() {
        return Err(Error::ArgumentCountMismatch {
            expected,
            supplied: args.len(),
        });
    }

    let mut fragments = Vec::with_capacity(expected * 2 + 1);
    let mut last = 0;
    for (caps, arg) in regex.captures_iter(template).zip(args) {
        let whole = caps.get_match();
        if whole.start() > last {
            fragments.push(Fragment::Text {
                text: &template[last..whole.start()],
                offset: last,
            });
        }
        last = whole.end();

        if arg.is_skip() {
            fragments.push(Fragment::Skip {
                offset: whole.start(),
            });
            continue;
        }

        let specifier = caps.get(1).and_then(|m| m.as_str().chars().next());
        let rendered = match specifier {
            None => escape_value(escaper, arg)?,
            Some('d') => escape_value(escaper, &Arg::Int(coerce_int(arg)?))?,
            Some('f') => escape_value(escaper, &Arg::Float(coerce_float(arg)?))?,
            Some('#') => escape_identifier(arg)?,
            Some('a') => escape_array(escaper, arg)?,
            Some(other) => return Err(Error::InvalidSpecifier(other)),
        };
        fragments.push(Fragment::Literal(rendered));
    }
    if last < template.len() {
        fragments.push(Fragment::Text {
            text: &template[last..],
            offset: last,
        });
    }

    Ok(Substitution { fragments })
}
