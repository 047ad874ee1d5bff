//! Conditional block resolution.
//!
//! A conditional block is the template text between a `{` and the next `}`. If one of
//! its placeholders was skipped the block is dropped together with its braces,
//! otherwise only the braces are removed. Blocks do not nest.

use crate::arg::SKIP_MARKER;
use crate::builder::{Fragment, Substitution};
use crate::error::Error;

/// Resolves the conditional blocks of a substituted template into the final SQL.
///
/// Braces are only recognised in template text; rendered literals pass through untouched,
/// so a value like `'}'` cannot close a block.
///
/// # Errors
///
/// * [`Error::NestedBlock`] for a `{` inside an open block
/// * [`Error::UnbalancedBrace`] for a stray `}` or an unclosed `{`
/// * [`Error::SkipOutsideBlock`] for a skipped placeholder outside any block
pub fn resolve(substitution: &Substitution<'_>) -> crate::Result<String> {
    let mut out = String::new();
    // Open block: byte offset of its `{`, buffered content, whether it holds a skip.
    let mut block: Option<(usize, String, bool)> = None;

    for fragment in substitution.fragments() {
        match fragment {
            Fragment::Text { text, offset } => {
                for (i, c) in text.char_indices() {
                    let at = offset + i;
                    match (c, block.as_mut()) {
                        ('{', None) => block = Some((at, String::new(), false)),
                        ('{', Some(_)) => return Err(Error::NestedBlock { offset: at }),
                        ('}', None) => return Err(Error::UnbalancedBrace { offset: at }),
                        ('}', Some(_)) => {
                            if let Some((start, content, skipped)) = block.take() {
                                if skipped {
                                    tracing::trace!(
                                        target: "sqlx_query_template",
                                        offset = start,
                                        "dropping skipped conditional block"
                                    );
                                } else {
                                    out.push_str(&content);
                                }
                            }
                        }
                        (_, Some((_, content, _))) => content.push(c),
                        (_, None) => out.push(c),
                    }
                }
            }
            Fragment::Literal(literal) => match block.as_mut() {
                Some((_, content, _)) => content.push_str(literal),
                None => out.push_str(literal),
            },
            Fragment::Skip { offset } => match block.as_mut() {
                Some((_, _, skipped)) => *skipped = true,
                None => return Err(Error::SkipOutsideBlock { offset: *offset }),
            },
        }
    }

    match block {
        Some((start, _, _)) => Err(Error::UnbalancedBrace { offset: start }),
        None => Ok(out),
    }
}

/// Resolves conditional blocks in an already substituted query string, where skipped
/// placeholders appear as [`SKIP_MARKER`].
///
/// The whole input counts as template text, so braces inside string literals are
/// treated as block delimiters. Prefer [`resolve`] on a [`Substitution`].
///
/// # Examples
///
/// ```
/// use sqlx_query_template::conditional::resolve_conditionals;
///
/// let sql = resolve_conditionals("SELECT 1 {AND a = __SKIP__}{ AND b = 2}")?;
/// assert_eq!(sql, "SELECT 1  AND b = 2");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
pub fn resolve_conditionals(query: &str) -> crate::Result<String> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for (start, _) in query.match_indices(SKIP_MARKER) {
        if start > last {
            fragments.push(Fragment::Text {
                text: &query[last..start],
                offset: last,
            });
        }
        fragments.push(Fragment::Skip { offset: start });
        last = start + SKIP_MARKER.len();
    }
    if last < query.len() {
        fragments.push(Fragment::Text {
            text: &query[last..],
            offset: last,
        });
    }
    resolve(&Substitution::from_fragments(fragments))
}
