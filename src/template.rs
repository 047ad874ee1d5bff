use crate::arg::{Arg, SKIP};
use crate::builder::substitute;
use crate::conditional::resolve;
use crate::connection::{EscapeText, MySqlEscaper};
use crate::query::LiteralQuery;
use crate::query_as::LiteralQueryAs;

/// Builds literal SQL from templates using a connection's text escaping.
///
/// `QueryBuilder` holds no state besides the escaper, so one instance can be shared
/// freely between threads when the escaper allows it.
///
/// # Examples
///
/// ```
/// use sqlx_query_template::{args, skip, QueryBuilder};
///
/// let qb = QueryBuilder::default();
///
/// let sql = qb.build_query(
///     "SELECT ?# FROM users WHERE user_id = ?d{ AND block = ?d}",
///     &args![vec!["name", "email"], 2, skip()],
/// )?;
/// assert_eq!(sql, "SELECT `name`, `email` FROM users WHERE user_id = 2");
///
/// let sql = qb.build_query(
///     "UPDATE users SET ?a WHERE user_id = -1",
///     &args![sqlx_query_template::Arg::map([("name", "Jack"), ("email", "j@x.io")])],
/// )?;
/// assert_eq!(sql, "UPDATE users SET `name` = 'Jack', `email` = 'j@x.io' WHERE user_id = -1");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder<E = MySqlEscaper> {
    escaper: E,
}

impl Default for QueryBuilder<MySqlEscaper> {
    fn default() -> Self {
        Self::new(MySqlEscaper::new())
    }
}

impl<E: EscapeText> QueryBuilder<E> {
    /// Creates a builder escaping text through `escaper`.
    pub const fn new(escaper: E) -> Self {
        Self { escaper }
    }

    /// The escaper used for text literals.
    pub const fn escaper(&self) -> &E {
        &self.escaper
    }

    /// Renders `template` with `args` into literal SQL.
    ///
    /// Placeholders are substituted first, then conditional blocks are resolved. Pass
    /// an empty slice for templates without placeholders.
    ///
    /// # Errors
    ///
    /// Fails on argument count mismatch, invalid specifiers, values that cannot be
    /// rendered where they are used, and malformed or nested conditional blocks.
    /// Nothing is returned on failure.
    pub fn build_query(&self, template: &str, args: &[Arg]) -> crate::Result<String> {
        let substitution = substitute(&self.escaper, template, args)?;
        let sql = resolve(&substitution)?;
        tracing::debug!(
            target: "sqlx_query_template",
            placeholders = args.len(),
            skipped = substitution.has_skips(),
            sql_len = sql.len(),
            "built query"
        );
        Ok(sql)
    }

    /// Returns the skip sentinel.
    #[must_use]
    pub const fn skip(&self) -> Arg {
        SKIP
    }

    /// Builds `template` and wraps it for execution.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::build_query`].
    pub fn query(&self, template: &str, args: &[Arg]) -> crate::Result<LiteralQuery> {
        self.build_query(template, args).map(LiteralQuery::new)
    }

    /// Builds `template` and wraps it for execution with typed rows.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::build_query`].
    pub fn query_as<R>(&self, template: &str, args: &[Arg]) -> crate::Result<LiteralQueryAs<R>> {
        self.build_query(template, args).map(LiteralQueryAs::new)
    }
}
