use sqlx::{Executor, MySql};

/// Text escaping capability supplied by the database connection.
///
/// This is the only thing the templating engine needs from a connection. Implementations
/// return the escaped body of a string literal; the caller adds the surrounding quotes.
pub trait EscapeText {
    /// Escapes `s` for use between single quotes.
    fn escape_text(&self, s: &str) -> String;
}

impl<T: EscapeText + ?Sized> EscapeText for &T {
    fn escape_text(&self, s: &str) -> String {
        (**self).escape_text(s)
    }
}

/// MySQL string escaping, following the rules of the client library's
/// `mysql_real_escape_string`.
///
/// With `NO_BACKSLASH_ESCAPES` active on the session, backslash is an ordinary
/// character and quotes must be doubled instead.
///
/// # Examples
///
/// ```
/// use sqlx_query_template::{EscapeText, MySqlEscaper};
///
/// assert_eq!(MySqlEscaper::new().escape_text("it's"), r"it\'s");
/// assert_eq!(
///     MySqlEscaper::new().no_backslash_escapes(true).escape_text("it's"),
///     "it''s"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlEscaper {
    no_backslash_escapes: bool,
}

impl MySqlEscaper {
    /// Creates an escaper for the default MySQL `sql_mode`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            no_backslash_escapes: false,
        }
    }

    /// Selects quote-doubling escaping for sessions running with `NO_BACKSLASH_ESCAPES`.
    #[must_use]
    pub const fn no_backslash_escapes(mut self, enabled: bool) -> Self {
        self.no_backslash_escapes = enabled;
        self
    }

    /// Returns whether quote-doubling mode is active.
    #[must_use]
    pub const fn is_no_backslash_escapes(&self) -> bool {
        self.no_backslash_escapes
    }

    /// Builds an escaper matching the `sql_mode` of a live session.
    ///
    /// Only meaningful for the connection the query will run on: a pool may hand out
    /// connections with different session modes.
    ///
    /// # Errors
    ///
    /// Returns an error if `@@SESSION.sql_mode` cannot be read.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sqlx::MySqlPool;
    /// use sqlx_query_template::{MySqlEscaper, QueryBuilder};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = MySqlPool::connect("mysql://localhost/test").await?;
    /// let mut conn = pool.acquire().await?;
    ///
    /// let escaper = MySqlEscaper::from_connection(&mut *conn).await?;
    /// let qb = QueryBuilder::new(escaper);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_connection<'e, E>(executor: E) -> crate::Result<Self>
    where
        E: Executor<'e, Database = MySql>,
    {
        let sql_mode = sqlx::query_scalar::<MySql, String>("SELECT @@SESSION.sql_mode")
            .fetch_one(executor)
            .await?;
        let escaper = Self::new().no_backslash_escapes(sql_mode_disables_backslash(&sql_mode));
        tracing::debug!(
            target: "sqlx_query_template",
            sql_mode = %sql_mode,
            no_backslash_escapes = escaper.no_backslash_escapes,
            "detected session escaping mode"
        );
        Ok(escaper)
    }
}

fn sql_mode_disables_backslash(sql_mode: &str) -> bool {
    sql_mode
        .split(',')
        .any(|mode| mode.trim().eq_ignore_ascii_case("NO_BACKSLASH_ESCAPES"))
}

impl EscapeText for MySqlEscaper {
    fn escape_text(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        if self.no_backslash_escapes {
            for c in s.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            return out;
        }
        for c in s.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(c),
            }
        }
        out
    }
}
