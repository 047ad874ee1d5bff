use sqlx::{mysql::MySqlRow, Executor, MySql};

/// A fully literal SQL statement returning typed rows.
///
/// Produced by [`QueryBuilder::query_as`](crate::QueryBuilder::query_as). Rows are decoded
/// through SQLx's `FromRow`.
///
/// # Type Parameters
///
/// * `R` - The result type that implements `FromRow`
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::{MySqlPool, FromRow};
/// use sqlx_query_template::{args, skip, QueryBuilder};
///
/// #[derive(FromRow)]
/// struct User {
///     id: i32,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let pool = MySqlPool::connect("mysql://localhost/test").await?;
/// let qb = QueryBuilder::default();
///
/// let query = qb.query_as::<User>(
///     "SELECT id, name FROM users WHERE id IN (?a){ AND name = ?}",
///     &args![vec![1, 2, 3], skip()],
/// )?;
///
/// for user in query.fetch_all(&pool).await? {
///     println!("User: {} ({})", user.name, user.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct LiteralQueryAs<R> {
    sql: String,
    _pd: std::marker::PhantomData<fn() -> R>,
}

impl<R> LiteralQueryAs<R> {
    /// Wraps already built SQL text.
    pub fn new<T>(sql: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            sql: sql.into(),
            _pd: std::marker::PhantomData,
        }
    }

    /// The SQL text that will be sent.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl<R> LiteralQueryAs<R>
where
    for<'row> R: sqlx::FromRow<'row, MySqlRow> + Send + Unpin,
{
    /// Executes the query and returns all matching rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row cannot be decoded.
    pub async fn fetch_all<'e, E>(&self, executor: E) -> crate::Result<Vec<R>>
    where
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(target: "sqlx_query_template", sql_len = self.sql.len(), "fetching rows");
        tracing::trace!(target: "sqlx_query_template", sql = %self.sql, "fetching rows");
        Ok(sqlx::query_as::<MySql, R>(&self.sql)
            .fetch_all(executor)
            .await?)
    }

    /// Executes the query and returns exactly one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or no row is found.
    pub async fn fetch_one<'e, E>(&self, executor: E) -> crate::Result<R>
    where
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(target: "sqlx_query_template", sql_len = self.sql.len(), "fetching one row");
        tracing::trace!(target: "sqlx_query_template", sql = %self.sql, "fetching one row");
        Ok(sqlx::query_as::<MySql, R>(&self.sql)
            .fetch_one(executor)
            .await?)
    }

    /// Executes the query and returns at most one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn fetch_optional<'e, E>(&self, executor: E) -> crate::Result<Option<R>>
    where
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(target: "sqlx_query_template", sql_len = self.sql.len(), "fetching optional row");
        tracing::trace!(target: "sqlx_query_template", sql = %self.sql, "fetching optional row");
        Ok(sqlx::query_as::<MySql, R>(&self.sql)
            .fetch_optional(executor)
            .await?)
    }
}
