use sqlx::{mysql::MySqlQueryResult, Executor, MySql};

/// A fully literal SQL statement ready to run on MySQL.
///
/// Produced by [`QueryBuilder::query`](crate::QueryBuilder::query). All values are already
/// rendered into the text, so no parameters are bound at execution time.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx::MySqlPool;
/// use sqlx_query_template::{args, skip, QueryBuilder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let pool = MySqlPool::connect("mysql://localhost/test").await?;
/// let qb = QueryBuilder::default();
///
/// let query = qb.query(
///     "UPDATE users SET name = ? WHERE user_id = ?d{ AND block = ?d}",
///     &args!["Jane Doe", 42, skip()],
/// )?;
///
/// let result = query.execute(&pool).await?;
/// println!("Updated {} rows", result.rows_affected());
/// # Ok(())
/// # }
/// ```
///
/// # Using with Transactions
///
/// ```rust,no_run
/// use sqlx::{MySqlPool, Transaction, MySql};
/// use sqlx_query_template::{args, QueryBuilder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let pool = MySqlPool::connect("mysql://localhost/test").await?;
/// let qb = QueryBuilder::default();
/// let mut tx: Transaction<MySql> = pool.begin().await?;
///
/// qb.query("UPDATE accounts SET balance = balance - ?d WHERE id = ?d", &args![100, 1])?
///     .execute(&mut *tx)
///     .await?;
/// qb.query("UPDATE accounts SET balance = balance + ?d WHERE id = ?d", &args![100, 2])?
///     .execute(&mut *tx)
///     .await?;
///
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralQuery {
    sql: String,
}

impl LiteralQuery {
    /// Wraps already built SQL text.
    pub fn new<T>(sql: T) -> Self
    where
        T: Into<String>,
    {
        Self { sql: sql.into() }
    }

    /// The SQL text that will be sent.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Consumes the query, returning its SQL text.
    #[must_use]
    pub fn into_sql(self) -> String {
        self.sql
    }

    /// Executes the query using the provided executor.
    ///
    /// Works with any SQLx `Executor`, including `MySqlPool` and `Transaction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn execute<'e, E>(&self, executor: E) -> crate::Result<MySqlQueryResult>
    where
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(target: "sqlx_query_template", sql_len = self.sql.len(), "executing query");
        tracing::trace!(target: "sqlx_query_template", sql = %self.sql, "executing query");
        Ok(sqlx::query::<MySql>(&self.sql).execute(executor).await?)
    }
}
