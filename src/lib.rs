//! # sqlx-query-template
//!
//! Literal SQL templating for SQLx/MySQL: typed `?` placeholders, escaping through the
//! connection's rules, and conditional blocks that disappear when one of their
//! placeholders is skipped.
//!
//! ## Features
//!
//! - **Typed Placeholders**: `?` (auto), `?d` (integer), `?f` (float), `?#` (identifier), `?a` (list / set)
//! - **Connection Escaping**: text is escaped with MySQL's rules, including `NO_BACKSLASH_ESCAPES`
//! - **Conditional Blocks**: `{ AND x = ? }` is dropped entirely when its argument is [`skip()`]
//! - **Closed Argument Type**: [`Arg`] covers null, bool, int, float, text, lists and maps
//! - **Generic Executor Support**: built queries run on `MySqlPool`, `Transaction`, or any SQLx `Executor`
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sqlx = { version = "0.8", features = ["mysql", "runtime-tokio"] }
//! sqlx-query-template = "0.1"
//! ```
//!
//! ## Examples
//!
//! ### Building SQL
//!
//! ```rust
//! use sqlx_query_template::{args, skip, Arg, QueryBuilder};
//!
//! let qb = QueryBuilder::default();
//!
//! let sql = qb.build_query(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", vec![1, 2, 3], true],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3) AND block = 1");
//!
//! let sql = qb.build_query(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", vec![1, 2, 3], skip()],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
//!
//! let sql = qb.build_query(
//!     "UPDATE users SET ?a WHERE user_id = -1",
//!     &args![Arg::map([("name", Arg::from("Jack")), ("email", Arg::Null)])],
//! )?;
//! assert_eq!(sql, "UPDATE users SET `name` = 'Jack', `email` = NULL WHERE user_id = -1");
//! # Ok::<(), sqlx_query_template::Error>(())
//! ```
//!
//! ### Executing
//!
//! ```rust,no_run
//! use sqlx::{MySqlPool, FromRow};
//! use sqlx_query_template::{args, MySqlEscaper, QueryBuilder};
//!
//! #[derive(FromRow)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = MySqlPool::connect("mysql://localhost/test").await?;
//! let mut conn = pool.acquire().await?;
//!
//! // Match the session's escaping mode
//! let qb = QueryBuilder::new(MySqlEscaper::from_connection(&mut *conn).await?);
//!
//! let user = qb
//!     .query_as::<User>("SELECT id, name FROM users WHERE email = ?", &args!["user@example.com"])?
//!     .fetch_optional(&mut *conn)
//!     .await?;
//! if let Some(user) = user {
//!     println!("{}: {}", user.id, user.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! 1. **Substitute**: placeholders are matched left to right, each consuming the next argument
//!    and rendering it by specifier. Skipped arguments leave a marker instead of a literal.
//! 2. **Resolve**: conditional blocks holding a marker are removed with their braces; the
//!    braces of all other blocks are dropped.
//!
//! Braces are only recognised in template text, never inside rendered values.
//!
//! ## Limitations
//!
//! - Escaping follows MySQL; other backends need their own [`EscapeText`]
//! - Conditional blocks cannot nest
//! - Every skipped placeholder must be inside a conditional block
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.

pub mod arg;
pub mod builder;
pub mod conditional;
pub mod connection;
pub mod error;
pub mod literal;
pub mod query;
pub mod query_as;
pub mod template;

pub use arg::{skip, Arg, SKIP, SKIP_MARKER};
pub use connection::{EscapeText, MySqlEscaper};
pub use error::{Error, Result};
pub use query::LiteralQuery;
pub use query_as::LiteralQueryAs;
pub use template::QueryBuilder;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::args;
    pub use crate::error::{Error, Result};
    pub use crate::{skip, Arg, EscapeText, MySqlEscaper, QueryBuilder};
}
