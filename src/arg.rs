//! Template arguments.
//!
//! Every placeholder in a template consumes one [`Arg`]. The set of kinds is closed,
//! so the escapers can match exhaustively instead of guessing at runtime types.

/// Text the skip sentinel renders as in the intermediate (pre-resolution) query string.
pub const SKIP_MARKER: &str = "__SKIP__";

/// The skip sentinel. Passing it for a placeholder removes the enclosing conditional block.
pub const SKIP: Arg = Arg::Skip;

/// Returns the skip sentinel.
///
/// ```
/// use sqlx_query_template::{args, skip, QueryBuilder};
///
/// let sql = QueryBuilder::default()
///     .build_query("SELECT * FROM users WHERE 1 {AND block = ?d}", &args![skip()])?;
/// assert_eq!(sql, "SELECT * FROM users WHERE 1 ");
/// # Ok::<(), sqlx_query_template::Error>(())
/// ```
#[must_use]
pub const fn skip() -> Arg {
    SKIP
}

/// A value bound to a template placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Skip sentinel, see [`skip`].
    Skip,
    /// SQL `NULL`.
    Null,
    /// Boolean, rendered as `1` / `0`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point; must be finite to be rendered.
    Float(f64),
    /// Text, escaped by the connection escaper and single-quoted.
    Text(String),
    /// Sequential collection (`IN (...)` lists).
    List(Vec<Arg>),
    /// Keyed collection in insertion order (`SET` clauses).
    Map(Vec<(String, Arg)>),
}

impl Arg {
    /// Builds a [`Arg::List`] from anything iterable.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Arg::Map`] from key/value pairs, keeping their order.
    ///
    /// ```
    /// use sqlx_query_template::Arg;
    ///
    /// let set = Arg::map([("name", Arg::from("Jack")), ("email", Arg::Null)]);
    /// assert!(matches!(set, Arg::Map(ref pairs) if pairs.len() == 2));
    /// ```
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Arg>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Whether this is the skip sentinel.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider than `i64` on some targets; out-of-range values saturate.
macro_rules! impl_from_wide_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_from_wide_uint!(u64, usize);

impl From<isize> for Arg {
    fn from(v: isize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(if v < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

/// Builds a `Vec<Arg>` from heterogeneous expressions.
///
/// ```
/// use sqlx_query_template::{args, skip, Arg};
///
/// let a = args![1, "two", None::<i32>, skip()];
/// assert_eq!(a, vec![Arg::Int(1), Arg::Text("two".into()), Arg::Null, Arg::Skip]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}
