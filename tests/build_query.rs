use sqlx_query_template::{args, skip, Arg, Error, MySqlEscaper, QueryBuilder, SKIP_MARKER};

fn qb() -> QueryBuilder {
    QueryBuilder::default()
}

#[test]
fn integer_specifier() {
    assert_eq!(qb().build_query("id = ?d", &args![5]).unwrap(), "id = 5");
}

#[test]
fn generic_null_and_bool() {
    assert_eq!(qb().build_query("?", &args![Arg::Null]).unwrap(), "NULL");
    assert_eq!(qb().build_query("?", &args![true]).unwrap(), "1");
    assert_eq!(qb().build_query("?", &args![false]).unwrap(), "0");
}

#[test]
fn text_quote_is_escaped() {
    let sql = qb().build_query("name = ?", &args!["a'b"]).unwrap();
    assert_eq!(sql, r"name = 'a\'b'");
}

#[test]
fn text_quote_is_doubled_without_backslash_escapes() {
    let qb = QueryBuilder::new(MySqlEscaper::new().no_backslash_escapes(true));
    let sql = qb.build_query("name = ?", &args!["a'b"]).unwrap();
    assert_eq!(sql, "name = 'a''b'");
}

#[test]
fn identifiers() {
    assert_eq!(qb().build_query("?#", &args!["col"]).unwrap(), "`col`");
    assert_eq!(
        qb().build_query("?#", &args![vec!["a", "b"]]).unwrap(),
        "`a`, `b`"
    );
}

#[test]
fn arrays_and_sets() {
    assert_eq!(
        qb().build_query("?a", &args![vec![1, 2, 3]]).unwrap(),
        "1, 2, 3"
    );
    assert_eq!(
        qb().build_query("?a", &args![Arg::map([("x", 1), ("y", 2)])])
            .unwrap(),
        "`x` = 1, `y` = 2"
    );
}

#[test]
fn skipped_conditional_is_removed() {
    assert_eq!(
        qb().build_query("SELECT 1 {AND x = ?}", &args![skip()])
            .unwrap(),
        "SELECT 1 "
    );
}

#[test]
fn kept_conditional_is_unwrapped() {
    assert_eq!(
        qb().build_query("SELECT 1 {AND x = ?d}", &args![5]).unwrap(),
        "SELECT 1 AND x = 5"
    );
}

#[test]
fn invalid_specifier() {
    let err = qb().build_query("?z", &args![1]).unwrap_err();
    assert!(matches!(err, Error::InvalidSpecifier('z')));
    let err = qb().build_query("SELECT ?ж", &args![1]).unwrap_err();
    assert!(matches!(err, Error::InvalidSpecifier('ж')));
}

#[test]
fn argument_order_matches_placeholder_order() {
    let sql = qb()
        .build_query("?d ?d ?d ?d ?d", &args![1, 2, 3, 4, 5])
        .unwrap();
    assert_eq!(sql, "1 2 3 4 5");
}

#[test]
fn sentinel_never_in_output() {
    let cases: Vec<(&str, Vec<Arg>, &str)> = vec![
        ("{?}", args![skip()], ""),
        ("a{ b = ?# }c{ d = ?a}", args![skip(), skip()], "ac"),
        ("x = ?d{ AND y = ?f}", args![1, skip()], "x = 1"),
        ("{?}{ ?}", args![skip(), 1], " 1"),
    ];
    for (template, args, expected) in cases {
        let sql = qb().build_query(template, &args).unwrap();
        assert!(!sql.contains(SKIP_MARKER), "sentinel leaked for {template:?}: {sql}");
        assert_eq!(sql, expected);
    }
    // A text argument spelling the marker stays an ordinary quoted literal.
    assert_eq!(
        qb().build_query("{?}", &args![SKIP_MARKER]).unwrap(),
        "'__SKIP__'"
    );
}

#[test]
fn skip_outside_block_is_rejected() {
    let err = qb().build_query("x = ?", &args![skip()]).unwrap_err();
    assert!(matches!(err, Error::SkipOutsideBlock { .. }));
}

#[test]
fn count_mismatch_is_rejected() {
    assert!(matches!(
        qb().build_query("? ?", &args![1]).unwrap_err(),
        Error::ArgumentCountMismatch {
            expected: 2,
            supplied: 1
        }
    ));
    assert!(matches!(
        qb().build_query("SELECT 1", &args![1]).unwrap_err(),
        Error::ArgumentCountMismatch {
            expected: 0,
            supplied: 1
        }
    ));
}

#[test]
fn nested_blocks_are_rejected() {
    let err = qb()
        .build_query("SELECT 1 {AND {x = ?d}}", &args![1])
        .unwrap_err();
    assert!(matches!(err, Error::NestedBlock { offset: 14 }));
}

#[test]
fn nested_collections_render_without_double_escaping() {
    let sql = qb()
        .build_query(
            "INSERT INTO t VALUES (?a)",
            &args![vec![Arg::from("o'k"), Arg::from(vec![1, 2])]],
        )
        .unwrap();
    assert_eq!(sql, r"INSERT INTO t VALUES ('o\'k', 1, 2)");
}

#[test]
fn full_select_with_optional_filters() {
    let template = "SELECT ?# FROM users WHERE user_id = ?d{ AND name = ?}{ AND block = ?d}";
    let sql = qb()
        .build_query(
            template,
            &args![vec!["name", "email"], "12", "Jack", skip()],
        )
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `name`, `email` FROM users WHERE user_id = 12 AND name = 'Jack'"
    );
}
