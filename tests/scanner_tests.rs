// tests/scanner_tests.rs

use expressive_query::ast::{ConnectiveWindow, Segment, Term};
use expressive_query::{scan, Clause, Connective, Operand, QueryError};

fn clause(field: &str, operator: &str, literal: &str) -> Term {
    Term::Clause(Clause::new(field, operator, Operand::Literal(literal.to_string())))
}

fn window(first: Option<Connective>, second: Option<Connective>) -> ConnectiveWindow {
    ConnectiveWindow { first, second }
}

// ============================================================================
// Clauses
// ============================================================================

#[test]
fn test_single_clause() {
    assert_eq!(
        scan("Age greaterThan 20").unwrap(),
        vec![Segment {
            connectives: ConnectiveWindow::default(),
            term: clause("Age", "greaterThan", "20"),
        }]
    );
}

#[test]
fn test_operator_is_kept_verbatim() {
    let segments = scan("Age roughly 20").unwrap();
    assert_eq!(segments[0].term, clause("Age", "roughly", "20"));
}

#[test]
fn test_quoted_literal_with_spaces() {
    let segments = scan("Name equals 'Ann  Lee' and Age equals 3").unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].term, clause("Name", "equals", "Ann  Lee"));
    assert_eq!(segments[1].connectives, window(Some(Connective::And), None));
}

#[test]
fn test_quote_inside_word_is_literal_text() {
    let segments = scan("Name equals O'Brien").unwrap();
    assert_eq!(segments[0].term, clause("Name", "equals", "O'Brien"));
}

#[test]
fn test_quoted_literal_closed_by_parenthesis() {
    let segments = scan("(Name equals 'a b')").unwrap();
    assert_eq!(segments[0].term, Term::Group("Name equals 'a b'".to_string()));
}

#[test]
fn test_array_operand_is_trimmed() {
    let segments = scan("Age in [ 18, 21 ,null]").unwrap();
    assert_eq!(
        segments[0].term,
        Term::Clause(Clause::new(
            "Age",
            "in",
            Operand::Array(vec!["18".to_string(), "21".to_string(), "null".to_string()])
        ))
    );
}

#[test]
fn test_array_directly_after_in() {
    let segments = scan("Age in[1,2]").unwrap();
    assert_eq!(
        segments[0].term,
        Term::Clause(Clause::new(
            "Age",
            "in",
            Operand::Array(vec!["1".to_string(), "2".to_string()])
        ))
    );
}

#[test]
fn test_empty_array() {
    let segments = scan("Age in []").unwrap();
    assert_eq!(
        segments[0].term,
        Term::Clause(Clause::new("Age", "in", Operand::Array(vec![])))
    );
}

#[test]
fn test_quoted_array_items() {
    let expected = Term::Clause(Clause::new(
        "Name",
        "in",
        Operand::Array(vec!["Ann Lee".to_string(), "Bob".to_string()]),
    ));

    let segments = scan("Name in ['Ann Lee', 'Bob']").unwrap();
    assert_eq!(segments[0].term, expected);

    let segments = scan("(Name in ['Ann Lee','Bob'])").unwrap();
    assert_eq!(
        segments[0].term,
        Term::Group("Name in ['Ann Lee','Bob']".to_string())
    );
    assert_eq!(scan("Name in ['Ann Lee','Bob']").unwrap()[0].term, expected);
}

#[test]
fn test_relation_child_query() {
    let segments = scan("Tags any (Label equals 'x' or (Weight lessThan 2))").unwrap();
    assert_eq!(
        segments[0].term,
        Term::Clause(Clause::new(
            "Tags",
            "any",
            Operand::Nested("Label equals 'x' or (Weight lessThan 2)".to_string())
        ))
    );
}

// ============================================================================
// Connectives
// ============================================================================

#[test]
fn test_connective_window() {
    let segments = scan("not A equals 1 and not (B equals 2) or C equals 3").unwrap();
    let windows: Vec<_> = segments.iter().map(|s| s.connectives).collect();
    assert_eq!(
        windows,
        vec![
            window(Some(Connective::Not), None),
            window(Some(Connective::And), Some(Connective::Not)),
            window(Some(Connective::Or), None),
        ]
    );
    assert_eq!(segments[1].term, Term::Group("B equals 2".to_string()));
}

#[test]
fn test_connective_before_group_without_space() {
    let segments = scan("A equals 1 or(B equals 2)").unwrap();
    assert_eq!(segments[1].connectives, window(Some(Connective::Or), None));
    assert_eq!(segments[1].term, Term::Group("B equals 2".to_string()));
}

#[test]
fn test_field_names_starting_with_connectives() {
    let segments = scan("notes equals x and order equals y").unwrap();
    assert_eq!(segments[0].connectives, ConnectiveWindow::default());
    assert_eq!(segments[0].term, clause("notes", "equals", "x"));
    assert_eq!(segments[1].term, clause("order", "equals", "y"));
}

#[test]
fn test_missing_connective_scans() {
    // Rejected later, when the terms are combined.
    let segments = scan("A equals 1 B equals 2").unwrap();
    assert_eq!(segments.len(), 2);
    assert!(segments[1].connectives.is_empty());
}

#[test]
fn test_empty_input() {
    assert_eq!(scan("").unwrap(), vec![]);
    assert_eq!(scan("   \t ").unwrap(), vec![]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_dangling_connective() {
    assert_eq!(
        scan("A equals 1 and"),
        Err(QueryError::ExpectedClause("and".to_string()))
    );
    assert_eq!(
        scan("A equals 1 and not"),
        Err(QueryError::ExpectedClause("and not".to_string()))
    );
}

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(
        scan("(A equals 1"),
        Err(QueryError::UnbalancedParenthesis(_))
    ));
    assert!(matches!(
        scan("A equals 1 )"),
        Err(QueryError::UnbalancedParenthesis(_))
    ));
}

#[test]
fn test_parenthesis_after_unquoted_literal() {
    assert_eq!(
        scan("Name equals x)"),
        Err(QueryError::UnbalancedParenthesis(")".to_string()))
    );
    assert_eq!(
        scan("Age equals 1)"),
        Err(QueryError::UnbalancedParenthesis(")".to_string()))
    );
    assert_eq!(
        scan("Name equals 'x')"),
        Err(QueryError::UnbalancedParenthesis(")".to_string()))
    );
    assert_eq!(
        scan("(Age equals 1))"),
        Err(QueryError::UnbalancedParenthesis(")".to_string()))
    );
}

#[test]
fn test_long_query_scans_every_clause() {
    let query = vec!["Age equals 1"; 5000].join(" or ");
    let segments = scan(&query).unwrap();
    assert_eq!(segments.len(), 5000);
    assert_eq!(segments[4999].connectives, window(Some(Connective::Or), None));
}

#[test]
fn test_unclosed_quote() {
    assert!(matches!(
        scan("Name equals 'abc"),
        Err(QueryError::UnclosedQuote(_))
    ));
}

#[test]
fn test_array_errors() {
    assert!(matches!(scan("Age in 1"), Err(QueryError::ExpectedArray(_))));
    assert!(matches!(
        scan("Age in [1, 2"),
        Err(QueryError::UnclosedArray(_))
    ));
}

#[test]
fn test_relation_without_parentheses() {
    assert!(matches!(
        scan("Tags any Label"),
        Err(QueryError::ExpectedChildQuery(_))
    ));
}

#[test]
fn test_incomplete_clauses() {
    assert_eq!(scan("Age"), Err(QueryError::MissingOperator("Age".to_string())));
    assert_eq!(
        scan("Age equals   "),
        Err(QueryError::MissingOperand {
            field: "Age".to_string(),
            operator: "equals".to_string(),
        })
    );
}

#[test]
fn test_error_messages() {
    let err = scan("(A equals 1").unwrap_err();
    assert!(err.to_string().starts_with("invalid query argument:"));
}
