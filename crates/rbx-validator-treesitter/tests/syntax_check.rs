use pretty_assertions::assert_eq;
use rbx_validator_treesitter::{LuaSyntaxChecker, ParseOutcome, SyntaxErrorKind};

fn first_error(source: &str) -> rbx_validator_treesitter::SyntaxError {
    match LuaSyntaxChecker::new().check(source).unwrap() {
        ParseOutcome::Invalid(error) => error,
        ParseOutcome::Valid => panic!("expected a syntax error in {source:?}"),
    }
}

#[test]
fn test_fixture_script_parses() {
    let text = include_str!("fixtures/leaderboard.lua");
    let outcome = LuaSyntaxChecker::new().check(text).unwrap();
    assert_eq!(outcome, ParseOutcome::Valid);
}

#[test]
fn test_simple_calls_parse() {
    let checker = LuaSyntaxChecker::new();
    for source in [
        "wait(5)",
        "game:GetService(\"Plyers\")",
        "local p = game.Players.LocalPlayer",
        "while true do\n  task.wait(1)\nend",
        "",
    ] {
        assert!(checker.check(source).unwrap().is_valid(), "{source:?}");
    }
}

#[test]
fn test_unbalanced_paren_is_reported_on_first_row() {
    let error = first_error("local x = (");
    assert_eq!(error.row, 0);
    assert!(!error.message.is_empty());
}

#[test]
fn test_error_row_follows_valid_lines() {
    let error = first_error("print(1)\nlocal = 5\n");
    assert_eq!(error.row, 1);
}

#[test]
fn test_unterminated_block_is_invalid() {
    let error = first_error("if true then\n  print(1)\n");
    assert!(error.row <= 2);
    assert!(error.byte_offset <= "if true then\n  print(1)\n".len());
}

#[test]
fn test_checker_is_reusable() {
    let checker = LuaSyntaxChecker::new();
    assert!(!checker.check("local x = (").unwrap().is_valid());
    assert!(checker.check("local x = (1)").unwrap().is_valid());
    assert!(!checker.check("local x = (").unwrap().is_valid());
}

#[test]
fn test_stray_token_is_reported_where_it_appears() {
    let error = first_error("x = }");
    assert_eq!((error.row, error.byte_column), (0, 4));
    assert_eq!(error.kind, SyntaxErrorKind::Unexpected);
    assert_eq!(error.message, "unexpected symbol near '}'");
}

#[test]
fn test_truncated_expression_is_reported_at_eof() {
    let error = first_error("local x = (");
    assert_eq!((error.row, error.byte_column), (0, 11));
    assert_eq!(error.byte_offset, 11);
    assert_eq!(error.message, "unexpected symbol near '<eof>'");
}

#[test]
fn test_statement_after_return_is_reported() {
    let error = first_error("return 1\nprint(2)");
    assert_eq!((error.row, error.byte_column), (1, 0));
    assert_eq!(error.message, "unexpected symbol near 'print'");
}

#[test]
fn test_leading_comment_does_not_shift_error() {
    let error = first_error("-- header\nx = }");
    assert_eq!((error.row, error.byte_column), (1, 4));
    assert_eq!(error.message, "unexpected symbol near '}'");
}
