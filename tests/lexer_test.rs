use noema::lexer::{
    formatter::{BasicFormatter, TokenFormatter},
    Lexer, LexicalErrorKind, INDENT_STACK_CAPACITY, INDENT_WIDTH, MAX_LINE_LENGTH,
};
use noema::token::{Token, TokenKind};
use proptest::prelude::*;

fn check(input: &str, expected: &str, test_name: &str) {
    let mut scanner = Lexer::from_source(input);
    let formatter = BasicFormatter::new(None);
    let mut buffer = String::new();
    loop {
        match scanner.next_token() {
            Ok(token) => {
                buffer.push_str(&formatter.format(&token));
                buffer.push('\n');
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                buffer.push_str(&formatter.format_lexical_error(&error));
                buffer.push('\n');
                break;
            }
        }
    }

    assert_eq!(buffer, expected, "Failed the test {test_name}");
}

fn row(line: u32, column: u32, kind: &str, text: &str) -> String {
    format!("{line}:{column}  {kind:<11}  {text}\n")
}

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut scanner = Lexer::from_source(input);
    let mut kinds = Vec::new();
    loop {
        let token = scanner.next_token().expect("input should tokenize");
        kinds.push(token.kind);
        if token.kind == TokenKind::Eof {
            return kinds;
        }
    }
}

#[test]
fn smoke_test() {
    check("", &row(0, 1, "EOF", ""), "smoke");
}

#[test]
fn test_assignment() {
    let expected = [
        row(1, 1, "IDENTIFIER", "x"),
        row(1, 3, "ASSIGN", "="),
        row(1, 5, "NUMBER", "1"),
        row(1, 6, "NEWLINE", "NEWLINE"),
        row(1, 1, "EOF", ""),
    ]
    .concat();
    check("x = 1\n", &expected, "assignment");
}

#[test]
fn test_block_layout() {
    let expected = [
        row(1, 1, "KEYWORD", "si"),
        row(1, 4, "IDENTIFIER", "x"),
        row(1, 5, "COLON", ":"),
        row(1, 6, "NEWLINE", "NEWLINE"),
        row(2, 1, "INDENT", "INDENT"),
        row(2, 5, "IDENTIFIER", "sonus.dic"),
        row(2, 14, "PAREN", "("),
        row(2, 15, "STRING", "salve"),
        row(2, 22, "PAREN", ")"),
        row(2, 23, "NEWLINE", "NEWLINE"),
        row(3, 1, "DEDENT", "DEDENT"),
        row(3, 1, "IDENTIFIER", "z"),
        row(3, 3, "ASSIGN", "="),
        row(3, 5, "NUMBER", "2"),
        row(3, 6, "NEWLINE", "NEWLINE"),
        row(3, 1, "EOF", ""),
    ]
    .concat();
    check(
        "si x:\n    sonus.dic(\"salve\")\nz = 2\n",
        &expected,
        "block_layout",
    );
}

#[test]
fn test_operators() {
    let expected = [
        row(1, 1, "COMPARATOR", "=="),
        row(1, 4, "COMPARATOR", "!="),
        row(1, 7, "COMPARATOR", "<="),
        row(1, 10, "COMPARATOR", ">="),
        row(1, 13, "COMPARATOR", "<"),
        row(1, 15, "COMPARATOR", ">"),
        row(1, 17, "OPERATOR", "+"),
        row(1, 19, "OPERATOR", "-"),
        row(1, 21, "OPERATOR", "*"),
        row(1, 23, "OPERATOR", "/"),
        row(1, 25, "OPERATOR", "%"),
        row(1, 26, "NEWLINE", "NEWLINE"),
        row(1, 1, "EOF", ""),
    ]
    .concat();
    check("== != <= >= < > + - * / %", &expected, "operators");
}

#[test]
fn test_keywords_and_identifiers() {
    let expected = [
        row(1, 1, "KEYWORD", "import"),
        row(1, 8, "IDENTIFIER", "mathesis"),
        row(1, 17, "KEYWORD", "verum"),
        row(1, 23, "IDENTIFIER", "verumque"),
        row(1, 32, "IDENTIFIER", "_x1"),
        row(1, 35, "NEWLINE", "NEWLINE"),
        row(1, 1, "EOF", ""),
    ]
    .concat();
    check(
        "import mathesis verum verumque _x1\n",
        &expected,
        "keywords_and_identifiers",
    );
}

#[test]
fn comment_ends_the_line() {
    assert_eq!(
        kinds("x = 1 # note\n# whole line\n\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::NumericLiteral,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn parentheses_suppress_layout() {
    assert_eq!(
        kinds("x = (1 +\n        2)\ny = 3\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Parenthesis(noema::token::Parenthesis::Left),
            TokenKind::NumericLiteral,
            TokenKind::Operator(noema::token::ArithmeticOperator::Plus),
            TokenKind::NumericLiteral,
            TokenKind::Parenthesis(noema::token::Parenthesis::Right),
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::NumericLiteral,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn end_of_input_closes_open_blocks() {
    let kinds = kinds("si a:\n    si b:\n        c = 1");
    let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
    let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
    assert_eq!(indents, 2);
    assert_eq!(dedents, 2);
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn multi_level_jump_balances() {
    let kinds = kinds("si a:\n            b = 1\nc = 2\n");
    let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
    let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
    assert_eq!(indents, 3);
    assert_eq!(dedents, 3);
}

#[test]
fn test_tab() {
    check(
        "\tx = 1\n",
        "<stdin>:1:1: lexer error: tab character is not allowed (use 4 spaces)\n",
        "tab",
    );
}

#[test]
fn test_inline_tab() {
    let expected = [
        row(1, 1, "IDENTIFIER", "x"),
        "<stdin>:1:2: lexer error: tab character is not allowed (use 4 spaces)\n".to_string(),
    ]
    .concat();
    check("x\t= 1\n", &expected, "inline_tab");
}

#[test]
fn test_indent_width() {
    let expected = [
        row(1, 1, "KEYWORD", "si"),
        row(1, 4, "IDENTIFIER", "x"),
        row(1, 5, "COLON", ":"),
        row(1, 6, "NEWLINE", "NEWLINE"),
        "<stdin>:2:1: lexer error: indentation must be multiple of 4 spaces\n".to_string(),
    ]
    .concat();
    check("si x:\n  y = 1\n", &expected, "indent_width");
}

#[test]
fn test_inconsistent_dedent() {
    let mut scanner = Lexer::from_source("si x:\n        y = 1\n    z = 2\n");
    let error = loop {
        match scanner.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => panic!("expected an error"),
            Ok(_) => {}
            Err(error) => break error,
        }
    };
    assert_eq!(error.kind, LexicalErrorKind::InconsistentDedent);
    assert_eq!((error.line, error.column), (3, 1));
}

#[test]
fn test_unterminated_string() {
    let expected = [
        row(1, 1, "IDENTIFIER", "x"),
        row(1, 3, "ASSIGN", "="),
        "<stdin>:1:5: lexer error: unterminated string literal\n".to_string(),
    ]
    .concat();
    check("x = \"abc\n", &expected, "unterminated_string");
}

#[test]
fn test_lone_bang() {
    let expected = [
        row(1, 1, "IDENTIFIER", "x"),
        row(1, 3, "ASSIGN", "="),
        "<stdin>:1:5: lexer error: unexpected '!'\n".to_string(),
    ]
    .concat();
    check("x = !y\n", &expected, "lone_bang");
}

#[test]
fn test_brackets_are_illegal() {
    let expected = [
        row(1, 1, "IDENTIFIER", "x"),
        row(1, 3, "ASSIGN", "="),
        "<stdin>:1:5: lexer error: unexpected character '['\n".to_string(),
    ]
    .concat();
    check("x = [1, 2]\n", &expected, "brackets");
}

#[test]
fn test_line_too_long() {
    let input = format!("x = \"{}\"\n", "a".repeat(1100));
    check(
        &input,
        "<stdin>:1:1024: lexer error: line exceeds maximum length of 1023 characters\n",
        "line_too_long",
    );
}

#[test]
fn test_token_too_long() {
    let input = format!("{} = 1\n", "n".repeat(256));
    check(
        &input,
        "<stdin>:1:1: lexer error: token exceeds maximum length of 255 characters\n",
        "token_too_long",
    );
}

#[test]
fn deepest_indentation_fits_on_a_line() {
    let deepest = (MAX_LINE_LENGTH - 1) / INDENT_WIDTH;
    assert!(deepest < INDENT_STACK_CAPACITY);

    let input: String = (0..=deepest)
        .map(|level| format!("{}x\n", " ".repeat(level * INDENT_WIDTH)))
        .collect();
    let kinds = kinds(&input);
    let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
    let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
    assert_eq!(indents, deepest);
    assert_eq!(dedents, deepest);

    let overflowing = format!("{}x\n", " ".repeat(INDENT_STACK_CAPACITY * INDENT_WIDTH));
    let mut scanner = Lexer::from_source(&overflowing);
    let error = (0..3)
        .find_map(|_| scanner.next_token().err())
        .expect("line should be rejected");
    assert_eq!(error.kind, LexicalErrorKind::LineTooLong);
}

#[test]
fn operator_at_end_of_input() {
    let expected = [
        row(1, 1, "IDENTIFIER", "a"),
        row(1, 2, "COMPARATOR", "<"),
        row(1, 3, "OPERATOR", "-"),
        row(1, 4, "NEWLINE", "NEWLINE"),
        row(1, 1, "EOF", ""),
    ]
    .concat();
    check("a<-", &expected, "operator_at_end");
}

#[test]
fn error_is_latched() {
    let mut scanner = Lexer::from_source("x = @\ny = 1\n");
    let mut errors = 0;
    for _ in 0..10 {
        if scanner.next_token().is_err() {
            errors += 1;
        }
    }
    assert_eq!(errors, 1);
    assert!(scanner.has_error());
    assert_eq!(
        scanner.error().map(|e| e.kind.clone()),
        Some(LexicalErrorKind::Unrecognized('@'))
    );
}

#[test]
fn error_token_carries_offending_input() {
    let mut scanner = Lexer::from_source("y = \"open\n");
    let error = (0..5)
        .find_map(|_| scanner.next_token().err())
        .expect("string should be unterminated");
    let token: Token = error.to_token();
    assert_eq!(token.kind, TokenKind::Invalid);
    assert_eq!(token.text, "\"open");
}

// Property-based tests

/// Line levels that only ever open one level at a time, so every dedent
/// lands on an open level.
fn indentation_levels_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 1..40).prop_map(|raw| {
        let mut previous = 0;
        raw.into_iter()
            .map(|level| {
                let level = level.min(previous + 1);
                previous = level;
                level
            })
            .collect()
    })
}

fn filler_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("\n".to_string()),
        Just("# aside\n".to_string()),
        Just("      # misaligned comment\n".to_string()),
    ]
}

proptest! {
    #[test]
    fn indents_and_dedents_balance(
        levels in indentation_levels_strategy(),
        fillers in prop::collection::vec(filler_strategy(), 40),
        trailing_newline in any::<bool>(),
    ) {
        let mut input = String::new();
        for (index, level) in levels.iter().enumerate() {
            input.push_str(&fillers[index]);
            input.push_str(&"    ".repeat(*level));
            input.push_str("x = 1\n");
        }
        if !trailing_newline {
            input.pop();
        }

        let mut scanner = Lexer::from_source(&input);
        let mut depth: i64 = 0;
        let mut indents = 0;
        let mut dedents = 0;
        loop {
            let token = scanner.next_token();
            prop_assert!(token.is_ok(), "unexpected error {:?}", token);
            match token.map(|t| t.kind) {
                Ok(TokenKind::Indent) => {
                    indents += 1;
                    depth += 1;
                }
                Ok(TokenKind::Dedent) => {
                    dedents += 1;
                    depth -= 1;
                    prop_assert!(depth >= 0);
                }
                Ok(TokenKind::Eof) => break,
                _ => {}
            }
        }
        prop_assert_eq!(indents, dedents);
    }

    #[test]
    fn misaligned_indentation_is_rejected(spaces in (1usize..40).prop_filter("not a multiple of 4", |s| s % 4 != 0)) {
        let input = format!("x = 1\n{}y = 2\n", " ".repeat(spaces));
        let mut scanner = Lexer::from_source(&input);
        let error = loop {
            match scanner.next_token() {
                Ok(Token { kind: TokenKind::Eof, .. }) => break None,
                Ok(_) => {}
                Err(error) => break Some(error),
            }
        };
        let error = error.expect("indentation should be rejected");
        prop_assert_eq!(error.kind, LexicalErrorKind::IndentWidth);
        prop_assert_eq!(error.line, 2);
    }
}
