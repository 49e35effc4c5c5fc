use noema::{
    diagnostic::{
        Diagnostic, DiagnosticFormatter, PlainFormatter, PrettyFormatter, Reportable, Stage,
    },
    interpreter::BufferedContext,
    lexer::Lexer,
    runner::{run_program, RunOptions},
};

fn run(input: &str, options: RunOptions) -> (String, Result<(), Diagnostic>) {
    let mut context = BufferedContext::new();
    let result = run_program(input.as_bytes(), None, &options, &mut context);
    (context.into_data(), result)
}

fn row(line: u32, column: u32, kind: &str, text: &str) -> String {
    format!("{line}:{column}  {kind:<11}  {text}\n")
}

#[test]
fn token_dump_stops_before_parsing() {
    let options = RunOptions {
        dump_tokens: true,
        ..Default::default()
    };
    // Not a valid statement, but tokenizing alone succeeds.
    let (output, result) = run("x x\n", options);
    assert_eq!(result, Ok(()));
    assert_eq!(
        output,
        [
            row(1, 1, "IDENTIFIER", "x"),
            row(1, 3, "IDENTIFIER", "x"),
            row(1, 4, "NEWLINE", "NEWLINE"),
            row(1, 1, "EOF", ""),
        ]
        .concat()
    );
}

#[test]
fn token_dump_reports_lexical_error() {
    let options = RunOptions {
        dump_tokens: true,
        ..Default::default()
    };
    let (output, result) = run("x = @\n", options);
    assert_eq!(
        output,
        [
            row(1, 1, "IDENTIFIER", "x"),
            row(1, 3, "ASSIGN", "="),
            row(1, 5, "INVALID", "@"),
        ]
        .concat()
    );
    let diagnostic = result.expect_err("lexing should fail");
    assert_eq!(
        diagnostic.to_string(),
        "<stdin>:1:5: lexer error: unexpected character '@'"
    );
}

#[test]
fn ast_dump_does_not_execute() {
    let options = RunOptions {
        dump_ast: true,
        ..Default::default()
    };
    let (output, result) = run("sonus.dic(1 / 0)\nsi a:\n    b = \"c\"\n", options);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "CALL sonus.dic((1 / 0))\nSI a:\n  ASSIGN b = \"c\"\n");
}

#[test]
fn trace_flag_is_inert() {
    let options = RunOptions {
        trace_exec: true,
        ..Default::default()
    };
    let (output, result) = run("sonus.dic(\"a\" + \"b\")\n", options);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "ab\n");
}

#[test]
fn successful_run_prints_only_program_output() {
    let (output, result) = run("sonus.dic(1 + 2)\n", RunOptions::default());
    assert_eq!(result, Ok(()));
    assert_eq!(output, "3\n");
}

#[test]
fn diagnostic_stage_follows_the_failing_stage() {
    let (_, lexical) = run("x = 1\n\ty = 2\n", RunOptions::default());
    let (_, syntax) = run("x = (1\n", RunOptions::default());
    let (_, runtime) = run("sonus.dic(y)\n", RunOptions::default());
    assert_eq!(lexical.map_err(|d| d.stage), Err(Stage::Lexer));
    assert_eq!(syntax.map_err(|d| d.stage), Err(Stage::Parser));
    assert_eq!(runtime.map_err(|d| d.stage), Err(Stage::Runtime));
}

#[test]
fn diagnostic_position_forms() {
    let mut diagnostic = Diagnostic {
        path: "prog.noema".into(),
        stage: Stage::Runtime,
        code: "RT001",
        line: 3,
        column: 7,
        message: "undefined variable 'x'".to_string(),
    };
    assert_eq!(
        diagnostic.to_string(),
        "prog.noema:3:7: runtime error: undefined variable 'x'"
    );
    diagnostic.column = 0;
    assert_eq!(
        diagnostic.to_string(),
        "prog.noema:3: runtime error: undefined variable 'x'"
    );
    diagnostic.line = 0;
    assert_eq!(
        diagnostic.to_string(),
        "prog.noema: runtime error: undefined variable 'x'"
    );
}

#[test]
fn empty_path_falls_back_to_stdin() {
    let mut lexer = Lexer::from_source("\"open\n");
    let error = lexer.next_token().expect_err("string is unterminated");
    assert_eq!(
        error.to_diagnostic(Some("")).to_string(),
        "<stdin>:1:1: lexer error: unterminated string literal"
    );
    assert_eq!(
        error.to_diagnostic(Some("a.noema")).path,
        "a.noema"
    );
}

#[test]
fn formatters_render_the_same_diagnostic() {
    let source = "x = 1\ny = @\n";
    let (_, result) = run(source, RunOptions::default());
    let diagnostic = result.expect_err("lexing should fail");

    assert_eq!(
        PlainFormatter.format(&diagnostic),
        "<stdin>:2:5: lexer error: unexpected character '@'"
    );
    let pretty = PrettyFormatter::new(source).format(&diagnostic);
    assert!(pretty.contains("LX006"), "{pretty}");
    assert!(pretty.contains("unexpected character '@'"), "{pretty}");
}

#[test]
fn source_bytes_need_not_be_utf8() {
    let mut context = BufferedContext::new();
    let source: &[u8] = b"# caf\xe9\nx = \"caf\xe9\"\nsonus.dic(x)\nsonus.dic(1)\n";
    let result = run_program(source, None, &RunOptions::default(), &mut context);
    assert_eq!(result, Ok(()));
    assert_eq!(context.into_data(), "caf\u{fffd}\n1\n");
}

#[test]
fn depth_limited_expression_still_runs() {
    let input = format!("sonus.dic(0{})\n", "\n+ 1".repeat(255));
    let (output, result) = run(&input, RunOptions::default());
    assert_eq!(result, Ok(()));
    assert_eq!(output, "255\n");

    let input = format!("sonus.dic(0{})\n", "\n+ 1".repeat(10_000));
    let (output, result) = run(&input, RunOptions::default());
    let diagnostic = result.expect_err("chain past the depth limit should fail");
    assert_eq!(output, "");
    assert_eq!(diagnostic.stage, Stage::Parser);
    assert_eq!(diagnostic.code, "PS010");
}
