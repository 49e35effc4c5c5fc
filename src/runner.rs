use std::io::BufRead;

use crate::{
    diagnostic::{Diagnostic, Reportable},
    interpreter::{SystemContext, TreeWalkInterpreter},
    lexer::{
        formatter::{BasicFormatter, TokenFormatter},
        Lexer,
    },
    parser::{
        formatter::{ProgramFormatter, StructuralFormatter},
        Parser,
    },
    token::TokenKind,
};

/// Switches for a single run. The default tokenizes, parses and executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the token stream and stop.
    pub dump_tokens: bool,
    /// Print the statement outline and stop.
    pub dump_ast: bool,
    /// Reserved. Accepted and ignored.
    pub trace_exec: bool,
}

/// Runs one source through the pipeline, writing program output and any
/// requested dump to `context`. Returns the first failure as a diagnostic.
pub fn run_program<R, C>(
    reader: R,
    path: Option<&str>,
    options: &RunOptions,
    context: &mut C,
) -> Result<(), Diagnostic>
where
    R: BufRead,
    C: SystemContext,
{
    let lexer = Lexer::new(reader);

    if options.dump_tokens {
        log::debug!("dumping tokens");
        return dump_tokens(lexer, path, context);
    }

    let mut parser = Parser::new(lexer);
    let program = parser
        .parse()
        .map_err(|error| error.to_diagnostic(path))?;

    if options.dump_ast {
        log::debug!("dumping statement outline");
        let formatter = StructuralFormatter::new(path);
        for line in ProgramFormatter::format(&formatter, &program).lines() {
            context.writeln(line);
        }
        return Ok(());
    }

    if options.trace_exec {
        log::debug!("execution tracing is not implemented, running normally");
    }

    log::debug!("executing {} statement(s)", program.len());
    TreeWalkInterpreter::new(&mut *context)
        .run(&program)
        .map(|_| ())
        .map_err(|error| error.to_diagnostic(path))
}

fn dump_tokens<R, C>(
    mut lexer: Lexer<R>,
    path: Option<&str>,
    context: &mut C,
) -> Result<(), Diagnostic>
where
    R: BufRead,
    C: SystemContext,
{
    let formatter = BasicFormatter::new(path);
    loop {
        match lexer.next_token() {
            Ok(token) => {
                context.writeln(&formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    return Ok(());
                }
            }
            Err(error) => {
                context.writeln(&formatter.format(&error.to_token()));
                return Err(error.to_diagnostic(path));
            }
        }
    }
}
