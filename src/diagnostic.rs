use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use compact_str::CompactString;
use std::fmt::Display;

/// Path shown in diagnostics when the caller did not name its input.
pub const DEFAULT_PATH: &str = "<stdin>";

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
    Runtime,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer error"),
            Stage::Parser => write!(f, "parser error"),
            Stage::Runtime => write!(f, "runtime error"),
        }
    }
}

/// Errors that can be surfaced to the user as a single diagnostic line.
pub trait Reportable: std::error::Error {
    fn stage(&self) -> Stage;
    fn code(&self) -> &'static str;
    /// 1-based line, 0 when unknown.
    fn line(&self) -> u32;
    /// 1-based column, 0 when unknown.
    fn column(&self) -> u32;

    fn to_diagnostic(&self, path: Option<&str>) -> Diagnostic {
        Diagnostic {
            path: path
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PATH)
                .into(),
            stage: self.stage(),
            code: self.code(),
            line: self.line(),
            column: self.column(),
            message: self.to_string(),
        }
    }
}

/// The first failure of a run, rendered as
/// `<path>:<line>:<col>: <kind>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: CompactString,
    pub stage: Stage,
    pub code: &'static str,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Diagnostic {
            path,
            stage,
            line,
            column,
            message,
            ..
        } = self;
        match (*line, *column) {
            (0, _) => write!(f, "{path}: {stage}: {message}"),
            (line, 0) => write!(f, "{path}:{line}: {stage}: {message}"),
            (line, column) => write!(f, "{path}:{line}:{column}: {stage}: {message}"),
        }
    }
}

impl std::error::Error for Diagnostic {}

pub trait DiagnosticFormatter {
    fn format(&self, diagnostic: &Diagnostic) -> String;
}

pub struct PlainFormatter;

impl DiagnosticFormatter for PlainFormatter {
    fn format(&self, diagnostic: &Diagnostic) -> String {
        format!("{diagnostic}")
    }
}

/// Renders a diagnostic as an annotated source excerpt. Needs the full text
/// the diagnostic was produced from.
pub struct PrettyFormatter<'src> {
    text: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text }
    }

    /// Byte offset of a 1-based line/column pair, clamped to the text.
    fn offset_of(&self, line: u32, column: u32) -> usize {
        let mut offset = 0;
        for _ in 1..line {
            match self.text[offset..].find('\n') {
                Some(index) => offset += index + 1,
                None => return self.text.len(),
            }
        }
        let line_end = self.text[offset..]
            .find('\n')
            .map(|index| offset + index)
            .unwrap_or(self.text.len());
        (offset + column.saturating_sub(1) as usize).min(line_end)
    }
}

impl<'src> DiagnosticFormatter for PrettyFormatter<'src> {
    fn format(&self, diagnostic: &Diagnostic) -> String {
        if diagnostic.line == 0 {
            return format!("{diagnostic}");
        }
        let path = diagnostic.path.as_str();
        let start = self.offset_of(diagnostic.line, diagnostic.column.max(1));
        let end = (start + 1).min(self.text.len()).max(start);
        let span = start..end;

        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code(diagnostic.code)
            .with_message(format!("{diagnostic}"))
            .with_label(
                Label::new((path, span))
                    .with_message(&diagnostic.message)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
