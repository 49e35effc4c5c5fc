use compact_str::CompactString;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// Identifier text of the only built-in call.
pub const PRINT_IDENTIFIER: &str = "sonus.dic";

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, Keyword>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("si", Keyword::Si);
    map.insert("aliosi", Keyword::Aliosi);
    map.insert("alio", Keyword::Alio);
    map.insert("pro", Keyword::Pro);
    map.insert("dum", Keyword::Dum);
    map.insert("frange", Keyword::Frange);
    map.insert("perge", Keyword::Perge);
    map.insert("munus", Keyword::Munus);
    map.insert("redit", Keyword::Redit);
    map.insert("conare", Keyword::Conare);
    map.insert("nisi", Keyword::Nisi);
    map.insert("denique", Keyword::Denique);
    map.insert("iacta", Keyword::Iacta);
    map.insert("import", Keyword::Import);
    map.insert("verum", Keyword::Verum);
    map.insert("falsum", Keyword::Falsum);
    map.insert("nulla", Keyword::Nulla);
    map.insert("et", Keyword::Et);
    map.insert("aut", Keyword::Aut);
    map.insert("non", Keyword::Non);
    map.insert("in", Keyword::In);
    map
});

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Conditionals
    Si,
    Aliosi,
    Alio,
    // Loops (reserved)
    Pro,
    Dum,
    Frange,
    Perge,
    // Functions (reserved)
    Munus,
    Redit,
    // Exceptions (reserved)
    Conare,
    Nisi,
    Denique,
    Iacta,
    // Modules
    Import,
    // Literals
    Verum,
    Falsum,
    Nulla,
    // Logical operators
    Et,
    Aut,
    Non,
    // Membership (reserved)
    In,
}

impl Keyword {
    pub fn lexeme(&self) -> &'static str {
        match self {
            Keyword::Si => "si",
            Keyword::Aliosi => "aliosi",
            Keyword::Alio => "alio",
            Keyword::Pro => "pro",
            Keyword::Dum => "dum",
            Keyword::Frange => "frange",
            Keyword::Perge => "perge",
            Keyword::Munus => "munus",
            Keyword::Redit => "redit",
            Keyword::Conare => "conare",
            Keyword::Nisi => "nisi",
            Keyword::Denique => "denique",
            Keyword::Iacta => "iacta",
            Keyword::Import => "import",
            Keyword::Verum => "verum",
            Keyword::Falsum => "falsum",
            Keyword::Nulla => "nulla",
            Keyword::Et => "et",
            Keyword::Aut => "aut",
            Keyword::Non => "non",
            Keyword::In => "in",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparator {
    EqualEqual,
    BangEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parenthesis {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    NumericLiteral,
    StringLiteral,
    Assign,
    Operator(ArithmeticOperator),
    Comparator(Comparator),
    Parenthesis(Parenthesis),
    Colon,
    // Layout
    Newline,
    Indent,
    Dedent,
    // Offending input of a lexical error
    Invalid,
    // End of file.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "IDENTIFIER"),
            TokenKind::Keyword(_) => write!(f, "KEYWORD"),
            TokenKind::NumericLiteral => write!(f, "NUMBER"),
            TokenKind::StringLiteral => write!(f, "STRING"),
            TokenKind::Assign => write!(f, "ASSIGN"),
            TokenKind::Operator(_) => write!(f, "OPERATOR"),
            TokenKind::Comparator(_) => write!(f, "COMPARATOR"),
            TokenKind::Parenthesis(_) => write!(f, "PAREN"),
            TokenKind::Colon => write!(f, "COLON"),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Indent => write!(f, "INDENT"),
            TokenKind::Dedent => write!(f, "DEDENT"),
            TokenKind::Invalid => write!(f, "INVALID"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: CompactString,
    /// 1-based line of the token.
    pub line: u32,
    /// 1-based byte column of the token.
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<CompactString>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Structural tokens are spelled after their kind.
    pub fn layout(kind: TokenKind, line: u32, column: u32) -> Self {
        let text = match kind {
            TokenKind::Eof => CompactString::const_new(""),
            kind => kind.to_string().into(),
        };
        Self {
            kind,
            text,
            line,
            column,
        }
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::layout(TokenKind::Eof, line, column)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// 1-based line and column of a piece of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> CompactString {
        match self.kind {
            TokenKind::Eof => "end of input".into(),
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent => {
                self.kind.to_string().into()
            }
            TokenKind::StringLiteral => compact_str::format_compact!("\"{}\"", self.text),
            _ => compact_str::format_compact!("'{}'", self.text),
        }
    }
}
