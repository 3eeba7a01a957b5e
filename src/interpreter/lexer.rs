use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::error::ParseError;

/// Raw token produced by logos before positions and literal text are
/// attached.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `return`
    #[token("return")]
    Return,
    /// `class`
    #[token("class")]
    Class,
    /// `static`
    #[token("static")]
    Static,
    /// `enum`
    #[token("enum")]
    Enum,
    /// `match`
    #[token("match")]
    Match,
    /// `default`
    #[token("default")]
    Default,
    /// `new`
    #[token("new")]
    New,
    /// `throw`
    #[token("throw")]
    Throw,
    /// `try`
    #[token("try")]
    Try,
    /// `catch`
    #[token("catch")]
    Catch,
    /// Identifier tokens such as `x` or `Shape`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// Numeric literals: digits with a single optional decimal point.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// Quoted string literals; they may span several lines.
    #[regex(r#""[^"]*""#, allow_greedy = true)]
    #[regex(r"'[^']*'", allow_greedy = true)]
    String,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `->`
    #[token("->")]
    Ternary,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `&&`
    #[token("&&")]
    And,
    /// `|`
    #[token("|")]
    Bar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Line breaks are kept in the stream.
    #[token("\n")]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// The kind of a lexical token.
///
/// Reserved words get their own kinds; every other word is an
/// [`TokenKind::Identifier`]. The stream always ends with
/// [`TokenKind::Eof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Let,
    Const,
    Fn,
    If,
    Else,
    For,
    While,
    Break,
    Continue,
    Return,
    Class,
    Static,
    Enum,
    Match,
    Default,
    New,
    Throw,
    Try,
    Catch,
    Identifier,
    Number,
    String,
    /// `=>`, separating match patterns from their body.
    Arrow,
    /// `->`, introducing the two branches of a ternary.
    Ternary,
    EqualEqual,
    BangEqual,
    And,
    Bar,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equals,
    Less,
    Greater,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,
    NewLine,
    /// End of input; never produced by the scanner itself.
    Eof,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Let => Self::Let,
            RawToken::Const => Self::Const,
            RawToken::Fn => Self::Fn,
            RawToken::If => Self::If,
            RawToken::Else => Self::Else,
            RawToken::For => Self::For,
            RawToken::While => Self::While,
            RawToken::Break => Self::Break,
            RawToken::Continue => Self::Continue,
            RawToken::Return => Self::Return,
            RawToken::Class => Self::Class,
            RawToken::Static => Self::Static,
            RawToken::Enum => Self::Enum,
            RawToken::Match => Self::Match,
            RawToken::Default => Self::Default,
            RawToken::New => Self::New,
            RawToken::Throw => Self::Throw,
            RawToken::Try => Self::Try,
            RawToken::Catch => Self::Catch,
            RawToken::Identifier => Self::Identifier,
            RawToken::Number => Self::Number,
            RawToken::String => Self::String,
            RawToken::Arrow => Self::Arrow,
            RawToken::Ternary => Self::Ternary,
            RawToken::EqualEqual => Self::EqualEqual,
            RawToken::BangEqual => Self::BangEqual,
            RawToken::And => Self::And,
            RawToken::Bar => Self::Bar,
            RawToken::Plus => Self::Plus,
            RawToken::Minus => Self::Minus,
            RawToken::Star => Self::Star,
            RawToken::Slash => Self::Slash,
            RawToken::Percent => Self::Percent,
            RawToken::Equals => Self::Equals,
            RawToken::Less => Self::Less,
            RawToken::Greater => Self::Greater,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
            RawToken::LBracket => Self::LBracket,
            RawToken::RBracket => Self::RBracket,
            RawToken::Comma => Self::Comma,
            RawToken::Dot => Self::Dot,
            RawToken::Colon => Self::Colon,
            RawToken::Semicolon => Self::Semicolon,
            // Skipped kinds never reach the conversion.
            RawToken::NewLine | RawToken::Comment | RawToken::Ignored => Self::NewLine,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Let => "'let'",
            Self::Const => "'const'",
            Self::Fn => "'fn'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::For => "'for'",
            Self::While => "'while'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Return => "'return'",
            Self::Class => "'class'",
            Self::Static => "'static'",
            Self::Enum => "'enum'",
            Self::Match => "'match'",
            Self::Default => "'default'",
            Self::New => "'new'",
            Self::Throw => "'throw'",
            Self::Try => "'try'",
            Self::Catch => "'catch'",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Arrow => "'=>'",
            Self::Ternary => "'->'",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::And => "'&&'",
            Self::Bar => "'|'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Equals => "'='",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::NewLine => "newline",
            Self::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A lexical token with its source position.
///
/// `literal` is the meaningful text (a string's contents without quotes, an
/// identifier's name, a number's digits); `raw` is the exact source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind:    TokenKind,
    /// Meaningful text of the token.
    pub literal: String,
    /// Exact source text of the token.
    pub raw:     String,
    /// 1-based line of the first character.
    pub line:    usize,
    /// 1-based column of the first character.
    pub column:  usize,
}

impl Token {
    /// Describes the token for diagnostics, e.g. `identifier 'foo'`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::String => {
                format!("{} '{}'", self.kind, self.literal)
            },
            kind => kind.to_string(),
        }
    }
}

/// Converts source text into a token sequence terminated by
/// [`TokenKind::Eof`].
///
/// Newlines are kept as [`TokenKind::NewLine`] tokens. Line and column
/// counters advance across multi-line string literals.
///
/// # Errors
/// Returns [`ParseError::UnexpectedCharacter`] for a character that starts
/// no token.
///
/// # Example
/// ```
/// use tessera::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("let x = 1").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Let, TokenKind::Identifier, TokenKind::Equals, TokenKind::Number,
///             TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    let mut line = 1;
    let mut line_start = 0;

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let column = column_of(source, line_start, span.start);

        let Ok(raw) = raw else {
            return Err(ParseError::UnexpectedCharacter { character: slice.chars()
                                                                         .next()
                                                                         .unwrap_or('\0'),
                                                         line,
                                                         column });
        };

        let literal = match raw {
            RawToken::String => slice[1..slice.len() - 1].to_string(),
            _ => slice.to_string(),
        };

        tokens.push(Token { kind: raw.into(),
                            literal,
                            raw: slice.to_string(),
                            line,
                            column });

        if let Some(offset) = slice.rfind('\n') {
            line += slice.matches('\n').count();
            line_start = span.start + offset + 1;
        }
    }

    tokens.push(Token { kind:    TokenKind::Eof,
                        literal: String::new(),
                        raw:     String::new(),
                        line,
                        column:  column_of(source, line_start, source.len()), });

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Returns the 1-based column of byte offset `at` on the line starting at
/// `line_start`.
fn column_of(source: &str, line_start: usize, at: usize) -> usize {
    source.get(line_start..at)
          .map_or(1, |prefix| prefix.chars().count() + 1)
}
