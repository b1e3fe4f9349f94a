use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Name that is not a reserved word.
    Identifier,
    /// Integer, float, or imaginary literal.
    Number,
    /// String literal including prefix and quotes.
    String,
    /// Reserved word (`class`, `import`, `True`, ...).
    Keyword,
    /// Run of spaces, tabs, and form feeds (or a line continuation).
    Whitespace,
    /// Run of line breaks.
    Newline,
    /// Comment (`# ...`), excluding the line break.
    Comment,
    /// Operator such as `*`, `==`, or `<=`.
    Operator,
    /// Bracket, punctuation, or assignment form.
    Delimiter,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Keyword => "Keyword",
            Self::Whitespace => "Whitespace",
            Self::Newline => "Newline",
            Self::Comment => "Comment",
            Self::Operator => "Operator",
            Self::Delimiter => "Delimiter",
        };
        f.write_str(name)
    }
}

/// A single token: its kind and the exact source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// True if the token has the given kind and exact text.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Whitespace, line breaks, and comments.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
        )
    }

    /// Contents of a string literal with its prefix and quotes removed.
    ///
    /// Escapes are left as written. Returns `None` for tokens that are
    /// not strings.
    #[must_use]
    pub fn unquoted(&self) -> Option<&str> {
        if self.kind != TokenKind::String {
            return None;
        }
        let body = self.text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let quote = body.chars().next()?;
        let triple: String = std::iter::repeat_n(quote, 3).collect();
        if body.len() >= 6 && body.starts_with(&triple) && body.ends_with(&triple) {
            return Some(&body[3..body.len() - 3]);
        }
        body.strip_prefix(quote)?.strip_suffix(quote)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
