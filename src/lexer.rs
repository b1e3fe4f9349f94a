use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Reserved words; any identifier spelled like one lexes as a keyword.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

const BINARY: &str = "01";
const OCTAL: &str = "01234567";
const DECIMAL: &str = "0123456789";
const HEXADECIMAL: &str = "0123456789abcdefABCDEF";

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Digit separator not followed by a digit, or a radix prefix
    /// with no digits.
    InvalidNumber,
    /// Exponent marker without digits.
    InvalidExponent,
    /// String literal still open at end of input.
    UnterminatedString,
    /// Line break inside a single-quoted (not triple-quoted) string.
    NewlineInString,
    /// Operator character that needs a partner (`!` without `=`).
    InvalidOperator(char),
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number literal"),
            Self::InvalidExponent => write!(f, "invalid exponent"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::NewlineInString => write!(f, "newline in string"),
            Self::InvalidOperator(ch) => {
                write!(f, "invalid operator: {ch}")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch:?}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize recipe source into a lossless sequence of tokens.
///
/// Concatenating the text of the returned tokens reproduces `input`
/// exactly.
///
/// # Errors
///
/// Returns `LexError` on malformed numbers, unterminated strings,
/// or characters that cannot start a token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

fn is_id_start(ch: char) -> bool {
    ch == '_' || unicode_ident::is_xid_start(ch)
}

fn is_id_continue(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch)
}

/// Characters that may follow `first` in a two-letter string prefix,
/// or `None` if `first` cannot begin a prefix at all.
const fn string_prefix_partners(first: char) -> Option<&'static str> {
    match first {
        'r' | 'R' => Some("bBfF"),
        'b' | 'B' | 'f' | 'F' => Some("rR"),
        'u' | 'U' => Some(""),
        _ => None,
    }
}

struct Lexer<'a> {
    input: &'a str,
    start: usize,
    start_span: Span,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            start_span: Span { line: 1, column: 1 },
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Lex one token; `Ok(None)` marks end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        self.start = self.pos;
        self.start_span = self.span();

        let kind = match ch {
            ' ' | '\t' | '\x0c' => {
                self.accept_run(|c| matches!(c, ' ' | '\t' | '\x0c'));
                TokenKind::Whitespace
            }
            '\n' | '\r' => {
                self.accept_run(|c| matches!(c, '\n' | '\r'));
                TokenKind::Newline
            }
            '\\' if matches!(self.peek_at(1), Some('\n' | '\r')) => self.read_continuation(),
            '#' => {
                self.accept_run(|c| !matches!(c, '\n' | '\r'));
                TokenKind::Comment
            }
            '"' | '\'' => self.read_string(ch)?,
            '0'..='9' => self.read_number(ch)?,
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.advance();
                self.read_fraction()?
            }
            c if is_id_start(c) => self.read_word(c)?,
            _ => self.read_operator(ch)?,
        };

        Ok(Some(Token::new(kind, &self.input[self.start..self.pos])))
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    const fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            span: self.start_span,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn accept(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn accept_char(&mut self, want: char) -> bool {
        self.accept(|c| c == want)
    }

    fn accept_run(&mut self, pred: impl Fn(char) -> bool) {
        while self.accept(&pred) {}
    }

    fn read_continuation(&mut self) -> TokenKind {
        self.advance(); // backslash
        if self.advance() == Some('\r') {
            self.accept_char('\n');
        }
        TokenKind::Whitespace
    }

    fn read_string(&mut self, quote: char) -> Result<TokenKind, LexError> {
        self.advance(); // opening quote

        let long = if self.accept_char(quote) {
            if !self.accept_char(quote) {
                // empty string
                return Ok(TokenKind::String);
            }
            true
        } else {
            false
        };

        loop {
            match self.advance() {
                None => return Err(self.error(LexErrorKind::UnterminatedString)),
                Some('\\') => {
                    self.advance();
                }
                Some('\n' | '\r') if !long => {
                    return Err(self.error(LexErrorKind::NewlineInString));
                }
                Some(c) if c == quote => {
                    if !long {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                        self.advance();
                        self.advance();
                        break;
                    }
                }
                Some(_) => {}
            }
        }

        Ok(TokenKind::String)
    }

    /// Identifier or keyword, unless the leading letters turn out to
    /// be a string prefix (`r"..."`, `Rb'...'`).
    fn read_word(&mut self, first: char) -> Result<TokenKind, LexError> {
        self.advance();

        if let Some(partners) = string_prefix_partners(first) {
            self.accept(|c| partners.contains(c));
            if let Some(quote @ ('"' | '\'')) = self.peek() {
                return self.read_string(quote);
            }
        }

        self.accept_run(is_id_continue);
        let text = &self.input[self.start..self.pos];
        if KEYWORDS.contains(&text) {
            Ok(TokenKind::Keyword)
        } else {
            Ok(TokenKind::Identifier)
        }
    }

    fn read_number(&mut self, first: char) -> Result<TokenKind, LexError> {
        self.advance();

        if first == '0' {
            let digits = match self.peek() {
                Some('b' | 'B') => Some(BINARY),
                Some('o' | 'O') => Some(OCTAL),
                Some('x' | 'X') => Some(HEXADECIMAL),
                _ => None,
            };
            if let Some(digits) = digits {
                self.advance();
                self.accept_char('_');
                if !self.accept(|c| digits.contains(c)) {
                    return Err(self.error(LexErrorKind::InvalidNumber));
                }
                self.digit_run(digits)?;
                return Ok(TokenKind::Number);
            }
        }

        self.digit_run(DECIMAL)?;
        if self.accept_char('.') {
            return self.read_fraction();
        }
        self.read_exponent()?;
        Ok(TokenKind::Number)
    }

    fn read_fraction(&mut self) -> Result<TokenKind, LexError> {
        self.digit_run(DECIMAL)?;
        self.read_exponent()?;
        Ok(TokenKind::Number)
    }

    /// Optional `e`/`E` exponent, then an optional imaginary suffix.
    fn read_exponent(&mut self) -> Result<(), LexError> {
        if self.accept(|c| c == 'e' || c == 'E') {
            self.accept(|c| c == '+' || c == '-');
            if !self.accept(|c| c.is_ascii_digit()) {
                return Err(self.error(LexErrorKind::InvalidExponent));
            }
            self.digit_run(DECIMAL)?;
        }
        self.accept(|c| c == 'j' || c == 'J');
        Ok(())
    }

    /// Digits with `_` group separators; every `_` needs a digit after it.
    fn digit_run(&mut self, digits: &str) -> Result<(), LexError> {
        loop {
            self.accept_run(|c| digits.contains(c));
            if !self.accept_char('_') {
                return Ok(());
            }
            if !self.accept(|c| digits.contains(c)) {
                return Err(self.error(LexErrorKind::InvalidNumber));
            }
        }
    }

    fn read_operator(&mut self, ch: char) -> Result<TokenKind, LexError> {
        self.advance();

        let kind = match ch {
            '+' | '&' | '|' | '^' | '%' | '@' => {
                if self.accept_char('=') {
                    TokenKind::Delimiter
                } else {
                    TokenKind::Operator
                }
            }
            '-' => {
                if self.accept(|c| c == '>' || c == '=') {
                    TokenKind::Delimiter
                } else {
                    TokenKind::Operator
                }
            }
            '*' | '/' | '<' | '>' => {
                let doubled = self.accept_char(ch);
                // `<=`/`>=` compare, `**=`, `//=`, `<<=`, `*=` assign
                if self.accept_char('=') && (doubled || ch == '*' || ch == '/') {
                    TokenKind::Delimiter
                } else {
                    TokenKind::Operator
                }
            }
            ':' | '=' => {
                if self.accept_char('=') {
                    TokenKind::Operator
                } else {
                    TokenKind::Delimiter
                }
            }
            '!' => {
                if !self.accept_char('=') {
                    return Err(self.error(LexErrorKind::InvalidOperator('!')));
                }
                TokenKind::Operator
            }
            '~' => TokenKind::Operator,
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | '.' | ';' => TokenKind::Delimiter,
            _ => return Err(self.error(LexErrorKind::UnexpectedCharacter(ch))),
        };

        Ok(kind)
    }
}
