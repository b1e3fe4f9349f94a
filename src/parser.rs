use std::fmt;

use crate::ast::{Argument, Dependency, Recipe, Version};
use crate::phraser::{Phrase, PhraseKind};
use crate::token::{Token, TokenKind};

/// `version(...)` keys that record a checksum or VCS reference.
const HASH_KEYS: &[&str] = &[
    "sha256", "md5", "sha1", "sha224", "sha384", "sha512", "commit", "tag", "branch",
];

/// `version(...)` keys that record a source location.
const URL_KEYS: &[&str] = &["url", "svn", "hg", "cvs", "git"];

/// Most entries a `type=(...)` tuple may hold.
const MAX_TYPES: usize = 3;

/// Which call grammar is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Version,
    DependsOn,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version => f.write_str("version"),
            Self::DependsOn => f.write_str("depends_on"),
        }
    }
}

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected `(`, found something else or end of statement.
    ExpectedOpenParen { found: Option<String> },
    /// Expected a string literal.
    ExpectedString { found: Option<String> },
    /// Expected `,` or `)` after an argument.
    ExpectedCommaOrClose { found: Option<String> },
    /// Expected `=` after a keyword argument name.
    ExpectedAssign { found: Option<String> },
    /// Expected `True` or `False`.
    ExpectedBool { found: Option<String> },
    /// Expected a keyword argument name.
    ExpectedKeyword { found: Option<String> },
    /// `type=(...)` with more than three entries.
    TooManyTypes,
}

fn write_expected(f: &mut fmt::Formatter<'_>, what: &str, found: Option<&String>) -> fmt::Result {
    match found {
        None => write!(f, "expected {what}"),
        Some(t) => write!(f, "expected {what}, got '{t}'"),
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedOpenParen { found } => write_expected(f, "'('", found.as_ref()),
            Self::ExpectedString { found } => write_expected(f, "a string", found.as_ref()),
            Self::ExpectedCommaOrClose { found } => {
                write_expected(f, "',' or ')'", found.as_ref())
            }
            Self::ExpectedAssign { found } => write_expected(f, "'='", found.as_ref()),
            Self::ExpectedBool { found } => {
                write_expected(f, "True or False", found.as_ref())
            }
            Self::ExpectedKeyword { found } => {
                write_expected(f, "a keyword argument", found.as_ref())
            }
            Self::TooManyTypes => write!(f, "too many arguments to type"),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in {call}(...)")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub call: CallKind,
}

/// Reduce phrases to a `Recipe`.
///
/// Keyword arguments that neither call grammar knows are skipped
/// together with their values.
///
/// # Errors
///
/// Returns `ParseError` for the first `version(...)` or
/// `depends_on(...)` call that does not match its grammar.
pub fn parse(phrases: &[Phrase]) -> Result<Recipe, ParseError> {
    parse_with(phrases, |_, _| {})
}

/// Like [`parse`], calling `on_unknown_key` for every skipped keyword
/// argument.
///
/// # Errors
///
/// Returns `ParseError` on the same conditions as [`parse`].
pub fn parse_with(
    phrases: &[Phrase],
    mut on_unknown_key: impl FnMut(CallKind, &Token),
) -> Result<Recipe, ParseError> {
    let mut recipe = Recipe::default();
    let mut in_footer = false;

    for phrase in phrases {
        let call = match phrase.kind {
            PhraseKind::Version => CallKind::Version,
            PhraseKind::DependsOn => CallKind::DependsOn,
            _ => {
                let text = if in_footer {
                    &mut recipe.footer
                } else {
                    &mut recipe.header
                };
                for token in &phrase.tokens {
                    text.push_str(&token.text);
                }
                continue;
            }
        };

        let mut tokens = phrase.tokens.as_slice();
        if !in_footer {
            let (indent, rest) = split_indent(tokens);
            recipe.indent = indent;
            tokens = rest;
            in_footer = true;
        }

        let mut parser = CallParser::new(tokens, call, &mut on_unknown_key);
        match call {
            CallKind::Version => recipe.versions.push(parser.version()?),
            CallKind::DependsOn => recipe.depends.push(parser.depends_on()?),
        }
    }

    Ok(recipe)
}

/// Drop the leading blank lines of a statement and return the
/// whitespace that starts its own line, plus the remaining tokens.
fn split_indent(tokens: &[Token]) -> (String, &[Token]) {
    let lead = tokens
        .iter()
        .take_while(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Whitespace))
        .count();
    let (blank, rest) = tokens.split_at(lead);
    let line_start = blank
        .iter()
        .rposition(|t| t.kind == TokenKind::Newline)
        .map_or(0, |i| i + 1);
    let indent = blank[line_start..].iter().map(|t| t.text.as_str()).collect();
    (indent, rest)
}

#[derive(Clone, Copy)]
enum VersionKey {
    Hash,
    Url,
    Preferred,
    Unknown,
}

impl VersionKey {
    fn classify(name: &str) -> Self {
        if HASH_KEYS.contains(&name) {
            Self::Hash
        } else if URL_KEYS.contains(&name) {
            Self::Url
        } else if name == "preferred" {
            Self::Preferred
        } else {
            Self::Unknown
        }
    }
}

/// Parser for the argument list of one call statement.
///
/// Whitespace, line breaks, and comments between tokens are skipped.
/// Tokens after the closing `)` are ignored.
struct CallParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    call: CallKind,
    on_unknown_key: &'a mut dyn FnMut(CallKind, &Token),
}

impl<'a> CallParser<'a> {
    fn new(
        tokens: &'a [Token],
        call: CallKind,
        on_unknown_key: &'a mut dyn FnMut(CallKind, &Token),
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            call,
            on_unknown_key,
        }
    }

    fn version(&mut self) -> Result<Version, ParseError> {
        self.skip_callee();
        self.expect_open_paren()?;

        let mut version = Version {
            version: self.expect_string()?,
            hash: None,
            url: None,
            preferred: None,
        };

        while self.next_argument()? {
            let key = self.expect_keyword()?;
            match VersionKey::classify(&key.text) {
                VersionKey::Hash => {
                    self.expect_assign()?;
                    let value = self.expect_string()?;
                    version.hash = Some(Argument { key, value });
                }
                VersionKey::Url => {
                    self.expect_assign()?;
                    let value = self.expect_string()?;
                    version.url = Some(Argument { key, value });
                }
                VersionKey::Preferred => {
                    self.expect_assign()?;
                    version.preferred = Some(self.expect_bool()?);
                }
                VersionKey::Unknown => self.skip_unknown(&key),
            }
        }

        Ok(version)
    }

    fn depends_on(&mut self) -> Result<Dependency, ParseError> {
        self.skip_callee();
        self.expect_open_paren()?;

        let mut dependency = Dependency {
            spec: self.expect_string()?,
            types: Vec::new(),
            when: None,
        };

        while self.next_argument()? {
            let key = self.expect_keyword()?;
            match key.text.as_str() {
                "type" => {
                    self.expect_assign()?;
                    dependency.types = self.types()?;
                }
                "when" => {
                    self.expect_assign()?;
                    dependency.when = Some(self.expect_string()?);
                }
                _ => self.skip_unknown(&key),
            }
        }

        Ok(dependency)
    }

    /// `"run"` or `("build", "run")`.
    fn types(&mut self) -> Result<Vec<Token>, ParseError> {
        if !self.eat(TokenKind::Delimiter, "(") {
            return Ok(vec![self.expect_string()?]);
        }

        let mut types = vec![self.expect_string()?];
        while self.next_argument()? {
            if types.len() == MAX_TYPES {
                return Err(self.error(ParseErrorKind::TooManyTypes));
            }
            types.push(self.expect_string()?);
        }
        Ok(types)
    }

    fn skip_callee(&mut self) {
        self.skip_trivia();
        self.pos += 1;
    }

    /// Report an unrecognised keyword and step over its `= value`.
    fn skip_unknown(&mut self, key: &Token) {
        (self.on_unknown_key)(self.call, key);
        if !self.eat(TokenKind::Delimiter, "=") {
            return;
        }

        let mut depth = 0usize;
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind == TokenKind::Delimiter {
                match token.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" | "," if depth == 0 => return,
                    ")" | "]" | "}" => depth -= 1,
                    _ => {}
                }
            }
            self.pos += 1;
        }
    }

    /// After an argument: `,` means another may follow, `)` closes the
    /// list. A trailing `,` before `)` is allowed.
    fn next_argument(&mut self) -> Result<bool, ParseError> {
        if self.eat(TokenKind::Delimiter, ",") {
            return Ok(!self.eat(TokenKind::Delimiter, ")"));
        }
        if self.eat(TokenKind::Delimiter, ")") {
            return Ok(false);
        }
        let found = self.found();
        Err(self.error(ParseErrorKind::ExpectedCommaOrClose { found }))
    }

    fn expect_open_paren(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Delimiter, "(") {
            return Ok(());
        }
        let found = self.found();
        Err(self.error(ParseErrorKind::ExpectedOpenParen { found }))
    }

    fn expect_assign(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Delimiter, "=") {
            return Ok(());
        }
        let found = self.found();
        Err(self.error(ParseErrorKind::ExpectedAssign { found }))
    }

    fn expect_string(&mut self) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::String => {
                self.pos += 1;
                Ok(token.clone())
            }
            found => {
                let found = found.map(|t| t.text.clone());
                Err(self.error(ParseErrorKind::ExpectedString { found }))
            }
        }
    }

    fn expect_keyword(&mut self) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.pos += 1;
                Ok(token.clone())
            }
            found => {
                let found = found.map(|t| t.text.clone());
                Err(self.error(ParseErrorKind::ExpectedKeyword { found }))
            }
        }
    }

    fn expect_bool(&mut self) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token)
                if token.is(TokenKind::Keyword, "True") || token.is(TokenKind::Keyword, "False") =>
            {
                self.pos += 1;
                Ok(token.clone())
            }
            found => {
                let found = found.map(|t| t.text.clone());
                Err(self.error(ParseErrorKind::ExpectedBool { found }))
            }
        }
    }

    fn eat(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.peek().is_some_and(|t| t.is(kind, text)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Next significant token, skipping trivia.
    fn peek(&mut self) -> Option<&'a Token> {
        self.skip_trivia();
        self.tokens.get(self.pos)
    }

    fn found(&mut self) -> Option<String> {
        self.peek().map(|t| t.text.clone())
    }

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(Token::is_trivia) {
            self.pos += 1;
        }
    }

    const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            call: self.call,
        }
    }
}
