//! Groups a token stream into phrases: one logical statement or block
//! per phrase.
//!
//! Grouping is an explicit state machine. Each call to [`step`] looks at
//! the tokens after the cursor, marks the end of the next phrase, and
//! names the state to continue in; [`group`] drives it in a loop so no
//! statement shape needs recursion.

use std::fmt;

use crate::token::{Token, TokenKind};

/// Identifiers in the class body that declare a download location.
const URL_NAMES: &[&str] = &["url", "git", "svn", "hg", "cvs", "urls"];

/// Kind of logical statement a phrase holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseKind {
    /// Comment block (or trailing blank lines).
    Top,
    /// `import ...` / `from ... import ...`.
    Import,
    /// `class Name(Base):` header.
    Class,
    /// `homepage = ...`.
    Homepage,
    /// `url = ...`, `git = ...`, and the other location attributes.
    Url,
    /// `version(...)` call.
    Version,
    /// `depends_on(...)` call.
    DependsOn,
    /// Any other statement in the class body.
    Extra,
}

impl fmt::Display for PhraseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "Top",
            Self::Import => "Import",
            Self::Class => "Class",
            Self::Homepage => "Homepage",
            Self::Url => "Url",
            Self::Version => "Version",
            Self::DependsOn => "DependsOn",
            Self::Extra => "Extra",
        };
        f.write_str(name)
    }
}

/// A contiguous run of tokens forming one statement, leading line
/// breaks and indentation included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub kind: PhraseKind,
    pub tokens: Vec<Token>,
}

impl Phrase {
    /// Source text of the phrase.
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|t| f.write_str(&t.text))
    }
}

/// Grouping state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Module level: comments, imports, and the class header.
    Start,
    /// Inside the class body.
    Main,
}

/// Outcome of one state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The tokens between the last mark and the cursor form a phrase;
    /// continue in the given state.
    Emit(PhraseKind, State),
    /// No statements left.
    Done,
}

/// Classifies a phrasing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseErrorKind {
    /// Module-level statement that is not a comment, import, or class.
    UnexpectedStatement { found: String },
    /// Class header whose base list is never closed.
    UnclosedBrackets,
    /// Closing bracket in a class header with nothing open.
    UnmatchedBracket,
    /// Class header not ending in `:`.
    MissingColon,
}

impl fmt::Display for PhraseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedStatement { found } => {
                write!(f, "unexpected statement starting with '{found}'")
            }
            Self::UnclosedBrackets => {
                write!(f, "unclosed bracket in class header")
            }
            Self::UnmatchedBracket => {
                write!(f, "unmatched closing bracket in class header")
            }
            Self::MissingColon => {
                write!(f, "expected ':' after class header")
            }
        }
    }
}

/// Error produced during phrasing.
///
/// `remaining` holds the tokens from the start of the offending
/// statement to the end of input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct PhraseError {
    pub kind: PhraseErrorKind,
    pub remaining: Vec<Token>,
}

/// Group tokens into phrases.
///
/// Every token ends up in exactly one phrase, in order.
///
/// # Errors
///
/// Returns `PhraseError` when a module-level statement cannot be
/// classified or a class header is malformed.
pub fn group(tokens: Vec<Token>) -> Result<Vec<Phrase>, PhraseError> {
    let mut cursor = Cursor::new(&tokens);
    let mut state = State::Start;
    let mut bounds = Vec::new();

    while let Step::Emit(kind, next) = step(state, &mut cursor)? {
        bounds.push((kind, cursor.mark()));
        state = next;
    }
    if cursor.pending() > 0 {
        bounds.push((PhraseKind::Top, cursor.mark()));
    }

    let mut tokens = tokens.into_iter();
    Ok(bounds
        .into_iter()
        .map(|(kind, len)| Phrase {
            kind,
            tokens: tokens.by_ref().take(len).collect(),
        })
        .collect())
}

/// Advance the cursor past the next phrase for `state`.
///
/// # Errors
///
/// Returns `PhraseError` if the statement at the cursor is not valid in
/// `state`.
pub fn step(state: State, cursor: &mut Cursor<'_>) -> Result<Step, PhraseError> {
    match state {
        State::Start => start(cursor),
        State::Main => main(cursor),
    }
}

fn start(cursor: &mut Cursor<'_>) -> Result<Step, PhraseError> {
    cursor.accept_run(&[TokenKind::Newline]);

    let Some(token) = cursor.peek() else {
        return Ok(Step::Done);
    };

    match token.kind {
        TokenKind::Comment => {
            cursor.accept_run(&[TokenKind::Comment, TokenKind::Newline, TokenKind::Whitespace]);
            Ok(Step::Emit(PhraseKind::Top, State::Start))
        }
        TokenKind::Keyword if token.text == "import" || token.text == "from" => {
            cursor.logical_line();
            Ok(Step::Emit(PhraseKind::Import, State::Start))
        }
        TokenKind::Keyword if token.text == "class" => {
            cursor.class_header()?;
            Ok(Step::Emit(PhraseKind::Class, State::Main))
        }
        _ => Err(cursor.error(PhraseErrorKind::UnexpectedStatement {
            found: token.text.clone(),
        })),
    }
}

fn main(cursor: &mut Cursor<'_>) -> Result<Step, PhraseError> {
    cursor.accept_run(&[TokenKind::Newline, TokenKind::Whitespace]);

    let Some(token) = cursor.peek() else {
        return Ok(Step::Done);
    };

    let kind = match token.kind {
        TokenKind::Comment => {
            cursor.comment_block();
            return Ok(Step::Emit(PhraseKind::Top, State::Main));
        }
        TokenKind::Identifier => match token.text.as_str() {
            "homepage" => PhraseKind::Homepage,
            "version" => PhraseKind::Version,
            "depends_on" => PhraseKind::DependsOn,
            name if URL_NAMES.contains(&name) => PhraseKind::Url,
            _ => PhraseKind::Extra,
        },
        _ => PhraseKind::Extra,
    };

    cursor.logical_line();
    Ok(Step::Emit(kind, State::Main))
}

/// Read position over a token slice.
///
/// Tokens between the last [`mark`](Cursor::mark) and the current
/// position belong to the phrase being built.
#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    start: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            start: 0,
            pos: 0,
        }
    }

    /// Close the current phrase, returning its length in tokens.
    pub const fn mark(&mut self) -> usize {
        let len = self.pos - self.start;
        self.start = self.pos;
        len
    }

    /// Number of tokens consumed since the last mark.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pos - self.start
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn accept(&mut self, kinds: &[TokenKind]) -> bool {
        match self.peek() {
            Some(t) if kinds.contains(&t.kind) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn accept_run(&mut self, kinds: &[TokenKind]) {
        while self.accept(kinds) {}
    }

    /// Comments in the class body plus the blank lines and indentation
    /// between them. The break after the last comment is left for the
    /// next statement so its indentation stays with it.
    fn comment_block(&mut self) {
        while self.accept(&[TokenKind::Comment]) {
            let after_comment = self.pos;
            self.accept_run(&[TokenKind::Newline, TokenKind::Whitespace]);
            if self.peek().is_none_or(|t| t.kind != TokenKind::Comment) {
                self.pos = after_comment;
                return;
            }
        }
    }

    /// Consume up to the first line break outside brackets.
    fn logical_line(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Newline if depth == 0 => return,
                TokenKind::Delimiter => match token.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    _ => {}
                },
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Consume `class Name(...)` through the first `:` outside brackets.
    /// A statement after the colon on the same line is left for the body.
    fn class_header(&mut self) -> Result<(), PhraseError> {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Newline if depth == 0 => break,
                TokenKind::Delimiter => match token.text.as_str() {
                    ":" if depth == 0 => {
                        self.pos += 1;
                        return Ok(());
                    }
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" if depth == 0 => {
                        return Err(self.error(PhraseErrorKind::UnmatchedBracket));
                    }
                    ")" | "]" | "}" => depth -= 1,
                    _ => {}
                },
                _ => {}
            }
            self.pos += 1;
        }

        if depth > 0 {
            Err(self.error(PhraseErrorKind::UnclosedBrackets))
        } else {
            Err(self.error(PhraseErrorKind::MissingColon))
        }
    }

    fn error(&self, kind: PhraseErrorKind) -> PhraseError {
        PhraseError {
            kind,
            remaining: self.tokens[self.start..].to_vec(),
        }
    }
}
