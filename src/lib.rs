//! Lossless lexer, phraser, and parser for Spack package recipes.
//!
//! A recipe is split into three stages: the lexer turns source text
//! into tokens whose text concatenates back to the input, the phraser
//! groups tokens into one phrase per logical statement, and the parser
//! extracts `version(...)` and `depends_on(...)` declarations while
//! keeping everything around them as verbatim header and footer text.
//!
//! # Quick start
//!
//! ```
//! use spack_recipe_rs::parse_str;
//!
//! let input = "from spack.package import *\n\n\
//!              class Zlib(Package):\n\
//!              \thomepage = \"https://zlib.net\"\n\
//!              \tversion(\"1.3\", sha256=\"ff0b\")\n\
//!              \tdepends_on(\"cmake\", type=\"build\")\n";
//! let recipe = parse_str(input).unwrap();
//!
//! assert_eq!(recipe.indent, "\t");
//! assert_eq!(recipe.versions[0].version.text, "\"1.3\"");
//! assert_eq!(recipe.depends[0].package().unwrap().name, "cmake");
//! assert!(recipe.header.ends_with("homepage = \"https://zlib.net\""));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod phraser;
pub mod token;

use std::str::FromStr;

pub use ast::{Argument, Dependency, PackageSpec, Recipe, SpecError, Version};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{CallKind, ParseError, ParseErrorKind, parse, parse_with};
pub use phraser::{Phrase, PhraseError, PhraseErrorKind, PhraseKind, group};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A phraser error.
    #[error("{0}")]
    Phrase(#[from] PhraseError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Tokenize, phrase, and parse a recipe source string in one step.
pub fn parse_str(input: &str) -> Result<Recipe, Error> {
    let tokens = tokenize(input)?;
    let phrases = group(tokens)?;
    Ok(parse(&phrases)?)
}

impl FromStr for Recipe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
