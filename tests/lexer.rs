//! Lexer edge cases and error tests.

mod common;

use common::{ABCRF, ARRAYMVOUT, NEXTDENOVO, token_text};
use spack_recipe_rs::{LexErrorKind, Span, Token, TokenKind, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(input: &str) -> Token {
    let mut tokens = tokenize(input).expect("tokenize");
    assert_eq!(tokens.len(), 1, "expected one token for {input:?}");
    tokens.remove(0)
}

// -----------------------------------------------------------
// Lossless lexing.
// -----------------------------------------------------------

#[test]
fn lex_fixtures_lossless() {
    for input in [NEXTDENOVO, ABCRF, ARRAYMVOUT] {
        let tokens = tokenize(input).expect("tokenize");
        assert_eq!(token_text(&tokens), input);
    }
}

#[test]
fn lex_crlf_lossless() {
    let input = "class A(B):\r\n\tversion(\"1\")\r\n";
    let tokens = tokenize(input).expect("tokenize");
    assert_eq!(token_text(&tokens), input);
    assert_eq!(tokens[7].text, "\r\n");
    assert_eq!(tokens[7].kind, TokenKind::Newline);
}

#[test]
fn lex_only_whitespace() {
    let tokens = tokenize("  \t\x0c\n\n  ").expect("tokenize");
    let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["  \t\x0c", "\n\n", "  "]);
}

// -----------------------------------------------------------
// Strings.
// -----------------------------------------------------------

#[test]
fn lex_single_and_double_quotes() {
    assert_eq!(single("'it\\'s'").kind, TokenKind::String);
    assert_eq!(single("\"say \\\"hi\\\"\"").kind, TokenKind::String);
}

#[test]
fn lex_escaped_newline_in_short_string() {
    assert_eq!(single("'a\\\nb'").kind, TokenKind::String);
}

#[test]
fn lex_triple_single_quotes() {
    let tok = single("'''one\ntwo ' '' three'''");
    assert_eq!(tok.kind, TokenKind::String);
}

#[test]
fn lex_all_prefixes() {
    for prefix in ["r", "R", "u", "U", "f", "F", "b", "B", "rb", "Rb", "bR", "BR", "rf", "fR", "Fr"] {
        let input = format!("{prefix}\"x\"");
        assert_eq!(single(&input).kind, TokenKind::String, "{input}");
    }
}

#[test]
fn lex_prefix_letters_as_identifiers() {
    for input in ["r", "rb", "url", "bfoo", "ur"] {
        assert_eq!(single(input).kind, TokenKind::Identifier, "{input}");
    }
}

#[test]
fn lex_invalid_prefix_pair_is_identifier_then_string() {
    // `ur` is not a string prefix
    assert_eq!(kinds("ur'x'"), [TokenKind::Identifier, TokenKind::String]);
}

#[test]
fn lex_unterminated_string() {
    let err = tokenize("version(\"1.0").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span, Span { line: 1, column: 9 });
}

#[test]
fn lex_unterminated_triple_string() {
    let err = tokenize("\"\"\"doc\n\n").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_newline_in_string_reports_start() {
    let err = tokenize("x\n  'abc\n'").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::NewlineInString);
    assert_eq!(err.span, Span { line: 2, column: 3 });
    assert_eq!(err.to_string(), "newline in string at line 2, column 3");
}

// -----------------------------------------------------------
// Numbers.
// -----------------------------------------------------------

#[test]
fn lex_number_forms() {
    for input in [
        "7", "0", "00", "1_000_000", "0b_1010", "0O777", "0xDEAD_beef", "1.", "1.5", "1_0.2_5",
        "1e5", "1E+05", "6.02e-23", ".25", "3j", "2.5J", "077e010",
    ] {
        assert_eq!(single(input).kind, TokenKind::Number, "{input}");
    }
}

#[test]
fn lex_malformed_numbers() {
    for input in ["1__0", "1_", "0b", "0x_", "2.5_", "3e", "3e-", "1.5e_1"] {
        let err = tokenize(input).unwrap_err();
        assert!(
            matches!(
                err.kind,
                LexErrorKind::InvalidNumber | LexErrorKind::InvalidExponent
            ),
            "{input}: {err}"
        );
    }
}

#[test]
fn lex_attribute_access() {
    assert_eq!(
        kinds("x.y"),
        [
            TokenKind::Identifier,
            TokenKind::Delimiter,
            TokenKind::Identifier
        ]
    );
}

// -----------------------------------------------------------
// Identifiers and keywords.
// -----------------------------------------------------------

#[test]
fn lex_unicode_identifier() {
    let tok = single("données");
    assert_eq!(tok.kind, TokenKind::Identifier);
    assert_eq!(tok.text, "données");
}

#[test]
fn lex_keywords_are_case_sensitive() {
    assert_eq!(single("None").kind, TokenKind::Keyword);
    assert_eq!(single("none").kind, TokenKind::Identifier);
    assert_eq!(single("def").kind, TokenKind::Keyword);
    assert_eq!(single("depends_on").kind, TokenKind::Identifier);
}

// -----------------------------------------------------------
// Operators and delimiters.
// -----------------------------------------------------------

#[test]
fn lex_operator_classification() {
    let cases = [
        ("=", TokenKind::Delimiter),
        ("==", TokenKind::Operator),
        (":", TokenKind::Delimiter),
        (":=", TokenKind::Operator),
        ("!=", TokenKind::Operator),
        ("-", TokenKind::Operator),
        ("->", TokenKind::Delimiter),
        ("-=", TokenKind::Delimiter),
        ("**", TokenKind::Operator),
        ("**=", TokenKind::Delimiter),
        ("//=", TokenKind::Delimiter),
        ("<<", TokenKind::Operator),
        (">>=", TokenKind::Delimiter),
        (">=", TokenKind::Operator),
        ("@", TokenKind::Operator),
        ("|=", TokenKind::Delimiter),
        ("~", TokenKind::Operator),
        (";", TokenKind::Delimiter),
        ("}", TokenKind::Delimiter),
    ];
    for (input, kind) in cases {
        let tok = single(input);
        assert_eq!(tok.kind, kind, "{input}");
        assert_eq!(tok.text, input);
    }
}

#[test]
fn lex_bare_bang() {
    let err = tokenize("not !x").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidOperator('!'));
}

#[test]
fn lex_unexpected_characters() {
    for (input, ch) in [("$x", '$'), ("a ? b", '?'), ("`x`", '`')] {
        let err = tokenize(input).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter(ch), "{input}");
    }
}

#[test]
fn lex_stray_backslash() {
    let err = tokenize("a \\ b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('\\'));
}

#[test]
fn lex_comment_to_end_of_line() {
    let tokens = tokenize("x = 1  # trailing ( note\ny").expect("tokenize");
    let comment = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Comment)
        .expect("comment");
    assert_eq!(comment.text, "# trailing ( note");
}
