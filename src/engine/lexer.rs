use logos::Logos;

use crate::error::EvalError;

/// Represents a lexical token of an arithmetic expression.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token {
    /// Numeric literal tokens, such as `14`, `3.9`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// `**`, scanned greedily ahead of `*`.
    #[token("**")]
    DoubleStar,
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
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,

    /// Whitespace of any kind, skipped.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if the slice is a valid literal.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::DoubleStar => write!(f, "**"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Ignored => Ok(()),
        }
    }
}

/// Converts an expression string into its token sequence.
///
/// The input is scanned left to right with whitespace skipped, then run
/// through the unary-sign resolution pass: a `+` or `-` at the start of the
/// expression, after another operator, or after `(` is folded into the sign
/// of the numeric literal that follows it. Chained signs compose by repeated
/// negation, so `--5` tokenizes as the single literal `5` and `---5` as
/// `-5`. The returned sequence therefore contains `Plus` and `Minus` only in
/// binary positions.
///
/// # Parameters
/// - `input`: The raw expression text.
///
/// # Returns
/// The resolved token sequence, in source order.
///
/// # Errors
/// `MalformedExpression` if the input contains a character outside the
/// recognized set, or a unary sign with no numeric literal after it.
///
/// # Example
/// ```
/// use infixa::engine::lexer::{Token, tokenize};
///
/// let tokens = tokenize("--5 + 2").unwrap();
/// assert_eq!(tokens,
///            vec![Token::Number(5.0), Token::Plus, Token::Number(2.0)]);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut raw = Vec::new();
    let mut lexer = Token::lexer(input);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => raw.push(tok),
            Err(()) => {
                return Err(EvalError::MalformedExpression { details: format!("Unrecognized token '{}'",
                                                                             lexer.slice()), });
            },
        }
    }

    resolve_signs(&raw)
}

/// Folds unary `+` and `-` tokens into the literal that follows them.
///
/// # Parameters
/// - `raw`: Token sequence straight from the scanner, signs unresolved.
///
/// # Returns
/// The sequence with every unary sign applied to its literal.
///
/// # Errors
/// `MalformedExpression` if a unary sign is not followed by a numeric
/// literal (possibly through further chained signs).
fn resolve_signs(raw: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut iter = raw.iter().copied();

    while let Some(token) = iter.next() {
        let unary = matches!(token, Token::Plus | Token::Minus) && unary_position(tokens.last());
        if !unary {
            tokens.push(token);
            continue;
        }

        let mut sign = if matches!(token, Token::Minus) { -1.0 } else { 1.0 };
        loop {
            match iter.next() {
                Some(Token::Minus) => sign = -sign,
                Some(Token::Plus) => {},
                Some(Token::Number(value)) => {
                    tokens.push(Token::Number(sign * value));
                    break;
                },
                _ => {
                    return Err(EvalError::MalformedExpression { details:
                                   "A sign must be followed by a numeric literal".to_string(), });
                },
            }
        }
    }

    Ok(tokens)
}

/// Decides whether a `+` or `-` in front of the next token is unary.
///
/// Start of input, a preceding operator, and a preceding `(` all make the
/// sign unary; a preceding number or `)` makes it a binary operator.
const fn unary_position(previous: Option<&Token>) -> bool {
    match previous {
        None
        | Some(Token::Plus
               | Token::Minus
               | Token::Star
               | Token::Slash
               | Token::DoubleStar
               | Token::LParen) => true,
        Some(_) => false,
    }
}

/// Prints a token sequence on one line, used by the detailed-trace mode.
pub fn display_tokens(tokens: &[Token]) {
    print!("Tokens:");
    for token in tokens {
        print!(" {token}");
    }
    println!();
}
