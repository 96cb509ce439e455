/// The lexer module tokenizes an expression string.
///
/// The lexer (tokenizer) reads the raw input text and produces an ordered
/// sequence of tokens: numbers, the five binary operators, and brackets.
/// It also resolves unary sign usage, folding a leading `+` or `-` into the
/// numeric literal that follows it. This is the first stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input character stream into classified tokens.
/// - Distinguishes unary from binary sign usage by context.
/// - Reports unrecognized characters as a malformed expression.
pub mod lexer;

/// The brackets module validates parenthesis nesting.
///
/// The bracket checker scans a token sequence with an explicit stack and
/// reports whether every closing bracket matches a previously opened,
/// still-unmatched opening bracket, with none left open at end of input.
/// It runs before parsing and is independent of it.
///
/// # Responsibilities
/// - Finds the first unmatched `)` and reports its position.
/// - Detects `(` tokens still open at end of input.
/// - Stays reusable across checks via an explicit reset.
pub mod brackets;

/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the token sequence through an operator-precedence
/// (shunting-yard style) algorithm over an explicit operator stack, reducing
/// eagerly into AST nodes instead of materializing a postfix token list.
///
/// # Responsibilities
/// - Builds exactly one tree for every well-formed token sequence.
/// - Honors precedence and associativity during stack reduction.
/// - Reports arity mistakes and leftover operands as malformed.
pub mod parser;
