use crate::{
    ast::{Associativity, BinaryOperator, Node},
    engine::lexer::Token,
    error::EvalError,
};

/// One entry of the parser's operator stack.
///
/// A `Barrier` marks a `(` and stops reduction until the matching `)`
/// discards it.
#[derive(Debug, Copy, Clone)]
enum StackEntry {
    Operator(BinaryOperator),
    Barrier,
}

impl std::fmt::Display for StackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{op}"),
            Self::Barrier => write!(f, "("),
        }
    }
}

/// Builds an AST from a token sequence with an operator-precedence
/// (shunting-yard style) algorithm.
///
/// The builder keeps an explicit operator stack and an output stack of
/// finished nodes, reducing eagerly: whenever an operator is popped, its two
/// most recent operands are combined into a new binary node on the output
/// stack. No intermediate postfix token list is materialized.
///
/// All working state lives inside `build`, so one builder value may be used
/// for any number of independent token sequences.
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    trace: bool,
}

impl ExpressionBuilder {
    /// Creates a builder with tracing disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { trace: false }
    }

    /// Creates a builder with the given per-call trace setting. When
    /// enabled, the builder prints the consumed token and both stacks after
    /// every step.
    #[must_use]
    pub const fn with_trace(trace: bool) -> Self {
        Self { trace }
    }

    /// Builds the AST root for a token sequence.
    ///
    /// The sequence is expected to have passed the bracket check; a stray
    /// bracket that slips through is still reported, as a malformed
    /// expression. An empty sequence builds the literal `0`, a documented
    /// default rather than an error.
    ///
    /// # Parameters
    /// - `tokens`: The bracket-validated token sequence.
    ///
    /// # Returns
    /// The root node of the tree.
    ///
    /// # Errors
    /// `MalformedExpression` if an operator is missing an operand, a
    /// bracket has no partner, or the sequence reduces to anything other
    /// than exactly one tree.
    ///
    /// # Example
    /// ```
    /// use infixa::engine::{lexer::tokenize, parser::ExpressionBuilder};
    ///
    /// let tokens = tokenize("1+3*2").unwrap();
    /// let root = ExpressionBuilder::new().build(&tokens).unwrap();
    ///
    /// assert_eq!(root.eval(), 7.0);
    /// ```
    pub fn build(&self, tokens: &[Token]) -> Result<Node, EvalError> {
        if tokens.is_empty() {
            return Ok(Node::Number { value: 0.0 });
        }

        let mut operators: Vec<StackEntry> = Vec::new();
        let mut output: Vec<Node> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Number(value) => output.push(Node::Number { value: *value }),

                Token::LParen => operators.push(StackEntry::Barrier),

                Token::RParen => loop {
                    match operators.pop() {
                        Some(StackEntry::Barrier) => break,
                        Some(StackEntry::Operator(op)) => Self::reduce(op, &mut output, index)?,
                        None => {
                            return Err(EvalError::MalformedExpression { details: format!("Close bracket at token {index} has no matching open bracket"), });
                        },
                    }
                },

                token => match token_to_binary_operator(*token) {
                    Some(op) => Self::push_operator(op, &mut operators, &mut output, index)?,
                    None => {
                        return Err(EvalError::MalformedExpression { details: format!("Unexpected token '{token}' at position {index}"), });
                    },
                },
            }

            if self.trace {
                trace_step(*token, &operators, &output);
            }
        }

        while let Some(entry) = operators.pop() {
            match entry {
                StackEntry::Operator(op) => Self::reduce(op, &mut output, tokens.len())?,
                StackEntry::Barrier => {
                    return Err(EvalError::MalformedExpression { details:
                                   "Open bracket was never closed".to_string(), });
                },
            }
        }

        let leftover = output.len();
        match output.pop() {
            Some(root) if output.is_empty() => Ok(root),
            _ => Err(EvalError::MalformedExpression { details: format!("Expression reduced to {leftover} values instead of one"), }),
        }
    }

    /// Pushes an incoming operator, first reducing every stacked operator
    /// that binds ahead of it.
    ///
    /// A stacked operator wins when its precedence is strictly higher, or
    /// equal while the incoming operator is left-associative. The
    /// right-associative `**` is not popped on equal precedence, which is
    /// what lets `2**3**2` bind as `2**(3**2)`.
    fn push_operator(op: BinaryOperator,
                     operators: &mut Vec<StackEntry>,
                     output: &mut Vec<Node>,
                     index: usize)
                     -> Result<(), EvalError> {
        while let Some(StackEntry::Operator(top)) = operators.last() {
            let wins = top.precedence() > op.precedence()
                       || (top.precedence() == op.precedence()
                           && op.associativity() == Associativity::Left);
            if !wins {
                break;
            }
            let top = *top;
            operators.pop();
            Self::reduce(top, output, index)?;
        }
        operators.push(StackEntry::Operator(op));
        Ok(())
    }

    /// Combines the two most recent operands under `op` and pushes the new
    /// node back on the output stack.
    fn reduce(op: BinaryOperator, output: &mut Vec<Node>, index: usize) -> Result<(), EvalError> {
        let rhs = output.pop();
        let lhs = output.pop();
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => {
                output.push(op.into_node(lhs, rhs));
                Ok(())
            },
            _ => Err(EvalError::MalformedExpression { details: format!("Operator '{op}' near token {index} is missing an operand"), }),
        }
    }
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for numbers and brackets.
///
/// # Example
/// ```
/// use infixa::{
///     ast::BinaryOperator,
///     engine::{lexer::Token, parser::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        _ => None,
    }
}

/// Prints the consumed token and the current state of both stacks.
fn trace_step(token: Token, operators: &[StackEntry], output: &[Node]) {
    print!("consumed '{token}' | operators:");
    for entry in operators {
        print!(" {entry}");
    }
    print!(" | output:");
    for node in output {
        print!(" {node}");
    }
    println!();
}
