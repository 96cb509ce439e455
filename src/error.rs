#[derive(Debug)]
/// Represents all ways an expression can be rejected before a value is
/// produced.
///
/// Every stage of the pipeline fails fast: the first stage that rejects the
/// input returns its error kind and no later stage runs. Arithmetic
/// conditions such as division by zero are not errors; they propagate
/// IEEE-754 infinity/NaN through evaluation instead.
pub enum EvalError {
    /// The caller required an expression but was handed an empty input.
    ///
    /// The core pipeline itself evaluates empty input to `0`; this kind is
    /// constructed by surfaces that treat "nothing to evaluate" as a
    /// reportable condition.
    NoExpressionGiven,
    /// The bracket check failed before parsing began.
    InvalidBrackets {
        /// Token index of the offending bracket: the first unmatched `)`,
        /// or the first `(` left open at end of input.
        position: usize,
    },
    /// The parser could not reduce the input to exactly one tree.
    MalformedExpression {
        /// Details about what went wrong.
        details: String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoExpressionGiven => write!(f, "No expression given!"),

            Self::InvalidBrackets { position } => {
                write!(f, "Invalid brackets! Check the bracket at token {position}.")
            },

            Self::MalformedExpression { details } => {
                write!(f, "Malformed expression! {details}.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
