/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// `Node` is a closed sum type: a numeric leaf plus one variant per binary
/// operator. Each binary variant exclusively owns its two children, so a
/// built tree is a plain single-owner structure with no sharing and no
/// cycles. The operator set is fixed; adding an operator is a compile-time
/// exhaustiveness question in `eval`, `precedence` and `is_valid`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric leaf holding one literal value.
    Number {
        /// The literal value, with any unary sign already applied.
        value: f64,
    },
    /// Addition of two subtrees.
    Add {
        /// Left-hand side.
        lhs: Box<Self>,
        /// Right-hand side.
        rhs: Box<Self>,
    },
    /// Subtraction of the right subtree from the left.
    Sub {
        /// Left-hand side.
        lhs: Box<Self>,
        /// Right-hand side.
        rhs: Box<Self>,
    },
    /// Multiplication of two subtrees.
    Mul {
        /// Left-hand side.
        lhs: Box<Self>,
        /// Right-hand side.
        rhs: Box<Self>,
    },
    /// Division of the left subtree by the right.
    Div {
        /// Left-hand side.
        lhs: Box<Self>,
        /// Right-hand side.
        rhs: Box<Self>,
    },
    /// Exponentiation of the left subtree by the right.
    Pow {
        /// Base.
        lhs: Box<Self>,
        /// Exponent.
        rhs: Box<Self>,
    },
}

impl Node {
    /// Evaluates the subtree rooted at `self` to a single value.
    ///
    /// Binary nodes evaluate both children first and then apply their
    /// operator. Division by zero and domain-invalid powers are not checked;
    /// they propagate IEEE-754 infinity/NaN semantics.
    ///
    /// # Example
    /// ```
    /// use infixa::ast::Node;
    ///
    /// let node = Node::Add { lhs: Box::new(Node::Number { value: 7.0 }),
    ///                        rhs: Box::new(Node::Number { value: 7.0 }), };
    ///
    /// assert_eq!(node.eval(), 14.0);
    /// ```
    #[must_use]
    pub fn eval(&self) -> f64 {
        match self {
            Self::Number { value } => *value,
            Self::Add { lhs, rhs } => lhs.eval() + rhs.eval(),
            Self::Sub { lhs, rhs } => lhs.eval() - rhs.eval(),
            Self::Mul { lhs, rhs } => lhs.eval() * rhs.eval(),
            Self::Div { lhs, rhs } => lhs.eval() / rhs.eval(),
            Self::Pow { lhs, rhs } => lhs.eval().powf(rhs.eval()),
        }
    }

    /// Returns the precedence class of this node.
    ///
    /// `+` and `-` bind at 2, `*` and `/` at 3, `**` at 4. A numeric leaf
    /// has no binding strength and reports 0.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Number { .. } => 0,
            Self::Add { .. } | Self::Sub { .. } => 2,
            Self::Mul { .. } | Self::Div { .. } => 3,
            Self::Pow { .. } => 4,
        }
    }

    /// Checks the subtree recursively for evaluability.
    ///
    /// A leaf is valid when its literal value is finite (the tokenizer can
    /// only produce finite literals; a hand-built tree might not). A binary
    /// node is valid when both children are.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Number { value } => value.is_finite(),
            Self::Add { lhs, rhs }
            | Self::Sub { lhs, rhs }
            | Self::Mul { lhs, rhs }
            | Self::Div { lhs, rhs }
            | Self::Pow { lhs, rhs } => lhs.is_valid() && rhs.is_valid(),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value } => write!(f, "{value}"),
            Self::Add { lhs, rhs } => write!(f, "({lhs} + {rhs})"),
            Self::Sub { lhs, rhs } => write!(f, "({lhs} - {rhs})"),
            Self::Mul { lhs, rhs } => write!(f, "({lhs} * {rhs})"),
            Self::Div { lhs, rhs } => write!(f, "({lhs} / {rhs})"),
            Self::Pow { lhs, rhs } => write!(f, "({lhs} ** {rhs})"),
        }
    }
}

/// Represents a binary operator.
///
/// The parser keeps pending operators on its stack as `BinaryOperator`
/// values and compares them through `precedence` and `associativity` without
/// knowing concrete operator identities.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`**`)
    Pow,
}

/// Tie-break rule for two adjacent operators of equal precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    /// The leftmost operator binds first.
    Left,
    /// The rightmost operator binds first.
    Right,
}

impl BinaryOperator {
    /// Returns the fixed precedence class of this operator.
    ///
    /// # Example
    /// ```
    /// use infixa::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div => 3,
            Self::Pow => 4,
        }
    }

    /// Returns the associativity of this operator.
    ///
    /// `**` is right-associative, so `2**3**2` binds as `2**(3**2)`. All
    /// other operators are left-associative.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// Builds the AST node for this operator over two finished subtrees.
    #[must_use]
    pub fn into_node(self, lhs: Node, rhs: Node) -> Node {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match self {
            Self::Add => Node::Add { lhs, rhs },
            Self::Sub => Node::Sub { lhs, rhs },
            Self::Mul => Node::Mul { lhs, rhs },
            Self::Div => Node::Div { lhs, rhs },
            Self::Pow => Node::Pow { lhs, rhs },
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{Add, Div, Mul, Pow, Sub};
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "**",
        };
        write!(f, "{operator}")
    }
}
