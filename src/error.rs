use thiserror::Error;

/// A structural problem found while scanning or grouping an expression.
///
/// These are always fatal to the parse in progress, and carry the offending
/// token or position together with the full source text, so a caller can show
/// a useful message without holding onto the input themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("unmatched '{delimiter}' at position {position} in \"{input}\"")]
    UnmatchedDelimiter {
        delimiter: char,
        position: usize,
        input: String,
    },

    #[error("unterminated string starting at position {position} in \"{input}\"")]
    UnterminatedString { position: usize, input: String },

    #[error("operator '{token}' is missing an operand at the boundary of \"{input}\"")]
    OperatorAtBoundary { token: String, input: String },

    #[error("operator '{token}' is applied to something which cannot be evaluated in \"{input}\"")]
    InvalidOperand { token: String, input: String },

    #[error("'{name}' expects exactly {expected} parameters")]
    ParameterCount { name: String, expected: usize },

    #[error("format group at position {position} has no value in \"{input}\"")]
    EmptyFormatGroup { position: usize, input: String },
}

/// A numeric problem encountered during evaluation.
///
/// The double-precision path mostly does not produce these - division by zero
/// and domain violations propagate as infinities and NaNs, as f64 natively
/// behaves. The decimal path has no such values, so the checked operations
/// report through this type instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathsError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("numeric overflow")]
    Overflow,

    #[error("input is outside the domain of the function")]
    OutsideDomain,
}

/// Umbrella error for operations which can fail both structurally and
/// numerically, such as evaluation of a grouped tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Maths(#[from] MathsError),
}
