//! The fixed operator tables: which tokens are operators, how they tier for
//! precedence, and what each one inverts to during solving.

/// Unary/function-style operators. Each takes a single operand, which may be
/// a parenthesised parameter list.
pub(crate) const UNARY_OPERATORS: &[&str] = &[
    "round", "floor", "ceil", "abs", "sqrt", "log", "log10", "sin", "cos", "tan", "sinh", "cosh",
    "tanh", "asin", "acos", "atan", "atan2", "sum", "min", "max", "root",
];

/// Binary infix operators.
pub(crate) const BINARY_OPERATORS: &[&str] =
    &["+", "-", "*", "/", "\\", "%", "mod", "^", "exp"];

/// Precedence tiers, strongest binding first. Within a tier, folding is
/// strictly left to right.
pub(crate) const PRECEDENCE_TIERS: &[&[&str]] = &[
    UNARY_OPERATORS,
    &["^", "exp"],
    &["%", "mod"],
    &["*", "/", "\\"],
    &["+", "-"],
];

pub(crate) fn is_operator(token: &str) -> bool {
    is_unary(token) || is_binary(token)
}

pub(crate) fn is_unary(token: &str) -> bool {
    UNARY_OPERATORS.contains(&token)
}

pub(crate) fn is_binary(token: &str) -> bool {
    BINARY_OPERATORS.contains(&token)
}

/// How many parameters a unary operator demands: `Some(n)` for an exact
/// requirement, None for the variadic aggregates.
pub(crate) fn required_parameters(name: &str) -> Option<usize> {
    match name {
        "round" | "atan2" | "root" => Some(2),
        "sum" | "min" | "max" => None,
        _ => Some(1),
    }
}

/// The algebraic inverse of a binary operator, where one is defined.
///
/// `^` and `exp` have no spelled counterpart - inverting them means raising
/// to the reciprocal exponent, which the evaluator special-cases - so they
/// map to themselves here and the caller handles the exponent. `%`/`mod`
/// cannot be undone and return None.
pub(crate) fn inverse_binary(token: &str) -> Option<&'static str> {
    match token {
        "+" => Some("-"),
        "-" => Some("+"),
        "*" => Some("/"),
        "/" => Some("*"),
        "\\" => Some("*"),
        "^" | "exp" => Some("^"),
        _ => None,
    }
}
