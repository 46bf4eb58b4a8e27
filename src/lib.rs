//! eqsolve parses infix mathematical expressions - literals, variables,
//! function operators, units of measurement, and a single equation
//! separator - into a tree, evaluates them in double or fixed-precision
//! decimal arithmetic, and solves one-unknown equations by evaluating the
//! known side forward and unwinding the unknown side through each
//! operator's algebraic inverse.
//!
//! Parsing is a hand-written, multi-pass structural walk rather than a
//! grammar: scan and classify, formalize (implicit units, equation split),
//! pair values with units, then fold operators by precedence tier. Unit
//! recognition and conversion live behind the [units::UnitProvider] trait.

pub mod constants;
pub mod error;
pub mod expression;
pub mod node;
pub mod number;
pub mod text;
pub mod units;

#[cfg(test)]
pub mod tests;

pub use crate::{
    error::{Error, MathsError, NodeError},
    expression::{Expression, Settings},
    node::{
        expr::{Context, ExpressionNode, NodeKind, Position, Value},
        solve::Solution,
    },
    number::{Number, StorageMode},
    units::{NullUnits, Unit, UnitProvider},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
