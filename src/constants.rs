//! The process-wide table of named constants.
//!
//! Tokens are matched case-insensitively, so `PI`, `Pi` and `pi` all resolve.
//! Values are stored as decimal strings and parsed into whichever
//! representation the tree is using, keeping the decimal path exact to its
//! full precision rather than round-tripping through f64.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::number::{Number, StorageMode};

static CONSTANTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pi", "3.1415926535897932384626433833"),
        ("tau", "6.2831853071795864769252867666"),
        ("e", "2.7182818284590452353602874714"),
        ("phi", "1.6180339887498948482045868344"),
    ])
});

/// Looks a token up in the constants table, returning its value in the given
/// representation.
pub fn lookup(token: &str, mode: StorageMode) -> Option<Number> {
    let value = CONSTANTS.get(token.to_ascii_lowercase().as_str())?;
    Number::parse(value, mode)
}
