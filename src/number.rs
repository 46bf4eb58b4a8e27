use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

use crate::error::MathsError;

/// The tree-wide choice of numeric representation. Every literal in a tree is
/// parsed and computed in the same representation.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum StorageMode {
    /// IEEE 754 double precision. Division by zero and domain violations
    /// produce infinities and NaNs rather than errors.
    #[default]
    Double,
    /// Fixed-precision decimal (96-bit mantissa). Exact for arithmetic on
    /// decimal literals; overflow and division by zero are reported as
    /// [MathsError]s since the representation has no NaN.
    Decimal,
}

/// A numeric value in one of the two supported representations.
///
/// The representation in play is decided once per tree by [StorageMode], so
/// mixed-variant arithmetic should not come up in practice; where it does
/// (constants injected from another source, say) the decimal operand is
/// converted and the operation happens in double precision.
#[derive(Copy, Clone, Debug)]
pub enum Number {
    Double(f64),
    Decimal(Decimal),
}

impl Number {
    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Double(_) => StorageMode::Double,
            Self::Decimal(_) => StorageMode::Decimal,
        }
    }

    pub fn zero(mode: StorageMode) -> Number {
        match mode {
            StorageMode::Double => Self::Double(0.0),
            StorageMode::Decimal => Self::Decimal(Decimal::ZERO),
        }
    }

    pub fn one(mode: StorageMode) -> Number {
        match mode {
            StorageMode::Double => Self::Double(1.0),
            StorageMode::Decimal => Self::Decimal(Decimal::ONE),
        }
    }

    pub fn from_i64(value: i64, mode: StorageMode) -> Number {
        match mode {
            StorageMode::Double => Self::Double(value as f64),
            StorageMode::Decimal => Self::Decimal(Decimal::from(value)),
        }
    }

    /// Converts an f64 result into the given representation. Fails only in
    /// decimal mode, when the value is NaN, infinite, or out of range.
    pub fn from_f64(value: f64, mode: StorageMode) -> Result<Number, MathsError> {
        match mode {
            StorageMode::Double => Ok(Self::Double(value)),
            StorageMode::Decimal => Decimal::from_f64(value)
                .map(Self::Decimal)
                .ok_or(MathsError::OutsideDomain),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Double(d) => *d,
            Self::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Double(d) => *d == 0.0,
            Self::Decimal(d) => d.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Self::Double(d) => *d == 1.0,
            Self::Decimal(d) => *d == Decimal::ONE,
        }
    }

    /// If this is a whole number, returns it. Otherwise returns None.
    pub fn to_whole(&self) -> Option<i64> {
        match self {
            Self::Double(d) => {
                if d.is_finite() && d.fract() == 0.0 && *d >= i64::MIN as f64 && *d <= i64::MAX as f64
                {
                    Some(*d as i64)
                } else {
                    None
                }
            }
            Self::Decimal(d) => {
                if d.fract().is_zero() {
                    d.to_i64()
                } else {
                    None
                }
            }
        }
    }

    /// Parses a literal in the given representation. Accepts plain decimal
    /// notation plus the three hexadecimal spellings `0x1F`, `&H1F` and
    /// `#1F`. Returns None for anything else - callers treat that as "not a
    /// number", never as an error.
    pub fn parse(text: &str, mode: StorageMode) -> Option<Number> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(magnitude) = Self::parse_hex(text) {
            return Some(Self::from_i64(magnitude, mode));
        }

        // Filter out the weirder spellings f64's FromStr would happily take,
        // like "inf" and "NaN" - those must not classify as literals.
        if !text.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+') {
            return None;
        }

        match mode {
            StorageMode::Double => text.parse::<f64>().ok().map(Self::Double),
            StorageMode::Decimal => text.parse::<Decimal>().ok().map(Self::Decimal),
        }
    }

    /// Recognises the `0x`, `&H` and `#` hexadecimal prefixes.
    fn parse_hex(text: &str) -> Option<i64> {
        let digits = if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            rest
        } else if let Some(rest) = text.strip_prefix("&H").or_else(|| text.strip_prefix("&h")) {
            rest
        } else if let Some(rest) = text.strip_prefix('#') {
            rest
        } else {
            return None;
        };

        if digits.is_empty() {
            return None;
        }
        i64::from_str_radix(digits, 16).ok()
    }

    /// Whether `text` could still grow into a numeric literal. The scanner
    /// uses this to avoid splitting multi-character literals (hex prefixes,
    /// decimal points, a leading sign) across token boundaries.
    pub fn is_literal_prefix(text: &str) -> bool {
        let body = text.strip_prefix('-').unwrap_or(text);
        if body.is_empty() {
            // "" only arrives via a bare "-", which may yet become a number.
            return !text.is_empty();
        }

        if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            return rest.chars().all(|c| c.is_ascii_hexdigit());
        }
        if body == "&" || body == "&h" || body == "&H" {
            return true;
        }
        if let Some(rest) = body.strip_prefix("&H").or_else(|| body.strip_prefix("&h")) {
            return rest.chars().all(|c| c.is_ascii_hexdigit());
        }
        if let Some(rest) = body.strip_prefix('#') {
            return rest.chars().all(|c| c.is_ascii_hexdigit());
        }

        let mut dots = 0;
        for c in body.chars() {
            if c == '.' {
                dots += 1;
            } else if !c.is_ascii_digit() {
                return false;
            }
        }
        dots <= 1
    }

    // --- Checked arithmetic ------------------------------------------------
    //
    // The evaluator goes through these rather than the operator trait impls:
    // the decimal representation has no NaN or infinity to absorb a bad
    // operation, so failures surface as errors instead.

    pub fn checked_add(self, rhs: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            l.checked_add(r).map(Self::Decimal).ok_or(MathsError::Overflow)
        } else {
            Ok(Self::Double(self.to_f64() + rhs.to_f64()))
        }
    }

    pub fn checked_sub(self, rhs: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            l.checked_sub(r).map(Self::Decimal).ok_or(MathsError::Overflow)
        } else {
            Ok(Self::Double(self.to_f64() - rhs.to_f64()))
        }
    }

    pub fn checked_mul(self, rhs: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            l.checked_mul(r).map(Self::Decimal).ok_or(MathsError::Overflow)
        } else {
            Ok(Self::Double(self.to_f64() * rhs.to_f64()))
        }
    }

    pub fn checked_div(self, rhs: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            if r.is_zero() {
                return Err(MathsError::DivisionByZero);
            }
            l.checked_div(r).map(Self::Decimal).ok_or(MathsError::Overflow)
        } else {
            Ok(Self::Double(self.to_f64() / rhs.to_f64()))
        }
    }

    /// Integer division: the quotient truncated towards zero.
    pub fn checked_int_div(self, rhs: Number) -> Result<Number, MathsError> {
        Ok(match self.checked_div(rhs)? {
            Self::Double(d) => Self::Double(d.trunc()),
            Self::Decimal(d) => Self::Decimal(d.trunc()),
        })
    }

    pub fn checked_rem(self, rhs: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            if r.is_zero() {
                return Err(MathsError::DivisionByZero);
            }
            l.checked_rem(r).map(Self::Decimal).ok_or(MathsError::Overflow)
        } else {
            Ok(Self::Double(self.to_f64() % rhs.to_f64()))
        }
    }

    /// Raises this number to an arbitrary power.
    pub fn pow(self, exp: Number) -> Result<Number, MathsError> {
        if let (Self::Decimal(base), Self::Decimal(_)) = (self, exp) {
            if let Some(n) = exp.to_whole() {
                return Self::dec_powi(base, n).map(Self::Decimal);
            }
            // Fractional exponents fall back to f64 - rust_decimal's series
            // expansions only cover positive bases, and precision is already
            // forfeit once the exponent isn't whole.
            if base.is_sign_negative() && !base.is_zero() {
                return Err(MathsError::OutsideDomain);
            }
            return Self::from_f64(self.to_f64().powf(exp.to_f64()), StorageMode::Decimal);
        }

        Ok(Self::Double(self.to_f64().powf(exp.to_f64())))
    }

    /// Whole-number decimal power by repeated multiplication, with the
    /// reciprocal taken afterwards for negative exponents.
    fn dec_powi(base: Decimal, exp: i64) -> Result<Decimal, MathsError> {
        if exp == 0 {
            return Ok(Decimal::ONE);
        }
        if base.is_zero() {
            return if exp > 0 { Ok(Decimal::ZERO) } else { Err(MathsError::DivisionByZero) };
        }
        if base.abs() == Decimal::ONE {
            // +/-1 never grows, so don't bother looping.
            let negative = base.is_sign_negative() && exp % 2 != 0;
            return Ok(if negative { -Decimal::ONE } else { Decimal::ONE });
        }
        if exp.unsigned_abs() > 5000 {
            // Past any representable result; let the checked loop's overflow
            // path do its job quickly instead of grinding through it.
            return Err(MathsError::Overflow);
        }

        let mut acc = base;
        for _ in 1..exp.unsigned_abs() {
            acc = acc.checked_mul(base).ok_or(MathsError::Overflow)?;
        }

        if exp < 0 {
            if acc.is_zero() {
                return Err(MathsError::DivisionByZero);
            }
            Decimal::ONE.checked_div(acc).ok_or(MathsError::Overflow)
        } else {
            Ok(acc)
        }
    }

    /// Rounds to `digits` decimal places. Negative `digits` rounds to the
    /// left of the point.
    pub fn round_to(self, digits: i64) -> Result<Number, MathsError> {
        match self {
            Self::Double(d) => {
                let factor = 10f64.powi(digits.clamp(-308, 308) as i32);
                Ok(Self::Double((d * factor).round() / factor))
            }
            Self::Decimal(d) => {
                if digits >= 0 {
                    Ok(Self::Decimal(d.round_dp(digits.min(28) as u32)))
                } else {
                    let factor = Self::dec_powi(Decimal::from(10), -digits)?;
                    let scaled = d.checked_div(factor).ok_or(MathsError::Overflow)?;
                    scaled
                        .round()
                        .checked_mul(factor)
                        .map(Self::Decimal)
                        .ok_or(MathsError::Overflow)
                }
            }
        }
    }

    pub fn floor(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.floor()),
            Self::Decimal(d) => Self::Decimal(d.floor()),
        }
    }

    pub fn ceil(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.ceil()),
            Self::Decimal(d) => Self::Decimal(d.ceil()),
        }
    }

    pub fn abs(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.abs()),
            Self::Decimal(d) => Self::Decimal(d.abs()),
        }
    }

    pub fn sqrt(self) -> Result<Number, MathsError> {
        match self {
            Self::Double(d) => Ok(Self::Double(d.sqrt())),
            Self::Decimal(d) => d.sqrt().map(Self::Decimal).ok_or(MathsError::OutsideDomain),
        }
    }

    pub fn ln(self) -> Result<Number, MathsError> {
        match self {
            Self::Double(d) => Ok(Self::Double(d.ln())),
            Self::Decimal(d) => {
                if d <= Decimal::ZERO {
                    Err(MathsError::OutsideDomain)
                } else {
                    Ok(Self::Decimal(d.ln()))
                }
            }
        }
    }

    pub fn log10(self) -> Result<Number, MathsError> {
        match self {
            Self::Double(d) => Ok(Self::Double(d.log10())),
            Self::Decimal(d) => {
                if d <= Decimal::ZERO {
                    Err(MathsError::OutsideDomain)
                } else {
                    Ok(Self::Decimal(d.log10()))
                }
            }
        }
    }

    pub fn sin(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.sin()),
            Self::Decimal(d) => Self::Decimal(d.sin()),
        }
    }

    pub fn cos(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.cos()),
            Self::Decimal(d) => Self::Decimal(d.cos()),
        }
    }

    pub fn tan(self) -> Number {
        match self {
            Self::Double(d) => Self::Double(d.tan()),
            Self::Decimal(d) => Self::Decimal(d.tan()),
        }
    }

    /// Applies an f64 function, converting back into this number's own
    /// representation. The decimal representation has no native inverse trig
    /// or hyperbolics, so those round-trip through here.
    pub fn map_f64(self, f: impl FnOnce(f64) -> f64) -> Result<Number, MathsError> {
        Self::from_f64(f(self.to_f64()), self.mode())
    }

    pub fn atan2(self, x: Number) -> Result<Number, MathsError> {
        Self::from_f64(self.to_f64().atan2(x.to_f64()), self.mode())
    }

    pub fn min(self, other: Number) -> Number {
        if self.total_cmp(&other) == Ordering::Greater { other } else { self }
    }

    pub fn max(self, other: Number) -> Number {
        if self.total_cmp(&other) == Ordering::Less { other } else { self }
    }

    /// A total ordering: exact for two decimals, f64 total order otherwise.
    pub fn total_cmp(&self, other: &Number) -> Ordering {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, other) {
            l.cmp(r)
        } else {
            self.to_f64().total_cmp(&other.to_f64())
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, other) {
            l == r
        } else {
            self.to_f64() == other.to_f64()
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Double(d) => Self::Double(-d),
            Self::Decimal(d) => Self::Decimal(-d),
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            Self::Decimal(l + r)
        } else {
            Self::Double(self.to_f64() + rhs.to_f64())
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            Self::Decimal(l - r)
        } else {
            Self::Double(self.to_f64() - rhs.to_f64())
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            Self::Decimal(l * r)
        } else {
            Self::Double(self.to_f64() * rhs.to_f64())
        }
    }
}

impl Div for Number {
    type Output = Self;

    // Panics on a zero decimal divisor, as the underlying representation
    // does. Evaluation uses checked_div.
    fn div(self, rhs: Self) -> Self::Output {
        if let (Self::Decimal(l), Self::Decimal(r)) = (self, rhs) {
            Self::Decimal(l / r)
        } else {
            Self::Double(self.to_f64() / rhs.to_f64())
        }
    }
}

impl From<f64> for Number {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Double(d) => write!(f, "{}", d),
            Self::Decimal(d) => write!(f, "{}", d),
        }
    }
}
