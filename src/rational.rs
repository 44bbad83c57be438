//! Exact rational values for `Number` literals
//!
//! Only this newtype is visible to the lexer and the AST, so the backing
//! big-number library can change without touching either. It offers the
//! narrow capability the front end and its consumers need: parsing decimal
//! text, basic arithmetic and ordering.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest decimal exponent accepted when parsing, in either direction
const MAX_EXPONENT: u64 = 4 << 10;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    pub fn from_integer(value: i64) -> Self {
        Rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// `numer / denom`, or `None` when `denom` is zero
    pub fn from_fraction(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Rational(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }

    /// Parse decimal text into an exact value.
    ///
    /// Accepts digits with an optional fractional part and an optional
    /// exponent: `3`, `3.5`, `3.`, `.5`, `1e3`, `2.5E-2`. Anything else,
    /// including a second `.`, returns `None`.
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
            None => (text, None),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !is_digits(fraction) {
            return None;
        }

        let exponent: i64 = match exponent {
            Some(exp) => exp.parse().ok()?,
            None => 0,
        };
        let fraction_len = i64::try_from(fraction.len()).ok()?;
        let scale = exponent.checked_sub(fraction_len)?;
        if scale.unsigned_abs() > MAX_EXPONENT {
            return None;
        }

        let digits: BigInt = format!("{whole}{fraction}").parse().ok()?;
        let power = num_traits::pow(BigInt::from(10u32), scale.unsigned_abs() as usize);
        let value = if scale >= 0 {
            BigRational::from_integer(digits * power)
        } else {
            BigRational::new(digits, power)
        };
        Some(Rational(value))
    }

    /// Division, `None` when `other` is zero
    pub fn checked_div(&self, other: &Rational) -> Option<Rational> {
        if other.0.is_zero() {
            return None;
        }
        Some(Rational(&self.0 / &other.0))
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Numerator in lowest terms, as decimal text
    pub fn numer(&self) -> String {
        self.0.numer().to_string()
    }

    /// Denominator in lowest terms, as decimal text
    pub fn denom(&self) -> String {
        self.0.denom().to_string()
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
