use crate::error::{DiscreteError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Base {
    pub const ALL: [Base; 4] = [
        Base::Binary,
        Base::Octal,
        Base::Decimal,
        Base::Hexadecimal,
    ];

    #[inline(always)]
    pub fn radix(&self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Octal => "Octal",
            Self::Decimal => "Decimal",
            Self::Hexadecimal => "Hexadecimal",
        }
    }
}

impl TryFrom<u32> for Base {
    type Error = DiscreteError;

    fn try_from(radix: u32) -> Result<Self> {
        match radix {
            2 => Ok(Self::Binary),
            8 => Ok(Self::Octal),
            10 => Ok(Self::Decimal),
            16 => Ok(Self::Hexadecimal),
            other => Err(DiscreteError::UnsupportedBase(other)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.radix(), self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Sub,
}

impl ArithmeticOp {
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
        }
    }
}

impl FromStr for ArithmeticOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" | "plus" => Ok(Self::Add),
            "sub" | "-" | "minus" | "subtract" => Ok(Self::Sub),
            other => Err(format!(
                "Unknown arithmetic operation '{other}', expected 'add' or 'sub'"
            )),
        }
    }
}

/// A value rendered in one target base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub base: Base,
    pub radix: u32,
    pub value: String,
}

/// Parses a signed numeral written in `base`.
///
/// Whitespace anywhere in the input is ignored, a single leading `-` or `+`
/// is accepted and hexadecimal digits may be of either case.
pub fn parse_numeral(value: &str, base: Base) -> Result<i128> {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };
    if digits.is_empty() {
        return Err(DiscreteError::EmptyInput(format!(
            "no digits in numeral '{}'",
            value.trim()
        )));
    }

    let radix = base.radix();
    let overflow = || DiscreteError::Overflow(value.trim().to_string());
    let mut magnitude: u128 = 0;
    for ch in digits.chars() {
        let digit = ch
            .to_digit(radix)
            .ok_or(DiscreteError::InvalidDigit { digit: ch, base: radix })?;
        magnitude = magnitude
            .checked_mul(u128::from(radix))
            .and_then(|m| m.checked_add(u128::from(digit)))
            .ok_or_else(overflow)?;
    }
    // negatives reach one further than positives, down to i128::MIN
    if negative {
        0i128.checked_sub_unsigned(magnitude).ok_or_else(overflow)
    } else {
        i128::try_from(magnitude).map_err(|_| overflow())
    }
}

/// Renders `value` in `base` with upper-case digits and a leading `-` for
/// negative values.
pub fn render_numeral(value: i128, base: Base) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let radix = u128::from(base.radix());
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % radix) as usize]);
        magnitude /= radix;
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

pub fn convert(value: &str, from_base: u32, to_base: u32) -> Result<String> {
    let from = Base::try_from(from_base)?;
    let to = Base::try_from(to_base)?;
    Ok(render_numeral(parse_numeral(value, from)?, to))
}

/// Renders `value` in every supported base except its own, ascending by radix.
pub fn convert_all(value: &str, from_base: u32) -> Result<Vec<Conversion>> {
    let from = Base::try_from(from_base)?;
    let parsed = parse_numeral(value, from)?;
    Ok(Base::ALL
        .iter()
        .filter(|&&base| base != from)
        .map(|&base| Conversion {
            base,
            radix: base.radix(),
            value: render_numeral(parsed, base),
        })
        .collect())
}

pub fn arithmetic(a: &str, b: &str, op: ArithmeticOp, base: u32) -> Result<String> {
    let base = Base::try_from(base)?;
    let lhs = parse_numeral(a, base)?;
    let rhs = parse_numeral(b, base)?;
    let result = match op {
        ArithmeticOp::Add => lhs.checked_add(rhs),
        ArithmeticOp::Sub => lhs.checked_sub(rhs),
    }
    .ok_or_else(|| DiscreteError::Overflow(format!("{a} {} {b}", op.symbol())))?;
    Ok(render_numeral(result, base))
}
