//! Leaf scalar kinds and values.
//!
//! Every leaf of a constant carries its own kind. Operators are defined per
//! kind pair and return `None` when the pair has no rule (mismatched kinds,
//! bitwise ops on floats, arithmetic on booleans). The folders turn `None`
//! into an unsupported-operator failure.

use std::fmt;

/// Result of signed integer division (and remainder) by zero.
///
/// Bit pattern `0xEFFF_FFFF`.
pub const INT_DIV_BY_ZERO: i32 = -0x1000_0001;

/// Result of unsigned integer division (and remainder) by zero.
pub const UINT_DIV_BY_ZERO: u32 = u32::MAX;

/// Basic kind of a type.
///
/// `Struct` only appears on type descriptors; a [`ScalarValue`] is never
/// struct-kinded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    Double,
    Struct,
}

impl ScalarKind {
    /// `true` for `Float` and `Double`.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarKind::Float | ScalarKind::Double)
    }

    /// `true` for `Int` and `Uint`.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::Uint)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Struct => "struct",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single leaf value of a constant.
///
/// Equality is value equality per kind: floats follow IEEE rules, and values
/// of different kinds are never equal.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ScalarValue {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
    Double(f64),
}

impl ScalarValue {
    #[inline]
    pub const fn kind(self) -> ScalarKind {
        match self {
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Uint(_) => ScalarKind::Uint,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Double(_) => ScalarKind::Double,
        }
    }

    /// Numeric value widened to `f64`. Booleans map to 0 and 1.
    pub fn to_f64(self) -> f64 {
        match self {
            ScalarValue::Bool(b) => f64::from(u8::from(b)),
            ScalarValue::Int(v) => f64::from(v),
            ScalarValue::Uint(v) => f64::from(v),
            ScalarValue::Float(v) => f64::from(v),
            ScalarValue::Double(v) => v,
        }
    }

    /// Store a double-precision result at `kind`.
    ///
    /// Float rounds to nearest, integers truncate toward zero (saturating),
    /// booleans test against zero. Returns `None` for `Struct`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "narrowing is the defined store-back rule for f64 intermediates"
    )]
    pub fn from_f64(kind: ScalarKind, value: f64) -> Option<Self> {
        match kind {
            ScalarKind::Bool => Some(ScalarValue::Bool(value != 0.0)),
            ScalarKind::Int => Some(ScalarValue::Int(value as i32)),
            ScalarKind::Uint => Some(ScalarValue::Uint(value as u32)),
            ScalarKind::Float => Some(ScalarValue::Float(value as f32)),
            ScalarKind::Double => Some(ScalarValue::Double(value)),
            ScalarKind::Struct => None,
        }
    }

    /// The zero value of `kind` (`false` for booleans).
    pub fn zero(kind: ScalarKind) -> Option<Self> {
        Self::from_f64(kind, 0.0)
    }

    pub fn is_zero(self) -> bool {
        match self {
            ScalarValue::Bool(b) => !b,
            ScalarValue::Int(v) => v == 0,
            ScalarValue::Uint(v) => v == 0,
            ScalarValue::Float(v) => v == 0.0,
            ScalarValue::Double(v) => v == 0.0,
        }
    }

    /// Constructor conversion to `kind`.
    ///
    /// `int` and `uint` convert into each other by bit pattern. Everything
    /// else converts by value.
    pub fn convert(self, kind: ScalarKind) -> Option<Self> {
        match (self, kind) {
            (_, ScalarKind::Struct) => None,
            (value, kind) if value.kind() == kind => Some(value),
            (ScalarValue::Int(v), ScalarKind::Uint) => Some(ScalarValue::Uint(v.cast_unsigned())),
            (ScalarValue::Uint(v), ScalarKind::Int) => Some(ScalarValue::Int(v.cast_signed())),
            (value, ScalarKind::Bool) => Some(ScalarValue::Bool(!value.is_zero())),
            (value, kind) => Self::from_f64(kind, value.to_f64()),
        }
    }

    // Arithmetic

    pub fn plus(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a.wrapping_add(b))),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => {
                Some(ScalarValue::Uint(a.wrapping_add(b)))
            }
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(ScalarValue::Float(a + b)),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(ScalarValue::Double(a + b)),
            _ => None,
        }
    }

    pub fn minus(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a.wrapping_sub(b))),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => {
                Some(ScalarValue::Uint(a.wrapping_sub(b)))
            }
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(ScalarValue::Float(a - b)),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(ScalarValue::Double(a - b)),
            _ => None,
        }
    }

    pub fn times(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a.wrapping_mul(b))),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => {
                Some(ScalarValue::Uint(a.wrapping_mul(b)))
            }
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(ScalarValue::Float(a * b)),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(ScalarValue::Double(a * b)),
            _ => None,
        }
    }

    /// Division. A zero divisor produces the kind's sentinel instead of
    /// trapping: `f32::MAX`/`f64::MAX` for floats, [`INT_DIV_BY_ZERO`] and
    /// [`UINT_DIV_BY_ZERO`] for integers.
    pub fn quotient(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(_), ScalarValue::Int(0)) => Some(ScalarValue::Int(INT_DIV_BY_ZERO)),
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a.wrapping_div(b))),
            (ScalarValue::Uint(_), ScalarValue::Uint(0)) => {
                Some(ScalarValue::Uint(UINT_DIV_BY_ZERO))
            }
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(ScalarValue::Uint(a / b)),
            (ScalarValue::Float(_), ScalarValue::Float(b)) if b == 0.0 => {
                Some(ScalarValue::Float(f32::MAX))
            }
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(ScalarValue::Float(a / b)),
            (ScalarValue::Double(_), ScalarValue::Double(b)) if b == 0.0 => {
                Some(ScalarValue::Double(f64::MAX))
            }
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(ScalarValue::Double(a / b)),
            _ => None,
        }
    }

    /// Integer remainder, with the same zero-divisor sentinels as
    /// [`quotient`](Self::quotient).
    pub fn remainder(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(_), ScalarValue::Int(0)) => Some(ScalarValue::Int(INT_DIV_BY_ZERO)),
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a.wrapping_rem(b))),
            (ScalarValue::Uint(_), ScalarValue::Uint(0)) => {
                Some(ScalarValue::Uint(UINT_DIV_BY_ZERO))
            }
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(ScalarValue::Uint(a % b)),
            _ => None,
        }
    }

    pub fn negated(self) -> Option<Self> {
        match self {
            ScalarValue::Int(v) => Some(ScalarValue::Int(v.wrapping_neg())),
            ScalarValue::Uint(v) => Some(ScalarValue::Uint(v.wrapping_neg())),
            ScalarValue::Float(v) => Some(ScalarValue::Float(-v)),
            ScalarValue::Double(v) => Some(ScalarValue::Double(-v)),
            ScalarValue::Bool(_) => None,
        }
    }

    // Bitwise

    pub fn bit_and(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a & b)),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(ScalarValue::Uint(a & b)),
            _ => None,
        }
    }

    pub fn bit_or(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a | b)),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(ScalarValue::Uint(a | b)),
            _ => None,
        }
    }

    pub fn bit_xor(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a ^ b)),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(ScalarValue::Uint(a ^ b)),
            _ => None,
        }
    }

    pub fn bit_not(self) -> Option<Self> {
        match self {
            ScalarValue::Int(v) => Some(ScalarValue::Int(!v)),
            ScalarValue::Uint(v) => Some(ScalarValue::Uint(!v)),
            ScalarValue::Bool(_) | ScalarValue::Float(_) | ScalarValue::Double(_) => None,
        }
    }

    /// Left shift. The amount may be either integer kind and is taken
    /// modulo 32. The result keeps the left operand's kind.
    pub fn shift_left(self, rhs: Self) -> Option<Self> {
        let amount = rhs.shift_amount()?;
        match self {
            ScalarValue::Int(v) => Some(ScalarValue::Int(v.wrapping_shl(amount))),
            ScalarValue::Uint(v) => Some(ScalarValue::Uint(v.wrapping_shl(amount))),
            _ => None,
        }
    }

    /// Right shift: arithmetic for `int`, logical for `uint`.
    pub fn shift_right(self, rhs: Self) -> Option<Self> {
        let amount = rhs.shift_amount()?;
        match self {
            ScalarValue::Int(v) => Some(ScalarValue::Int(v.wrapping_shr(amount))),
            ScalarValue::Uint(v) => Some(ScalarValue::Uint(v.wrapping_shr(amount))),
            _ => None,
        }
    }

    fn shift_amount(self) -> Option<u32> {
        match self {
            ScalarValue::Int(v) => Some(v.cast_unsigned()),
            ScalarValue::Uint(v) => Some(v),
            _ => None,
        }
    }

    // Logical

    pub fn logical_and(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => Some(ScalarValue::Bool(a && b)),
            _ => None,
        }
    }

    pub fn logical_or(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => Some(ScalarValue::Bool(a || b)),
            _ => None,
        }
    }

    pub fn logical_xor(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => Some(ScalarValue::Bool(a != b)),
            _ => None,
        }
    }

    pub fn logical_not(self) -> Option<Self> {
        match self {
            ScalarValue::Bool(b) => Some(ScalarValue::Bool(!b)),
            _ => None,
        }
    }

    // Relational

    pub fn less_than(self, rhs: Self) -> Option<bool> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(a < b),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(a < b),
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(a < b),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(a < b),
            _ => None,
        }
    }

    pub fn greater_than(self, rhs: Self) -> Option<bool> {
        match (self, rhs) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(a > b),
            (ScalarValue::Uint(a), ScalarValue::Uint(b)) => Some(a > b),
            (ScalarValue::Float(a), ScalarValue::Float(b)) => Some(a > b),
            (ScalarValue::Double(a), ScalarValue::Double(b)) => Some(a > b),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Int(v) => write!(f, "{v}"),
            ScalarValue::Uint(v) => write!(f, "{v}u"),
            ScalarValue::Float(v) => write!(f, "{v:?}"),
            ScalarValue::Double(v) => write!(f, "{v:?}lf"),
        }
    }
}
