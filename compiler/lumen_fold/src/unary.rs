//! Single-operand folding.
//!
//! Most operators apply leaf by leaf. `length` and `normalize` first reduce
//! the whole operand to one norm. Transcendental and rounding functions are
//! evaluated in `f64` and stored at the result kind.

use std::f64::consts::{LN_2, LOG2_E, PI};

use lumen_ir::{ConstantNode, ScalarKind, ScalarValue, TypeDesc, UnaryOp};

use crate::error::{build, FoldError};

/// Fold `op operand`, typing the result as `result_ty`.
///
/// `result_ty` must have one leaf for reducing operators (`length`,
/// `determinant`, `any`, `all`) and the operand's leaf count otherwise.
#[tracing::instrument(level = "trace", skip_all, fields(op = ?op))]
pub fn fold_unary(
    op: UnaryOp,
    operand: &ConstantNode,
    result_ty: &TypeDesc,
) -> Result<ConstantNode, FoldError> {
    let kind = operand.ty().kind();
    if is_refused(op) {
        return Err(FoldError::unsupported(op, kind));
    }

    let size = if op.reduces_to_scalar() {
        1
    } else {
        operand.object_size()
    };
    if result_ty.object_size() != size {
        return Err(FoldError::invariant(
            op,
            format!("result type `{result_ty}` does not hold {size} values"),
        ));
    }

    let result_kind = result_ty.kind();
    let values = match op {
        UnaryOp::Length | UnaryOp::Normalize => {
            if !kind.is_float() {
                return Err(FoldError::unsupported(op, kind));
            }
            let norm = operand
                .values()
                .iter()
                .map(|v| v.to_f64() * v.to_f64())
                .sum::<f64>()
                .sqrt();
            let results: Vec<f64> = if op == UnaryOp::Length {
                vec![norm]
            } else {
                operand.values().iter().map(|v| v.to_f64() / norm).collect()
            };
            results
                .into_iter()
                .map(|x| ScalarValue::from_f64(result_kind, x))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| FoldError::unsupported(op, result_kind))?
        }
        _ => operand
            .values()
            .iter()
            .map(|&value| {
                fold_leaf(op, value, result_kind)
                    .ok_or_else(|| FoldError::unsupported(op, value.kind()))
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    build(op, result_ty.clone(), values, operand.span())
}

/// Operators recognized by the IR that have no folding rule.
const fn is_refused(op: UnaryOp) -> bool {
    matches!(
        op,
        UnaryOp::Sinh
            | UnaryOp::Cosh
            | UnaryOp::Tanh
            | UnaryOp::Asinh
            | UnaryOp::Acosh
            | UnaryOp::Atanh
            | UnaryOp::IsNan
            | UnaryOp::IsInf
            | UnaryOp::FloatBitsToInt
            | UnaryOp::FloatBitsToUint
            | UnaryOp::IntBitsToFloat
            | UnaryOp::UintBitsToFloat
            | UnaryOp::PackSnorm2x16
            | UnaryOp::UnpackSnorm2x16
            | UnaryOp::PackUnorm2x16
            | UnaryOp::UnpackUnorm2x16
            | UnaryOp::PackHalf2x16
            | UnaryOp::UnpackHalf2x16
            | UnaryOp::Determinant
            | UnaryOp::MatrixInverse
            | UnaryOp::Transpose
            | UnaryOp::Any
            | UnaryOp::All
    )
}

fn fold_leaf(op: UnaryOp, value: ScalarValue, result_kind: ScalarKind) -> Option<ScalarValue> {
    match op {
        UnaryOp::Negate => value.negated(),
        UnaryOp::LogicalNot | UnaryOp::VectorLogicalNot => value.logical_not(),
        UnaryOp::BitwiseNot => value.bit_not(),
        UnaryOp::Abs => match value {
            ScalarValue::Int(v) => Some(ScalarValue::Int(v.wrapping_abs())),
            ScalarValue::Uint(_) => Some(value),
            ScalarValue::Float(v) => Some(ScalarValue::Float(v.abs())),
            ScalarValue::Double(v) => Some(ScalarValue::Double(v.abs())),
            ScalarValue::Bool(_) => None,
        },
        UnaryOp::Sign => match value {
            ScalarValue::Int(v) => Some(ScalarValue::Int(v.signum())),
            ScalarValue::Float(_) | ScalarValue::Double(_) => {
                ScalarValue::from_f64(result_kind, sign(value.to_f64()))
            }
            ScalarValue::Bool(_) | ScalarValue::Uint(_) => None,
        },
        UnaryOp::DPdx | UnaryOp::DPdy | UnaryOp::Fwidth => ScalarValue::zero(result_kind),
        _ => {
            let rule = float_rule(op)?;
            if !value.kind().is_float() {
                return None;
            }
            ScalarValue::from_f64(result_kind, rule(value.to_f64()))
        }
    }
}

/// Zero stays zero, unlike `f64::signum`.
fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn float_rule(op: UnaryOp) -> Option<fn(f64) -> f64> {
    let rule: fn(f64) -> f64 = match op {
        UnaryOp::Radians => |x| x * PI / 180.0,
        UnaryOp::Degrees => |x| x * 180.0 / PI,
        UnaryOp::Sin => f64::sin,
        UnaryOp::Cos => f64::cos,
        UnaryOp::Tan => f64::tan,
        UnaryOp::Asin => f64::asin,
        UnaryOp::Acos => f64::acos,
        UnaryOp::Atan => f64::atan,
        UnaryOp::Exp => f64::exp,
        UnaryOp::Log => f64::ln,
        // Via `exp` and `ln`, not `f64::exp2` and `f64::log2`.
        UnaryOp::Exp2 => |x| (x * LN_2).exp(),
        UnaryOp::Log2 => |x| LOG2_E * x.ln(),
        UnaryOp::Sqrt => f64::sqrt,
        UnaryOp::InverseSqrt => |x| 1.0 / x.sqrt(),
        UnaryOp::Floor => f64::floor,
        UnaryOp::Ceil => f64::ceil,
        UnaryOp::Trunc => |x| if x > 0.0 { x.floor() } else { x.ceil() },
        UnaryOp::Round => |x| (x + 0.5).floor(),
        UnaryOp::RoundEven => round_even,
        UnaryOp::Fract => |x| x - x.floor(),
        _ => return None,
    };
    Some(rule)
}

/// Ties go to the even neighbour, decided by the parity of `floor(x)`.
fn round_even(x: f64) -> f64 {
    let flr = x.floor();
    let even = flr / 2.0 == (flr / 2.0).floor();
    if even {
        (x - 0.5).ceil()
    } else {
        (x + 0.5).floor()
    }
}

#[cfg(test)]
mod tests;
