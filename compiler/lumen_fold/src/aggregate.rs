//! Built-in function folding.
//!
//! Every operand is already a constant. Componentwise functions broadcast
//! scalar operands to the result size; geometric functions require operands
//! of matching size. All arithmetic is done in `f64` and stored at the
//! result kind.

use lumen_ir::{AggregateOp, ConstantNode, ScalarKind, ScalarValue, Span, TypeDesc};

use crate::error::{build, FoldError};

/// Fold a call to the built-in `op`. The result carries `span`.
#[tracing::instrument(level = "trace", skip_all, fields(op = ?op, operands = operands.len()))]
pub fn fold_aggregate(
    op: AggregateOp,
    operands: &[&ConstantNode],
    span: Span,
) -> Result<ConstantNode, FoldError> {
    if operands.len() != op.arity() {
        return Err(FoldError::invariant(
            op,
            format!("expected {} operands, found {}", op.arity(), operands.len()),
        ));
    }

    check_kinds(op, operands)?;
    let result_ty = result_type(op, operands);
    check_sizes(op, operands, result_ty.object_size())?;

    let kind = result_ty.kind();
    let size = result_ty.object_size();
    let at = |i: usize, j: usize| operands[i].broadcast_at(j).to_f64();
    let dot = |a: usize, b: usize| {
        (0..operands[a].object_size())
            .map(|j| at(a, j) * at(b, j))
            .sum::<f64>()
    };

    let values = match op {
        AggregateOp::Min => compute(kind, size, |j| at(0, j).min(at(1, j))),
        AggregateOp::Max => compute(kind, size, |j| at(0, j).max(at(1, j))),
        AggregateOp::Atan => compute(kind, size, |j| at(0, j).atan2(at(1, j))),
        AggregateOp::Pow => compute(kind, size, |j| at(0, j).powf(at(1, j))),
        AggregateOp::Clamp => compute(kind, size, |j| at(0, j).max(at(1, j)).min(at(2, j))),
        AggregateOp::Mix if operands[2].ty().kind() == ScalarKind::Bool => {
            compute(kind, size, |j| if at(2, j) == 0.0 { at(0, j) } else { at(1, j) })
        }
        AggregateOp::Mix => compute(kind, size, |j| {
            let a = at(2, j);
            at(0, j) * (1.0 - a) + at(1, j) * a
        }),
        AggregateOp::Step => compute(kind, size, |j| if at(1, j) < at(0, j) { 0.0 } else { 1.0 }),
        AggregateOp::SmoothStep => compute(kind, size, |j| {
            let (edge0, edge1) = (at(0, j), at(1, j));
            let t = ((at(2, j) - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
            t * t * (3.0 - 2.0 * t)
        }),
        AggregateOp::Distance => {
            let distance = (0..operands[0].object_size())
                .map(|j| {
                    let d = at(0, j) - at(1, j);
                    d * d
                })
                .sum::<f64>()
                .sqrt();
            compute(kind, 1, |_| distance)
        }
        AggregateOp::Dot => {
            let product = dot(0, 1);
            compute(kind, 1, |_| product)
        }
        AggregateOp::Cross => compute(kind, 3, |j| {
            let (p, q) = ((j + 1) % 3, (j + 2) % 3);
            at(0, p) * at(1, q) - at(0, q) * at(1, p)
        }),
        AggregateOp::FaceForward => {
            let facing = dot(2, 1) < 0.0;
            compute(kind, size, |j| if facing { at(0, j) } else { -at(0, j) })
        }
        AggregateOp::Reflect => {
            let d = dot(1, 0);
            compute(kind, size, |j| at(0, j) - 2.0 * d * at(1, j))
        }
        AggregateOp::Refract => {
            let d = dot(1, 0);
            let eta = at(2, 0);
            let k = 1.0 - eta * eta * (1.0 - d * d);
            if k < 0.0 {
                compute(kind, size, |_| 0.0)
            } else {
                compute(kind, size, |j| eta * at(0, j) - (eta * d + k.sqrt()) * at(1, j))
            }
        }
        AggregateOp::OuterProduct => {
            let rows = operands[0].object_size();
            compute(kind, size, |index| at(0, index % rows) * at(1, index / rows))
        }
        // The fractional part and the whole part are two results.
        AggregateOp::Modf => return Err(FoldError::NotFoldable { op: op.into() }),
    }
    .ok_or_else(|| FoldError::unsupported(op, kind))?;

    build(op, result_ty, values, span)
}

/// Operand 0 decides the kind; every other operand must share it, except a
/// `bool` selector as `mix`'s third operand.
fn check_kinds(op: AggregateOp, operands: &[&ConstantNode]) -> Result<(), FoldError> {
    let kind = operands[0].ty().kind();
    let integers_allowed = matches!(op, AggregateOp::Min | AggregateOp::Max | AggregateOp::Clamp);
    if !(kind.is_float() || (integers_allowed && kind.is_integer())) {
        return Err(FoldError::unsupported(op, kind));
    }

    for (index, operand) in operands.iter().enumerate().skip(1) {
        let other = operand.ty().kind();
        let selector = op == AggregateOp::Mix && index == 2 && other == ScalarKind::Bool;
        if other != kind && !selector {
            return Err(FoldError::unsupported(op, other));
        }
    }
    Ok(())
}

fn result_type(op: AggregateOp, operands: &[&ConstantNode]) -> TypeDesc {
    let first = operands[0];
    let larger = |a: &ConstantNode, b: &ConstantNode| {
        if b.object_size() > a.object_size() {
            b.ty().clone()
        } else {
            a.ty().clone()
        }
    };

    match op {
        AggregateOp::Dot | AggregateOp::Distance => TypeDesc::scalar(first.ty().kind()),
        AggregateOp::OuterProduct => TypeDesc::matrix(
            first.ty().kind(),
            operands[1].object_size(),
            first.object_size(),
        ),
        AggregateOp::Step => larger(operands[0], operands[1]),
        AggregateOp::SmoothStep => larger(operands[0], operands[2]),
        _ => first.ty().clone(),
    }
}

fn check_sizes(
    op: AggregateOp,
    operands: &[&ConstantNode],
    result_size: usize,
) -> Result<(), FoldError> {
    let size = |i: usize| operands[i].object_size();
    let ok = match op {
        AggregateOp::Cross => size(0) == 3 && size(1) == 3,
        AggregateOp::Dot | AggregateOp::Distance | AggregateOp::Reflect => size(0) == size(1),
        AggregateOp::FaceForward => size(0) == size(1) && size(0) == size(2),
        AggregateOp::Refract => size(0) == size(1) && size(2) == 1,
        AggregateOp::OuterProduct | AggregateOp::Modf => true,
        _ => operands
            .iter()
            .all(|operand| operand.object_size() == 1 || operand.object_size() == result_size),
    };

    if ok {
        Ok(())
    } else {
        let sizes: Vec<String> = operands.iter().map(|o| o.ty().to_string()).collect();
        Err(FoldError::invariant(
            op,
            format!("operand types ({}) do not agree", sizes.join(", ")),
        ))
    }
}

/// Evaluate `f` at every result index and store at `kind`.
fn compute(kind: ScalarKind, size: usize, f: impl Fn(usize) -> f64) -> Option<Vec<ScalarValue>> {
    (0..size).map(|j| ScalarValue::from_f64(kind, f(j))).collect()
}
