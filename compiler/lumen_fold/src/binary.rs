//! Two-operand folding.
//!
//! Elementwise operators broadcast a size-1 operand against a larger one;
//! the result takes the larger operand's type whichever side it is on.
//! Linear algebra products accumulate in `f64` whatever the stored kind and
//! narrow once at the end. Comparisons always produce a single `bool`.

use lumen_ir::{BinaryOp, ConstantNode, ScalarKind, ScalarValue, TypeDesc};

use crate::equality::structurally_equal;
use crate::error::{build, FoldError};

type ScalarRule = fn(ScalarValue, ScalarValue) -> Option<ScalarValue>;

/// Fold `left op right`. The result carries `left`'s span.
#[tracing::instrument(level = "trace", skip_all, fields(op = ?op))]
pub fn fold_binary(
    op: BinaryOp,
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    match op {
        BinaryOp::Add => elementwise(op, left, right, ScalarValue::plus),
        BinaryOp::Sub => elementwise(op, left, right, ScalarValue::minus),
        BinaryOp::Mul | BinaryOp::VectorTimesScalar | BinaryOp::MatrixTimesScalar => {
            elementwise(op, left, right, ScalarValue::times)
        }
        BinaryOp::Div => elementwise(op, left, right, ScalarValue::quotient),
        BinaryOp::Mod => elementwise(op, left, right, ScalarValue::remainder),
        BinaryOp::BitAnd => elementwise(op, left, right, ScalarValue::bit_and),
        BinaryOp::BitOr => elementwise(op, left, right, ScalarValue::bit_or),
        BinaryOp::BitXor => elementwise(op, left, right, ScalarValue::bit_xor),
        BinaryOp::Shl => elementwise(op, left, right, ScalarValue::shift_left),
        BinaryOp::Shr => elementwise(op, left, right, ScalarValue::shift_right),
        BinaryOp::LogicalAnd => elementwise(op, left, right, ScalarValue::logical_and),
        BinaryOp::LogicalOr => elementwise(op, left, right, ScalarValue::logical_or),
        BinaryOp::LogicalXor => elementwise(op, left, right, ScalarValue::logical_xor),

        BinaryOp::MatrixTimesMatrix => matrix_times_matrix(left, right),
        BinaryOp::MatrixTimesVector => matrix_times_vector(left, right),
        BinaryOp::VectorTimesMatrix => vector_times_matrix(left, right),

        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            relational(op, left, right)
        }
        BinaryOp::Eq | BinaryOp::NotEq => equality(op, left, right),
    }
}

/// Type of the broadcast result: the operand with more than one leaf, or
/// `left`'s type when both sizes agree.
fn broadcast_type<'a>(
    op: BinaryOp,
    left: &'a ConstantNode,
    right: &'a ConstantNode,
) -> Result<&'a TypeDesc, FoldError> {
    match (left.object_size(), right.object_size()) {
        (l, r) if l == r => Ok(left.ty()),
        (1, _) => Ok(right.ty()),
        (_, 1) => Ok(left.ty()),
        (l, r) => Err(FoldError::invariant(
            op,
            format!("object sizes {l} and {r} cannot be broadcast"),
        )),
    }
}

fn elementwise(
    op: BinaryOp,
    left: &ConstantNode,
    right: &ConstantNode,
    rule: ScalarRule,
) -> Result<ConstantNode, FoldError> {
    let ty = broadcast_type(op, left, right)?;
    let values = (0..ty.object_size())
        .map(|i| {
            let a = left.broadcast_at(i);
            rule(a, right.broadcast_at(i)).ok_or_else(|| FoldError::unsupported(op, a.kind()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    build(op, ty.clone(), values, left.span())
}

/// Kind of a linear-algebra product, rejecting non-numeric operands.
fn product_kind(op: BinaryOp, left: &ConstantNode) -> Result<ScalarKind, FoldError> {
    let kind = left.ty().kind();
    if kind.is_float() || kind.is_integer() {
        Ok(kind)
    } else {
        Err(FoldError::unsupported(op, kind))
    }
}

/// Narrow `f64` sums to `kind`.
fn store(kind: ScalarKind, sums: Vec<f64>) -> Vec<ScalarValue> {
    sums.into_iter()
        .filter_map(|sum| ScalarValue::from_f64(kind, sum))
        .collect()
}

fn matrix_times_matrix(
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    let op = BinaryOp::MatrixTimesMatrix;
    let kind = product_kind(op, left)?;
    let (lt, rt) = (left.ty(), right.ty());
    if !lt.is_matrix() || !rt.is_matrix() || lt.matrix_cols() != rt.matrix_rows() {
        return Err(FoldError::invariant(
            op,
            format!("cannot multiply `{lt}` by `{rt}`"),
        ));
    }

    let rows = lt.matrix_rows();
    let inner = lt.matrix_cols();
    let cols = rt.matrix_cols();
    let (a, b) = (left.values(), right.values());

    let mut sums = Vec::with_capacity(rows * cols);
    for col in 0..cols {
        for row in 0..rows {
            let sum: f64 = (0..inner)
                .map(|k| a[k * rows + row].to_f64() * b[col * inner + k].to_f64())
                .sum();
            sums.push(sum);
        }
    }

    build(
        op,
        TypeDesc::matrix(kind, cols, rows),
        store(kind, sums),
        left.span(),
    )
}

fn matrix_times_vector(
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    let op = BinaryOp::MatrixTimesVector;
    let kind = product_kind(op, left)?;
    let lt = left.ty();
    if !lt.is_matrix() || lt.matrix_cols() != right.object_size() {
        return Err(FoldError::invariant(
            op,
            format!("cannot multiply `{lt}` by `{}`", right.ty()),
        ));
    }

    let rows = lt.matrix_rows();
    let (m, v) = (left.values(), right.values());
    let sums = (0..rows)
        .map(|row| {
            v.iter()
                .enumerate()
                .map(|(col, x)| m[col * rows + row].to_f64() * x.to_f64())
                .sum()
        })
        .collect();

    build(
        op,
        TypeDesc::vector(kind, rows),
        store(kind, sums),
        left.span(),
    )
}

fn vector_times_matrix(
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    let op = BinaryOp::VectorTimesMatrix;
    let kind = product_kind(op, left)?;
    let rt = right.ty();
    if !rt.is_matrix() || rt.matrix_rows() != left.object_size() {
        return Err(FoldError::invariant(
            op,
            format!("cannot multiply `{}` by `{rt}`", left.ty()),
        ));
    }

    let rows = rt.matrix_rows();
    let (v, m) = (left.values(), right.values());
    let sums = (0..rt.matrix_cols())
        .map(|col| {
            v.iter()
                .enumerate()
                .map(|(row, x)| x.to_f64() * m[col * rows + row].to_f64())
                .sum()
        })
        .collect();

    build(
        op,
        TypeDesc::vector(kind, rt.matrix_cols()),
        store(kind, sums),
        left.span(),
    )
}

/// `<` and `>` compare directly; `<=` and `>=` are the negated strict
/// comparisons so that `a <= b == !(a > b)` holds exactly.
fn relational(
    op: BinaryOp,
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    if left.object_size() != 1 || right.object_size() != 1 {
        return Err(FoldError::invariant(
            op,
            format!("relational operands must be scalars, got `{}` and `{}`", left.ty(), right.ty()),
        ));
    }

    let (a, b) = (left.values()[0], right.values()[0]);
    let result = match op {
        BinaryOp::Lt => a.less_than(b),
        BinaryOp::Gt => a.greater_than(b),
        BinaryOp::LtEq => a.greater_than(b).map(|gt| !gt),
        BinaryOp::GtEq => a.less_than(b).map(|lt| !lt),
        _ => None,
    }
    .ok_or_else(|| FoldError::unsupported(op, a.kind()))?;

    Ok(ConstantNode::scalar(ScalarValue::Bool(result), left.span()))
}

fn equality(
    op: BinaryOp,
    left: &ConstantNode,
    right: &ConstantNode,
) -> Result<ConstantNode, FoldError> {
    let equal = if left.ty().kind() == ScalarKind::Struct {
        if left.ty() != right.ty() {
            return Err(FoldError::invariant(
                op,
                format!("cannot compare `{}` with `{}`", left.ty(), right.ty()),
            ));
        }
        structurally_equal(left.ty(), left.values(), right.values())
    } else {
        let size = broadcast_type(op, left, right)?.object_size();
        let mut equal = true;
        for i in 0..size {
            let (a, b) = (left.broadcast_at(i), right.broadcast_at(i));
            if a.kind() != b.kind() {
                return Err(FoldError::unsupported(op, a.kind()));
            }
            if a != b {
                equal = false;
                break;
            }
        }
        equal
    };

    let result = if op == BinaryOp::NotEq { !equal } else { equal };
    Ok(ConstantNode::scalar(ScalarValue::Bool(result), left.span()))
}
