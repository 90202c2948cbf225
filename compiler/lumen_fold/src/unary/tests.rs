use super::*;
use lumen_ir::{Operator, Span};
use pretty_assertions::assert_eq;

fn floats(values: &[f32]) -> ConstantNode {
    let ty = if values.len() == 1 {
        TypeDesc::scalar(ScalarKind::Float)
    } else {
        TypeDesc::vector(ScalarKind::Float, values.len())
    };
    let values = values.iter().copied().map(ScalarValue::Float).collect();
    let Ok(node) = ConstantNode::new(ty, values, Span::new(1, 2)) else {
        panic!("test constant has a bad layout");
    };
    node
}

fn fold(op: UnaryOp, operand: &ConstantNode) -> Vec<ScalarValue> {
    let result_ty = if op.reduces_to_scalar() {
        TypeDesc::scalar(operand.ty().kind())
    } else {
        operand.ty().clone()
    };
    match fold_unary(op, operand, &result_ty) {
        Ok(node) => node.values().to_vec(),
        Err(err) => panic!("{op:?} failed: {err}"),
    }
}

fn scalar(value: ScalarValue) -> ConstantNode {
    ConstantNode::scalar(value, Span::DUMMY)
}

#[test]
fn length_and_normalize_share_one_norm() {
    let v = floats(&[3.0, 4.0]);
    assert_eq!(fold(UnaryOp::Length, &v), vec![ScalarValue::Float(5.0)]);
    assert_eq!(
        fold(UnaryOp::Normalize, &v),
        vec![ScalarValue::Float(0.6), ScalarValue::Float(0.8)]
    );
}

#[test]
fn length_result_type_must_be_scalar() {
    let v = floats(&[3.0, 4.0]);
    let result = fold_unary(UnaryOp::Length, &v, v.ty());
    assert!(matches!(result, Err(FoldError::InvariantViolation { .. })));
}

#[test]
fn round_even_breaks_ties_toward_even() {
    let cases = [(2.5, 2.0), (3.5, 4.0), (-2.5, -2.0), (2.4, 2.0), (2.6, 3.0), (0.5, 0.0)];
    for (input, expected) in cases {
        assert_eq!(
            fold(UnaryOp::RoundEven, &floats(&[input])),
            vec![ScalarValue::Float(expected)],
            "roundEven({input})"
        );
    }
}

#[test]
fn rounding_family() {
    let v = floats(&[-1.5, 1.5, 2.25]);
    let floats_of = |values: &[f32]| values.iter().copied().map(ScalarValue::Float).collect::<Vec<_>>();
    assert_eq!(fold(UnaryOp::Floor, &v), floats_of(&[-2.0, 1.0, 2.0]));
    assert_eq!(fold(UnaryOp::Ceil, &v), floats_of(&[-1.0, 2.0, 3.0]));
    assert_eq!(fold(UnaryOp::Trunc, &v), floats_of(&[-1.0, 1.0, 2.0]));
    assert_eq!(fold(UnaryOp::Round, &v), floats_of(&[-1.0, 2.0, 2.0]));
    assert_eq!(fold(UnaryOp::Fract, &v), floats_of(&[0.5, 0.5, 0.25]));
}

#[test]
fn exponential_family() {
    assert_eq!(fold(UnaryOp::Exp2, &floats(&[3.0])), vec![ScalarValue::Float(8.0)]);
    assert_eq!(fold(UnaryOp::Log2, &floats(&[8.0])), vec![ScalarValue::Float(3.0)]);
    assert_eq!(fold(UnaryOp::Sqrt, &floats(&[16.0])), vec![ScalarValue::Float(4.0)]);
    assert_eq!(fold(UnaryOp::InverseSqrt, &floats(&[4.0])), vec![ScalarValue::Float(0.5)]);
    assert_eq!(fold(UnaryOp::Exp, &floats(&[0.0])), vec![ScalarValue::Float(1.0)]);
}

#[test]
fn angle_conversion_round_trips_through_degrees() {
    assert_eq!(fold(UnaryOp::Degrees, &floats(&[0.0])), vec![ScalarValue::Float(0.0)]);
    let radians = fold(UnaryOp::Radians, &floats(&[180.0]));
    assert_eq!(radians, vec![ScalarValue::Float(std::f32::consts::PI)]);
}

#[test]
fn double_operands_stay_double() {
    let d = scalar(ScalarValue::Double(2.0));
    assert_eq!(fold(UnaryOp::Sqrt, &d), vec![ScalarValue::Double(2.0_f64.sqrt())]);
}

#[test]
fn negate_abs_sign_by_kind() {
    assert_eq!(fold(UnaryOp::Negate, &scalar(ScalarValue::Int(5))), vec![ScalarValue::Int(-5)]);
    assert_eq!(
        fold(UnaryOp::Negate, &scalar(ScalarValue::Uint(1))),
        vec![ScalarValue::Uint(u32::MAX)]
    );
    assert_eq!(fold(UnaryOp::Abs, &scalar(ScalarValue::Int(-7))), vec![ScalarValue::Int(7)]);
    assert_eq!(
        fold(UnaryOp::Abs, &scalar(ScalarValue::Int(i32::MIN))),
        vec![ScalarValue::Int(i32::MIN)]
    );
    assert_eq!(fold(UnaryOp::Abs, &scalar(ScalarValue::Uint(9))), vec![ScalarValue::Uint(9)]);
    assert_eq!(
        fold(UnaryOp::Sign, &floats(&[-3.0, 0.0, 0.25])),
        vec![ScalarValue::Float(-1.0), ScalarValue::Float(0.0), ScalarValue::Float(1.0)]
    );
    assert_eq!(fold(UnaryOp::Sign, &scalar(ScalarValue::Int(-3))), vec![ScalarValue::Int(-1)]);
}

#[test]
fn sign_of_uint_is_unsupported() {
    let operand = scalar(ScalarValue::Uint(3));
    assert_eq!(
        fold_unary(UnaryOp::Sign, &operand, operand.ty()),
        Err(FoldError::UnsupportedOperator {
            op: Operator::Unary(UnaryOp::Sign),
            kind: ScalarKind::Uint,
        })
    );
}

#[test]
fn derivatives_fold_to_zero() {
    let v = floats(&[1.0, -2.0, 3.0]);
    for op in [UnaryOp::DPdx, UnaryOp::DPdy, UnaryOp::Fwidth] {
        assert_eq!(fold(op, &v), vec![ScalarValue::Float(0.0); 3]);
    }
}

#[test]
fn bitwise_and_logical_not() {
    assert_eq!(fold(UnaryOp::BitwiseNot, &scalar(ScalarValue::Int(0))), vec![ScalarValue::Int(-1)]);
    assert_eq!(
        fold(UnaryOp::LogicalNot, &scalar(ScalarValue::Bool(true))),
        vec![ScalarValue::Bool(false)]
    );
    let result = fold_unary(UnaryOp::BitwiseNot, &floats(&[1.0]), &TypeDesc::scalar(ScalarKind::Float));
    assert!(matches!(result, Err(FoldError::UnsupportedOperator { .. })));
}

#[test]
fn transcendental_on_integers_is_unsupported() {
    let operand = scalar(ScalarValue::Int(1));
    let result = fold_unary(UnaryOp::Sin, &operand, operand.ty());
    assert!(matches!(result, Err(FoldError::UnsupportedOperator { .. })));
}

#[test]
fn refused_operators_report_unsupported() {
    let v = floats(&[1.0, 0.0]);
    for op in [UnaryOp::Sinh, UnaryOp::IsNan, UnaryOp::PackHalf2x16, UnaryOp::Any, UnaryOp::Transpose] {
        let result = fold_unary(op, &v, v.ty());
        assert_eq!(
            result,
            Err(FoldError::UnsupportedOperator {
                op: Operator::Unary(op),
                kind: ScalarKind::Float,
            })
        );
    }
}

#[test]
fn result_keeps_operand_span() {
    let v = floats(&[3.0, 4.0]);
    let Ok(node) = fold_unary(UnaryOp::Normalize, &v, v.ty()) else {
        panic!("normalize failed");
    };
    assert_eq!(node.span(), Span::new(1, 2));
}
