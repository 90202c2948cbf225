//! Property-based tests for constant folding.
//!
//! These use proptest to generate operands and check laws that must hold for
//! every input:
//! 1. Broadcasting a scalar is independent of which side it is on
//! 2. `<=` and `>=` are the negations of `>` and `<`
//! 3. Division by zero always produces the per-kind value
//! 4. Struct equality notices any single changed leaf
//! 5. Products, rounding and normalization keep their shape guarantees

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use lumen_fold::{fold_aggregate, fold_binary, fold_constructor, fold_unary};
use lumen_ir::{
    AggregateOp, BinaryOp, ConstantNode, ScalarKind, ScalarValue, Span, StructMember, TypeDesc,
    UnaryOp, INT_DIV_BY_ZERO, UINT_DIV_BY_ZERO,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// -- Helpers --

fn float_vector(values: &[f32]) -> ConstantNode {
    ConstantNode::new(
        TypeDesc::vector(ScalarKind::Float, values.len()),
        values.iter().copied().map(ScalarValue::Float).collect(),
        Span::new(0, 4),
    )
    .unwrap()
}

fn scalar(value: ScalarValue) -> ConstantNode {
    ConstantNode::scalar(value, Span::new(10, 12))
}

fn single_bool(node: &ConstantNode) -> bool {
    match node.values() {
        [ScalarValue::Bool(b)] => *b,
        other => panic!("expected one bool, got {other:?}"),
    }
}

fn as_f32(value: ScalarValue) -> f32 {
    match value {
        ScalarValue::Float(v) => v,
        other => panic!("expected a float, got {other:?}"),
    }
}

fn particle() -> TypeDesc {
    TypeDesc::structure(vec![
        StructMember::new("position", TypeDesc::vector(ScalarKind::Float, 3)),
        StructMember::new(
            "history",
            TypeDesc::array(
                TypeDesc::structure(vec![
                    StructMember::new("age", TypeDesc::scalar(ScalarKind::Float)),
                    StructMember::new("alive", TypeDesc::scalar(ScalarKind::Float)),
                ]),
                2,
            ),
        ),
    ])
}

// -- Strategies --

fn finite_f32() -> impl Strategy<Value = f32> {
    -1.0e6_f32..1.0e6_f32
}

fn float_vec() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(finite_f32(), 2..=4)
}

fn commutative_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![Just(BinaryOp::Add), Just(BinaryOp::Mul), Just(BinaryOp::Eq)]
}

// -- Properties --

proptest! {
    #[test]
    fn broadcast_is_side_independent(op in commutative_op(), values in float_vec(), s in finite_f32()) {
        let vector = float_vector(&values);
        let splat = scalar(ScalarValue::Float(s));

        let left = fold_binary(op, &vector, &splat).unwrap();
        let right = fold_binary(op, &splat, &vector).unwrap();

        prop_assert_eq!(left.ty(), right.ty());
        prop_assert_eq!(left.values(), right.values());
        if op != BinaryOp::Eq {
            prop_assert_eq!(left.ty(), vector.ty());
        }
    }

    #[test]
    fn broadcast_applies_to_every_component(values in float_vec(), s in finite_f32()) {
        let result = fold_binary(BinaryOp::Add, &float_vector(&values), &scalar(ScalarValue::Float(s)))
            .unwrap();
        let expected: Vec<ScalarValue> = values.iter().map(|v| ScalarValue::Float(v + s)).collect();
        prop_assert_eq!(result.values(), expected.as_slice());
    }

    #[test]
    fn non_strict_comparisons_negate_strict_ones(a in any::<f32>(), b in any::<f32>()) {
        let (l, r) = (scalar(ScalarValue::Float(a)), scalar(ScalarValue::Float(b)));
        let gt = single_bool(&fold_binary(BinaryOp::Gt, &l, &r).unwrap());
        let lt = single_bool(&fold_binary(BinaryOp::Lt, &l, &r).unwrap());
        prop_assert_eq!(single_bool(&fold_binary(BinaryOp::LtEq, &l, &r).unwrap()), !gt);
        prop_assert_eq!(single_bool(&fold_binary(BinaryOp::GtEq, &l, &r).unwrap()), !lt);
    }

    #[test]
    fn integer_comparisons_follow_the_same_law(a in any::<i32>(), b in any::<i32>()) {
        let (l, r) = (scalar(ScalarValue::Int(a)), scalar(ScalarValue::Int(b)));
        prop_assert_eq!(single_bool(&fold_binary(BinaryOp::LtEq, &l, &r).unwrap()), a <= b);
        prop_assert_eq!(single_bool(&fold_binary(BinaryOp::GtEq, &l, &r).unwrap()), a >= b);
    }

    #[test]
    fn division_by_zero_is_defined(i in any::<i32>(), u in any::<u32>(), f in any::<f32>()) {
        let int = fold_binary(BinaryOp::Div, &scalar(ScalarValue::Int(i)), &scalar(ScalarValue::Int(0))).unwrap();
        prop_assert_eq!(int.values(), &[ScalarValue::Int(INT_DIV_BY_ZERO)]);

        let uint = fold_binary(BinaryOp::Div, &scalar(ScalarValue::Uint(u)), &scalar(ScalarValue::Uint(0))).unwrap();
        prop_assert_eq!(uint.values(), &[ScalarValue::Uint(UINT_DIV_BY_ZERO)]);

        let float = fold_binary(BinaryOp::Div, &scalar(ScalarValue::Float(f)), &scalar(ScalarValue::Float(0.0))).unwrap();
        prop_assert_eq!(float.values(), &[ScalarValue::Float(f32::MAX)]);
    }

    #[test]
    fn struct_equality_sees_every_leaf(
        values in prop::collection::vec(-1000.0_f32..1000.0, 7),
        index in 0_usize..7,
    ) {
        let leaves: Vec<ScalarValue> = values.iter().copied().map(ScalarValue::Float).collect();
        let original = ConstantNode::new(particle(), leaves.clone(), Span::DUMMY).unwrap();

        let mut changed = leaves;
        changed[index] = ScalarValue::Float(values[index] + 1.0);
        let perturbed = ConstantNode::new(particle(), changed, Span::DUMMY).unwrap();

        prop_assert!(single_bool(&fold_binary(BinaryOp::Eq, &original, &original).unwrap()));
        prop_assert!(!single_bool(&fold_binary(BinaryOp::Eq, &original, &perturbed).unwrap()));
        prop_assert!(single_bool(&fold_binary(BinaryOp::NotEq, &original, &perturbed).unwrap()));
    }

    #[test]
    fn single_scalar_constructor_fills_every_leaf(v in finite_f32()) {
        let source = scalar(ScalarValue::Float(v));
        let result = fold_constructor(&particle(), &[&source], Span::DUMMY).unwrap();
        prop_assert_eq!(result.object_size(), 7);
        prop_assert!(result.values().iter().all(|leaf| *leaf == ScalarValue::Float(v)));
    }

    #[test]
    fn matrix_product_shape(rows in 2_usize..=4, inner in 2_usize..=4, cols in 2_usize..=4) {
        let ones = |c: usize, r: usize| {
            ConstantNode::new(
                TypeDesc::matrix(ScalarKind::Float, c, r),
                vec![ScalarValue::Float(1.0); c * r],
                Span::DUMMY,
            )
            .unwrap()
        };
        let result = fold_binary(BinaryOp::MatrixTimesMatrix, &ones(inner, rows), &ones(cols, inner)).unwrap();

        prop_assert_eq!(result.ty(), &TypeDesc::matrix(ScalarKind::Float, cols, rows));
        prop_assert!(result.values().iter().all(|v| *v == ScalarValue::Float(inner as f32)));
    }

    #[test]
    fn round_even_lands_on_a_nearby_integer(x in -1.0e4_f32..1.0e4) {
        let node = fold_unary(UnaryOp::RoundEven, &scalar(ScalarValue::Float(x)), &TypeDesc::scalar(ScalarKind::Float)).unwrap();
        let rounded = as_f32(node.values()[0]);
        prop_assert_eq!(rounded.fract(), 0.0);
        prop_assert!((f64::from(rounded) - f64::from(x)).abs() <= 0.5);
    }

    #[test]
    fn normalize_produces_unit_length(values in prop::collection::vec(1.0_f32..100.0, 2..=4)) {
        let vector = float_vector(&values);
        let normalized = fold_unary(UnaryOp::Normalize, &vector, vector.ty()).unwrap();
        let length = fold_unary(UnaryOp::Length, &normalized, &TypeDesc::scalar(ScalarKind::Float)).unwrap();
        prop_assert!((as_f32(length.values()[0]) - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn min_never_exceeds_max(a in finite_f32(), b in finite_f32()) {
        let (l, r) = (scalar(ScalarValue::Float(a)), scalar(ScalarValue::Float(b)));
        let lo = as_f32(fold_aggregate(AggregateOp::Min, &[&l, &r], Span::DUMMY).unwrap().values()[0]);
        let hi = as_f32(fold_aggregate(AggregateOp::Max, &[&l, &r], Span::DUMMY).unwrap().values()[0]);
        prop_assert!(lo <= hi);
        prop_assert_eq!(lo, a.min(b));
        prop_assert_eq!(hi, a.max(b));
    }
}

// -- Worked examples --

#[test]
fn vec4_plus_scalar() {
    let result = fold_binary(
        BinaryOp::Add,
        &float_vector(&[2.0, 3.0, 4.0, 5.0]),
        &scalar(ScalarValue::Float(1.2)),
    )
    .unwrap();
    let expected: Vec<ScalarValue> = [2.0_f32, 3.0, 4.0, 5.0]
        .iter()
        .map(|v| ScalarValue::Float(v + 1.2))
        .collect();
    assert_eq!(result.values(), expected.as_slice());
}

#[test]
fn length_and_normalize_of_three_four() {
    let v = float_vector(&[3.0, 4.0]);
    let length = fold_unary(UnaryOp::Length, &v, &TypeDesc::scalar(ScalarKind::Float)).unwrap();
    assert_eq!(length.values(), &[ScalarValue::Float(5.0)]);
    let unit = fold_unary(UnaryOp::Normalize, &v, v.ty()).unwrap();
    assert_eq!(
        unit.values(),
        &[ScalarValue::Float(0.6), ScalarValue::Float(0.8)]
    );
}

#[test]
fn round_even_ties() {
    for (x, expected) in [(2.5_f32, 2.0_f32), (3.5, 4.0), (-2.5, -2.0)] {
        let node = fold_unary(
            UnaryOp::RoundEven,
            &scalar(ScalarValue::Float(x)),
            &TypeDesc::scalar(ScalarKind::Float),
        )
        .unwrap();
        assert_eq!(node.values(), &[ScalarValue::Float(expected)], "roundEven({x})");
    }
}
