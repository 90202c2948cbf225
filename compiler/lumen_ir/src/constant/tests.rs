use super::*;
use crate::StructMember;
use pretty_assertions::assert_eq;

#[test]
fn new_checks_length() {
    let ty = TypeDesc::vector(ScalarKind::Float, 3);
    let result = ConstantNode::new(ty, vec![ScalarValue::Float(1.0)], Span::DUMMY);
    assert_eq!(
        result,
        Err(LayoutError::Length {
            ty: "vec3".to_string(),
            expected: 3,
            found: 1,
        })
    );
}

#[test]
fn new_checks_leaf_kinds_through_structs() {
    let ty = TypeDesc::structure(vec![
        StructMember::new("a", TypeDesc::scalar(ScalarKind::Int)),
        StructMember::new("b", TypeDesc::scalar(ScalarKind::Bool)),
    ]);
    let result = ConstantNode::new(
        ty,
        vec![ScalarValue::Int(1), ScalarValue::Int(0)],
        Span::DUMMY,
    );
    assert_eq!(
        result,
        Err(LayoutError::Kind {
            index: 1,
            expected: ScalarKind::Bool,
            found: ScalarKind::Int,
        })
    );
}

#[test]
fn scalar_broadcasts_to_any_index() {
    let node = ConstantNode::scalar(ScalarValue::Uint(9), Span::new(4, 5));
    assert_eq!(node.ty(), &TypeDesc::scalar(ScalarKind::Uint));
    assert_eq!(node.object_size(), 1);
    assert_eq!(node.broadcast_at(3), ScalarValue::Uint(9));
    assert_eq!(node.span(), Span::new(4, 5));
}

#[test]
fn display_lists_leaves() {
    let Ok(node) = ConstantNode::new(
        TypeDesc::vector(ScalarKind::Int, 2),
        vec![ScalarValue::Int(1), ScalarValue::Int(-2)],
        Span::DUMMY,
    ) else {
        panic!("expected a valid ivec2");
    };
    assert_eq!(node.to_string(), "ivec2(1, -2)");
}

#[test]
fn option_children_are_constant_only_when_present() {
    let folded = Some(ConstantNode::scalar(ScalarValue::Bool(true), Span::DUMMY));
    let runtime: Option<ConstantNode> = None;
    assert!(folded.as_constant().is_some());
    assert!(runtime.as_constant().is_none());
}
