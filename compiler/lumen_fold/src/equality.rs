//! Structural equality over flattened struct and array constants.
//!
//! Members are located by offset, accumulated left to right from each
//! member's object size. Struct members (and arrays of structs) recurse into
//! their own sub-range; every other member compares its leaves directly.

use lumen_ir::{ScalarKind, ScalarValue, Shape, TypeDesc};

/// Compare two flattened constants of type `ty` leaf by leaf.
///
/// Returns `false` on the first mismatching leaf, and for sequences whose
/// length does not match `ty`.
pub fn structurally_equal(ty: &TypeDesc, left: &[ScalarValue], right: &[ScalarValue]) -> bool {
    let size = ty.object_size();
    if left.len() != size || right.len() != size {
        return false;
    }

    match ty.shape() {
        Shape::Array { element, len } => {
            let stride = element.object_size();
            (0..*len).all(|i| {
                let range = i * stride..(i + 1) * stride;
                structurally_equal(element, &left[range.clone()], &right[range])
            })
        }
        Shape::Struct(_) => ty.member_offsets().all(|(offset, member)| {
            let range = offset..offset + member.ty.object_size();
            if member.ty.kind() == ScalarKind::Struct {
                structurally_equal(&member.ty, &left[range.clone()], &right[range])
            } else {
                left[range.clone()] == right[range]
            }
        }),
        Shape::Scalar | Shape::Vector(_) | Shape::Matrix { .. } => left == right,
    }
}
