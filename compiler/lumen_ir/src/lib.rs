//! Lumen IR - constant representation for the shader compiler
//!
//! This crate holds the data the constant folder works on:
//! - Scalar kinds and leaf values
//! - Type descriptors with flattened layout queries
//! - Immutable constant nodes
//! - Operator tags chosen by the type checker
//! - Spans for source locations
//!
//! # Layout
//!
//! Every constant is a flat sequence of leaf scalars. Vectors are component
//! ordered, matrices column-major, and structs/arrays concatenate their
//! members in declaration order. Nested members are addressed by offset and
//! object size, never by pointer.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod constant;
mod operators;
mod scalar;
mod span;
mod types;

pub use constant::{AsConstant, ConstantNode, LayoutError};
pub use operators::{AggregateOp, BinaryOp, Operator, UnaryOp};
pub use scalar::{ScalarKind, ScalarValue, INT_DIV_BY_ZERO, UINT_DIV_BY_ZERO};
pub use span::Span;
pub use types::{Shape, StructMember, TypeDesc};
