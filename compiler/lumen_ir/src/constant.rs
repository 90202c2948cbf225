//! Constant nodes: the unit of constant folding.
//!
//! A [`ConstantNode`] is a type descriptor plus the flattened leaf values of
//! that type. Nodes are immutable; folding always produces a new node.

use std::fmt;

use crate::{ScalarKind, ScalarValue, Span, TypeDesc};

/// Error when the leaf values do not match a type's flattened layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Wrong number of leaf values.
    Length {
        ty: String,
        expected: usize,
        found: usize,
    },
    /// A leaf value has a different kind than its position in the layout.
    Kind {
        index: usize,
        expected: ScalarKind,
        found: ScalarKind,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Length {
                ty,
                expected,
                found,
            } => write!(f, "`{ty}` holds {expected} scalars, got {found}"),
            LayoutError::Kind {
                index,
                expected,
                found,
            } => write!(f, "leaf {index} should be {expected}, got {found}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// An immutable compile-time constant.
#[derive(Clone, PartialEq, Debug)]
pub struct ConstantNode {
    ty: TypeDesc,
    values: Box<[ScalarValue]>,
    span: Span,
}

impl ConstantNode {
    /// Create a constant, checking `values` against the layout of `ty`.
    pub fn new(ty: TypeDesc, values: Vec<ScalarValue>, span: Span) -> Result<Self, LayoutError> {
        let leaf_kinds = ty.leaf_kinds();
        if leaf_kinds.len() != values.len() {
            return Err(LayoutError::Length {
                ty: ty.to_string(),
                expected: leaf_kinds.len(),
                found: values.len(),
            });
        }
        if let Some((index, (expected, value))) = leaf_kinds
            .iter()
            .zip(&values)
            .enumerate()
            .find(|(_, (kind, value))| value.kind() != **kind)
        {
            return Err(LayoutError::Kind {
                index,
                expected: *expected,
                found: value.kind(),
            });
        }
        Ok(ConstantNode {
            ty,
            values: values.into_boxed_slice(),
            span,
        })
    }

    /// A scalar constant typed by its value's kind.
    pub fn scalar(value: ScalarValue, span: Span) -> Self {
        ConstantNode {
            ty: TypeDesc::scalar(value.kind()),
            values: Box::new([value]),
            span,
        }
    }

    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Number of leaf values; always `self.ty().object_size()`.
    #[inline]
    pub fn object_size(&self) -> usize {
        self.values.len()
    }

    /// Leaf `index`, or the single leaf of a size-1 constant for any index.
    ///
    /// This is how a scalar operand is broadcast against a larger one
    /// without materializing a replicated buffer.
    #[inline]
    pub fn broadcast_at(&self, index: usize) -> ScalarValue {
        if self.values.len() == 1 {
            self.values[0]
        } else {
            self.values[index]
        }
    }
}

impl fmt::Display for ConstantNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// An IR child that may or may not already be a folded constant.
pub trait AsConstant {
    fn as_constant(&self) -> Option<&ConstantNode>;
}

impl AsConstant for ConstantNode {
    fn as_constant(&self) -> Option<&ConstantNode> {
        Some(self)
    }
}

impl AsConstant for Option<ConstantNode> {
    fn as_constant(&self) -> Option<&ConstantNode> {
        self.as_ref()
    }
}

impl<T: AsConstant + ?Sized> AsConstant for &T {
    fn as_constant(&self) -> Option<&ConstantNode> {
        (**self).as_constant()
    }
}

#[cfg(test)]
mod tests;
