//! Type descriptors for constants.
//!
//! A [`TypeDesc`] fixes the flattened layout of every constant of that type:
//! vectors are component ordered, matrices column-major, and structs and
//! arrays concatenate their members' layouts in declaration order.

use std::fmt;

use crate::ScalarKind;

/// Aggregate shape of a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    Scalar,
    Vector(usize),
    Matrix { cols: usize, rows: usize },
    Array { element: Box<TypeDesc>, len: usize },
    Struct(Vec<StructMember>),
}

/// A named struct member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructMember {
    pub name: String,
    pub ty: TypeDesc,
}

impl StructMember {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        StructMember {
            name: name.into(),
            ty,
        }
    }
}

/// A fully resolved type: basic kind plus shape.
///
/// The basic kind of an array is its element's kind, so an array of structs
/// is struct-kinded.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDesc {
    kind: ScalarKind,
    shape: Shape,
}

impl TypeDesc {
    pub const fn scalar(kind: ScalarKind) -> Self {
        TypeDesc {
            kind,
            shape: Shape::Scalar,
        }
    }

    pub const fn vector(kind: ScalarKind, size: usize) -> Self {
        TypeDesc {
            kind,
            shape: Shape::Vector(size),
        }
    }

    pub const fn matrix(kind: ScalarKind, cols: usize, rows: usize) -> Self {
        TypeDesc {
            kind,
            shape: Shape::Matrix { cols, rows },
        }
    }

    pub fn array(element: TypeDesc, len: usize) -> Self {
        TypeDesc {
            kind: element.kind,
            shape: Shape::Array {
                element: Box::new(element),
                len,
            },
        }
    }

    pub fn structure(members: Vec<StructMember>) -> Self {
        TypeDesc {
            kind: ScalarKind::Struct,
            shape: Shape::Struct(members),
        }
    }

    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.shape, Shape::Scalar)
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.shape, Shape::Vector(_))
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self.shape, Shape::Matrix { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.shape, Shape::Array { .. })
    }

    /// Component count of a vector; 1 for scalars, 0 for everything else.
    pub fn vector_size(&self) -> usize {
        match self.shape {
            Shape::Scalar => 1,
            Shape::Vector(size) => size,
            _ => 0,
        }
    }

    /// Column count of a matrix, 0 otherwise.
    pub fn matrix_cols(&self) -> usize {
        match self.shape {
            Shape::Matrix { cols, .. } => cols,
            _ => 0,
        }
    }

    /// Row count of a matrix, 0 otherwise.
    pub fn matrix_rows(&self) -> usize {
        match self.shape {
            Shape::Matrix { rows, .. } => rows,
            _ => 0,
        }
    }

    pub fn array_len(&self) -> Option<usize> {
        match self.shape {
            Shape::Array { len, .. } => Some(len),
            _ => None,
        }
    }

    /// Element type of an array (the type with one level of arrayness removed).
    pub fn element_type(&self) -> Option<&TypeDesc> {
        match &self.shape {
            Shape::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Struct members in declaration order; empty for non-structs.
    pub fn members(&self) -> &[StructMember] {
        match &self.shape {
            Shape::Struct(members) => members,
            _ => &[],
        }
    }

    /// Number of leaf scalars in the flattened layout.
    pub fn object_size(&self) -> usize {
        match &self.shape {
            Shape::Scalar => 1,
            Shape::Vector(size) => *size,
            Shape::Matrix { cols, rows } => cols * rows,
            Shape::Array { element, len } => len * element.object_size(),
            Shape::Struct(members) => members.iter().map(|m| m.ty.object_size()).sum(),
        }
    }

    /// Struct members paired with their offset into the flattened layout.
    pub fn member_offsets(&self) -> impl Iterator<Item = (usize, &StructMember)> {
        self.members().iter().scan(0, |offset, member| {
            let start = *offset;
            *offset += member.ty.object_size();
            Some((start, member))
        })
    }

    /// The kind of every leaf, in flattened order.
    pub fn leaf_kinds(&self) -> Vec<ScalarKind> {
        let mut kinds = Vec::with_capacity(self.object_size());
        self.push_leaf_kinds(&mut kinds);
        kinds
    }

    fn push_leaf_kinds(&self, out: &mut Vec<ScalarKind>) {
        match &self.shape {
            Shape::Scalar | Shape::Vector(_) | Shape::Matrix { .. } => {
                out.extend(std::iter::repeat_n(self.kind, self.object_size()));
            }
            Shape::Array { element, len } => {
                for _ in 0..*len {
                    element.push_leaf_kinds(out);
                }
            }
            Shape::Struct(members) => {
                for member in members {
                    member.ty.push_leaf_kinds(out);
                }
            }
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ScalarKind::Bool => "b",
            ScalarKind::Int => "i",
            ScalarKind::Uint => "u",
            ScalarKind::Double => "d",
            ScalarKind::Float | ScalarKind::Struct => "",
        };
        match &self.shape {
            Shape::Scalar => write!(f, "{}", self.kind),
            Shape::Vector(size) => write!(f, "{prefix}vec{size}"),
            Shape::Matrix { cols, rows } if cols == rows => write!(f, "{prefix}mat{cols}"),
            Shape::Matrix { cols, rows } => write!(f, "{prefix}mat{cols}x{rows}"),
            Shape::Array { element, len } => write!(f, "{element}[{len}]"),
            Shape::Struct(members) => {
                f.write_str("struct {")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", member.name, member.ty)?;
                }
                f.write_str(" }")
            }
        }
    }
}
