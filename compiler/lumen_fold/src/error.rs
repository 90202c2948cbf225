//! Fold failures.
//!
//! Every variant is an internal-compiler-error condition: the type checker
//! only hands the folder well-typed constant operands, so a failure means
//! either a folding rule is missing or an upstream phase produced malformed
//! input.

use lumen_diagnostic::{Diagnostic, ErrorCode};
use lumen_ir::{ConstantNode, Operator, ScalarKind, ScalarValue, Span, TypeDesc};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FoldError {
    /// No folding rule for this operator and operand kind or shape.
    #[error("no folding rule for {op} on {kind} operands")]
    UnsupportedOperator { op: Operator, kind: ScalarKind },

    /// The operator is recognized but cannot be folded to a single constant.
    #[error("folding {op} is not implemented")]
    NotFoldable { op: Operator },

    /// Operands that a correct type checker would never produce.
    #[error("malformed operands for {op}: {reason}")]
    InvariantViolation { op: Operator, reason: String },
}

impl FoldError {
    pub(crate) fn unsupported(op: impl Into<Operator>, kind: ScalarKind) -> Self {
        FoldError::UnsupportedOperator {
            op: op.into(),
            kind,
        }
    }

    pub(crate) fn invariant(op: impl Into<Operator>, reason: impl Into<String>) -> Self {
        FoldError::InvariantViolation {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            FoldError::UnsupportedOperator { .. } => ErrorCode::E9001,
            FoldError::NotFoldable { .. } => ErrorCode::E9002,
            FoldError::InvariantViolation { .. } => ErrorCode::E9003,
        }
    }

    /// Internal-error diagnostic for this failure, labelled at `span`.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(format!("constant folding failed: {self}"))
            .with_label(span, "while folding this expression")
    }
}

/// Wrap freshly computed leaves in a node, reporting a layout mismatch as an
/// invariant violation of `op`.
pub(crate) fn build(
    op: impl Into<Operator>,
    ty: TypeDesc,
    values: Vec<ScalarValue>,
    span: Span,
) -> Result<ConstantNode, FoldError> {
    ConstantNode::new(ty, values, span).map_err(|err| FoldError::invariant(op, err.to_string()))
}
