//! Reporting front end for the fold functions.
//!
//! [`ConstFolder`] runs the same folds as the free functions and reports
//! every failure to a [`DiagnosticSink`] before returning it, so callers only
//! need to decide whether to keep the unfolded node.

use lumen_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, Severity};
use lumen_ir::{
    AggregateOp, AsConstant, BinaryOp, ConstantNode, Span, TypeDesc, UnaryOp,
};

use crate::{fold_aggregate, fold_binary, fold_constructor, fold_unary, FoldError};

/// Folding policy.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FoldConfig {
    /// The folded expression appears where the language requires a constant
    /// (array sizes, `const` initializers). A failed fold is then also a user
    /// error, reported as `E2001`. When unset, a failed fold only produces a
    /// warning and the expression is evaluated at run time.
    pub require_constant: bool,
}

impl Default for FoldConfig {
    fn default() -> Self {
        FoldConfig {
            require_constant: true,
        }
    }
}

/// What an aggregate node computes.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateKind {
    /// A built-in function call.
    Operator(AggregateOp),
    /// A constructor of the given type.
    Constructor(TypeDesc),
}

/// `true` when every child already is a constant.
pub fn is_all_constant<T: AsConstant>(children: &[T]) -> bool {
    children.iter().all(|child| child.as_constant().is_some())
}

/// Constant folder that reports failures to `S`.
pub struct ConstFolder<S> {
    sink: S,
    config: FoldConfig,
}

impl<S: DiagnosticSink> ConstFolder<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, FoldConfig::default())
    }

    pub fn with_config(sink: S, config: FoldConfig) -> Self {
        ConstFolder { sink, config }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Fold `left op right`, reporting at the span covering both operands.
    pub fn binary(
        &mut self,
        op: BinaryOp,
        left: &ConstantNode,
        right: &ConstantNode,
    ) -> Result<ConstantNode, FoldError> {
        let result = fold_binary(op, left, right);
        self.report(result, left.span().merge(right.span()))
    }

    pub fn unary(
        &mut self,
        op: UnaryOp,
        operand: &ConstantNode,
        result_ty: &TypeDesc,
    ) -> Result<ConstantNode, FoldError> {
        let result = fold_unary(op, operand, result_ty);
        self.report(result, operand.span())
    }

    pub fn aggregate(
        &mut self,
        op: AggregateOp,
        operands: &[&ConstantNode],
        span: Span,
    ) -> Result<ConstantNode, FoldError> {
        let result = fold_aggregate(op, operands, span);
        self.report(result, span)
    }

    pub fn constructor(
        &mut self,
        target: &TypeDesc,
        sources: &[&ConstantNode],
        span: Span,
    ) -> Result<ConstantNode, FoldError> {
        let result = fold_constructor(target, sources, span);
        self.report(result, span)
    }

    /// Fold an aggregate node whose children may or may not be constants.
    ///
    /// Returns `Ok(None)` without reporting anything when some child is not a
    /// constant; the caller keeps the node as it is.
    pub fn aggregate_node<T: AsConstant>(
        &mut self,
        kind: &AggregateKind,
        children: &[T],
        span: Span,
    ) -> Result<Option<ConstantNode>, FoldError> {
        let Some(operands) = children
            .iter()
            .map(AsConstant::as_constant)
            .collect::<Option<Vec<_>>>()
        else {
            tracing::trace!(?kind, "aggregate has non-constant children");
            return Ok(None);
        };

        let folded = match kind {
            AggregateKind::Operator(op) => self.aggregate(*op, &operands, span),
            AggregateKind::Constructor(ty) => self.constructor(ty, &operands, span),
        };
        folded.map(Some)
    }

    fn report(
        &mut self,
        result: Result<ConstantNode, FoldError>,
        span: Span,
    ) -> Result<ConstantNode, FoldError> {
        match &result {
            Ok(node) => tracing::trace!(%node, "folded"),
            Err(err) => {
                tracing::debug!(%err, ?span, "constant folding failed");
                self.emit_failure(err, span);
            }
        }
        result
    }

    fn emit_failure(&mut self, err: &FoldError, span: Span) {
        let mut internal = err.to_diagnostic(span);
        if self.config.require_constant {
            self.sink.emit(internal);
            self.sink.emit(
                Diagnostic::error(ErrorCode::E2001)
                    .with_message("expression is not a valid constant expression")
                    .with_label(span, "this must be computable at compile time"),
            );
        } else {
            internal.severity = Severity::Warning;
            self.sink
                .emit(internal.with_note("the expression is left for run-time evaluation"));
        }
    }
}
