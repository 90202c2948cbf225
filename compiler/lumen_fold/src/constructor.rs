//! Constructor folding.
//!
//! A single scalar source is converted once per destination leaf. Anything
//! else is read as one flattened stream of source leaves, consumed left to
//! right in the destination's own flattened order. Leaves left over at the
//! end of the stream are dropped, so `vec3(v4)` takes the first three.

use lumen_ir::{ConstantNode, Operator, Span, TypeDesc};

use crate::error::{build, FoldError};

/// Fold `target(sources...)`. The result carries `span`.
#[tracing::instrument(level = "trace", skip_all, fields(target = %target, sources = sources.len()))]
pub fn fold_constructor(
    target: &TypeDesc,
    sources: &[&ConstantNode],
    span: Span,
) -> Result<ConstantNode, FoldError> {
    let op = Operator::Constructor;
    let leaf_kinds = target.leaf_kinds();

    let values = match sources {
        [] => return Err(FoldError::invariant(op, "constructor has no arguments")),
        [single] if single.object_size() == 1 => {
            let value = single.values()[0];
            leaf_kinds
                .iter()
                .map(|&kind| {
                    value
                        .convert(kind)
                        .ok_or_else(|| FoldError::unsupported(op, value.kind()))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => {
            let available: usize = sources.iter().map(|s| s.object_size()).sum();
            if available < leaf_kinds.len() {
                return Err(FoldError::invariant(
                    op,
                    format!(
                        "`{target}` needs {} values, arguments supply {available}",
                        leaf_kinds.len()
                    ),
                ));
            }
            let stream = sources.iter().flat_map(|s| s.values().iter().copied());
            leaf_kinds
                .iter()
                .zip(stream)
                .map(|(&kind, value)| {
                    value
                        .convert(kind)
                        .ok_or_else(|| FoldError::unsupported(op, value.kind()))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    build(op, target.clone(), values, span)
}
