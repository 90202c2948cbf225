//! Compile-time constant folding for the Lumen shader compiler.
//!
//! The type checker calls into this crate whenever every operand of an
//! operation is already a [`ConstantNode`](lumen_ir::ConstantNode). Folding
//! produces a new constant of the operation's result type, or a
//! [`FoldError`] explaining why the operation cannot be evaluated at compile
//! time.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Parse → Type Check ⇄ **Fold** → Lower
//! ```
//!
//! # Entry Points
//!
//! - [`fold_binary`]: arithmetic, bitwise, logical, comparison and linear
//!   algebra operators, with scalar broadcast
//! - [`fold_unary`]: negation, built-in math functions, `length`/`normalize`
//! - [`fold_aggregate`]: multi-argument built-ins such as `min`, `mix`,
//!   `cross`
//! - [`fold_constructor`]: `vec3(...)`, `S(...)` and friends
//! - [`ConstFolder`]: the same operations, reporting failures to a
//!   [`DiagnosticSink`](lumen_diagnostic::DiagnosticSink)
//!
//! # Numeric Model
//!
//! Integer arithmetic wraps. Division by zero never traps: it yields a fixed
//! per-kind value (see [`lumen_ir::INT_DIV_BY_ZERO`]). Reductions and
//! products accumulate in `f64` before being stored at the result kind.
//!
//! # Tracing
//!
//! Each entry point opens a `trace` span. Enable with
//! `RUST_LOG=lumen_fold=trace` after calling [`init_tracing`].

use std::sync::Once;

mod aggregate;
mod binary;
mod constructor;
mod equality;
mod error;
mod folder;
mod unary;

pub use aggregate::fold_aggregate;
pub use binary::fold_binary;
pub use constructor::fold_constructor;
pub use equality::structurally_equal;
pub use error::FoldError;
pub use folder::{is_all_constant, AggregateKind, ConstFolder, FoldConfig};
pub use unary::fold_unary;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the folder.
///
/// Call this once at startup. Safe to call multiple times.
/// Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
