//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of repeated errors at the same span
//! - Ordered flushing by source position

use std::hash::{Hash, Hasher};

use lumen_ir::Span;

use crate::{Diagnostic, DiagnosticSink};

/// Number of characters to use for message prefix deduplication.
const MESSAGE_PREFIX_LEN: usize = 30;

/// Hash the first N characters of a message for dedup comparison.
#[inline]
fn message_prefix_hash(msg: &str) -> u64 {
    let byte_end = msg
        .char_indices()
        .nth(MESSAGE_PREFIX_LEN)
        .map_or(msg.len(), |(idx, _)| idx);
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    msg[..byte_end].hash(&mut hasher);
    hasher.finish()
}

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before dropping further ones (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error repeating the previous error's span and message prefix.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Count of errors (not warnings/notes).
    error_count: usize,
    /// Last (span, `message_prefix_hash`) for error dedup.
    last_error: Option<(Span, u64)>,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            last_error: None,
            config,
        }
    }

    /// Add a diagnostic to the queue.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();

        if is_error && self.limit_reached() {
            return false;
        }

        let span = diag.primary_span().unwrap_or(Span::DUMMY);
        if is_error {
            let key = (span, message_prefix_hash(&diag.message));
            if self.config.deduplicate && self.last_error == Some(key) {
                return false;
            }
            self.last_error = Some(key);
            self.error_count += 1;
        }

        self.diagnostics.push(diag);
        true
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if any errors were collected.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Sort diagnostics by position and return them.
    ///
    /// Clears the queue after flushing. The sort is stable, so diagnostics
    /// reported at the same position keep their emission order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        result.sort_by_key(|d| d.primary_span().map_or(0, |s| s.start));

        self.error_count = 0;
        self.last_error = None;

        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if !self.add(diagnostic) {
            tracing::trace!("diagnostic filtered by queue");
        }
    }
}

#[cfg(test)]
mod tests;
