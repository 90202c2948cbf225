use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn error_at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn test_flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.add(error_at(40, "third")));
    assert!(queue.add(error_at(0, "first")));
    assert!(queue.add(error_at(12, "second")));

    let messages: Vec<String> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert_eq!(queue.error_count(), 0);
    assert_eq!(queue.peek().count(), 0);
}

#[test]
fn test_repeated_error_at_same_span_deduplicated() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(5, "no folding rule for `~` on float")));
    assert!(!queue.add(error_at(5, "no folding rule for `~` on float")));
    assert!(queue.add(error_at(6, "no folding rule for `~` on float")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_unlimited_config_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.add(error_at(5, "same")));
    assert!(queue.add(error_at(5, "same")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_error_limit_drops_errors_but_not_warnings() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    assert!(queue.add(error_at(0, "a")));
    assert!(queue.add(error_at(1, "b")));
    assert!(queue.limit_reached());
    assert!(!queue.add(error_at(2, "c")));

    let warning = Diagnostic::warning(ErrorCode::E9002).with_message("still reported");
    assert!(queue.add(warning));
    assert_eq!(queue.peek().count(), 3);
}

#[test]
fn test_sink_emit_feeds_queue() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(error_at(3, "via sink"));
    assert!(queue.has_errors());
    assert_eq!(queue.peek().next().map(|d| d.message.as_str()), Some("via sink"));
}
