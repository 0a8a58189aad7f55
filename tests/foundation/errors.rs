//! Integration tests for Error types
//!
//! Tests error construction, display, context, and retry classification.

use cmdgen_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unknown_non_terminal() {
    let err = Error::unknown_non_terminal("$find");
    assert!(matches!(err.kind, ErrorKind::UnknownNonTerminal(ref nt) if nt == "$find"));
    assert!(err.to_string().contains("$find"));
}

#[test]
fn error_alternative_out_of_range() {
    let err = Error::alternative_out_of_range("$Main", 9, 3);
    let msg = err.to_string();
    assert!(msg.contains("$Main"));
    assert!(msg.contains('9'));
    assert!(msg.contains('3'));
}

#[test]
fn error_pool_exhausted_names_keycode() {
    let err = Error::pool_exhausted("beacon", "beacon0001");
    assert!(matches!(err.kind, ErrorKind::PoolExhausted { .. }));
    assert!(err.to_string().contains("beacon0001"));
}

#[test]
fn error_recursion_limit() {
    let err = Error::recursion_limit(1000, "$loop");
    assert!(matches!(err.kind, ErrorKind::RecursionLimit { limit: 1000, .. }));
}

// =============================================================================
// Retry Classification
// =============================================================================

#[test]
fn only_binding_and_recursion_failures_retry() {
    assert!(Error::pool_exhausted("object", "object0001").is_retryable());
    assert!(Error::recursion_limit(10, "$x").is_retryable());
    assert!(!Error::unknown_non_terminal("$x").is_retryable());
    assert!(!Error::render_path_not_found("$x").is_retryable());
    assert!(!Error::io("disk").is_retryable());
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_appears_in_display() {
    let err = Error::invalid_rule("missing `=`")
        .with_context(ErrorContext::new().with_source("gpsr.txt").with_line(12));
    let msg = err.to_string();
    assert!(msg.contains("gpsr.txt"));
    assert!(msg.contains("12"));
}

#[test]
fn frames_accumulate() {
    let err = Error::render_path_not_found("{object}")
        .with_frame("$deliver")
        .with_frame("$Main");
    assert_eq!(err.context.unwrap().stack, ["$deliver", "$Main"]);
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
