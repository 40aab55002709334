// Host-side tests for page constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct_and_non_empty() {
    assert!(!START_PROMPT_ID.is_empty());
    assert!(!CANVAS_ID.is_empty());
    assert_ne!(START_PROMPT_ID, CANVAS_ID);
    assert!(!START_PROMPT_ID.contains(char::is_whitespace));
    assert!(!CANVAS_ID.contains(char::is_whitespace));
}

#[test]
fn prompt_tells_the_user_to_click() {
    assert_eq!(START_PROMPT_TEXT, "Click to Start");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn surface_minimum_is_positive() {
    assert!(MIN_SURFACE_PX >= 1);
}
