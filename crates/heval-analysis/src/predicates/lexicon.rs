//! Label vocabulary the predicates match against.
//!
//! Labels are compared as whole words after lowercasing and replacing
//! punctuation with spaces, so "Delete item" matches "delete" but
//! "Undeleted" does not.

use std::sync::LazyLock;

use regex::Regex;

/// Actions that usually start server-side processing.
pub const PROCESSING_ACTIONS: &[&str] = &[
    "submit", "save", "send", "search", "log in", "login", "sign in", "sign up", "continue",
    "pay", "checkout", "place order", "upload",
];

/// Text that signals a visible loading state.
pub const LOADING_CUES: &[&str] = &["loading", "processing", "please wait", "saving", "sending"];

/// Forward/backward controls of a multi-step flow.
pub const STEP_CONTROLS: &[&str] = &["next", "previous", "prev"];

pub const REVERSAL_CONTROLS: &[&str] = &[
    "undo", "redo", "back", "go back", "cancel", "revert", "restore", "previous",
];

pub const EXIT_CONTROLS: &[&str] = &["cancel", "close", "exit", "dismiss", "x", "not now"];

pub const DESTRUCTIVE_ACTIONS: &[&str] = &[
    "delete", "remove", "erase", "discard", "destroy", "clear all", "reset", "deactivate",
];

pub const CONFIRMATION_CUES: &[&str] = &[
    "are you sure", "cannot be undone", "can t be undone", "confirm deletion", "permanently",
];

/// Developer vocabulary that should not reach user-facing text.
pub const JARGON: &[&str] = &[
    "payload", "null", "undefined", "exception", "stack trace", "endpoint", "parameter",
    "query string", "syntax error", "fatal", "segfault", "timeout", "nan", "backend",
];

/// Words that name the same action; a screen should pick one per group.
pub const SYNONYM_GROUPS: &[&[&str]] = &[
    &["delete", "remove"],
    &["sign in", "log in", "login"],
    &["sign up", "register", "create account"],
    &["settings", "preferences", "options"],
    &["ok", "okay"],
];

/// "Step 2 of 4", "step 2/4".
pub static STEP_COUNTER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bstep\s+\d+\s*(of|/)\s*\d+\b").ok());

/// Raw status or error codes: "Error 503", "error code 1042", "0x80004005".
pub static ERROR_CODE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(error|err)\s*(code\s*)?#?\d{3,}\b|\b0x[0-9a-f]{4,}\b").ok()
});

/// Lowercased, punctuation-free label padded with spaces for whole-word search.
pub fn padded(label: &str) -> String {
    let cleaned: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    format!(" {} ", words.join(" "))
}

/// First term of `terms` that occurs in `label` as a whole word or phrase.
pub fn find_term<'a>(label: &str, terms: &[&'a str]) -> Option<&'a str> {
    let haystack = padded(label);
    terms
        .iter()
        .copied()
        .find(|term| haystack.contains(&format!(" {term} ")))
}

pub fn has_term(label: &str, terms: &[&str]) -> bool {
    find_term(label, terms).is_some()
}

pub fn matches(regex: &LazyLock<Option<Regex>>, text: &str) -> bool {
    regex.as_ref().is_some_and(|re| re.is_match(text))
}
