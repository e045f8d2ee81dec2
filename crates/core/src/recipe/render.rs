//! `{{var}}` placeholder rendering.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([a-zA-Z0-9_]+)\}\}").expect("placeholder regex is valid"));

/// Replace `{{var}}` with values from `ctx`. Unknown placeholders are left
/// as written.
pub fn render_string(template: &str, ctx: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            ctx.get(key).cloned().unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder names used in `template`, sorted.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    PLACEHOLDER.captures_iter(template).map(|c| c[1].to_string()).collect()
}
