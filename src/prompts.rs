//! Prompt string helpers.

use std::fmt::Display;

/// Drop empty strings, keeping the original order.
///
/// If nothing is left and a `default` is given, returns `[default]`.
pub fn remove_empty_str<S: AsRef<str>>(items: &[S], default: Option<&str>) -> Vec<String> {
    let kept: Vec<String> = items
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    match default {
        Some(default) if kept.is_empty() => vec![default.to_string()],
        _ => kept,
    }
}

/// Join the non-empty string forms of `items` with `", "`.
///
/// - no items (or only empty ones) → `""`
/// - one item → that item unchanged
pub fn join_prompts<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
