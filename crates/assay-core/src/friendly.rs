//! Friendly rendering of values for diagnostic messages.

use std::fmt::Debug;

/// Text used wherever an absent value is rendered.
pub const NULL_TEXT: &str = "<null>";

/// Renders a sequence as its items' `Debug` text joined by `", "`.
pub fn render_sequence<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Debug,
{
    items
        .into_iter()
        .map(|item| format!("{item:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders an optional sequence, using [`NULL_TEXT`] when it is absent.
pub fn render_optional<I>(items: Option<I>) -> String
where
    I: IntoIterator,
    I::Item: Debug,
{
    match items {
        Some(items) => render_sequence(items),
        None => NULL_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_items_and_absence() {
        assert_eq!(render_sequence([0, 1, 2]), "0, 1, 2");
        assert_eq!(render_sequence(Vec::<i32>::new()), "");
        assert_eq!(render_optional(Some(["a"])), "\"a\"");
        assert_eq!(render_optional(None::<Vec<i32>>), NULL_TEXT);
    }
}
