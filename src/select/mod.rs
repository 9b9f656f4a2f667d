//! Searchable selection prompt
//!
//! Filtering is a pure projection over the caller's choices: it yields
//! indices into the original slice and never reorders or drops entries
//! from it.

mod picker;
mod styles;
mod terminal;

pub use picker::{Picker, PickerResult, PAGE_SIZE};
pub use styles::Theme;
pub use terminal::TerminalSelector;

use thiserror::Error;

/// A display label paired with the value returned when it is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Selection cancelled")]
    Cancelled,

    #[error("Cannot prompt for a selection: stdin is not a terminal")]
    NotInteractive,

    #[error("Nothing to select")]
    NoChoices,

    #[error("Terminal error")]
    Io(#[from] std::io::Error),
}

/// Presents `choices` under `message` and returns the value of the one picked.
pub trait Selector {
    fn select<T: Clone>(&mut self, message: &str, choices: &[Choice<T>]) -> Result<T, SelectError>;
}

/// Indices of the labels containing `query`, ignoring case, in original order.
/// An empty query matches everything.
pub fn filter_choices<S: AsRef<str>>(labels: &[S], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..labels.len()).collect();
    }

    let query = query.to_lowercase();
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.as_ref().to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}

/// The candidate rows a picker shows for `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visible {
    pub indices: Vec<usize>,
    /// True when the query matched nothing and every choice is shown instead.
    pub fallback: bool,
}

/// Like [`filter_choices`], but a query that matches nothing falls back to
/// the full list so the operator is never left with an empty picker.
pub fn visible_choices<S: AsRef<str>>(labels: &[S], query: &str) -> Visible {
    let indices = filter_choices(labels, query);
    if indices.is_empty() && !query.is_empty() {
        return Visible {
            indices: (0..labels.len()).collect(),
            fallback: true,
        };
    }

    Visible {
        indices,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<&'static str> {
        vec!["api-prod", "Worker-prod", "api-staging", "cron"]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        assert_eq!(filter_choices(&labels(), ""), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        assert_eq!(filter_choices(&labels(), "PROD"), vec![0, 1]);
        assert_eq!(filter_choices(&labels(), "worker"), vec![1]);
        assert_eq!(filter_choices(&labels(), "i-s"), vec![2]);
    }

    #[test]
    fn test_filter_keeps_original_order() {
        let labels = vec!["b-api", "a-api", "c-api"];
        assert_eq!(filter_choices(&labels, "api"), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_match_yields_empty_filter() {
        assert!(filter_choices(&labels(), "zzz").is_empty());
    }

    #[test]
    fn test_visible_falls_back_to_full_list() {
        let visible = visible_choices(&labels(), "zzz");
        assert!(visible.fallback);
        assert_eq!(visible.indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_visible_without_fallback() {
        let visible = visible_choices(&labels(), "cron");
        assert!(!visible.fallback);
        assert_eq!(visible.indices, vec![3]);

        let visible = visible_choices(&labels(), "");
        assert!(!visible.fallback);
        assert_eq!(visible.indices.len(), 4);
    }

    #[test]
    fn test_choice_new() {
        let choice = Choice::new("label", 42);
        assert_eq!(choice.label, "label");
        assert_eq!(choice.value, 42);
    }
}
