//! Merges stored category names with the labels found on posts into a single
//! deduplicated, sorted sequence.
//!
//! Two call sites consume the unified sequence: the board's filter chip row
//! (plain names, see [unify_category_names]) and the post creation form's
//! category selector (category-shaped entries with placeholder IDs, see
//! [selector_categories]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Merge stored category names and post labels into one sequence.
///
/// Empty strings are excluded, duplicates are removed by exact string
/// equality, and the result is sorted ascending by Unicode code point. The
/// ordering of the inputs does not affect the output, so callers may pass
/// their sources in creation order or name order.
pub fn unify_category_names<S, P>(stored_names: S, post_categories: P) -> Vec<String>
where
    S: IntoIterator<Item = String>,
    P: IntoIterator<Item = String>,
{
    let unique: BTreeSet<String> = stored_names
        .into_iter()
        .chain(post_categories)
        .filter(|name| !name.is_empty())
        .collect();

    unique.into_iter().collect()
}

/// A category-shaped entry for the post creation form's selector.
///
/// Synthesized from the unified name sequence. The `id` is a local
/// `"merged-" + index` placeholder and `created_at` is left empty; neither is
/// ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorCategory {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Build the category selector entries for the post creation form.
///
/// Unifies the inputs as [unify_category_names] does, then wraps each unique
/// name into a [SelectorCategory] with a positional placeholder ID.
pub fn selector_categories<S, P>(stored_names: S, post_categories: P) -> Vec<SelectorCategory>
where
    S: IntoIterator<Item = String>,
    P: IntoIterator<Item = String>,
{
    unify_category_names(stored_names, post_categories)
        .into_iter()
        .enumerate()
        .map(|(index, name)| SelectorCategory {
            id: format!("merged-{index}"),
            name,
            created_at: String::new(),
        })
        .collect()
}

/// The board's filter state: either the synthetic "All" pseudo-category or a
/// single category name.
///
/// "All" is a distinct filter state, never a member of the unified sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    /// Show every post.
    All,
    /// Show only the posts whose category exactly matches the name.
    Tag(String),
}

impl TagFilter {
    /// Parse the board's `tag` query parameter.
    ///
    /// A missing parameter or the literal string "All" selects [TagFilter::All].
    pub fn from_query(tag: Option<String>) -> Self {
        match tag {
            None => TagFilter::All,
            Some(tag) if tag == "All" => TagFilter::All,
            Some(tag) => TagFilter::Tag(tag),
        }
    }

    /// The label shown on the selected filter chip.
    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => "All",
            TagFilter::Tag(tag) => tag,
        }
    }

    /// Whether a post with the given category label passes the filter.
    ///
    /// Matching is exact string equality with no normalization or partial
    /// matching.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => category == tag,
        }
    }

    /// Filter posts, preserving their relative order.
    ///
    /// [TagFilter::All] returns every post unchanged.
    pub fn filter_posts<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts
            .iter()
            .filter(|post| self.matches(&post.category))
            .collect()
    }
}

#[cfg(test)]
mod unify_tests {
    use super::{selector_categories, unify_category_names};

    #[test]
    fn unify_dedups_sorts_and_drops_empty_labels() {
        let stored = vec!["Math".to_string(), "Chem".to_string()];
        let post_labels = vec![
            "Physics".to_string(),
            "Math".to_string(),
            "".to_string(),
        ];

        let unified = unify_category_names(stored, post_labels);

        assert_eq!(unified, vec!["Chem", "Math", "Physics"]);
    }

    #[test]
    fn unify_is_idempotent() {
        let stored = vec!["Math".to_string(), "Chem".to_string()];
        let post_labels = vec!["Physics".to_string(), "Math".to_string()];

        let once = unify_category_names(stored, post_labels);
        let twice = unify_category_names(once.clone(), Vec::new());

        assert_eq!(once, twice);
    }

    #[test]
    fn unify_is_case_sensitive() {
        let unified = unify_category_names(
            vec!["math".to_string()],
            vec!["Math".to_string()],
        );

        assert_eq!(unified, vec!["Math", "math"]);
    }

    #[test]
    fn unify_of_empty_inputs_is_empty() {
        let unified = unify_category_names(Vec::new(), Vec::new());

        assert!(unified.is_empty());
    }

    #[test]
    fn selector_entries_get_positional_placeholder_ids() {
        let stored = vec!["Chem".to_string(), "Math".to_string()];
        let post_labels = vec!["Physics".to_string()];

        let entries = selector_categories(stored, post_labels);

        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Chem", "Math", "Physics"]);

        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(entry.id, format!("merged-{index}"));
            assert!(entry.created_at.is_empty());
        }
    }
}
