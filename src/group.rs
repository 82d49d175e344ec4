//! # Line-Item Grouper
//!
//! Turns the flat item list into the ordered category buckets the packer
//! walks. Items sort case-insensitively by name inside each bucket; buckets
//! sort by the caller's category ranking (unlisted categories after every
//! listed one) with larger buckets first on rank ties, since large
//! categories are less likely to leave small unusable gaps at column
//! bottoms.
//!
//! Grouping is fully deterministic for identical input, which the packer
//! relies on for reproducible documents.

use std::collections::HashMap;

use crate::model::{LineItem, RenderOptions};

/// All items of one category, pre-sorted, plus the packer's progress cursor.
#[derive(Debug, Clone)]
pub struct CategoryBucket {
    pub name: String,
    pub items: Vec<LineItem>,
    /// Index of the next unrendered item. Advances monotonically; only the
    /// packer mutates it. `cursor == items.len()` marks the bucket complete.
    pub cursor: usize,
}

impl CategoryBucket {
    /// Items not yet placed in a chunk.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.items.len()
    }
}

/// Group a flat item list into ordered buckets.
pub fn group_items(items: Vec<LineItem>, options: &RenderOptions) -> Vec<CategoryBucket> {
    let mut by_category: HashMap<String, Vec<LineItem>> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for item in items {
        if !by_category.contains_key(&item.category) {
            first_seen.push(item.category.clone());
        }
        by_category.entry(item.category.clone()).or_default().push(item);
    }

    // Walk categories in first-seen order so the stable sort below is
    // deterministic for identical input.
    let mut buckets: Vec<CategoryBucket> = first_seen
        .into_iter()
        .map(|name| {
            let mut items = by_category.remove(&name).unwrap_or_default();
            items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            CategoryBucket {
                name,
                items,
                cursor: 0,
            }
        })
        .collect();

    buckets.sort_by(|a, b| {
        options
            .category_rank(&a.name)
            .cmp(&options.category_rank(&b.name))
            .then(b.items.len().cmp(&a.items.len()))
    });

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> LineItem {
        LineItem {
            name: name.to_string(),
            category: category.to_string(),
            display_price: 1.0,
        }
    }

    #[test]
    fn test_items_sorted_case_insensitively() {
        let buckets = group_items(
            vec![item("zinc plate", "A"), item("Anvil", "A"), item("bolt", "A")],
            &RenderOptions::default(),
        );
        assert_eq!(buckets.len(), 1);
        let names: Vec<&str> = buckets[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "bolt", "zinc plate"]);
    }

    #[test]
    fn test_ranked_categories_come_first() {
        let opts = RenderOptions {
            category_order: vec!["Tools".to_string(), "Hardware".to_string()],
            ..Default::default()
        };
        let buckets = group_items(
            vec![
                item("x", "Misc"),
                item("y", "Hardware"),
                item("z", "Tools"),
            ],
            &opts,
        );
        let order: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(order, vec!["Tools", "Hardware", "Misc"]);
    }

    #[test]
    fn test_rank_tie_breaks_on_size_descending() {
        // Neither category is ranked; the bigger one should come first.
        let buckets = group_items(
            vec![
                item("a", "Small"),
                item("b", "Big"),
                item("c", "Big"),
                item("d", "Big"),
            ],
            &RenderOptions::default(),
        );
        assert_eq!(buckets[0].name, "Big");
        assert_eq!(buckets[1].name, "Small");
    }

    #[test]
    fn test_empty_category_kept_as_its_own_bucket() {
        let buckets = group_items(
            vec![item("stray", ""), item("a", "Hardware")],
            &RenderOptions::default(),
        );
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().any(|b| b.name.is_empty() && b.items.len() == 1));
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let input = vec![
            item("c", "X"),
            item("a", "Y"),
            item("b", "X"),
            item("d", "Z"),
        ];
        let opts = RenderOptions::default();
        let first = group_items(input.clone(), &opts);
        let second = group_items(input, &opts);
        let order = |buckets: &[CategoryBucket]| -> Vec<String> {
            buckets
                .iter()
                .flat_map(|b| b.items.iter().map(|i| i.name.clone()))
                .collect()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_cursor_starts_at_zero() {
        let buckets = group_items(vec![item("a", "A")], &RenderOptions::default());
        assert_eq!(buckets[0].cursor, 0);
        assert_eq!(buckets[0].remaining(), 1);
        assert!(!buckets[0].is_complete());
    }
}
