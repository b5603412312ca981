//! Tag filter — pure include/exclude selection over template items.
//!
//! An item survives iff (`only_tags` is empty OR the item carries one of
//! them) AND NOT (`skip_tags` is non-empty AND the item carries one of
//! them). Empty slices mean "no filter"; order and duplicates are preserved.

use std::collections::BTreeSet;

use crate::item::TemplateItem;

/// Decide whether a tag set passes the `only_tags` / `skip_tags` rules.
///
/// An item without tags cannot match a non-empty `only_tags` filter and can
/// never be excluded by `skip_tags`.
pub fn tags_match(item_tags: &BTreeSet<String>, only_tags: &[String], skip_tags: &[String]) -> bool {
    let included = only_tags.is_empty() || only_tags.iter().any(|t| item_tags.contains(t));
    let excluded = !skip_tags.is_empty() && skip_tags.iter().any(|t| item_tags.contains(t));
    included && !excluded
}

/// Filter an ordered item list by tags, preserving relative order and
/// duplicate entries.
pub fn filter_by_tags(
    items: Vec<TemplateItem>,
    only_tags: &[String],
    skip_tags: &[String],
) -> Vec<TemplateItem> {
    items
        .into_iter()
        .filter(|item| tags_match(&item.tags, only_tags, skip_tags))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn item_with_tags(template: &str, tags: &[&str]) -> TemplateItem {
        TemplateItem {
            template: template.to_string(),
            tags: tag_set(tags),
            only_if: None,
        }
    }

    #[rstest]
    #[case(&["tag1"], &[], true)]
    #[case(&["tag4"], &[], false)]
    #[case(&["tag1"], &["tag1"], false)]
    #[case(&[], &["tag1"], false)]
    #[case(&[], &["tag4"], true)]
    fn truth_table_over_tag1_tag2_tag3(
        #[case] only: &[&str],
        #[case] skip: &[&str],
        #[case] expected: bool,
    ) {
        let item_tags = tag_set(&["tag1", "tag2", "tag3"]);
        assert_eq!(tags_match(&item_tags, &strings(only), &strings(skip)), expected);
    }

    #[test]
    fn untagged_item_fails_only_filter_but_survives_skip_filter() {
        let empty = BTreeSet::new();
        assert!(!tags_match(&empty, &strings(&["tag1"]), &[]));
        assert!(tags_match(&empty, &[], &strings(&["tag1"])));
    }

    #[test]
    fn filter_matches_the_original_contract() {
        // Same shapes the config layer produces: sequence tags, comma-string
        // tags, single-element variants of both.
        let items = vec![
            item_with_tags("template.yaml.j2", &["tag1", "tag2", "tag3"]),
            item_with_tags("template.yaml.j2", &["tag1", "tag2", "tag3"]),
            item_with_tags("template.yaml.j2", &["tag1"]),
            item_with_tags("template.yaml.j2", &["tag1"]),
        ];

        let all = filter_by_tags(items.clone(), &strings(&["tag1"]), &[]);
        assert_eq!(all, items);

        let none = filter_by_tags(items.clone(), &strings(&["tag0"]), &[]);
        assert!(none.is_empty());

        let first_two = filter_by_tags(items.clone(), &strings(&["tag3"]), &[]);
        assert_eq!(first_two, items[..2].to_vec());

        let skipped = filter_by_tags(items, &[], &strings(&["tag1"]));
        assert!(skipped.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = vec![
            item_with_tags("a.yaml.j2", &["tag1"]),
            item_with_tags("b.yaml.j2", &["tag2"]),
            item_with_tags("c.yaml.j2", &[]),
        ];
        let only = strings(&["tag1", "tag2"]);
        let skip = strings(&["tag2"]);

        let once = filter_by_tags(items, &only, &skip);
        let twice = filter_by_tags(once.clone(), &only, &skip);
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let items = vec![
            item_with_tags("dup.yaml.j2", &["keep"]),
            item_with_tags("other.yaml.j2", &["drop"]),
            item_with_tags("dup.yaml.j2", &["keep"]),
        ];
        let kept = filter_by_tags(items, &strings(&["keep"]), &[]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|i| i.template == "dup.yaml.j2"));
    }
}
