//! Property-based tests for extraction and formatting

#[cfg(test)]
mod tests {
    use crate::extract::extract_category_updates;
    use crate::format::{extract_and_format_lines, format_category_lines, BULLET, NO_TITLE};
    use crate::update::{CategorizedUpdates, UpdateRecord, Updates};
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = UpdateRecord> {
        (
            prop::option::of("[A-Za-z ]{0,12}"),
            prop::collection::vec("[A-Za-z ]{1,10}", 0..4),
        )
            .prop_map(|(title, categories)| UpdateRecord {
                title,
                categories,
                ..UpdateRecord::default()
            })
    }

    fn updates_strategy() -> impl Strategy<Value = Updates> {
        prop::collection::vec(("[a-z0-9]{1,6}", record_strategy()), 0..12)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    // Property test: every match has a category containing the name
    proptest! {
        #[test]
        fn test_matches_contain_category_name(
            updates in updates_strategy(),
            name in "[A-Za-z]{0,4}",
        ) {
            let needle = name.to_lowercase();
            for (_, record) in extract_category_updates(&name, &updates) {
                prop_assert!(record
                    .categories
                    .iter()
                    .any(|c| c.to_lowercase().contains(&needle)));
            }
        }
    }

    // Property test: extraction keeps source order and never duplicates
    proptest! {
        #[test]
        fn test_matches_are_ordered_subsequence(
            updates in updates_strategy(),
            name in "[A-Za-z]{0,3}",
        ) {
            let matches = extract_category_updates(&name, &updates);
            let positions: Vec<usize> = matches
                .iter()
                .map(|(id, _)| updates.get_index_of(id).unwrap())
                .collect();

            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(&matches, &extract_category_updates(&name, &updates));
        }
    }

    // Property test: uncategorized records never match
    proptest! {
        #[test]
        fn test_uncategorized_never_match(
            updates in updates_strategy(),
            name in "[A-Za-z]{0,4}",
        ) {
            for (_, record) in extract_category_updates(&name, &updates) {
                prop_assert!(!record.categories.is_empty());
            }
        }
    }

    // Property test: formatter line layout
    proptest! {
        #[test]
        fn test_formatter_emits_header_bullets_blank(
            updates in updates_strategy(),
            name in "[A-Za-z]{1,8}",
        ) {
            let matches: Vec<_> = updates.into_iter().collect();
            let lines = format_category_lines(&name, &matches);

            prop_assert_eq!(lines.len(), matches.len() + 2);
            let header = format!("{name} ({} update", matches.len());
            prop_assert!(lines[0].starts_with(&header));
            prop_assert_eq!(lines[0].ends_with("1 update)"), matches.len() == 1);
            prop_assert_eq!(lines.last().map(String::as_str), Some(""));

            for (line, (_, record)) in lines[1..lines.len() - 1].iter().zip(&matches) {
                let title = record.title.as_deref().unwrap_or(NO_TITLE);
                let expected = format!("{BULLET}{title}");
                prop_assert_eq!(line, &expected);
            }
        }
    }

    // Property test: unknown categories format as empty
    proptest! {
        #[test]
        fn test_unknown_category_formats_empty(name in "[A-Za-z]{1,8}") {
            let lines = extract_and_format_lines(&name, &CategorizedUpdates::new());
            prop_assert_eq!(lines, vec![format!("{name} (0 updates)"), String::new()]);
        }
    }
}
