// 🏷️ Category Normalizer - Fold leaked-data labels into one canonical set
//
// "Password", "passwords" and "PASSWORD" describe the same exposure.
// Labels are lower-cased and bucketed by their singular key (one trailing
// "s" removed); each bucket keeps its most frequent form.
//
// Known limitation: irregular plurals are NOT folded
// ("address" -> "addres", "addresses" -> "addresse": two buckets).

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CategoryNormalizer;

impl CategoryNormalizer {
    pub fn new() -> Self {
        CategoryNormalizer
    }

    /// Bucket key shared by the singular and plural form of a label
    pub fn singular_key(label_lower: &str) -> &str {
        label_lower.strip_suffix('s').unwrap_or(label_lower)
    }

    /// Normalize a sequence of label occurrences.
    ///
    /// Every occurrence counts toward its form's frequency. Frequency ties go
    /// to the form encountered first. Output is sorted case-insensitively.
    pub fn normalize<I, S>(&self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // key -> forms in first-seen order with their counts
        let mut buckets: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        let mut bucket_order: Vec<String> = Vec::new();

        for label in labels {
            let lower = label.as_ref().trim().to_lowercase();
            if lower.is_empty() {
                continue;
            }

            let key = Self::singular_key(&lower).to_string();
            let forms = buckets.entry(key.clone()).or_insert_with(|| {
                bucket_order.push(key);
                Vec::new()
            });

            match forms.iter_mut().find(|(form, _)| *form == lower) {
                Some((_, count)) => *count += 1,
                None => forms.push((lower, 1)),
            }
        }

        let mut representatives: Vec<String> = bucket_order
            .iter()
            .filter_map(|key| buckets.get(key))
            .filter_map(|forms| Self::most_common(forms))
            .collect();

        representatives.sort_by_key(|label| label.to_lowercase());
        representatives
    }

    fn most_common(forms: &[(String, usize)]) -> Option<String> {
        let mut best: Option<&(String, usize)> = None;
        for candidate in forms {
            // strict ">" keeps the first-encountered form on ties
            if best.map_or(true, |(_, count)| candidate.1 > *count) {
                best = Some(candidate);
            }
        }
        best.map(|(form, _)| form.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_majority_form_wins() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(["Password", "passwords", "PASSWORD"]);
        assert_eq!(result, vec!["password".to_string()]);
    }

    #[test]
    fn test_plural_majority() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(["Passwords", "password", "passwords"]);
        assert_eq!(result, vec!["passwords".to_string()]);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let normalizer = CategoryNormalizer::new();
        assert_eq!(
            normalizer.normalize(["Usernames", "username"]),
            vec!["usernames".to_string()]
        );
        assert_eq!(
            normalizer.normalize(["username", "Usernames"]),
            vec!["username".to_string()]
        );
    }

    #[test]
    fn test_irregular_plural_not_folded() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(["Address", "Addresses"]);
        assert_eq!(result, vec!["address".to_string(), "addresses".to_string()]);
    }

    #[test]
    fn test_single_form_kept() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(["IP addresses"]);
        assert_eq!(result, vec!["ip addresses".to_string()]);
    }

    #[test]
    fn test_output_sorted_and_blank_ignored() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(["Phone", "", "email", "  ", "Dates of birth"]);
        assert_eq!(result, vec!["dates of birth", "email", "phone"]);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = CategoryNormalizer::new();
        let result = normalizer.normalize(Vec::<String>::new());
        assert!(result.is_empty());
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(labels in prop::collection::vec("[A-Za-z ]{0,8}s?", 0..12)) {
            let normalizer = CategoryNormalizer::new();
            let once = normalizer.normalize(&labels);
            let twice = normalizer.normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_has_one_label_per_key(labels in prop::collection::vec("[a-cA-C]{1,3}s?", 0..12)) {
            let normalizer = CategoryNormalizer::new();
            let result = normalizer.normalize(&labels);
            let mut keys: Vec<&str> = result.iter().map(|l| CategoryNormalizer::singular_key(l)).collect();
            keys.sort();
            let before = keys.len();
            keys.dedup();
            prop_assert_eq!(before, keys.len());
        }
    }
}
