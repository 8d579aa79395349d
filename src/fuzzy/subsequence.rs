// File: src/fuzzy/subsequence.rs

/// True when every character of `query` appears in `haystack` in the same
/// relative order, not necessarily contiguous. An empty query is a
/// subsequence of anything.
///
/// Two pointers: the haystack pointer advances on every step, the query
/// pointer only on a match. O(|haystack| + |query|).
pub fn is_subsequence(haystack: &str, query: &str) -> bool {
    let mut wanted = query.chars().peekable();
    for c in haystack.chars() {
        match wanted.peek() {
            Some(&q) if q == c => {
                wanted.next();
            }
            Some(_) => {}
            None => return true,
        }
    }
    wanted.peek().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_scattered_characters_in_order() {
        assert!(is_subsequence("zsls", "zl"));
        assert!(is_subsequence("zsls", "ss"));
        assert!(is_subsequence("abc", "abc"));
        assert!(is_subsequence("abc", ""));
        assert!(is_subsequence("", ""));
    }

    #[test]
    fn rejects_wrong_order_or_missing_characters() {
        assert!(!is_subsequence("zsls", "lz"));
        assert!(!is_subsequence("zsls", "q"));
        assert!(!is_subsequence("ab", "abb"));
        assert!(!is_subsequence("", "a"));
    }

    proptest! {
        #[test]
        fn any_kept_selection_is_a_subsequence(
            haystack in "[a-z]{0,12}",
            mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let query: String = haystack
                .chars()
                .zip(mask.iter())
                .filter(|(_, keep)| **keep)
                .map(|(c, _)| c)
                .collect();
            prop_assert!(is_subsequence(&haystack, &query));
        }

        #[test]
        fn query_with_absent_character_never_matches(
            haystack in "[a-m]{0,12}",
            prefix in "[a-m]{0,3}",
            absent in "[n-z]",
        ) {
            let query = format!("{prefix}{absent}");
            prop_assert!(!is_subsequence(&haystack, &query));
        }

        #[test]
        fn agrees_with_greedy_search(haystack in "[abc]{0,10}", query in "[abc]{0,4}") {
            let mut rest = haystack.as_str();
            let mut expected = true;
            for q in query.chars() {
                match rest.find(q) {
                    Some(pos) => rest = &rest[pos + q.len_utf8()..],
                    None => {
                        expected = false;
                        break;
                    }
                }
            }
            prop_assert_eq!(is_subsequence(&haystack, &query), expected);
        }
    }
}
