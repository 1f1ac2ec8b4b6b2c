//! Edit distance between strings.

/// Levenshtein distance counted in Unicode scalar values, so `"Latté"` is
/// one edit away from `"Latte"` rather than two bytes away.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows: previous and current.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("Latte", "Latte"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn accented_character_is_one_edit() {
        assert_eq!(levenshtein("latté", "latte"), 1);
    }

    #[test]
    fn known_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "mocha"), 5);
        assert_eq!(levenshtein("matcha", ""), 6);
        assert_eq!(levenshtein("strawberry matcha", "strawberry matcha latte"), 6);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn distance_is_zero_exactly_on_equal_strings(a in "[a-z ]{0,10}", b in "[a-z ]{0,10}") {
            prop_assert_eq!(levenshtein(&a, &b) == 0, a == b);
        }

        #[test]
        fn distance_satisfies_triangle_inequality(
            a in "[a-e]{0,8}",
            b in "[a-e]{0,8}",
            c in "[a-e]{0,8}",
        ) {
            prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
        }

        #[test]
        fn distance_is_bounded_by_lengths(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let (la, lb) = (a.chars().count(), b.chars().count());
            let d = levenshtein(&a, &b);
            prop_assert!(d <= la.max(lb));
            prop_assert!(d >= la.abs_diff(lb));
        }
    }
}
