//! Beginner-friendly issue classification.

/// Label names that mark an issue as approachable for first-time
/// contributors. Matching is exact against the lower-cased label, not
/// substring.
pub const BEGINNER_LABELS: [&str; 12] = [
    "good first issue",
    "good-first-issue",
    "beginner",
    "beginner friendly",
    "beginner-friendly",
    "easy",
    "help wanted",
    "help-wanted",
    "contributions welcome",
    "first-timers-only",
    "starter",
    "starter bug",
];

/// Check whether any label marks the issue as beginner-friendly.
///
/// Returns false for an empty label set.
pub fn is_beginner_friendly<'a, I>(labels: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    labels.into_iter().any(|label| {
        let label = label.to_lowercase();
        BEGINNER_LABELS.contains(&label.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_every_recognized_keyword() {
        for keyword in BEGINNER_LABELS {
            assert!(
                is_beginner_friendly([keyword]),
                "keyword {keyword:?} should match"
            );
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_beginner_friendly(["Good First Issue"]));
        assert!(is_beginner_friendly(["HELP WANTED"]));
        assert!(is_beginner_friendly(["First-Timers-Only"]));
    }

    #[test]
    fn matching_is_exact_not_substring() {
        assert!(!is_beginner_friendly(["good first issue backlog"]));
        assert!(!is_beginner_friendly(["easyish"]));
    }

    #[test]
    fn unrecognized_labels_do_not_match() {
        assert!(!is_beginner_friendly(["documentation"]));
        assert!(!is_beginner_friendly(["bug", "wontfix", "p1"]));
    }

    #[test]
    fn empty_label_set_does_not_match() {
        assert!(!is_beginner_friendly(std::iter::empty::<&str>()));
    }

    #[test]
    fn one_match_among_many_is_enough() {
        assert!(is_beginner_friendly(["bug", "help wanted", "area: parser"]));
    }
}
