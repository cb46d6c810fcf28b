//! Conversion from GitHub wire types to the normalized issue model.

use crate::classify::is_beginner_friendly;
use crate::model::NormalizedIssue;

use super::types::RawIssue;

/// Maximum number of characters kept from the issue body.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Normalize one raw API item.
///
/// Pull-request filtering happens before this call; `normalize_issue`
/// assumes it is handed a plain issue.
pub fn normalize_issue(raw: &RawIssue) -> NormalizedIssue {
    let label_names: Vec<&str> = raw.labels.iter().map(|l| l.name.as_str()).collect();

    NormalizedIssue {
        number: raw.number,
        url: raw.html_url.clone(),
        title: raw.title.clone(),
        state: raw.state.clone(),
        labels: label_names.join(","),
        is_assigned: !raw.assignees.is_empty(),
        assignee_login: raw.assignees.first().map(|a| a.login.clone()),
        comments_count: raw.comments,
        created_at: raw.created_at,
        body_preview: truncate_chars(raw.body.as_deref().unwrap_or(""), BODY_PREVIEW_CHARS),
        is_beginner_friendly: is_beginner_friendly(label_names.iter().copied()),
    }
}

/// Truncate to at most `max` characters. Uses chars rather than bytes so
/// multi-byte UTF-8 never splits.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::{RawLabel, RawUser};
    use chrono::Utc;

    fn raw_issue(number: i64) -> RawIssue {
        RawIssue {
            number,
            html_url: format!("https://github.com/octo/repo/issues/{number}"),
            title: "Example".to_string(),
            state: "open".to_string(),
            labels: vec![
                RawLabel {
                    name: "bug".to_string(),
                },
                RawLabel {
                    name: "Help Wanted".to_string(),
                },
            ],
            assignees: vec![RawUser {
                login: "octocat".to_string(),
            }],
            comments: 5,
            created_at: Utc::now(),
            body: Some("A body".to_string()),
            pull_request: None,
        }
    }

    #[test]
    fn normalizes_labels_and_assignment() {
        let issue = normalize_issue(&raw_issue(42));

        assert_eq!(issue.number, 42);
        assert_eq!(issue.labels, "bug,Help Wanted");
        assert!(issue.is_assigned);
        assert_eq!(issue.assignee_login.as_deref(), Some("octocat"));
        assert_eq!(issue.comments_count, 5);
        assert!(issue.is_beginner_friendly);
    }

    #[test]
    fn unassigned_issue_has_no_assignee_login() {
        let mut raw = raw_issue(1);
        raw.assignees.clear();

        let issue = normalize_issue(&raw);
        assert!(!issue.is_assigned);
        assert!(issue.assignee_login.is_none());
    }

    #[test]
    fn absent_body_becomes_empty_preview() {
        let mut raw = raw_issue(1);
        raw.body = None;

        let issue = normalize_issue(&raw);
        assert_eq!(issue.body_preview, "");
    }

    #[test]
    fn long_body_is_truncated_to_preview_length() {
        let mut raw = raw_issue(1);
        raw.body = Some("x".repeat(500));

        let issue = normalize_issue(&raw);
        assert_eq!(issue.body_preview.chars().count(), BODY_PREVIEW_CHARS);
    }

    #[test]
    fn truncation_never_splits_multi_byte_characters() {
        let mut raw = raw_issue(1);
        raw.body = Some("é".repeat(300));

        let issue = normalize_issue(&raw);
        assert_eq!(issue.body_preview.chars().count(), BODY_PREVIEW_CHARS);
        assert!(issue.body_preview.chars().all(|c| c == 'é'));
    }

    #[test]
    fn classification_ignores_label_case() {
        let mut raw = raw_issue(1);
        raw.labels = vec![RawLabel {
            name: "GOOD FIRST ISSUE".to_string(),
        }];

        let issue = normalize_issue(&raw);
        assert!(issue.is_beginner_friendly);
    }

    #[test]
    fn classification_is_informational_only() {
        let mut raw = raw_issue(1);
        raw.labels = vec![RawLabel {
            name: "documentation".to_string(),
        }];

        let issue = normalize_issue(&raw);
        assert!(!issue.is_beginner_friendly);
        // The labels string itself still carries the raw names.
        assert_eq!(issue.labels, "documentation");
    }
}
