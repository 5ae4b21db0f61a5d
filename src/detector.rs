//! Change detection against the last observed snapshot.

use crate::domain::{CheckResult, Snapshot};

/// Holds the comparison baseline and decides whether new content is a change.
///
/// Equality is exact over the whole document. Any byte difference, including
/// whitespace or rotating tokens embedded in the page, counts as a change.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    snapshot: Option<Snapshot>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `content` with the snapshot, then make it the new snapshot.
    pub fn evaluate(&mut self, content: String) -> CheckResult {
        let result = match &self.snapshot {
            None => CheckResult::FirstSnapshot,
            Some(previous) if previous.content() == content => CheckResult::Unchanged,
            Some(_) => CheckResult::Changed {
                content: content.clone(),
            },
        };

        self.snapshot = Some(Snapshot::new(content));
        result
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_evaluation_is_first_snapshot() {
        let mut detector = ChangeDetector::new();
        assert!(detector.snapshot().is_none());

        let result = detector.evaluate("<html>v1</html>".into());

        assert_eq!(result, CheckResult::FirstSnapshot);
        assert_eq!(detector.snapshot().unwrap().content(), "<html>v1</html>");
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let mut detector = ChangeDetector::new();
        detector.evaluate("<html>v1</html>".into());

        let result = detector.evaluate("<html>v1</html>".into());

        assert_eq!(result, CheckResult::Unchanged);
        assert_eq!(detector.snapshot().unwrap().content(), "<html>v1</html>");
    }

    #[test]
    fn test_different_content_is_changed() {
        let mut detector = ChangeDetector::new();
        detector.evaluate("<html>v1</html>".into());

        let result = detector.evaluate("<html>v2</html>".into());

        assert_eq!(
            result,
            CheckResult::Changed {
                content: "<html>v2</html>".into()
            }
        );
        assert_eq!(detector.snapshot().unwrap().content(), "<html>v2</html>");
    }

    #[test]
    fn test_repeated_content_never_changes_again() {
        let mut detector = ChangeDetector::new();
        detector.evaluate("a".into());
        assert!(detector.evaluate("b".into()).is_change());

        for _ in 0..5 {
            assert_eq!(detector.evaluate("b".into()), CheckResult::Unchanged);
        }
    }

    #[test]
    fn test_whitespace_counts_as_change() {
        let mut detector = ChangeDetector::new();
        detector.evaluate("<html>v1</html>".into());

        assert!(detector.evaluate("<html>v1</html> ".into()).is_change());
    }

    #[test]
    fn test_empty_page_is_a_real_snapshot() {
        let mut detector = ChangeDetector::new();
        assert_eq!(detector.evaluate(String::new()), CheckResult::FirstSnapshot);
        assert_eq!(detector.evaluate(String::new()), CheckResult::Unchanged);
        assert!(detector.evaluate("x".into()).is_change());
    }

    #[test]
    fn test_baseline_follows_every_evaluation() {
        let mut detector = ChangeDetector::new();
        let pages = ["a", "b", "b", "a", "c"];
        let expected = ["first-snapshot", "changed", "unchanged", "changed", "changed"];

        for (page, label) in pages.iter().zip(expected) {
            assert_eq!(detector.evaluate(page.to_string()).label(), label);
            assert_eq!(detector.snapshot().unwrap().content(), *page);
        }
    }
}
