use crate::domain::CheckResult;

pub const CHANGE_SUBJECT: &str = "Website Update Detected!";

/// A message for the notifier. Only ever built from a `Changed` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl NotificationRequest {
    /// Build the change notice for `url`, or `None` if `result` is not a change.
    pub fn for_result(result: &CheckResult, recipient: &str, url: &str) -> Option<Self> {
        if !result.is_change() {
            return None;
        }

        Some(Self {
            recipient: recipient.to_string(),
            subject: CHANGE_SUBJECT.to_string(),
            body: format!("A change was detected at:\n{}", url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/offers";

    #[test]
    fn test_built_for_change() {
        let result = CheckResult::Changed {
            content: "<html>v2</html>".into(),
        };
        let request = NotificationRequest::for_result(&result, "me@example.com", URL).unwrap();

        assert_eq!(request.recipient, "me@example.com");
        assert_eq!(request.subject, CHANGE_SUBJECT);
        assert_eq!(request.body, "A change was detected at:\nhttps://example.com/offers");
    }

    #[test]
    fn test_not_built_otherwise() {
        for result in [
            CheckResult::FirstSnapshot,
            CheckResult::Unchanged,
            CheckResult::FetchFailed {
                cause: "timeout".into(),
            },
        ] {
            assert!(NotificationRequest::for_result(&result, "me@example.com", URL).is_none());
        }
    }
}
