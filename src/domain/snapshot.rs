use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Content captured by the most recent successful fetch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    content: String,
    digest: String,
    recorded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(content: String) -> Self {
        let digest = Self::digest_of(&content);
        Self {
            content,
            digest,
            recorded_at: Utc::now(),
        }
    }

    /// Hex SHA-256 of `content`. Used for logging only.
    pub fn digest_of(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = Snapshot::new("<html>v1</html>".into());
        let b = Snapshot::new("<html>v1</html>".into());
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let snapshot = Snapshot::new("<html>v1</html>".into());
        assert_eq!(snapshot.digest().len(), 64);
        assert!(snapshot.digest().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_differs_for_whitespace() {
        assert_ne!(
            Snapshot::digest_of("<html>v1</html>"),
            Snapshot::digest_of("<html>v1</html>\n")
        );
    }

    #[test]
    fn test_recorded_at_is_capture_time() {
        let before = Utc::now();
        let snapshot = Snapshot::new("<html>v1</html>".into());
        let after = Utc::now();
        assert!(before <= snapshot.recorded_at() && snapshot.recorded_at() <= after);
    }
}
