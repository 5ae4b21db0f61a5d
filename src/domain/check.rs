/// Outcome of one check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// No snapshot existed before this fetch.
    FirstSnapshot,
    /// Fetched content equals the snapshot.
    Unchanged,
    /// Fetched content differs from the snapshot.
    Changed { content: String },
    /// The page could not be retrieved; the snapshot was not touched.
    FetchFailed { cause: String },
}

impl CheckResult {
    pub fn label(&self) -> &'static str {
        match self {
            CheckResult::FirstSnapshot => "first-snapshot",
            CheckResult::Unchanged => "unchanged",
            CheckResult::Changed { .. } => "changed",
            CheckResult::FetchFailed { .. } => "fetch-failed",
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, CheckResult::Changed { .. })
    }
}

/// What a finished cycle reports back to whoever asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub result: CheckResult,
    pub notified: bool,
}
