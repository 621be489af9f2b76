use std::time::Duration;

/// Outcome of applying the embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the migration run.
    pub duration: Duration,
    /// Versions applied by this run, in order.
    pub applied_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a new migration result.
    pub fn new(duration: Duration, applied_versions: Vec<String>) -> Self {
        Self {
            duration,
            applied_versions,
        }
    }

    /// Returns whether the schema was already up to date.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.applied_versions.is_empty()
    }

    /// Returns the last applied migration version, if any.
    pub fn last_applied_version(&self) -> Option<&str> {
        self.applied_versions.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_no_op() {
        let result = MigrationResult::new(Duration::from_millis(5), vec![]);
        assert!(result.is_no_op());
        assert_eq!(result.last_applied_version(), None);
    }

    #[test]
    fn last_applied_version_is_the_newest() {
        let result = MigrationResult::new(
            Duration::from_millis(5),
            vec!["20240301000000".into(), "20240402000000".into()],
        );
        assert!(!result.is_no_op());
        assert_eq!(result.last_applied_version(), Some("20240402000000"));
    }
}
