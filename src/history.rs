use std::borrow::Cow;

/// Ordered, append-only log of the lines a session executed.
///
/// Lives only as long as the session; nothing is written to disk.
#[derive(Debug, Default, Clone)]
pub struct CommandLog {
    entries: Vec<Cow<'static, str>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trimmed line unless it is empty or invokes `history` itself.
    ///
    /// Returns whether the line was recorded.
    pub fn record(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || Self::is_history_invocation(line) {
            return false;
        }

        self.entries.push(Cow::Owned(line.to_owned()));
        true
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_history_invocation(line: &str) -> bool {
        line.split_whitespace().next() == Some("history")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut log = CommandLog::new();
        assert!(log.record("pwd"));
        assert!(log.record("  ls  "));
        assert_eq!(log.entries().collect::<Vec<_>>(), vec!["pwd", "ls"]);
    }

    #[test]
    fn test_record_skips_history_and_blank() {
        let mut log = CommandLog::new();
        assert!(!log.record("history"));
        assert!(!log.record("history extra"));
        assert!(!log.record("   "));
        assert!(log.is_empty());
    }

    #[test]
    fn test_history_match_is_case_sensitive_per_token() {
        let mut log = CommandLog::new();
        assert!(log.record("HISTORY"));
        assert!(log.record("historyx"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut log = CommandLog::new();
        log.record("ls");
        log.record("ls");
        assert_eq!(log.len(), 2);
    }
}
