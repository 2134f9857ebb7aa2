//! Tracks metadata for a conversion session.

use crate::log;

/// Metadata for a conversion session.
///
/// A session is created once per program invocation and passed down to the
/// [`Converter`](crate::Converter), so that nothing below it has to look at
/// process-wide state to decide whether to log.
#[derive(Clone, Debug)]
pub struct Session {
    log_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            log_enabled: log::log_enabled(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that never logs, regardless of the environment.
    pub fn new_for_test_suite() -> Self {
        Self { log_enabled: false }
    }

    pub fn log_enabled(&self) -> bool {
        self.log_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_session_is_quiet() {
        assert!(!Session::new_for_test_suite().log_enabled());
    }
}
