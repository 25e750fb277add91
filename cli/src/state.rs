/// Request state for one client feature (search, chat, or the auxiliary
/// OpenAI search). Every feature moves through the same loop:
/// `Idle → Loading → {Success | Error} → Idle`, and the settled outcome
/// stays visible until the next submission replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Error(String),
}

#[derive(Debug, Default)]
pub struct Feature<T> {
    phase: Phase,
    outcome: Option<Outcome<T>>,
}

impl<T> Feature<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            outcome: None,
        }
    }

    /// Accepts a submission, trimming the input first. Blank input, or a
    /// submission while a request is already in flight, is a no-op that
    /// returns `None` — the caller must not issue a network call.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() || self.phase == Phase::Loading {
            return None;
        }

        self.phase = Phase::Loading;
        self.outcome = None;

        Some(input.to_string())
    }

    pub fn succeed(&mut self, value: T) {
        self.phase = Phase::Idle;
        self.outcome = Some(Outcome::Success(value));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Idle;
        self.outcome = Some(Outcome::Error(message.into()));
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome<T>> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_ignored() {
        let mut feature = Feature::<()>::new();

        assert_eq!(feature.submit(""), None);
        assert_eq!(feature.submit("   \t"), None);
        assert!(!feature.is_loading());
        assert_eq!(feature.outcome(), None);
    }

    #[test]
    fn input_is_trimmed_on_submission() {
        let mut feature = Feature::<()>::new();

        assert_eq!(feature.submit("  hello "), Some("hello".to_string()));
        assert!(feature.is_loading());
    }

    #[test]
    fn submissions_while_loading_are_ignored() {
        let mut feature = Feature::<()>::new();

        assert!(feature.submit("first").is_some());
        assert_eq!(feature.submit("second"), None);
    }

    #[test]
    fn a_new_submission_clears_the_previous_outcome() {
        let mut feature = Feature::new();

        feature.submit("first").unwrap();
        feature.fail("Failed to process query");
        assert_eq!(
            feature.outcome(),
            Some(&Outcome::Error("Failed to process query".to_string()))
        );

        feature.submit("second").unwrap();
        assert_eq!(feature.outcome(), None);

        feature.succeed("done");
        assert!(!feature.is_loading());
        assert_eq!(feature.outcome(), Some(&Outcome::Success("done")));
    }
}
