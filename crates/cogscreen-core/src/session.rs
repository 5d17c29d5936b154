//! Session state machine for a single test attempt.
//!
//! Drives `NotStarted → InProgress → Completed`: tracks the current question
//! index, collects answers in submission order, and enforces per-question
//! time limits. The clock is passed in explicitly so the logic stays pure;
//! the presentation layer owns any real timer.

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::model::{Answer, Question, TestDefinition};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

/// One in-progress test attempt.
///
/// Ephemeral: never persisted. Only the scored outcome of a completed
/// session becomes a stored result; abandoning a session has no side effect.
#[derive(Debug, Clone)]
pub struct Session {
    test: TestDefinition,
    user_id: String,
    state: SessionState,
    index: usize,
    answers: Vec<(String, Answer)>,
    started_at: DateTime<Utc>,
    question_entered_at: DateTime<Utc>,
}

/// Immutable snapshot of a finished attempt, handed to the scoring engine.
#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub test: TestDefinition,
    pub user_id: String,
    /// Answers keyed by question id, in submission order.
    pub answers: Vec<(String, Answer)>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl Session {
    /// Begin an attempt at the given test.
    pub fn start(
        catalog: &Catalog,
        test_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        let test = catalog
            .get_test(test_id)
            .ok_or_else(|| EngineError::TestNotFound(test_id.to_string()))?
            .clone();

        if test.questions.is_empty() {
            return Err(EngineError::SessionState(format!(
                "test '{test_id}' has no questions"
            )));
        }

        Ok(Self {
            test,
            user_id: user_id.to_string(),
            state: SessionState::InProgress,
            index: 0,
            answers: Vec::new(),
            started_at: now,
            question_entered_at: now,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn test(&self) -> &TestDefinition {
        &self.test
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// (current index, total questions) for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.test.questions.len())
    }

    /// The question currently presented, `None` once completed.
    pub fn current_question(&self) -> Option<&Question> {
        if self.state == SessionState::Completed {
            return None;
        }
        self.test.questions.get(self.index)
    }

    /// Answers collected so far, in submission order.
    pub fn answers(&self) -> &[(String, Answer)] {
        &self.answers
    }

    /// Seconds left on the current question's countdown, if it has one.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<u32> {
        let question = self.current_question()?;
        let limit = question.time_limit_secs?;
        let elapsed = (now - self.question_entered_at).num_seconds().max(0) as u32;
        Some(limit.saturating_sub(elapsed))
    }

    /// Record an answer for the current question.
    ///
    /// Invalid answers are rejected without advancing state. A valid answer
    /// for the last question completes the session. Re-submitting a question
    /// replaces the earlier answer but keeps its original submission slot.
    pub fn submit_answer(&mut self, answer: Answer, now: DateTime<Utc>) -> Result<(), EngineError> {
        if self.state != SessionState::InProgress {
            return Err(EngineError::SessionState(
                "cannot submit an answer outside an in-progress session".into(),
            ));
        }
        let question = &self.test.questions[self.index];

        if !answer.is_present_for(question.kind) {
            return Err(EngineError::InvalidAnswer {
                question_id: question.id.clone(),
                reason: format!("empty or mismatched answer for a {} question", question.kind),
            });
        }

        let question_id = question.id.clone();
        match self.answers.iter_mut().find(|(id, _)| *id == question_id) {
            Some(slot) => slot.1 = answer,
            None => self.answers.push((question_id, answer)),
        }

        if self.index + 1 == self.test.questions.len() {
            self.state = SessionState::Completed;
        } else {
            self.advance(now);
        }
        Ok(())
    }

    /// Move to the next question; at the last index this completes the
    /// session with whatever answer (possibly none) was staged.
    pub fn next(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        if self.state != SessionState::InProgress {
            return Err(EngineError::SessionState(
                "cannot advance a session that is not in progress".into(),
            ));
        }
        if self.index + 1 == self.test.questions.len() {
            self.state = SessionState::Completed;
        } else {
            self.advance(now);
        }
        Ok(())
    }

    /// Move back one question. Disallowed at index 0.
    pub fn previous(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        if self.state != SessionState::InProgress {
            return Err(EngineError::SessionState(
                "cannot move back in a session that is not in progress".into(),
            ));
        }
        if self.index == 0 {
            return Err(EngineError::SessionState(
                "already at the first question".into(),
            ));
        }
        self.index -= 1;
        self.question_entered_at = now;
        Ok(())
    }

    /// Auto-advance when the current question's countdown has expired.
    ///
    /// Returns `true` if the session advanced (or completed). Questions
    /// without a limit never expire.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<bool, EngineError> {
        if self.state != SessionState::InProgress {
            return Ok(false);
        }
        match self.time_remaining(now) {
            Some(0) => {
                self.next(now)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Consume the session into a snapshot for scoring.
    pub fn finish(self, now: DateTime<Utc>) -> Result<CompletedSession, EngineError> {
        if self.state != SessionState::Completed {
            return Err(EngineError::SessionState(
                "session has not reached the last question".into(),
            ));
        }
        Ok(CompletedSession {
            test: self.test,
            user_id: self.user_id,
            answers: self.answers,
            started_at: self.started_at,
            completed_at: now,
        })
    }

    fn advance(&mut self, now: DateTime<Utc>) {
        self.index += 1;
        self.question_entered_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-06-01T10:00:00Z".parse().unwrap()
    }

    fn text(s: &str) -> Answer {
        Answer::Text { value: s.into() }
    }

    fn start(test_id: &str) -> Session {
        Session::start(&Catalog::builtin(), test_id, "user-1", now()).unwrap()
    }

    #[test]
    fn unknown_test_id() {
        let err = Session::start(&Catalog::builtin(), "nope", "user-1", now()).unwrap_err();
        assert!(matches!(err, EngineError::TestNotFound(_)));
    }

    #[test]
    fn starts_at_first_question() {
        let session = start("mmse");
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.progress(), (0, 11));
        assert_eq!(session.current_question().unwrap().id, "orientation-time");
    }

    #[test]
    fn invalid_answer_does_not_advance() {
        let mut session = start("mmse");
        let err = session.submit_answer(text("   "), now()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAnswer { .. }));
        assert_eq!(session.progress().0, 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn valid_answer_advances_and_records() {
        let mut session = start("mmse");
        session.submit_answer(text("spring 2025"), now()).unwrap();
        assert_eq!(session.progress().0, 1);
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers()[0].0, "orientation-time");
    }

    #[test]
    fn previous_disallowed_at_start() {
        let mut session = start("mmse");
        assert!(session.previous(now()).is_err());

        session.submit_answer(text("spring"), now()).unwrap();
        session.previous(now()).unwrap();
        assert_eq!(session.progress().0, 0);
    }

    #[test]
    fn resubmission_replaces_but_keeps_order() {
        let mut session = start("mmse");
        session.submit_answer(text("first"), now()).unwrap();
        session.submit_answer(text("place"), now()).unwrap();
        session.previous(now()).unwrap();
        session.previous(now()).unwrap();
        session.submit_answer(text("revised"), now()).unwrap();

        assert_eq!(session.answers()[0].0, "orientation-time");
        assert_eq!(session.answers()[0].1, text("revised"));
        assert_eq!(session.answers()[1].0, "orientation-place");
    }

    #[test]
    fn skipping_through_completes() {
        let mut session = start("clock-drawing");
        session.next(now()).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        session.next(now()).unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.current_question().is_none());
        assert!(session.next(now()).is_err());
    }

    #[test]
    fn submitting_last_question_completes() {
        let mut session = start("clock-drawing");
        session
            .submit_answer(
                Answer::Drawing {
                    points: vec![(0.0, 0.0)],
                    description: String::new(),
                },
                now(),
            )
            .unwrap();
        session
            .submit_answer(Answer::Selection { value: "11:10".into() }, now())
            .unwrap();
        assert_eq!(session.state(), SessionState::Completed);

        let completed = session.finish(now()).unwrap();
        assert_eq!(completed.answers.len(), 2);
        assert_eq!(completed.user_id, "user-1");
    }

    #[test]
    fn countdown_and_auto_advance() {
        // verbal-fluency questions all carry a 60s limit
        let mut session = start("verbal-fluency");
        assert_eq!(session.time_remaining(now()), Some(60));

        let later = now() + Duration::seconds(45);
        assert_eq!(session.time_remaining(later), Some(15));
        assert!(!session.tick(later).unwrap());

        let expired = now() + Duration::seconds(60);
        assert_eq!(session.time_remaining(expired), Some(0));
        assert!(session.tick(expired).unwrap());
        assert_eq!(session.progress().0, 1);
        // countdown restarts on entry to the next question
        assert_eq!(session.time_remaining(expired), Some(60));
    }

    #[test]
    fn expiry_on_last_question_completes() {
        let mut session = start("verbal-fluency");
        let t1 = now() + Duration::seconds(61);
        assert!(session.tick(t1).unwrap());
        let t2 = t1 + Duration::seconds(61);
        assert!(session.tick(t2).unwrap());
        let t3 = t2 + Duration::seconds(61);
        assert!(session.tick(t3).unwrap());
        assert_eq!(session.state(), SessionState::Completed);
        // expired-through session has no answers staged
        assert!(session.answers().is_empty());
    }

    #[test]
    fn untimed_question_never_expires() {
        let mut session = start("mmse");
        assert_eq!(session.time_remaining(now()), None);
        let far = now() + Duration::days(1);
        assert!(!session.tick(far).unwrap());
    }

    #[test]
    fn finish_requires_completion() {
        let session = start("mmse");
        assert!(session.finish(now()).is_err());
    }
}
