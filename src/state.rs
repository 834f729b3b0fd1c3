//! Application state: the in-memory session store and per-session drill state.
//!
//! This module owns:
//!   - the session map (uuid → Session)
//!   - the generator ranges and submission link (from TOML or defaults)
//!   - the gating rules that lock each step until the prior one validates
//!
//! A `Session` holds exactly one (Problem, StepAnswers, StepValidation,
//! solved) tuple. Regeneration replaces the whole tuple as one unit, which is
//! what guarantees the atomic-reset invariant: no stale check result can ever
//! survive into a new round.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::{load_trainer_config_from_env, GeneratorRanges, TrainerConfig};
use crate::domain::{Problem, StepAnswers, StepField, StepValidation};
use crate::engine;

/// One learner's round: problem plus everything they have typed and checked.
#[derive(Clone, Debug)]
pub struct Session {
    pub problem: Problem,
    pub answers: StepAnswers,
    pub validation: StepValidation,
    pub solved: bool,
}

impl Session {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            answers: StepAnswers::default(),
            validation: StepValidation::default(),
            solved: false,
        }
    }

    /// Step 1 is open until it validates true (then locked for the round).
    pub fn can_check_step1(&self) -> bool {
        self.validation.step1_factor != Some(true) && !self.solved
    }

    /// Step 2 opens once step 1 is correct, locks once itself correct.
    pub fn can_check_step2(&self) -> bool {
        self.validation.step1_factor == Some(true)
            && self.validation.step2_complete != Some(true)
            && !self.solved
    }

    /// Step 3 opens once step 2 is correct and stays open until solved.
    pub fn can_check_step3(&self) -> bool {
        self.validation.step2_complete == Some(true) && !self.solved
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub ranges: GeneratorRanges,
    pub submission_url: String,
}

impl AppState {
    /// Build state from env: load TOML config if present, validate ranges.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_trainer_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: TrainerConfig) -> Self {
        let ranges = if cfg.ranges.is_well_posed() {
            cfg.ranges
        } else {
            error!(target: "vertex_trainer", ranges = ?cfg.ranges, "Configured ranges are not well-posed; using defaults");
            GeneratorRanges::default()
        };
        info!(
            target: "vertex_trainer",
            a = %format!("[{}, {}]", ranges.a_min, ranges.a_max),
            p = %format!("[{}, {}]", ranges.p_min, ranges.p_max),
            q = %format!("[{}, {}]", ranges.q_min, ranges.q_max),
            "Generator ranges"
        );
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ranges,
            submission_url: cfg.submission_url,
        }
    }

    /// Start a round: generate a fresh problem and replace the session's whole
    /// tuple. An unknown or absent id creates a new session under a new uuid.
    #[instrument(level = "info", skip(self))]
    pub async fn new_problem(&self, session_id: Option<String>) -> (String, Session) {
        let problem = engine::generate(&self.ranges, &mut rand::thread_rng());
        let session = Session::new(problem);

        let mut sessions = self.sessions.write().await;
        let id = match session_id {
            Some(id) if sessions.contains_key(&id) => id,
            _ => Uuid::new_v4().to_string(),
        };
        sessions.insert(id.clone(), session.clone());
        info!(
            target: "problem",
            %id,
            a = problem.general.a,
            b = problem.general.b,
            c = problem.general.c,
            live_sessions = sessions.len(),
            "New problem generated"
        );
        (id, session)
    }

    /// Read-only snapshot of a session.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Record learner input for one blank. Validation state is untouched:
    /// checks are explicit actions, never inferred from edits.
    #[instrument(level = "debug", skip(self, value), fields(%id, ?field, value_len = value.len()))]
    pub async fn set_answer(&self, id: &str, field: StepField, value: String) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        session.answers.set(field, value);
        Some(session.clone())
    }

    /// Run one gated mutation against a session, returning its snapshot after
    /// the closure (or None for unknown ids).
    pub async fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Option<(T, Session)> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        let out = f(session);
        Some((out, session.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneralForm, StandardForm};

    fn fixed_problem() -> Problem {
        // y = 2x² − 12x + 14 → y = 2(x − 3)² − 4
        Problem {
            general: GeneralForm { a: 2, b: -12, c: 14 },
            standard: StandardForm { a: 2, p: 3, q: -4 },
        }
    }

    #[test]
    fn gating_follows_validation_order() {
        let mut s = Session::new(fixed_problem());
        assert!(s.can_check_step1());
        assert!(!s.can_check_step2());
        assert!(!s.can_check_step3());

        // Wrong step-1 check keeps the step open.
        s.validation.step1_factor = Some(false);
        assert!(s.can_check_step1());
        assert!(!s.can_check_step2());

        s.validation.step1_factor = Some(true);
        assert!(!s.can_check_step1(), "correct step locks");
        assert!(s.can_check_step2());

        s.validation.step2_complete = Some(true);
        assert!(!s.can_check_step2());
        assert!(s.can_check_step3());

        s.solved = true;
        assert!(!s.can_check_step1() && !s.can_check_step2() && !s.can_check_step3());
    }

    #[tokio::test]
    async fn regeneration_replaces_the_whole_tuple() {
        let state = AppState::from_config(TrainerConfig::default());
        let (id, _) = state.new_problem(None).await;

        let _ = state
            .with_session(&id, |s| {
                s.answers.step1_factor = "6".into();
                s.validation.step1_factor = Some(true);
                s.validation.step3_q = Some(false);
                s.solved = true;
            })
            .await
            .unwrap();

        let (id2, fresh) = state.new_problem(Some(id.clone())).await;
        assert_eq!(id2, id, "known id is kept across rounds");
        assert_eq!(fresh.validation, StepValidation::default());
        assert!(fresh.answers.step1_factor.is_empty());
        assert!(!fresh.solved);
    }

    #[tokio::test]
    async fn unknown_id_gets_a_new_session() {
        let state = AppState::from_config(TrainerConfig::default());
        let (id, _) = state.new_problem(Some("no-such-session".into())).await;
        assert_ne!(id, "no-such-session");
        assert!(state.get_session(&id).await.is_some());
        assert!(state.get_session("no-such-session").await.is_none());
    }

    #[tokio::test]
    async fn edits_do_not_touch_validation() {
        let state = AppState::from_config(TrainerConfig::default());
        let (id, _) = state.new_problem(None).await;
        let _ = state
            .with_session(&id, |s| s.validation.step1_factor = Some(false))
            .await;

        let s = state
            .set_answer(&id, StepField::Step1Factor, "42".into())
            .await
            .unwrap();
        assert_eq!(s.answers.step1_factor, "42");
        assert_eq!(s.validation.step1_factor, Some(false), "still shows incorrect until rechecked");
    }
}
