//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - starting a round (fresh problem, wholesale session reset)
//!   - recording learner input (answers only, validation untouched)
//!   - the three gated check actions
//!
//! Validators themselves live in `engine` and are total over arbitrary input;
//! the only errors surfaced here are unknown session ids and gated checks,
//! reported as plain messages.

use tracing::{info, instrument, warn};

use crate::engine;
use crate::protocol::{problem_out, session_out, step3_out, ProblemOut, SessionOut, Step3Out};
use crate::state::AppState;
use crate::domain::StepField;

#[instrument(level = "info", skip(state))]
pub async fn new_problem(state: &AppState, session_id: Option<String>) -> ProblemOut {
  let (id, session) = state.new_problem(session_id).await;
  problem_out(&id, &session)
}

#[instrument(level = "debug", skip(state), fields(%session_id))]
pub async fn session_snapshot(state: &AppState, session_id: &str) -> Result<SessionOut, String> {
  state
    .get_session(session_id)
    .await
    .map(|s| session_out(session_id, &s))
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

#[instrument(level = "debug", skip(state, value), fields(%session_id, ?field))]
pub async fn record_input(
  state: &AppState,
  session_id: &str,
  field: StepField,
  value: String,
) -> Result<SessionOut, String> {
  state
    .set_answer(session_id, field, value)
    .await
    .map(|s| session_out(session_id, &s))
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

/// Step 1: magnitude of the factored-out x coefficient.
#[instrument(level = "info", skip(state, value), fields(%session_id))]
pub async fn check_step1(state: &AppState, session_id: &str, value: String) -> Result<bool, String> {
  let out = state
    .with_session(session_id, |s| {
      if !s.can_check_step1() {
        return Err("Step 1 is locked.".to_string());
      }
      s.answers.set(StepField::Step1Factor, value.clone());
      let correct = engine::check_step1(&s.problem, &value);
      s.validation.step1_factor = Some(correct);
      Ok(correct)
    })
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;
  let correct = out.0?;
  info!(target: "problem", id = %session_id, step = 1, %correct, "Step checked");
  Ok(correct)
}

/// Step 2: the completing-the-square constant (b/(2a))².
#[instrument(level = "info", skip(state, value), fields(%session_id))]
pub async fn check_step2(state: &AppState, session_id: &str, value: String) -> Result<bool, String> {
  let out = state
    .with_session(session_id, |s| {
      if !s.can_check_step2() {
        return Err("Step 2 is locked until step 1 validates.".to_string());
      }
      s.answers.set(StepField::Step2Complete, value.clone());
      let correct = engine::check_step2(&s.problem, &value);
      s.validation.step2_complete = Some(correct);
      Ok(correct)
    })
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;
  let correct = out.0?;
  info!(target: "problem", id = %session_id, step = 2, %correct, "Step checked");
  Ok(correct)
}

/// Step 3: both vertex blanks at once; full success solves the round.
#[instrument(level = "info", skip(state, p, q), fields(%session_id))]
pub async fn check_step3(
  state: &AppState,
  session_id: &str,
  p: String,
  q: String,
) -> Result<Step3Out, String> {
  let submission_url = state.submission_url.clone();
  let out = state
    .with_session(session_id, |s| {
      if !s.can_check_step3() {
        return Err("Step 3 is locked until step 2 validates.".to_string());
      }
      s.answers.set(StepField::Step3P, p.clone());
      s.answers.set(StepField::Step3Q, q.clone());
      let result = engine::check_step3(&s.problem, &p, &q);
      s.validation.step3_p = Some(result.p_correct);
      s.validation.step3_q = Some(result.q_correct);
      if result.all_correct {
        s.solved = true;
      }
      Ok(result)
    })
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;
  let result = out.0?;
  if result.all_correct {
    info!(target: "problem", id = %session_id, "Round solved");
  } else {
    warn!(target: "problem", id = %session_id, p_correct = result.p_correct, q_correct = result.q_correct, "Final step incorrect");
  }
  let url = if result.all_correct { Some(submission_url) } else { None };
  Ok(step3_out(result, url))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::TrainerConfig;
  use crate::domain::{GeneralForm, Problem, StandardForm};
  use crate::state::Session;

  async fn state_with_fixed_problem() -> (AppState, String) {
    let state = AppState::from_config(TrainerConfig::default());
    // y = 2x² − 12x + 14 → y = 2(x − 3)² − 4
    let problem = Problem {
      general: GeneralForm { a: 2, b: -12, c: 14 },
      standard: StandardForm { a: 2, p: 3, q: -4 },
    };
    let id = "test-session".to_string();
    state.sessions.write().await.insert(id.clone(), Session::new(problem));
    (state, id)
  }

  #[tokio::test]
  async fn full_drill_happy_path() {
    let (state, id) = state_with_fixed_problem().await;

    assert!(check_step1(&state, &id, "6".into()).await.unwrap());
    assert!(check_step2(&state, &id, "9".into()).await.unwrap());
    let out = check_step3(&state, &id, "-3".into(), "-4".into()).await.unwrap();
    assert!(out.all_correct);
    assert!(out.submission_url.is_some());

    let snap = session_snapshot(&state, &id).await.unwrap();
    assert!(snap.solved);
    assert_eq!(snap.validation.step3_p, Some(true));
  }

  #[tokio::test]
  async fn checks_are_gated_in_order() {
    let (state, id) = state_with_fixed_problem().await;

    // Step 2 before step 1 is rejected and leaves state untouched.
    assert!(check_step2(&state, &id, "9".into()).await.is_err());
    let snap = session_snapshot(&state, &id).await.unwrap();
    assert_eq!(snap.validation.step2_complete, None);

    // Wrong answer marks incorrect but keeps the step open.
    assert!(!check_step1(&state, &id, "12".into()).await.unwrap());
    assert!(check_step1(&state, &id, "6".into()).await.unwrap());

    // A validated step is locked for the round.
    assert!(check_step1(&state, &id, "6".into()).await.is_err());
  }

  #[tokio::test]
  async fn solved_round_locks_everything_until_regeneration() {
    let (state, id) = state_with_fixed_problem().await;
    check_step1(&state, &id, "6".into()).await.unwrap();
    check_step2(&state, &id, "9".into()).await.unwrap();
    let out = check_step3(&state, &id, "-3".into(), "-4".into()).await.unwrap();
    assert!(out.all_correct);

    assert!(check_step3(&state, &id, "-3".into(), "-4".into()).await.is_err());

    let fresh = new_problem(&state, Some(id.clone())).await;
    assert_eq!(fresh.session_id, id);
    let snap = session_snapshot(&state, &id).await.unwrap();
    assert!(!snap.solved);
    assert_eq!(snap.validation.step1_factor, None);
  }

  #[tokio::test]
  async fn partial_final_answer_does_not_solve() {
    let (state, id) = state_with_fixed_problem().await;
    check_step1(&state, &id, "6".into()).await.unwrap();
    check_step2(&state, &id, "9".into()).await.unwrap();

    let out = check_step3(&state, &id, "3".into(), "-4".into()).await.unwrap();
    assert!(!out.p_correct && out.q_correct && !out.all_correct);
    assert!(out.submission_url.is_none());

    // Step 3 stays open; the learner can retry.
    let out = check_step3(&state, &id, "-3".into(), "-4".into()).await.unwrap();
    assert!(out.all_correct);
  }

  #[tokio::test]
  async fn unknown_session_is_an_error_everywhere() {
    let state = AppState::from_config(TrainerConfig::default());
    assert!(session_snapshot(&state, "nope").await.is_err());
    assert!(check_step1(&state, "nope", "6".into()).await.is_err());
    assert!(check_step3(&state, "nope", "1".into(), "2".into()).await.is_err());
    assert!(record_input(&state, "nope", StepField::Step3P, "1".into()).await.is_err());
  }
}
