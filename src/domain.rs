//! Domain models used by the backend: the two quadratic forms, the problem
//! itself, and the per-round answer/validation tuples.

use serde::{Deserialize, Serialize};

/// y = ax² + bx + c. This is what the learner sees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralForm {
  pub a: i64,
  pub b: i64,
  pub c: i64,
}

/// y = a(x − p)² + q; (p, q) is the vertex. Never sent to the client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandardForm {
  pub a: i64,
  pub p: i64,
  pub q: i64,
}

/// One conversion problem, immutable for the duration of a round.
/// The generator picks a, p, q first and derives b = −2ap, c = ap² + q,
/// so the two forms are equivalent by construction and every step of the
/// conversion is exact integer arithmetic.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
  pub general: GeneralForm,
  pub standard: StandardForm,
}

/// Which input blank an action refers to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepField {
  Step1Factor,
  Step2Complete,
  Step3P,
  Step3Q,
}

/// Raw learner input, one free-text field per blank.
/// Kept as strings on purpose: parsing happens only at check time, so
/// partial or junk input never crashes anything, it is just incorrect.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StepAnswers {
  pub step1_factor: String,
  pub step2_complete: String,
  pub step3_p: String,
  pub step3_q: String,
}

impl StepAnswers {
  pub fn set(&mut self, field: StepField, value: String) {
    match field {
      StepField::Step1Factor => self.step1_factor = value,
      StepField::Step2Complete => self.step2_complete = value,
      StepField::Step3P => self.step3_p = value,
      StepField::Step3Q => self.step3_q = value,
    }
  }

  pub fn get(&self, field: StepField) -> &str {
    match field {
      StepField::Step1Factor => &self.step1_factor,
      StepField::Step2Complete => &self.step2_complete,
      StepField::Step3P => &self.step3_p,
      StepField::Step3Q => &self.step3_q,
    }
  }
}

/// Tri-state check results mirroring `StepAnswers`.
/// `None` = not checked yet, `Some(true)` = correct, `Some(false)` = incorrect.
/// Set only by explicit check actions; editing an input does NOT touch these,
/// so a wrong check keeps showing incorrect until the learner rechecks.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepValidation {
  pub step1_factor: Option<bool>,
  pub step2_complete: Option<bool>,
  pub step3_p: Option<bool>,
  pub step3_q: Option<bool>,
}
