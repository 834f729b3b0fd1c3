//! Problem engine: random problem generation and the three step validators.
//!
//! Flow:
//! 1) `generate` draws (a, p, q) inside the configured ranges and derives
//!    b = −2ap, c = ap² + q, so general and vertex form agree exactly.
//! 2) The learner works through three algebraic steps; each has a validator
//!    that compares parsed input against the exact target value.
//!
//! The engine is stateless and does not enforce step ordering; the session
//! layer gates which checks are allowed (see `state`).

use rand::Rng;

use crate::config::GeneratorRanges;
use crate::domain::{GeneralForm, Problem, StandardForm};
use crate::util::parse_finite;

/// Outcome of the final step, which checks both vertex blanks at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step3Result {
  pub p_correct: bool,
  pub q_correct: bool,
  pub all_correct: bool,
}

/// Draw a fresh problem. `a` is resampled until nonzero; the config layer
/// guarantees the a-range contains a nonzero integer, so this terminates.
pub fn generate<R: Rng + ?Sized>(ranges: &GeneratorRanges, rng: &mut R) -> Problem {
  let mut a = 0i64;
  while a == 0 {
    a = rng.gen_range(ranges.a_min..=ranges.a_max);
  }
  let p = rng.gen_range(ranges.p_min..=ranges.p_max);
  let q = rng.gen_range(ranges.q_min..=ranges.q_max);

  let b = -2 * a * p;
  let c = a * p * p + q;

  Problem {
    general: GeneralForm { a, b, c },
    standard: StandardForm { a, p, q },
  }
}

/// Step 1 target: |b/a|, the magnitude of the factored-out x coefficient.
/// Always an integer since b = −2ap is divisible by a.
pub fn step1_target(problem: &Problem) -> f64 {
  (problem.general.b as f64 / problem.general.a as f64).abs()
}

/// Step 1: ax² + bx + c = a(x² + (b/a)x) + c.
/// The shell pre-renders the sign of b/a, so the learner types the magnitude only.
pub fn check_step1(problem: &Problem, input: &str) -> bool {
  parse_finite(input).map_or(false, |v| v == step1_target(problem))
}

/// Step 2 target: (b/(2a))². With b = −2ap this is exactly p², a nonnegative
/// integer, so the exact equality below is always achievable with integer input.
pub fn step2_target(problem: &Problem) -> f64 {
  let half = problem.general.b as f64 / (2.0 * problem.general.a as f64);
  half * half
}

/// Step 2: a(x² + (b/a)x) + c = a(x² + (b/a)x + k) + c − ak, with k = (b/(2a))².
pub fn check_step2(problem: &Problem, input: &str) -> bool {
  parse_finite(input).map_or(false, |v| v == step2_target(problem))
}

/// Step 3: read off y = a(x − p)² + q. The display template fixes the slot as
/// "x {sign}{input}", so the p-blank must hold −p; the q-blank holds q directly.
pub fn check_step3(problem: &Problem, input_p: &str, input_q: &str) -> Step3Result {
  let p_correct =
    parse_finite(input_p).map_or(false, |v| v == -(problem.standard.p as f64));
  let q_correct =
    parse_finite(input_q).map_or(false, |v| v == problem.standard.q as f64);
  Step3Result { p_correct, q_correct, all_correct: p_correct && q_correct }
}
