//! Loading trainer configuration (generator ranges + submission link) from TOML.
//!
//! See `TrainerConfig` and `GeneratorRanges` for the expected schema. Every
//! field has a default, so an empty file (or no file at all) yields the
//! classic drill: a ∈ [−3, 3] \ {0}, p ∈ [−5, 5], q ∈ [−10, 10].

use serde::Deserialize;
use tracing::{error, info};

/// Inclusive bounds the generator draws from. The a-range must contain a
/// nonzero integer; `is_well_posed` is checked at startup and bad ranges are
/// replaced by the defaults so the server always starts.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct GeneratorRanges {
  #[serde(default = "d_a_min")] pub a_min: i64,
  #[serde(default = "d_a_max")] pub a_max: i64,
  #[serde(default = "d_p_min")] pub p_min: i64,
  #[serde(default = "d_p_max")] pub p_max: i64,
  #[serde(default = "d_q_min")] pub q_min: i64,
  #[serde(default = "d_q_max")] pub q_max: i64,
}

fn d_a_min() -> i64 { -3 }
fn d_a_max() -> i64 { 3 }
fn d_p_min() -> i64 { -5 }
fn d_p_max() -> i64 { 5 }
fn d_q_min() -> i64 { -10 }
fn d_q_max() -> i64 { 10 }

impl Default for GeneratorRanges {
  fn default() -> Self {
    Self {
      a_min: d_a_min(), a_max: d_a_max(),
      p_min: d_p_min(), p_max: d_p_max(),
      q_min: d_q_min(), q_max: d_q_max(),
    }
  }
}

impl GeneratorRanges {
  /// Ordered bounds, and at least one nonzero value for a (otherwise the
  /// resample-until-nonzero loop could never terminate).
  pub fn is_well_posed(&self) -> bool {
    self.a_min <= self.a_max
      && self.p_min <= self.p_max
      && self.q_min <= self.q_max
      && !(self.a_min == 0 && self.a_max == 0)
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TrainerConfig {
  #[serde(default)]
  pub ranges: GeneratorRanges,
  /// Opaque link shown to the learner after solving a round (where to submit
  /// the captured result). Not engine logic; plain configuration.
  #[serde(default = "d_submission_url")]
  pub submission_url: String,
}

fn d_submission_url() -> String {
  "https://padlet.com/easypie65/Yeojums33".to_string()
}

impl Default for TrainerConfig {
  fn default() -> Self {
    Self { ranges: GeneratorRanges::default(), submission_url: d_submission_url() }
  }
}

/// Attempt to load `TrainerConfig` from TRAINER_CONFIG_PATH. On any parsing/IO
/// error, returns None and the caller falls back to defaults.
pub fn load_trainer_config_from_env() -> Option<TrainerConfig> {
  let path = std::env::var("TRAINER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<TrainerConfig>(&s) {
      Ok(cfg) => {
        info!(target: "vertex_trainer", %path, "Loaded trainer config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "vertex_trainer", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "vertex_trainer", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
