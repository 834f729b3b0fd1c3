//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Nothing here ever carries the vertex (p, q) or a step's target value:
//! the client gets the general form, rendered display strings, and check
//! verdicts only.

use serde::{Deserialize, Serialize};

use crate::domain::{GeneralForm, StepAnswers, StepField, StepValidation};
use crate::engine::Step3Result;
use crate::format::{general_display, step1_sign};
use crate::state::Session;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewProblem {
        #[serde(default, rename = "sessionId")]
        session_id: Option<String>,
    },
    GetSession {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SetInput {
        #[serde(rename = "sessionId")]
        session_id: String,
        field: StepField,
        value: String,
    },
    CheckStep1 {
        #[serde(rename = "sessionId")]
        session_id: String,
        value: String,
    },
    CheckStep2 {
        #[serde(rename = "sessionId")]
        session_id: String,
        value: String,
    },
    CheckStep3 {
        #[serde(rename = "sessionId")]
        session_id: String,
        p: String,
        q: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Problem {
        problem: ProblemOut,
    },
    Session {
        session: SessionOut,
    },
    StepResult {
        step: u8,
        correct: bool,
    },
    Step3Result {
        result: Step3Out,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for problem delivery. Holds the learner-facing
/// half of the problem only.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub general: GeneralForm,
    /// Rendered general-form equation, e.g. "y = 2x² - 12x + 14".
    pub display: String,
    /// Pre-rendered sign glyph for the step-1 blank ("+" or "-").
    pub step1_sign: String,
}

/// Full session snapshot: problem view plus answers/validation/solved.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub general: GeneralForm,
    pub display: String,
    pub step1_sign: String,
    pub answers: StepAnswers,
    pub validation: StepValidation,
    pub solved: bool,
}

/// Verdict for the combined final step.
#[derive(Debug, Serialize)]
pub struct Step3Out {
    pub p_correct: bool,
    pub q_correct: bool,
    pub all_correct: bool,
    /// Where to submit the captured result; present once the round is solved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_url: Option<String>,
}

/// Convert a session to the public problem DTO.
pub fn problem_out(id: &str, session: &Session) -> ProblemOut {
    ProblemOut {
        session_id: id.to_string(),
        general: session.problem.general,
        display: general_display(&session.problem),
        step1_sign: step1_sign(&session.problem).to_string(),
    }
}

/// Convert a session to the public snapshot DTO.
pub fn session_out(id: &str, session: &Session) -> SessionOut {
    SessionOut {
        session_id: id.to_string(),
        general: session.problem.general,
        display: general_display(&session.problem),
        step1_sign: step1_sign(&session.problem).to_string(),
        answers: session.answers.clone(),
        validation: session.validation,
        solved: session.solved,
    }
}

pub fn step3_out(result: Step3Result, submission_url: Option<String>) -> Step3Out {
    Step3Out {
        p_correct: result.p_correct,
        q_correct: result.q_correct,
        all_correct: result.all_correct,
        submission_url,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct NewProblemIn {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InputIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub field: StepField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckStep3In {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub p: String,
    pub q: String,
}

#[derive(Serialize)]
pub struct CheckOut {
    pub step: u8,
    pub correct: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
