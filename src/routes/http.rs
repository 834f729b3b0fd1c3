//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Unknown sessions and gated checks come back as 400 with a plain message;
//! wrong answers are ordinary 200 responses with `correct: false`.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic;

fn bad_request(message: String) -> Response {
  (StatusCode::BAD_REQUEST, Json(ErrorOut { message })).into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(session_id = ?body.session_id))]
pub async fn http_new_problem(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewProblemIn>,
) -> impl IntoResponse {
  let out = logic::new_problem(&state, body.session_id).await;
  info!(target: "problem", id = %out.session_id, display = %out.display, "HTTP problem served");
  Json(out)
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Response {
  match logic::session_snapshot(&state, &q.session_id).await {
    Ok(out) => Json(out).into_response(),
    Err(message) => bad_request(message),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, ?body.field))]
pub async fn http_post_input(
  State(state): State<Arc<AppState>>,
  Json(body): Json<InputIn>,
) -> Response {
  match logic::record_input(&state, &body.session_id, body.field, body.value).await {
    Ok(out) => Json(out).into_response(),
    Err(message) => bad_request(message),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_check_step1(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> Response {
  match logic::check_step1(&state, &body.session_id, body.value).await {
    Ok(correct) => Json(CheckOut { step: 1, correct }).into_response(),
    Err(message) => bad_request(message),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_check_step2(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> Response {
  match logic::check_step2(&state, &body.session_id, body.value).await {
    Ok(correct) => Json(CheckOut { step: 2, correct }).into_response(),
    Err(message) => bad_request(message),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_check_step3(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckStep3In>,
) -> Response {
  match logic::check_step3(&state, &body.session_id, body.p, body.q).await {
    Ok(out) => Json(out).into_response(),
    Err(message) => bad_request(message),
  }
}
