//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "vertex_trainer", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "vertex_trainer", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "vertex_trainer", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "vertex_trainer", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "vertex_trainer", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewProblem { session_id } => {
      let out = logic::new_problem(state, session_id).await;
      tracing::info!(target: "problem", id = %out.session_id, "WS new_problem served");
      ServerWsMessage::Problem { problem: out }
    }

    ClientWsMessage::GetSession { session_id } => {
      match logic::session_snapshot(state, &session_id).await {
        Ok(session) => ServerWsMessage::Session { session },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::SetInput { session_id, field, value } => {
      match logic::record_input(state, &session_id, field, value).await {
        Ok(session) => ServerWsMessage::Session { session },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::CheckStep1 { session_id, value } => {
      match logic::check_step1(state, &session_id, value).await {
        Ok(correct) => ServerWsMessage::StepResult { step: 1, correct },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::CheckStep2 { session_id, value } => {
      match logic::check_step2(state, &session_id, value).await {
        Ok(correct) => ServerWsMessage::StepResult { step: 2, correct },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::CheckStep3 { session_id, p, q } => {
      match logic::check_step3(state, &session_id, p, q).await {
        Ok(result) => ServerWsMessage::Step3Result { result },
        Err(message) => ServerWsMessage::Error { message },
      }
    }
  }
}
