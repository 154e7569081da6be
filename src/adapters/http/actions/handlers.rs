//! HTTP handlers for the action server.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ActionErrorResponse, ActionInfo};
use crate::application::{RunActionCommand, RunActionHandler};
use crate::domain::actions::{ActionCall, ActionError};

#[derive(Clone)]
pub struct ActionHandlers {
    run_handler: Arc<RunActionHandler>,
}

impl ActionHandlers {
    pub fn new(run_handler: Arc<RunActionHandler>) -> Self {
        Self { run_handler }
    }
}

/// POST /webhook - Run the action named in `next_action`
pub async fn run_action(
    State(handlers): State<ActionHandlers>,
    Json(call): Json<ActionCall>,
) -> Response {
    let action_name = call.next_action.clone();

    match handlers.run_handler.handle(RunActionCommand { call }).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => handle_action_error(e, action_name),
    }
}

/// GET /actions - Names of the registered actions
pub async fn list_actions(State(handlers): State<ActionHandlers>) -> Json<Vec<ActionInfo>> {
    let actions = handlers
        .run_handler
        .registry()
        .names()
        .into_iter()
        .map(|name| ActionInfo {
            name: name.to_string(),
        })
        .collect();
    Json(actions)
}

fn handle_action_error(error: ActionError, action_name: String) -> Response {
    match error {
        ActionError::UnknownAction(_) => {
            tracing::warn!(action = %action_name, "Unknown action requested");
            (
                StatusCode::NOT_FOUND,
                Json(ActionErrorResponse::new(
                    format!("No registered action found for name '{}'.", action_name),
                    action_name,
                )),
            )
                .into_response()
        }
        ActionError::Upstream(e) => {
            tracing::error!(action = %action_name, error = %e, "Action failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionErrorResponse::new(e.to_string(), action_name)),
            )
                .into_response()
        }
    }
}
