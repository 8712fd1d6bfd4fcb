use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::command::{Address, Command, Group};
use crate::sequencer::SequencerHandle;

#[derive(Clone)]
pub struct AppState {
    seq: SequencerHandle,
}

impl AppState {
    pub fn new(seq: SequencerHandle) -> Self {
        Self { seq }
    }
}

pub fn router(seq: SequencerHandle) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/{id}", get(api_command).post(api_command))
        .with_state(AppState::new(seq))
}

/// `/api/{id}`: 200 once the command is queued for transmission, 400 for a
/// malformed id. The id is matched on the escaped path, so `A1%2B` is rejected.
pub async fn api_command(State(state): State<AppState>, uri: Uri) -> StatusCode {
    let id = uri.path().strip_prefix("/api/").unwrap_or_default();
    let cmd: Command = match id.parse() {
        Ok(cmd) => cmd,
        Err(e) => {
            tracing::debug!(id = %id, "rejected command: {e}");
            return StatusCode::BAD_REQUEST;
        }
    };

    let seq = state.seq.clone();
    match tokio::task::spawn_blocking(move || seq.submit(cmd)).await {
        Ok(Ok(())) => {
            tracing::info!(%cmd, "command accepted");
            StatusCode::OK
        }
        Ok(Err(e)) => {
            tracing::error!(%cmd, "{e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(e) => {
            tracing::error!(%cmd, "submit task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>rf_outlet</title></head>\n<body>\n<table>\n",
    );
    for group in Group::ALL {
        out.push_str("<tr>");
        for address in Address::ALL {
            let on = Command::new(group, address, true);
            let off = Command::new(group, address, false);
            out.push_str(&format!(
                "<td>{g}{a} <a href=\"/api/{on}\">on</a> <a href=\"/api/{off}\">off</a></td>",
                g = group.letter(),
                a = address.digit(),
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}
