//! Client HTTP Routes
//!
//! - `GET /clients?status=<lane>`: one lane, or the whole board
//! - `GET /clients/:id`: one client
//! - `PUT /clients/:id`: move a client, answer with the whole board

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::{parse_body, ApiResult, BoardApi};
use crate::board::ClientRecord;
use crate::storage::RecordStore;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub status: Option<String>,
}

/// Create client routes
pub fn client_routes<S>(api: Arc<BoardApi<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/clients", get(list_clients_handler::<S>))
        .route(
            "/clients/:id",
            get(get_client_handler::<S>).put(move_client_handler::<S>),
        )
        .with_state(api)
}

async fn list_clients_handler<S: RecordStore>(
    State(api): State<Arc<BoardApi<S>>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ClientRecord>>> {
    api.list(params.status.as_deref()).map(Json)
}

async fn get_client_handler<S: RecordStore>(
    State(api): State<Arc<BoardApi<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientRecord>> {
    api.get(&id).map(Json)
}

/// The body is read raw so that malformed JSON is answered with the
/// board's own 400 body rather than the extractor's rejection.
async fn move_client_handler<S: RecordStore>(
    State(api): State<Arc<BoardApi<S>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Vec<ClientRecord>>> {
    let body = parse_body(&body)?;
    api.move_client(&id, &body).map(Json)
}
