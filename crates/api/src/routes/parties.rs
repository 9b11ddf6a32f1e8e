//! Party (supplier/client) routes.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use contas_db::{PartyRepository, entities::parties};

use crate::{AppState, error::ApiError};

/// Creates the party routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/parties", get(list_parties).post(create_party))
        .route(
            "/parties/{party_id}",
            get(get_party).put(update_party).delete(delete_party),
        )
}

/// Request body for creating or renaming a party.
#[derive(Debug, Deserialize, Validate)]
pub struct PartyRequest {
    /// Display name.
    #[validate(length(min = 3, max = 255, message = "name must have 3 to 255 characters"))]
    pub name: String,
}

/// Party as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PartyResponse {
    /// Party ID.
    pub id: i32,
    /// Display name.
    pub name: String,
}

impl From<parties::Model> for PartyResponse {
    fn from(party: parties::Model) -> Self {
        Self {
            id: party.id,
            name: party.name,
        }
    }
}

async fn list_parties(State(state): State<AppState>) -> Result<Json<Vec<PartyResponse>>, ApiError> {
    let repo = PartyRepository::new((*state.db).clone());
    let parties = repo.list().await?;
    Ok(Json(parties.into_iter().map(PartyResponse::from).collect()))
}

async fn create_party(
    State(state): State<AppState>,
    payload: Result<Json<PartyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PartyResponse>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let repo = PartyRepository::new((*state.db).clone());
    let party = repo.create(payload.name).await?;

    info!(party_id = party.id, name = %party.name, "Party created");
    Ok((StatusCode::CREATED, Json(party.into())))
}

async fn get_party(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<PartyResponse>, ApiError> {
    let Path(party_id) = path?;
    let repo = PartyRepository::new((*state.db).clone());
    Ok(Json(repo.get(party_id).await?.into()))
}

async fn update_party(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PartyRequest>, JsonRejection>,
) -> Result<Json<PartyResponse>, ApiError> {
    let Path(party_id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let repo = PartyRepository::new((*state.db).clone());
    let party = repo.update(party_id, payload.name).await?;

    info!(party_id, "Party updated");
    Ok(Json(party.into()))
}

/// Deletes a party; accounts that referenced it are unlinked.
async fn delete_party(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(party_id) = path?;
    let repo = PartyRepository::new((*state.db).clone());
    repo.delete(party_id).await?;

    info!(party_id, "Party deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::test_support::{send, test_app};

    #[tokio::test]
    async fn test_party_crud() {
        let app = test_app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/parties",
            Some(json!({ "name": "Companhia de Luz" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Companhia de Luz");

        let uri = format!("/api/v1/parties/{}", created["id"]);

        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, renamed) =
            send(&app, Method::PUT, &uri, Some(json!({ "name": "Light S.A." }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["id"], created["id"]);
        assert_eq!(renamed["name"], "Light S.A.");

        let (status, listed) = send(&app, Method::GET, "/api/v1/parties", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([renamed]));

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Party not found" }));
    }

    #[rstest]
    #[case(json!({ "name": "ab" }))]
    #[case(json!({ "name": "x".repeat(256) }))]
    #[case(json!({}))]
    #[tokio::test]
    async fn test_create_party_rejects_invalid_name(#[case] body: Value) {
        let app = test_app().await;

        let (status, error) = send(&app, Method::POST, "/api/v1/parties", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_party_returns_not_found() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/v1/parties/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Party not found" }));

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/parties/999",
            Some(json!({ "name": "Nobody" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/api/v1/parties/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_party_id_returns_json_error() {
        let app = test_app().await;

        for (method, uri) in [
            (Method::GET, "/api/v1/parties/abc"),
            (Method::DELETE, "/api/v1/parties/abc"),
            (Method::GET, "/api/v1/parties/abc/accounts"),
        ] {
            let (status, error) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(error["message"].is_string());
        }
    }
}
