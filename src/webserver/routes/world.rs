//! World Generator API Routes
//!
//! Seeded quest and zone generation. Every generated payload is persisted
//! together with its effective seed, so content can be replayed later.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};
use crate::world::{generate_quest, generate_zone, Quest, Zone};

#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct QuestResponse {
    pub seed: u64,
    pub quest: Quest,
}

#[derive(Debug, Serialize)]
pub struct ZoneResponse {
    pub seed: u64,
    pub zone: Zone,
}

/// Create world generator routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/quest", get(ai_quest))
        .route("/ai/zone", get(ai_zone))
}

/// GET /api/ai/quest - Generate (and persist) a seeded quest
async fn ai_quest(State(state): State<Arc<AppState>>, Query(query): Query<SeedQuery>) -> Response {
    let (seed, quest) = generate_quest(query.seed);

    logger::debug(LogTag::World, &format!("Generated quest (seed={})", seed));

    let doc = serde_json::json!({"seed": seed, "quest": quest});
    if let Err(e) = state.db.create_document("quest", &doc) {
        logger::error(LogTag::World, &format!("Failed to persist quest: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist quest: {}", e),
            None,
        );
    }

    success_response(QuestResponse { seed, quest })
}

/// GET /api/ai/zone - Generate (and persist) a seeded zone
async fn ai_zone(State(state): State<Arc<AppState>>, Query(query): Query<SeedQuery>) -> Response {
    let (seed, zone) = generate_zone(query.seed);

    logger::debug(LogTag::World, &format!("Generated zone (seed={})", seed));

    let doc = serde_json::json!({"seed": seed, "zone": zone});
    if let Err(e) = state.db.create_document("zone", &doc) {
        logger::error(LogTag::World, &format!("Failed to persist zone: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist zone: {}", e),
            None,
        );
    }

    success_response(ZoneResponse { seed, zone })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::Database;
    use crate::webserver::ws::WsHub;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Config::default(),
            Arc::new(Database::new_in_memory().unwrap()),
            WsHub::new(8),
        ))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_quest_endpoint_is_deterministic_per_seed() {
        let state = test_state();
        let query = SeedQuery { seed: Some(4242) };

        let first = body_json(
            ai_quest(State(Arc::clone(&state)), Query(SeedQuery { seed: query.seed })).await,
        )
        .await;
        let second = body_json(ai_quest(State(Arc::clone(&state)), Query(query)).await).await;

        assert_eq!(first["seed"], 4242);
        assert_eq!(first["quest"]["title"], second["quest"]["title"]);
        assert_eq!(first["quest"]["zone"], second["quest"]["zone"]);
        assert_eq!(
            first["quest"]["target_count"],
            second["quest"]["target_count"]
        );
        assert_eq!(first["quest"]["reward"], second["quest"]["reward"]);

        // Both generations were persisted with their seed
        assert_eq!(state.db.count_documents("quest").unwrap(), 2);
        let stored = state.db.get_documents("quest", Some(1)).unwrap();
        assert_eq!(stored[0]["seed"], 4242);
        assert!(stored[0]["quest"]["title"].is_string());
    }

    #[tokio::test]
    async fn test_quest_endpoint_without_seed_reports_one() {
        let state = test_state();
        let body = body_json(ai_quest(State(state), Query(SeedQuery { seed: None })).await).await;

        let seed = body["seed"].as_u64().unwrap();
        assert!((1..=10_000_000).contains(&seed));
        assert!(body["quest"]["title"]
            .as_str()
            .unwrap()
            .starts_with("Cull the "));
    }

    #[tokio::test]
    async fn test_zone_endpoint_persists_and_responds() {
        let state = test_state();
        let body =
            body_json(ai_zone(State(Arc::clone(&state)), Query(SeedQuery { seed: Some(7) })).await)
                .await;

        assert_eq!(body["seed"], 7);
        assert!(body["zone"]["name"].as_str().unwrap().starts_with("Zone-"));
        assert_eq!(body["zone"]["resources"].as_array().unwrap().len(), 3);

        assert_eq!(state.db.count_documents("zone").unwrap(), 1);
        let stored = state.db.get_documents("zone", None).unwrap();
        assert_eq!(stored[0]["zone"]["name"], body["zone"]["name"]);
    }
}
