use crate::webserver::state::AppState;
use axum::Router;
use std::sync::Arc;

pub mod items;
pub mod marketplace;
pub mod player;
pub mod status;
pub mod tokens;
pub mod world;
pub mod ws;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(tokens::routes())
        .merge(ws::routes())
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(player::routes())
        .merge(world::routes())
        .merge(items::routes())
        .merge(marketplace::routes())
}
