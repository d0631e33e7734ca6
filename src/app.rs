use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/addHabit", post(handlers::add_habit))
        .route("/api/habits", get(handlers::list_habits))
        .route(
            "/api/habits/:id",
            get(handlers::get_habit).delete(handlers::delete_habit),
        )
        .route(
            "/api/wishlist",
            get(handlers::list_wishlist).post(handlers::add_wishlist_entry),
        )
        .route("/api/wishlist/:id", delete(handlers::delete_wishlist_entry))
        .route("/api/counter/:id", post(handlers::increment_counter))
        .with_state(state)
}
