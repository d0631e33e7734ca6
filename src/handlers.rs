use crate::errors::AppError;
use crate::models::{
    AddHabitQuery, AddHabitRequest, AddWishlistRequest, CountRequest, CountResponse, HabitFilter,
    HabitListResponse, HabitResponse, WishlistEntry, WishlistResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn add_habit(
    State(state): State<AppState>,
    Query(query): Query<AddHabitQuery>,
    Json(payload): Json<AddHabitRequest>,
) -> Json<HabitResponse> {
    let mut data = state.data.lock().await;
    data.next_habit_id = data.next_habit_id.saturating_add(1);
    let habit = HabitResponse {
        id: data.next_habit_id,
        habit_name: payload.habit_name,
        habit_type: query.kind,
        points: 0,
        created_at: Local::now().to_rfc3339(),
    };
    data.habits.push(habit.clone());

    info!(id = habit.id, kind = %habit.habit_type, "stored habit {:?}", habit.habit_name);
    Json(habit)
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(filter): Query<HabitFilter>,
) -> Json<HabitListResponse> {
    let data = state.data.lock().await;
    let habits = data
        .habits
        .iter()
        .filter(|habit| filter.kind.is_none_or(|kind| habit.habit_type == kind))
        .cloned()
        .collect();
    Json(HabitListResponse { habits })
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<HabitResponse>, AppError> {
    let data = state.data.lock().await;
    data.habits
        .iter()
        .find(|habit| habit.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<HabitResponse>, AppError> {
    let mut data = state.data.lock().await;
    let position = data
        .habits
        .iter()
        .position(|habit| habit.id == id)
        .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))?;
    let removed = data.habits.remove(position);

    info!(id, "deleted habit");
    Ok(Json(removed))
}

pub async fn list_wishlist(State(state): State<AppState>) -> Json<WishlistResponse> {
    let data = state.data.lock().await;
    Json(WishlistResponse {
        entries: data.wishlist.clone(),
    })
}

pub async fn add_wishlist_entry(
    State(state): State<AppState>,
    Json(payload): Json<AddWishlistRequest>,
) -> Json<WishlistEntry> {
    let mut data = state.data.lock().await;
    data.next_wishlist_id = data.next_wishlist_id.saturating_add(1);
    let entry = WishlistEntry {
        id: data.next_wishlist_id,
        name: payload.name,
        cost: payload.cost,
    };
    data.wishlist.push(entry.clone());

    info!(id = entry.id, cost = entry.cost, "stored wishlist entry {:?}", entry.name);
    Json(entry)
}

pub async fn delete_wishlist_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<WishlistEntry>, AppError> {
    let mut data = state.data.lock().await;
    let position = data
        .wishlist
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| AppError::not_found(format!("wishlist entry {id} not found")))?;
    let removed = data.wishlist.remove(position);

    info!(id, "deleted wishlist entry");
    Ok(Json(removed))
}

pub async fn increment_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CountRequest>,
) -> Json<CountResponse> {
    let mut data = state.data.lock().await;
    let counter = data.counters.entry(id).or_default();
    *counter = counter.saturating_add(payload.count);
    Json(CountResponse { new_count: *counter })
}
