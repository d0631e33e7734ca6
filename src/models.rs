use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    #[default]
    Good,
    Bad,
}

impl HabitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HabitKind::Good => "good",
            HabitKind::Bad => "bad",
        }
    }
}

impl fmt::Display for HabitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub next_habit_id: u64,
    pub habits: Vec<HabitResponse>,
    pub next_wishlist_id: u64,
    pub wishlist: Vec<WishlistEntry>,
    pub counters: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddHabitRequest {
    pub habit_name: String,
}

/// Query discriminator for `POST /addHabit`. A missing `type` means a good habit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct AddHabitQuery {
    #[serde(rename = "type", default)]
    pub kind: HabitKind,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct HabitFilter {
    #[serde(rename = "type")]
    pub kind: Option<HabitKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitResponse {
    pub id: u64,
    pub habit_name: String,
    pub habit_type: HabitKind,
    pub points: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitListResponse {
    pub habits: Vec<HabitResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWishlistRequest {
    pub name: String,
    pub cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: u64,
    pub name: String,
    pub cost: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistResponse {
    pub entries: Vec<WishlistEntry>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountRequest {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    #[serde(rename = "newCount")]
    pub new_count: i64,
}
