use crate::errors::ClientError;
use crate::models::{AddHabitRequest, CountRequest, CountResponse, HabitKind, HabitResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const ADD_HABIT_PATH: &str = "/addHabit";
pub const COUNTER_PATH: &str = "/api/counter";

/// A habit the user asked to save, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSubmission {
    pub kind: HabitKind,
    pub habit_name: String,
}

impl HabitSubmission {
    pub fn new(kind: HabitKind, habit_name: impl Into<String>) -> Self {
        Self {
            kind,
            habit_name: habit_name.into(),
        }
    }

    /// Path and query for the shared add-habit endpoint. Good habits omit the
    /// discriminator since the server defaults to `good`.
    pub fn path(&self) -> String {
        match self.kind {
            HabitKind::Good => ADD_HABIT_PATH.to_string(),
            HabitKind::Bad => format!("{ADD_HABIT_PATH}?type={}", self.kind),
        }
    }

    pub fn body(&self) -> AddHabitRequest {
        AddHabitRequest {
            habit_name: self.habit_name.clone(),
        }
    }
}

#[async_trait]
pub trait HabitApi: Send + Sync {
    async fn add_habit(&self, submission: &HabitSubmission) -> Result<HabitResponse, ClientError>;

    async fn increment_counter(&self, id: &str, count: i64) -> Result<CountResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpHabitApi {
    base_url: String,
    client: Client,
}

impl HttpHabitApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HabitApi for HttpHabitApi {
    async fn add_habit(&self, submission: &HabitSubmission) -> Result<HabitResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, submission.path()))
            .json(&submission.body())
            .send()
            .await?;
        decode(response).await
    }

    async fn increment_counter(&self, id: &str, count: i64) -> Result<CountResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}{COUNTER_PATH}/{id}", self.base_url))
            .json(&CountRequest { count })
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response.json::<T>().await.map_err(ClientError::from)
}
