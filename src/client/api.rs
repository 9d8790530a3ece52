use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};

use super::constants::*;
use super::error::ApiError;
use crate::models::availability::{DayAvailability, parse_calendar};
use crate::models::booking::BookingPayload;
use crate::models::branch::{Branch, BranchId, parse_branches};
use crate::models::lenient::is_truthy;

/// Client for the workshop's booking backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ApiClient {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Branches customers can book at, in backend order.
    pub async fn branches(&self) -> Result<Vec<Branch>, ApiError> {
        let payload = Self::send(self.client.get(self.url(BRANCHES_PATH))).await?;
        let branches = parse_branches(payload);
        info!("loaded {} branches", branches.len());
        Ok(branches)
    }

    /// Calendar of a branch, unfiltered: disabled slots are still present.
    pub async fn calendar(&self, branch: &BranchId) -> Result<Vec<DayAvailability>, ApiError> {
        let request = self
            .client
            .get(self.url(CALENDAR_PATH))
            .query(&[(BRANCH_PARAM, branch.as_str())]);
        let days = parse_calendar(Self::send(request).await?);
        info!("loaded {} calendar days for branch {}", days.len(), branch);
        Ok(days)
    }

    /// Whether the document already holds a booking on `date`.
    pub async fn booking_exists(&self, document: &str, date: &str) -> Result<bool, ApiError> {
        let request = self
            .client
            .get(self.url(BOOKING_EXISTS_PATH))
            .query(&[(DOCUMENT_PARAM, document), (DATE_PARAM, date)]);
        let payload = Self::send(request).await?;
        debug!("booking existence check answered {}", payload);
        Ok(payload.get("exists").is_some_and(is_truthy))
    }

    /// Creates the booking and returns whatever the backend answered with.
    pub async fn create_booking(&self, payload: &BookingPayload) -> Result<Value, ApiError> {
        let request = self.client.post(self.url(BOOKINGS_PATH)).json(payload);
        Self::send(request).await
    }

    async fn send(request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string));
            return Err(ApiError::Status { status, message });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
