//! Reservation ledger models.

use serde::{Deserialize, Serialize};

/// A booking linking a camper to a camp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: String,
    pub camp_id: String,
    pub camp_name: String,
    pub date: String,
    pub name: String,
    pub email: String,
    pub reservation_date: String,
    pub total_price: f64,
    pub selected_extras: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Request body for `POST /reserve`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    #[serde(default)]
    pub camp_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Defaults to the camp date
    #[serde(default)]
    pub date: Option<String>,
    pub total_price: f64,
    #[serde(default)]
    pub selected_extras: Option<serde_json::Value>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Query for reservation lookups keyed by camp and camper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCheckQuery {
    pub camp_id: String,
    pub email: String,
}

/// Query for per-camp reservation counts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampIdQuery {
    pub camp_id: String,
}

/// Result of `GET /check-reservation`.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationCheck {
    pub reserved: bool,
}

/// Result of `GET /camp-reservations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCount {
    pub camp_id: String,
    pub count: i64,
}

/// Aggregate reservation figures across a group's camps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupReservationStats {
    pub camp_count: i64,
    pub total_reservations: i64,
    pub recent_reservations: i64,
    pub total_revenue: f64,
}
