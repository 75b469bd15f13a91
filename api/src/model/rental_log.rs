use chrono::{DateTime, Utc};
use kernel::model::{
    id::{RentalLogId, ReservationId},
    rental_log::RentalLog,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalLogsResponse {
    pub items: Vec<RentalLogResponse>,
}

impl From<Vec<RentalLog>> for RentalLogsResponse {
    fn from(value: Vec<RentalLog>) -> Self {
        Self {
            items: value.into_iter().map(RentalLogResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalLogResponse {
    pub rental_log_id: RentalLogId,
    pub reservation_id: ReservationId,
    pub log_message: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl From<RentalLog> for RentalLogResponse {
    fn from(value: RentalLog) -> Self {
        let RentalLog {
            rental_log_id,
            reservation_id,
            log_message,
            action,
            created_at,
        } = value;
        Self {
            rental_log_id,
            reservation_id,
            log_message,
            action,
            created_at,
        }
    }
}
