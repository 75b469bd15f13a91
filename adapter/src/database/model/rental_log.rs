use kernel::model::{
    id::{RentalLogId, ReservationId},
    rental_log::RentalLog,
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct RentalLogRow {
    pub rental_log_id: RentalLogId,
    pub reservation_id: ReservationId,
    pub log_message: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl From<RentalLogRow> for RentalLog {
    fn from(value: RentalLogRow) -> Self {
        let RentalLogRow {
            rental_log_id,
            reservation_id,
            log_message,
            action,
            created_at,
        } = value;
        RentalLog {
            rental_log_id,
            reservation_id,
            log_message,
            action,
            created_at,
        }
    }
}
