use crate::model::id::{RentalLogId, ReservationId};
use chrono::{DateTime, Utc};

/// 予約に対する操作の監査ログ。追記専用で、
/// 対象の予約操作と同一トランザクション内で書き込まれる。
#[derive(Debug)]
pub struct RentalLog {
    pub rental_log_id: RentalLogId,
    pub reservation_id: ReservationId,
    pub log_message: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}
