use crate::model::{id::ReservationId, rental_log::RentalLog};
use async_trait::async_trait;
use shared::error::AppResult;

/// 監査ログの読み取り側。書き込みは予約操作のトランザクション内で行われる。
#[async_trait]
pub trait RentalLogRepository: Send + Sync {
    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<RentalLog>>;
}
