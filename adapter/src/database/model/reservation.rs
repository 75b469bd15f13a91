use kernel::model::{
    id::{ItemId, ReservationId, UserId},
    reservation::{Reservation, ReservationItem, ReservationPeriod, ReservationStatus},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧・詳細を取得する際に使う型。
// users・items と JOIN した結果を受けるため、表示用の情報も一緒に持つ
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub user_name: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub item_is_active: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub reserved_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            user_id,
            user_name,
            item_id,
            item_name,
            item_is_active,
            start_at,
            end_at,
            status,
            reserved_at,
        } = value;
        let status = status.parse::<ReservationStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "予約（{reservation_id}）のステータス値が不正です: {status}"
            ))
        })?;
        let period = ReservationPeriod::new(start_at, end_at).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "予約（{reservation_id}）の期間データが不正です。"
            ))
        })?;
        Ok(Reservation {
            reservation_id,
            reserved_by: user_id,
            user_name,
            period,
            status,
            reserved_at,
            item: ReservationItem {
                item_id,
                item_name,
                is_active: item_is_active,
            },
        })
    }
}

// 重複チェックで APPROVED の予約期間だけを読むための型
#[derive(sqlx::FromRow)]
pub struct ReservationPeriodRow {
    pub reservation_id: ReservationId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl ReservationPeriodRow {
    pub fn period(&self) -> Result<ReservationPeriod, AppError> {
        ReservationPeriod::new(self.start_at, self.end_at).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "予約（{}）の期間データが不正です。",
                self.reservation_id
            ))
        })
    }
}
