use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ItemId, ReservationId, UserId},
    reservation::{Reservation, ReservationItem, ReservationStatus},
};
use kernel::repository::reservation::ReservationFilter;
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatusName {
    Pending,
    Approved,
    Canceled,
    Expired,
}

impl From<ReservationStatus> for ReservationStatusName {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Approved => Self::Approved,
            ReservationStatus::Canceled => Self::Canceled,
            ReservationStatus::Expired => Self::Expired,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub item_id: ItemId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReservationResponse {
    pub reservation_id: ReservationId,
}

// ステータスはワイヤ表記の完全一致でのみ受け付けるため、
// 文字列のまま受けてハンドラ側でパースする
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSearchQuery {
    pub user_id: Option<UserId>,
    pub item_id: Option<ItemId>,
    pub status: Option<String>,
}

impl TryFrom<ReservationSearchQuery> for ReservationFilter {
    type Error = AppError;

    fn try_from(value: ReservationSearchQuery) -> Result<Self, Self::Error> {
        let status = value
            .status
            .as_deref()
            .map(ReservationStatus::from_wire)
            .transpose()?;
        Ok(ReservationFilter::new(value.user_id, value.item_id, status))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: ReservationStatusName,
    pub reserved_at: DateTime<Utc>,
    pub item: ReservationItemResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            user_name,
            period,
            status,
            reserved_at,
            item,
        } = value;
        Self {
            reservation_id,
            reserved_by,
            user_name,
            start_at: period.start_at(),
            end_at: period.end_at(),
            status: status.into(),
            reserved_at,
            item: item.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItemResponse {
    pub item_id: ItemId,
    pub item_name: String,
    pub is_active: bool,
}

impl From<ReservationItem> for ReservationItemResponse {
    fn from(value: ReservationItem) -> Self {
        let ReservationItem {
            item_id,
            item_name,
            is_active,
        } = value;
        Self {
            item_id,
            item_name,
            is_active,
        }
    }
}
