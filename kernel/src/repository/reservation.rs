use crate::model::{
    id::{ItemId, ReservationId, UserId},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReservationStatus,
    },
};
use async_trait::async_trait;
use derive_new::new;
use shared::error::AppResult;

/// 予約検索の絞り込み条件。None のフィールドは条件に含めない。
#[derive(Debug, Default, new)]
pub struct ReservationFilter {
    pub reserved_by: Option<UserId>,
    pub item_id: Option<ItemId>,
    pub status: Option<ReservationStatus>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を作成する。予約レコードと監査ログは同一トランザクションで書き込む
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // ステータス遷移を検証したうえで予約のステータスを更新する
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation>;
    // reservation_id から予約を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // すべての予約をユーザー・物品情報つきで取得する
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    // ユーザー・物品・ステータスで絞り込んで予約を取得する
    async fn find_by_filter(&self, filter: ReservationFilter) -> AppResult<Vec<Reservation>>;
}
