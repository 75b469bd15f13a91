use crate::{
    extractor::AdminUser,
    model::{
        rental_log::RentalLogsResponse,
        reservation::{ReservationResponse, UpdateReservationStatusRequest},
        user::{BlockUsersRequest, BlockedUsersResponse, UsersResponse},
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::{
    id::ReservationId,
    reservation::{event::UpdateReservationStatus, ReservationStatus},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 予約のステータスを変更する。
// 遷移の可否は kernel 側の遷移表で検証され、
// 許可されない遷移はエラーになり予約は変更されない
pub async fn update_reservation_status(
    admin: AdminUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<Json<ReservationResponse>> {
    // 未知のステータス名はここで弾かれる（大文字の完全一致のみ）
    let requested_status = ReservationStatus::from_wire(&req.status)?;

    let event = UpdateReservationStatus::new(reservation_id, requested_status, admin.user.id());

    registry
        .reservation_repository()
        .update_status(event)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn block_users(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<BlockUsersRequest>,
) -> AppResult<Json<BlockedUsersResponse>> {
    let blocked_count = registry.user_repository().block(req.into()).await?;
    Ok(Json(BlockedUsersResponse { blocked_count }))
}

pub async fn show_user_list(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    registry
        .user_repository()
        .find_all()
        .await
        .map(UsersResponse::from)
        .map(Json)
}

pub async fn show_rental_logs(
    _admin: AdminUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RentalLogsResponse>> {
    // 予約が存在しない場合は 404 を返す
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("予約（{reservation_id}）が見つかりませんでした。"))
        })?;

    registry
        .rental_log_repository()
        .find_by_reservation_id(reservation_id)
        .await
        .map(RentalLogsResponse::from)
        .map(Json)
}
