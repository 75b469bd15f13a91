use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateReservationRequest, CreatedReservationResponse, ReservationResponse,
        ReservationSearchQuery, ReservationsResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kernel::model::{
    id::ReservationId,
    reservation::{event::CreateReservation, ReservationPeriod},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn create_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    // start_at < end_at を満たさないリクエストはここで弾かれる
    let period = ReservationPeriod::new(req.start_at, req.end_at)?;

    let event = CreateReservation::new(req.item_id, user.id(), period);

    let reservation_id = registry.reservation_repository().create(event).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedReservationResponse { reservation_id }),
    ))
}

pub async fn show_reservation_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_all()
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn search_reservations(
    _user: AuthorizedUser,
    Query(query): Query<ReservationSearchQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    let filter = query.try_into()?;

    registry
        .reservation_repository()
        .find_by_filter(filter)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound(format!(
                "予約（{reservation_id}）が見つかりませんでした。"
            ))),
        })
}
