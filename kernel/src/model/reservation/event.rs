use crate::model::id::{ItemId, ReservationId, UserId};
use crate::model::reservation::{ReservationPeriod, ReservationStatus};
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub item_id: ItemId,
    pub reserved_by: UserId,
    pub period: ReservationPeriod,
}

#[derive(new)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub requested_status: ReservationStatus,
    pub requested_user: UserId,
}
