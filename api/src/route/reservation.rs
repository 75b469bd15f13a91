use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    create_reservation, search_reservations, show_reservation, show_reservation_list,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(create_reservation))
        .route("/", get(show_reservation_list))
        .route("/search", get(search_reservations))
        .route("/:reservation_id", get(show_reservation));

    Router::new().nest("/reservations", reservation_routers)
}
