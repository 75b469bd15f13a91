use super::{
    admin::build_admin_routers, auth::build_auth_routers, health::build_health_check_routers,
    item::build_item_routers, reservation::build_reservation_routers, user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_item_routers())
        .merge(build_reservation_routers())
        .merge(build_admin_routers());
    Router::new().nest("/api/v1", router)
}
