use axum::{
    routing::{get, patch, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{
    block_users, show_rental_logs, show_user_list, update_reservation_status,
};

// 管理者専用のルーティング。ハンドラ側の AdminUser extractor により
// 認証 → ロール検査 の順でアクセスが制御される
pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route(
            "/reservations/:reservation_id/status",
            patch(update_reservation_status),
        )
        .route("/reservations/:reservation_id/logs", get(show_rental_logs))
        .route("/users", get(show_user_list))
        .route("/users/block", put(block_users));

    Router::new().nest("/admins", admin_routers)
}
