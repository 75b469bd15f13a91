use crate::{
    extractor::AuthorizedUser,
    model::user::{CreateUserRequest, UserResponse},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppError;

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let registered_user = registry.user_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from(registered_user)),
    ))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}
