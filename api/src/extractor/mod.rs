use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

/// Bearer トークンからログイン中のユーザーを解決する extractor
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

#[axum::async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;

        let access_token = AccessToken(bearer.token().to_string());

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        // トークンが有効でも、利用停止になったユーザーは即座に拒否する
        if user.is_blocked() {
            return Err(AppError::ForbiddenOperation);
        }

        Ok(Self { access_token, user })
    }
}

/// 管理者専用操作のための extractor。
/// 認証（AuthorizedUser）→ ロール検査 の順で評価される
pub struct AdminUser {
    pub user: AuthorizedUser,
}

#[axum::async_trait]
impl FromRequestParts<AppRegistry> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthorizedUser::from_request_parts(parts, registry).await?;
        if !user.is_admin() {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(Self { user })
    }
}
