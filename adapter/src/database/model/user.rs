use kernel::model::{
    id::UserId,
    role::Role,
    user::{User, UserStatus},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
            status,
        } = value;
        let role = role.parse::<Role>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "ユーザー（{user_id}）のロール値が不正です: {role}"
            ))
        })?;
        let status = status.parse::<UserStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "ユーザー（{user_id}）のステータス値が不正です: {status}"
            ))
        })?;
        Ok(User {
            user_id,
            user_name,
            email,
            role,
            status,
        })
    }
}
