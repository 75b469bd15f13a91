use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{BlockUsers, CreateUser},
        User, UserStatus,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role, status)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(&hashed_password)
        .bind(Role::User.as_ref())
        .bind(UserStatus::Active.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role: Role::User,
            status: UserStatus::Active,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, user_name, email, role, status
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, user_name, email, role, status
                FROM users
                ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    // 指定したユーザーをまとめて利用停止にする。
    // 存在しない ID が混ざっていても更新できた分だけ反映する
    async fn block(&self, event: BlockUsers) -> AppResult<u64> {
        let user_ids = event
            .user_ids
            .iter()
            .map(|id| id.raw())
            .collect::<Vec<Uuid>>();

        let res = sqlx::query(
            r#"
                UPDATE users
                SET status = $1
                WHERE user_id = ANY($2)
            "#,
        )
        .bind(UserStatus::Blocked.as_ref())
        .bind(&user_ids)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}
