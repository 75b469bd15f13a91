use crate::model::{
    id::UserId,
    user::{
        event::{BlockUsers, CreateUser},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    // ユーザーを登録する
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    // user_id からユーザーを取得する
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    // すべてのユーザーを取得する
    async fn find_all(&self) -> AppResult<Vec<User>>;
    // 指定したユーザーをまとめて利用停止にする。
    // 存在しない ID は無視し、実際に更新した件数を返す。
    async fn block(&self, event: BlockUsers) -> AppResult<u64>;
}
