// kernel/src/model/user/mod.rs
use crate::model::{id::UserId, role::Role};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_blocked(&self) -> bool {
        self.status == UserStatus::Blocked
    }
}

// 利用停止（BLOCKED）のユーザーはログインも API 呼び出しもできない
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Blocked,
}
