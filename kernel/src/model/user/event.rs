use crate::model::id::UserId;
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, new)]
pub struct BlockUsers {
    pub user_ids: Vec<UserId>,
}
