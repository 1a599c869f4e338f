use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::error::DbResult, models::{CreateUser, User}};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, input: CreateUser) -> DbResult<User>;
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<User>>;
}
