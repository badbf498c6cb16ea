use crate::api::users;
use crate::error::ClientError;
use crate::models::{Application, ChangePasswordRequest, Club, UpdateProfileRequest, User};
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

/// The signed-in user's profile, clubs and applications.
#[derive(Clone)]
pub struct UserHooks {
    ctx: HookContext,
}

impl UserHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn me(&self) -> QueryState<User> {
        self.ctx
            .read(keys::me(), |client| async move { users::me(&client).await })
            .await
    }

    pub async fn my_groups(&self) -> QueryState<Vec<Club>> {
        self.ctx
            .read_list(keys::my_groups(), |client| async move { users::my_groups(&client).await })
            .await
    }

    pub async fn my_applications(&self) -> QueryState<Vec<Application>> {
        self.ctx
            .read_list(keys::my_applications(), |client| async move { users::my_applications(&client).await })
            .await
    }

    pub async fn update_me(&self, request: &UpdateProfileRequest) -> Result<User, ClientError> {
        let user = self
            .ctx
            .write(QueryKey::new("update-me"), &[Invalidate::Key(keys::me())], |client| async move {
                users::update_me(&client, request).await
            })
            .await?;
        self.ctx.cache.set_data(keys::me(), user.clone()).await;
        Ok(user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ClientError> {
        self.ctx
            .write(QueryKey::new("change-password"), &[], |client| async move {
                users::change_password(&client, request).await
            })
            .await
            .map(|_| ())
    }
}
