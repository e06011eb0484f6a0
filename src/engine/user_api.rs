use super::Engine;

use async_trait::async_trait;

use crate::{api::UserAPI, auth::User, error::Error};

#[async_trait]
impl UserAPI for Engine {
    #[tracing::instrument(skip(self, user), fields(user_id = user.id))]
    async fn add_user(&self, user: User) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.users.add_user(user);

        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, Error> {
        let state = self.state.lock().await;
        let user = state.users.authenticate(username, password).cloned();

        match &user {
            Some(user) => tracing::info!(user_id = user.id, "authenticated"),
            None => tracing::warn!("authentication failed"),
        }

        Ok(user)
    }
}
