use super::helpers::{fetch_account, fetch_favorite_ids};
use super::Engine;

use async_trait::async_trait;
use sqlx::Executor;

use crate::{
    api::FavoriteAPI,
    auth::User,
    entities::{FavoriteState, Restaurant},
    error::{not_found_error, Error},
};

#[async_trait]
impl FavoriteAPI for Engine {
    /// Sets membership to the requested value in a single statement, so
    /// repeated or concurrent requests converge on the same state.
    #[tracing::instrument(skip(self))]
    async fn set_favorite(
        &self,
        user: User,
        restaurant_id: String,
        favorite: bool,
    ) -> Result<FavoriteState, Error> {
        if self.catalog.find_restaurant(&restaurant_id).is_none() {
            return Err(not_found_error());
        }

        let mut conn = self.pool.acquire().await?;

        let account = fetch_account(&mut conn, &user.id).await?;

        self.authorize(user.clone(), "update_favorites", account.clone())?;

        let query = if favorite {
            "INSERT INTO favorites (account_id, restaurant_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        } else {
            "DELETE FROM favorites WHERE account_id = $1 AND restaurant_id = $2"
        };

        conn.execute(sqlx::query(query).bind(&account.id).bind(&restaurant_id))
            .await?;

        Ok(FavoriteState {
            restaurant_id,
            favorite,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_favorites(&self, user: User) -> Result<Vec<Restaurant>, Error> {
        let mut conn = self.pool.acquire().await?;

        let account = fetch_account(&mut conn, &user.id).await?;

        self.authorize(user.clone(), "read", account.clone())?;

        let ids = fetch_favorite_ids(&mut conn, &account.id).await?;

        // restaurants dropped from the catalog are skipped
        Ok(ids
            .iter()
            .filter_map(|id| self.catalog.find_restaurant(id))
            .collect())
    }
}
