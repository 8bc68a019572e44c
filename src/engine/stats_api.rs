use super::helpers::fetch_account;
use super::Engine;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Executor, Row};
use uuid::Uuid;

use crate::{
    api::StatsAPI,
    auth::User,
    entities::{round_money, UserStats},
    error::Error,
};

#[async_trait]
impl StatsAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_stats(&self, user: User, account_id: Uuid) -> Result<UserStats, Error> {
        let mut conn = self.pool.acquire().await?;

        let account = fetch_account(&mut conn, &account_id).await?;

        self.authorize(user.clone(), "read_stats", account.clone())?;

        let query = "
            SELECT
                COALESCE(SUM(max_savings), 0) AS total_saved,
                COUNT(*) AS comparisons_count
            FROM
                comparisons
            WHERE
                account_id = $1
        ";

        let result = conn
            .fetch_one(sqlx::query(query).bind(&account.id))
            .await?;

        let total_saved: Decimal = result.try_get("total_saved")?;
        let comparisons_count: i64 = result.try_get("comparisons_count")?;

        let favorites_count: i64 = conn
            .fetch_one(
                sqlx::query("SELECT COUNT(*) AS favorites_count FROM favorites WHERE account_id = $1")
                    .bind(&account.id),
            )
            .await?
            .try_get("favorites_count")?;

        Ok(UserStats {
            total_saved: round_money(total_saved),
            comparisons_count,
            favorites_count,
        })
    }
}
