use super::Database;

use chrono::Utc;
use sqlx::{pool::PoolConnection, types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    entities::{Account, ComparisonResult},
    error::{not_found_error, Error},
};

#[tracing::instrument(skip(conn))]
pub async fn fetch_account(
    conn: &mut PoolConnection<Database>,
    id: &Uuid,
) -> Result<Account, Error> {
    let Json(account): Json<Account> = conn
        .fetch_optional(sqlx::query("SELECT data FROM accounts WHERE id = $1").bind(id))
        .await?
        .ok_or_else(not_found_error)?
        .try_get("data")?;

    Ok(account)
}

#[tracing::instrument(skip(conn))]
pub async fn fetch_account_by_email(
    conn: &mut PoolConnection<Database>,
    email: &str,
) -> Result<Option<Account>, Error> {
    let maybe_result = conn
        .fetch_optional(sqlx::query("SELECT data FROM accounts WHERE email = $1").bind(email))
        .await?;

    match maybe_result {
        Some(result) => {
            let Json(account): Json<Account> = result.try_get("data")?;
            Ok(Some(account))
        }
        None => Ok(None),
    }
}

#[tracing::instrument(skip(conn))]
pub async fn fetch_favorite_ids(
    conn: &mut PoolConnection<Database>,
    account_id: &Uuid,
) -> Result<Vec<String>, Error> {
    let results = conn
        .fetch_all(
            sqlx::query(
                "SELECT restaurant_id FROM favorites WHERE account_id = $1 ORDER BY created_at ASC, restaurant_id ASC",
            )
            .bind(account_id),
        )
        .await?;

    let mut ids: Vec<String> = Vec::with_capacity(results.len());
    for result in results.iter() {
        ids.push(result.try_get("restaurant_id")?);
    }

    Ok(ids)
}

#[tracing::instrument(skip(conn, comparison), fields(restaurant_id = %comparison.restaurant.id))]
pub async fn record_comparison(
    conn: &mut PoolConnection<Database>,
    account_id: &Uuid,
    comparison: &ComparisonResult,
) -> Result<(), Error> {
    conn.execute(
        sqlx::query("INSERT INTO comparisons (id, account_id, restaurant_id, best_platform, max_savings, created_at) VALUES ($1, $2, $3, $4, $5, $6)")
            .bind(Uuid::new_v4())
            .bind(account_id)
            .bind(&comparison.restaurant.id)
            .bind(&comparison.best_deal.platform)
            .bind(comparison.max_savings)
            .bind(Utc::now()),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(conn))]
pub async fn purge_expired_sessions(conn: &mut PoolConnection<Database>) -> Result<u64, Error> {
    let result = conn
        .execute(sqlx::query("DELETE FROM sessions WHERE expires_at <= now()"))
        .await?;

    Ok(result.rows_affected())
}
