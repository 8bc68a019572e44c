use super::helpers::{
    fetch_account, fetch_account_by_email, fetch_favorite_ids, purge_expired_sessions,
};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::AuthAPI,
    auth::{hash_password, verify_password, User},
    entities::{normalize_email, Account, LoginResponse, Profile, Registration},
    error::{conflict_error, invalid_input_error, unauthorized_error, Error},
};

#[async_trait]
impl AuthAPI for Engine {
    #[tracing::instrument(skip(self, registration), fields(email = %registration.email))]
    async fn register(&self, registration: Registration) -> Result<Profile, Error> {
        let email = normalize_email(&registration.email);

        if !email.contains('@')
            || registration.first_name.trim().is_empty()
            || registration.password.is_empty()
        {
            return Err(invalid_input_error());
        }

        let mut roles = vec!["member".to_string()];
        if self.admin_emails.contains(&email) {
            roles.push("system".into());
        }

        let account = Account::new(
            email,
            registration.first_name.trim().to_string(),
            hash_password(&registration.password)?,
            registration.address.filter(|a| !a.trim().is_empty()),
            roles,
        );

        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(
                sqlx::query("INSERT INTO accounts (id, email, data) VALUES ($1, $2, $3) ON CONFLICT (email) DO NOTHING")
                    .bind(&account.id)
                    .bind(&account.email)
                    .bind(Json(&account)),
            )
            .await?;

        if result.rows_affected() == 0 {
            tracing::info!("account already exists");
            return Err(conflict_error());
        }

        Ok(account.profile(vec![]))
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, Error> {
        let mut conn = self.pool.acquire().await?;

        let account = fetch_account_by_email(&mut conn, &normalize_email(&email))
            .await?
            .filter(|account| verify_password(&password, &account.password_hash))
            .ok_or_else(unauthorized_error)?;

        let purged = purge_expired_sessions(&mut conn).await?;
        if purged > 0 {
            tracing::info!(purged, "removed expired sessions");
        }

        let session = self.sessions.issue(account.id)?;

        conn.execute(
            sqlx::query("INSERT INTO sessions (id, account_id, expires_at) VALUES ($1, $2, $3)")
                .bind(&session.id)
                .bind(&session.account_id)
                .bind(session.expires_at),
        )
        .await?;

        let favorites = fetch_favorite_ids(&mut conn, &account.id).await?;

        tracing::info!(session_id = %session.id, "session created");

        Ok(LoginResponse {
            access_token: session.access_token,
            token_type: "bearer".into(),
            user: account.profile(favorites),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn logout(&self, user: User) -> Result<(), Error> {
        let session_id = match user.session_id {
            Some(id) => id,
            None => return Ok(()),
        };

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("DELETE FROM sessions WHERE id = $1 AND account_id = $2")
                .bind(&session_id)
                .bind(&user.id),
        )
        .await?;

        tracing::info!(%session_id, "session destroyed");

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.sessions.verify(token)?;

        let mut conn = self.pool.acquire().await?;

        let query = "
            SELECT
                a.data AS data
            FROM
                sessions s
                JOIN accounts a ON a.id = s.account_id
            WHERE
                s.id = $1
                AND s.account_id = $2
                AND s.expires_at > now()
        ";

        let Json(account): Json<Account> = conn
            .fetch_optional(sqlx::query(query).bind(&claims.sid).bind(&claims.sub))
            .await?
            .ok_or_else(unauthorized_error)?
            .try_get("data")?;

        Ok(User::from_account(&account, claims.sid))
    }

    #[tracing::instrument(skip(self))]
    async fn find_profile(&self, user: User) -> Result<Profile, Error> {
        let mut conn = self.pool.acquire().await?;

        let account = fetch_account(&mut conn, &user.id).await?;

        self.authorize(user.clone(), "read", account.clone())?;

        let favorites = fetch_favorite_ids(&mut conn, &account.id).await?;

        Ok(account.profile(favorites))
    }
}

#[test]
#[ignore = "needs a local postgres"]
fn login_purges_expired_sessions_test() {
    use crate::catalog::{DynQuoteSource, SeedCatalog};
    use crate::db::PgPool;
    use crate::engine::test_config;
    use std::sync::Arc;
    use tokio_test::block_on;
    use uuid::Uuid;

    block_on(async {
        let config = test_config();
        let db = PgPool::new(&config.database_url, 1).await.unwrap();
        db.migrate().await.unwrap();

        let PgPool(pool) = db;
        let seed = Arc::new(SeedCatalog::load().unwrap());
        let engine =
            Engine::from_parts(pool.clone(), &config, seed.clone(), seed as DynQuoteSource).unwrap();

        let email = format!("{}@example.com", Uuid::new_v4());
        let profile = engine
            .register(Registration {
                email: email.clone(),
                first_name: "Ana".into(),
                password: "secret".into(),
                address: None,
            })
            .await
            .unwrap();

        pool.execute(
            sqlx::query("INSERT INTO sessions (id, account_id, expires_at) VALUES ($1, $2, now() - interval '1 hour')")
                .bind(Uuid::new_v4())
                .bind(profile.id),
        )
        .await
        .unwrap();

        let response = engine.login(email, "secret".into()).await.unwrap();
        assert_eq!(response.token_type, "bearer");

        let expired: i64 = pool
            .fetch_one(
                sqlx::query("SELECT COUNT(*) AS count FROM sessions WHERE account_id = $1 AND expires_at <= now()")
                    .bind(profile.id),
            )
            .await
            .unwrap()
            .try_get("count")
            .unwrap();
        assert_eq!(expired, 0);

        let user = engine.authenticate(&response.access_token).await.unwrap();
        assert_eq!(user.id, profile.id);
    });
}
