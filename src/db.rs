use sqlx::{postgres::PgPoolOptions, Executor, Pool, Postgres};

pub struct PgPool(pub Pool<Postgres>);

impl PgPool {
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Ok(Self(pool))
    }

    /// Creates every table the engine needs; safe to run on each start.
    #[tracing::instrument(name = "PgPool::migrate", skip_all)]
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        let pool = &self.0;

        // accounts (KV store keyed by id, unique email)
        pool.execute("CREATE TABLE IF NOT EXISTS accounts (id UUID PRIMARY KEY, email VARCHAR NOT NULL UNIQUE, data JSONB NOT NULL)")
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS sessions (id UUID PRIMARY KEY, account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE, expires_at TIMESTAMPTZ NOT NULL)")
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS favorites (account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE, restaurant_id VARCHAR NOT NULL, created_at TIMESTAMPTZ NOT NULL DEFAULT now(), PRIMARY KEY (account_id, restaurant_id))")
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS comparisons (id UUID PRIMARY KEY, account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE, restaurant_id VARCHAR NOT NULL, best_platform VARCHAR NOT NULL, max_savings NUMERIC(12, 2) NOT NULL, created_at TIMESTAMPTZ NOT NULL)")
            .await?;

        pool.execute("DELETE FROM sessions WHERE expires_at <= now()")
            .await?;

        Ok(())
    }
}
