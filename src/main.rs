use std::net::SocketAddr;

use platecompare::config::Config;
use platecompare::db::PgPool;
use platecompare::engine::Engine;
use platecompare::error::{config_error, Error};
use platecompare::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|_| config_error("BIND_ADDRESS"))?;

    let db = PgPool::new(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;

    let PgPool(pool) = db;
    let engine = Engine::new(pool, &config)?;

    serve(engine, addr).await
}
