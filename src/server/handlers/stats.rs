use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::entities::UserStats;
use crate::error::Error;
use crate::server::extract::Authenticated;
use crate::server::DynAPI;

pub async fn mine(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
) -> Result<Json<UserStats>, Error> {
    let account_id = user.id;
    let stats = api.find_stats(user, account_id).await?;

    Ok(stats.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
    Path(account_id): Path<Uuid>,
) -> Result<Json<UserStats>, Error> {
    let stats = api.find_stats(user, account_id).await?;

    Ok(stats.into())
}
