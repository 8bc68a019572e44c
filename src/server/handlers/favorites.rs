use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::entities::{FavoriteState, Restaurant};
use crate::error::Error;
use crate::server::extract::Authenticated;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SetParams {
    favorite: bool,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
) -> Result<Json<Vec<Restaurant>>, Error> {
    let favorites = api.find_favorites(user).await?;

    Ok(favorites.into())
}

pub async fn set(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    Json(params): Json<SetParams>,
) -> Result<Json<FavoriteState>, Error> {
    let state = api.set_favorite(user, id, params.favorite).await?;

    Ok(state.into())
}

pub async fn add(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<FavoriteState>, Error> {
    let state = api.set_favorite(user, id, true).await?;

    Ok(state.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<FavoriteState>, Error> {
    let state = api.set_favorite(user, id, false).await?;

    Ok(state.into())
}
