use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{ComparisonEntry, ComparisonResult, Restaurant, SearchQuery};
use crate::error::Error;
use crate::server::extract::MaybeAuthenticated;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct BatchParams {
    ids: String,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Restaurant>>, Error> {
    let restaurants = api.search_restaurants(query).await?;

    Ok(restaurants.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, Error> {
    let restaurant = api.find_restaurant(id).await?;

    Ok(restaurant.into())
}

pub async fn prices(
    Extension(api): Extension<DynAPI>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    Path(id): Path<String>,
) -> Result<Json<ComparisonResult>, Error> {
    let comparison = api.compare_prices(user, id).await?;

    Ok(comparison.into())
}

pub async fn batch_prices(
    Extension(api): Extension<DynAPI>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    Query(params): Query<BatchParams>,
) -> Result<Json<Vec<ComparisonEntry>>, Error> {
    let ids = params
        .ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();

    let entries = api.compare_many(user, ids).await?;

    Ok(entries.into())
}
