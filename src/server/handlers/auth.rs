use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{LoginResponse, Profile, Registration};
use crate::error::Error;
use crate::server::extract::Authenticated;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LoginParams {
    email: String,
    password: String,
}

pub async fn register(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<Registration>,
) -> Result<Json<Profile>, Error> {
    let profile = api.register(params).await?;

    Ok(profile.into())
}

pub async fn login(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LoginParams>,
) -> Result<Json<LoginResponse>, Error> {
    let response = api.login(params.email, params.password).await?;

    Ok(response.into())
}

pub async fn logout(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
) -> Result<Json<()>, Error> {
    api.logout(user).await?;

    Ok(().into())
}

pub async fn me(
    Extension(api): Extension<DynAPI>,
    Authenticated(user): Authenticated,
) -> Result<Json<Profile>, Error> {
    let profile = api.find_profile(user).await?;

    Ok(profile.into())
}
