use async_trait::async_trait;
use axum::extract::{Extension, FromRequest, RequestParts};
use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::auth::User;
use crate::error::{unauthorized_error, unexpected_error, Error};
use crate::server::DynAPI;

/// A request carrying a valid bearer token for a live session.
pub struct Authenticated(pub User);

/// Like [`Authenticated`], but anonymous requests are let through.
pub struct MaybeAuthenticated(pub Option<User>);

#[async_trait]
impl<B> FromRequest<B> for Authenticated
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(req.headers()).ok_or_else(unauthorized_error)?;

        let Extension(api) = Extension::<DynAPI>::from_request(req)
            .await
            .map_err(|_| unexpected_error())?;

        let user = api.authenticate(&token).await?;

        Ok(Self(user))
    }
}

#[async_trait]
impl<B> FromRequest<B> for MaybeAuthenticated
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        if bearer_token(req.headers()).is_none() {
            return Ok(Self(None));
        }

        let Authenticated(user) = Authenticated::from_request(req).await?;

        Ok(Self(Some(user)))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return None;
    }

    Some(token.trim().to_string())
}

#[test]
fn bearer_token_test() {
    use axum::http::HeaderValue;

    let mut headers = HeaderMap::new();
    assert_eq!(bearer_token(&headers), None);

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
    assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));

    headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer   xyz "));
    assert_eq!(bearer_token(&headers), Some("xyz".to_string()));

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
    assert_eq!(bearer_token(&headers), None);

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
    assert_eq!(bearer_token(&headers), None);
}
