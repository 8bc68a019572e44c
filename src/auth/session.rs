use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{unauthorized_error, unexpected_error, Error};

/// A signed-in session. Created at login and destroyed at logout; the access
/// token stays valid only while the session row exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub account_id: Uuid,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub sid: Uuid,
    pub exp: i64,
}

pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn issue(&self, account_id: Uuid) -> Result<Session, Error> {
        let id = Uuid::new_v4();
        // whole seconds, so the row and the token agree on expiry
        let expires_at = Utc
            .timestamp_opt((Utc::now() + self.ttl).timestamp(), 0)
            .single()
            .ok_or_else(unexpected_error)?;

        let claims = Claims {
            sub: account_id,
            sid: id,
            exp: expires_at.timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| unexpected_error())?;

        Ok(Session {
            id,
            account_id,
            access_token,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| unauthorized_error())?;

        Ok(data.claims)
    }
}

#[test]
fn issued_token_verifies_test() {
    let keys = SessionKeys::new("test-secret", Duration::minutes(30));
    let account_id = Uuid::new_v4();

    let session = keys.issue(account_id).unwrap();
    let claims = keys.verify(&session.access_token).unwrap();

    assert_eq!(claims.sub, account_id);
    assert_eq!(claims.sid, session.id);
    assert_eq!(claims.exp, session.expires_at.timestamp());
}

#[test]
fn token_from_other_secret_is_rejected_test() {
    let keys = SessionKeys::new("test-secret", Duration::minutes(30));
    let other = SessionKeys::new("other-secret", Duration::minutes(30));

    let session = other.issue(Uuid::new_v4()).unwrap();

    assert_eq!(keys.verify(&session.access_token).unwrap_err().code, 103);
}

#[test]
fn expired_token_is_rejected_test() {
    let keys = SessionKeys::new("test-secret", Duration::minutes(-10));

    let session = keys.issue(Uuid::new_v4()).unwrap();

    assert!(keys.verify(&session.access_token).is_err());
}

#[test]
fn garbage_token_is_rejected_test() {
    let keys = SessionKeys::new("test-secret", Duration::minutes(30));

    assert!(keys.verify("not.a.token").is_err());
}
