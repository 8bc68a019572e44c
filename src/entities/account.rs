use chrono::{DateTime, Utc};
use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PolarClass)]
pub struct Account {
    #[polar(attribute)]
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        email: String,
        first_name: String,
        password_hash: String,
        address: Option<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(&email),
            first_name,
            password_hash,
            address,
            roles,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self, favorites: Vec<String>) -> Profile {
        Profile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            address: self.address.clone(),
            favorites,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public view of an account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub address: Option<String>,
    pub favorites: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub password: String,
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Profile,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FavoriteState {
    pub restaurant_id: String,
    pub favorite: bool,
}
