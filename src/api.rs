use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{
    ComparisonEntry, ComparisonResult, FavoriteState, LoginResponse, Profile, Registration,
    Restaurant, SearchQuery, UserStats,
};
use crate::error::Error;

#[async_trait]
pub trait AuthAPI {
    async fn register(&self, registration: Registration) -> Result<Profile, Error>;
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, Error>;
    async fn logout(&self, user: User) -> Result<(), Error>;
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
    async fn find_profile(&self, user: User) -> Result<Profile, Error>;
}

#[async_trait]
pub trait RestaurantAPI {
    async fn search_restaurants(&self, query: SearchQuery) -> Result<Vec<Restaurant>, Error>;
    async fn find_restaurant(&self, id: String) -> Result<Restaurant, Error>;
}

#[async_trait]
pub trait ComparisonAPI {
    async fn compare_prices(
        &self,
        user: Option<User>,
        restaurant_id: String,
    ) -> Result<ComparisonResult, Error>;

    async fn compare_many(
        &self,
        user: Option<User>,
        restaurant_ids: Vec<String>,
    ) -> Result<Vec<ComparisonEntry>, Error>;
}

#[async_trait]
pub trait FavoriteAPI {
    async fn set_favorite(
        &self,
        user: User,
        restaurant_id: String,
        favorite: bool,
    ) -> Result<FavoriteState, Error>;

    async fn find_favorites(&self, user: User) -> Result<Vec<Restaurant>, Error>;
}

#[async_trait]
pub trait StatsAPI {
    async fn find_stats(&self, user: User, account_id: Uuid) -> Result<UserStats, Error>;
}

pub trait API: AuthAPI + RestaurantAPI + ComparisonAPI + FavoriteAPI + StatsAPI {}
