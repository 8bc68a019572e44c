use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    pub image_url: String,
    pub average_rating: f64,
    pub estimated_delivery_time: String,
    pub location: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub cuisine: Option<String>,
    pub location: Option<String>,
}

impl SearchQuery {
    /// Case-insensitive substring match on every filter that is set. Empty
    /// filters match everything.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        contains(&restaurant.name, self.q.as_deref())
            && contains(&restaurant.cuisine_type, self.cuisine.as_deref())
            && contains(&restaurant.location, self.location.as_deref())
    }
}

fn contains(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim) {
        Some(needle) if !needle.is_empty() => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => true,
    }
}
