mod account;
mod comparison;
mod quote;
mod restaurant;
mod stats;

pub use account::{normalize_email, Account, FavoriteState, LoginResponse, Profile, Registration};
pub use comparison::{compare, ComparisonResult};
pub use quote::{round_money, PlatformQuote, RawQuote, MONEY_SCALE};
pub use restaurant::{Restaurant, SearchQuery};
pub use stats::{ComparisonEntry, UserStats};
