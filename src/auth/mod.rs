pub mod authorizor;
mod password;
mod session;
mod user;

pub use password::{hash_password, verify_password};
pub use session::{Claims, Session, SessionKeys};
pub use user::User;
