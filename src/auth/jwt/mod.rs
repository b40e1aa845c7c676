//! JWT token handling
//!
//! HS256 access tokens carrying the user id and role.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler};
