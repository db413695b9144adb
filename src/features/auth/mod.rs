mod password;
mod validator;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod policy;
pub mod routes;
pub mod services;

pub use password::{hash_password, verify_password};
pub use validator::JwtValidator;
