//! User accounts.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/User/GetAll` | List all users (admin) |
//! | PUT | `/api/User/UpdateRole/{id}` | Change a user's role (admin) |
//!
//! Login, registration and `/api/User/Me` live in the auth feature.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
