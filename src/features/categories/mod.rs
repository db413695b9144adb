//! Complaint categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/Category/GetAll` | List categories by name (public) |
//! | POST | `/api/Category/Create` | Create a category (admin) |
//! | PUT | `/api/Category/Update/{id}` | Update a category (admin) |
//! | DELETE | `/api/Category/Delete/{id}` | Delete a category (admin) |
//!
//! Deleting a category detaches its complaints; they report `"Unknown"`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
