//! Complaint statuses.
//!
//! Statuses are free-text names ordered by `position`. The seeded set is
//! Pending, In Progress, Resolved and Rejected; admins may add more. There is
//! no stored transition graph; see [`crate::features::complaints::workflow`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/Status/GetAll` | List statuses by position (public) |
//! | POST | `/api/Status/Create` | Append a status (admin) |
//! | PUT | `/api/Status/Update/{id}` | Rename a status (admin) |
//! | DELETE | `/api/Status/Delete/{id}` | Delete a status (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StatusService;
