//! Citizen complaints.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/Complaint/GetAll` | All complaints (admin) |
//! | GET | `/api/Complaint/GetAllUserComplaints` | Caller's complaints |
//! | GET | `/api/Complaint/Get/{id}` | One complaint (submitter or admin) |
//! | GET | `/api/Complaint/Directions/{id}` | Maps deep link for the caller's device |
//! | POST | `/api/Complaint/Submit` | Multipart submission with photo |
//! | PUT | `/api/Complaint/UpdateStatus/{id}` | Set any status (admin) |
//!
//! [`workflow`], [`location`] and [`media`] hold the pure rules and are
//! shared with [`crate::client`].

pub mod dtos;
pub mod handlers;
pub mod location;
pub mod media;
pub mod models;
pub mod routes;
pub mod services;
pub mod workflow;

pub use services::ComplaintService;
