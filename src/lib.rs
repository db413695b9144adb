//! Citizen complaint desk.
//!
//! The crate carries both sides of the complaint system: the axum backend
//! serving the `/api` endpoints (see `main.rs`) and a typed async client SDK
//! under [`client`] that talks to it.

pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
