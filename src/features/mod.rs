pub mod auth;
pub mod categories;
pub mod complaints;
pub mod statuses;
pub mod users;
