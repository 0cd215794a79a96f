pub mod admin;
pub mod auth;
pub mod bookings;
pub mod root;
pub mod services;
pub mod users;
pub mod workers;
