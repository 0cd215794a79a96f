pub mod booking;
pub mod payment;
pub mod pricing;
pub mod rules;
pub mod service;
pub mod user;
pub mod worker;

pub use booking::*;
pub use payment::*;
pub use service::*;
pub use user::*;
pub use worker::*;
