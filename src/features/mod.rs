pub mod auth;
pub mod donations;
pub mod individuals;
pub mod organizations;
pub mod recommendations;
pub mod regions;
pub mod users;
