pub mod auth;
pub mod catalog;
pub mod clients;
pub mod hours_banks;
pub mod inventory;
pub mod notifications;
pub mod org;
pub mod users;
