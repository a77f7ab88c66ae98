pub mod auth;
pub mod catalog;
pub mod hours_bank;
pub mod inventory;
pub mod notification;
pub mod org;
