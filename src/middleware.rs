pub mod auth;
pub mod guard;
pub mod tenancy;
