pub mod admin;
pub mod auth;
pub mod blog;
pub mod chat;
pub mod health;
pub mod provider;
pub mod providers;
pub mod reference;
pub mod requests;
pub mod reviews;
pub mod uploads;
