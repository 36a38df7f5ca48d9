//! HTTP handlers for all web routes.

pub mod home;
pub mod chat;
pub mod species;
pub mod comments;
pub mod users;
pub mod chart;
pub mod wikipedia;
