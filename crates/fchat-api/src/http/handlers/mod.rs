//! HTTP request handlers for the fchat API.

pub mod auth;
pub mod chat;
