// src/handlers/mod.rs

pub mod auth;
pub mod feed;
pub mod interaction;
pub mod user;
