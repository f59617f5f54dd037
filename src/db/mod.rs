// src/db/mod.rs

pub mod post_repo;
pub mod user_repo;
