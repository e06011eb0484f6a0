pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod seed;
