pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod logging;
pub mod services;
pub mod source;

#[cfg(test)]
pub mod testing;
