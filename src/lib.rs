pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod glpi;
pub mod handlers;
pub mod services;
