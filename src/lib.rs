pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
