pub mod cli;
pub mod config;
pub mod models;
pub mod resource;
pub mod services;
pub mod startup;
