pub mod board;
pub mod database;
pub mod models;
pub mod services;
pub mod settings;
pub mod web;
