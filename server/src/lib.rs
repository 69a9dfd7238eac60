pub mod alerts;
pub mod broadcast;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod state;
