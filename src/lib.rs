pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod idgen;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
