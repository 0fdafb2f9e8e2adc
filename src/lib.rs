use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod entity;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routes;
pub mod routing_utils;
pub mod views;

/// Application state shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Shorthand for the extractor handlers use to reach [SharedData]
pub type AppState = State<Arc<SharedData>>;
