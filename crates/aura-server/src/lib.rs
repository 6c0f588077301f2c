//! # aura-server
//!
//! Axum HTTP server and server-rendered HTML pages.
//!
//! - Episode CRUD with four linked reference sets (form POST + redirect flow)
//! - Reference management: symptoms, triggers, pain locations, attack types,
//!   medications
//! - Read-only schema browser (`/tables`, `/describe/{table}`, `/view/{table}`)
//! - Health check and graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod health;
pub mod server;
pub mod shutdown;
pub mod views;

pub use config::{ServerConfig, config_path, load_config, load_config_from_path};
pub use error::AppError;
pub use server::{AppState, AuraServer};
pub use shutdown::ShutdownCoordinator;
