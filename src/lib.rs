//! # Quartz TUI - Trading Platform Dashboard
//!
//! A terminal dashboard for the Quartz multi-agent trading platform.
//! It polls the platform's HTTP API proxy and renders agent health, the
//! portfolio, candidate stocks, on-demand technical analysis, auth token
//! status and the macro-economic report.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Core application lifecycle and event loop
//! - **Poll**: Polling shell — named resources, refresh timers, cache entries
//! - **Api**: Typed client for the Quartz API proxy
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **UI**: Layout and rendering logic
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod poll;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
