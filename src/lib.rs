//! Matwork - a Terminal User Interface (TUI) for a technique taxonomy
//!
//! This library provides a terminal-based browser for a media server's
//! technique taxonomy and an assignment flow for filing a media item under
//! an existing or newly created technique. It talks to the server's JSON
//! API and renders with Ratatui.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`api`] - HTTP client and backend abstraction
//! * [`config`] - Application configuration management
//! * [`selection`] - Assignment target selection state machine
//! * [`store`] - Async request store emitting typed events
//! * [`techniques`] - Taxonomy data model and counting
//! * [`ui`] - Terminal user interface components

/// HTTP API client and the backend trait the store runs against
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Assignment selection state and submission target resolution
pub mod selection;

/// Async store bridging the API and the UI event loop
pub mod store;

/// Taxonomy tree data model
pub mod techniques;

/// Terminal user interface components and rendering
pub mod ui;
