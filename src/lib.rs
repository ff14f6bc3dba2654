//! Stockpanel - inventory administration client
//!
//! This library provides the pieces behind a product-inventory admin panel:
//! a queued confirmation-modal system, auto-expiring toast notifications, an
//! inventory API abstraction, and the product workflows that tie them
//! together.
//!
//! # Modules
//!
//! * [`notifications`] - Modal and toast queues
//! * [`context`] - Capability injection for consumers
//! * [`api`] - Inventory API interface and in-memory backend
//! * [`products`] - Product workflows reporting through modals and toasts
//! * [`config`] - Application configuration management

/// Inventory API interface, models and backends
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Capability injection
pub mod context;

/// Icon definitions for modal and toast kinds
pub mod icons;

/// Logging setup
pub mod logger;

/// Confirmation modals and toast notifications
pub mod notifications;

/// Product workflows
pub mod products;

/// Colours and button styles
pub mod style;

pub use context::AppContext;
pub use notifications::Notifications;
