//! vendor-panel library
//!
//! Typed client and local state for the restaurant vendor administration API:
//! catalog, products, bank accounts, bookings, plans and notifications, plus
//! the OTP login flow and plan gating used by the CLI.

pub mod api;
pub mod auth;
pub mod config;
pub mod export;
pub mod filter;
pub mod guard;
pub mod logging;
pub mod models;
pub mod notify;
pub mod optimistic;
pub mod session;
pub mod validate;
