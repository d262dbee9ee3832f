//! BSNL Prepaid Balance API Library
//!
//! Resolves telecom circle metadata, builds the vendor balance-inquiry
//! request, submits it to the prepaid portal and normalizes the free-text
//! reply into `{"status","balance","expiry"}`.
//!
//! # Modules
//!
//! - `balance`: Request builder and vendor response interpreter.
//! - `circles`: In-memory circle directories (prepaid and postpaid).
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and routing.
//! - `models`: Feed, vendor and API data models.
//! - `portal_client`: Outbound client for the vendor portal and circle feeds.
//! - `services`: Balance inquiry orchestration.

pub mod balance;
pub mod circles;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod portal_client;
pub mod services;
