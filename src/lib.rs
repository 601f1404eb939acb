//! idata-slot-watch library
//!
//! This crate provides the core functionality for the appointment-watcher
//! binaries. Keep the crate root minimal — implementation and tests live in
//! their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of the
//! slot-watching loop:
//!
//! - [`client`] - Session handshake (token extraction) and the POST calls against the booking site
//! - [`parser`] - Extracts date and time-slot strings from the site's HTML responses
//! - [`dates`] - Strict `dd-mm-yyyy` filtering and calendar-range generation
//! - [`finder`] - Office registry plus the query orchestration on top of the client
//! - [`notifier`] - WhatsApp notifications through the CallMeBot gateway
//! - [`watch`] - The two infinite polling loops shared by the binaries
//! - [`config`] - TOML-loadable watcher configuration
//! - [`logging`] - Per-binary append-mode file logging
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The typical workflow registers offices and phones, then hands everything to
//! one of the watch loops:
//!
//! ```no_run
//! use idata_slot_watch::{finder::AppointmentFinder, notifier::WhatsAppNotifier, watch};
//! use std::time::Duration;
//!
//! # async fn example() -> idata_slot_watch::errors::AppResult<()> {
//! let mut finder = AppointmentFinder::new()?;
//! finder.add_office("Altunizade", 8);
//!
//! let mut notifier = WhatsAppNotifier::new()?;
//! notifier.register("+905551112233", "API_KEY");
//!
//! watch::watch_available_dates(&finder, &notifier, "18-11-2023", Duration::from_secs(60)).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod finder;
pub mod logging;
pub mod notifier;
pub mod parser;
pub mod watch;
