//! Core of the MM Africa Safaris website: the tour catalog, inquiry intake and
//! lifecycle, and best-effort e-mail notifications.

pub mod catalog;
pub mod config;
pub mod error;
pub mod inquiries;
pub mod notifications;
pub mod seed;
pub mod store;
pub mod telemetry;
