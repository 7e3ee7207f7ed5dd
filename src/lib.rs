//! # Leasectl - DHCP Server Lease Administration
//!
//! Leasectl is a command-line client for the HTTP management API of a DHCP
//! server. It snapshots active leases to local JSON, turns a hand-edited list
//! of leases into server-side reservations, and purges dynamic leases that
//! fall inside a scope's exclusion ranges.
//!
//! ## Features
//!
//! - Lease export to `data/leases.json`
//! - Bulk reservation from `data/reserved-leases.json`
//! - Exclusion-range cleanup that never touches reserved addresses
//! - Per-record failure isolation for every write
//!
//! ## Example
//!
//! ```rust,no_run
//! use leasectl::{ClientConfig, DhcpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://dhcp.local:5380", "api-token");
//!     let client = DhcpClient::new(config);
//!     let count = client.get_leases().await?;
//!     println!("Saved {} leases", count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use api::{ApiClient, Outcome};
pub use client::{CleanupSummary, DhcpClient, ReserveSummary};
pub use commands::Command;
pub use config::{Args, ClientConfig};
pub use error::{Error, Result};
pub use model::{Lease, ReservationRequest, Scope};
