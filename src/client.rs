//! Lease management operations
//!
//! Each operation is a linear sequence of awaited API calls. Fetch failures
//! abort the operation; failures on individual reservation or removal
//! records are reported and the loop moves on to the next record.

use crate::{
    api::{ApiClient, Outcome},
    config::ClientConfig,
    error::Result,
    model::{Disposition, ExclusionFilter, Lease, ReservationRequest},
    storage,
};
use std::{net::Ipv4Addr, path::Path};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSummary {
    pub reserved: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupSummary {
    pub removed: usize,
    pub failed: usize,
    /// Excluded but pinned by a reservation.
    pub reserved: usize,
    /// Outside every exclusion range.
    pub kept: usize,
    /// Unparseable records or addresses.
    pub skipped: usize,
}

pub struct DhcpClient {
    api: ApiClient,
}

impl DhcpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn with_api(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    /// Fetches the lease list and overwrites the local leases file with it.
    pub async fn get_leases(&self) -> Result<usize> {
        let leases = self.api.list_leases().await?;
        let path = storage::write_leases(&self.config().leases_path, &leases)?;
        println!("Wrote {} leases to {}", leases.len(), path.display());
        Ok(leases.len())
    }

    /// Converts every request in `path` into a server-side reservation.
    ///
    /// Falls back to the configured reservations file when `path` is `None`.
    /// A missing file is reported and treated as nothing to do. Records that
    /// lack a hardware address or address are counted as failed and skipped.
    pub async fn reserve_leases(&self, path: Option<&Path>) -> Result<ReserveSummary> {
        let path = path.unwrap_or(self.config().reservations_path.as_path());
        let mut summary = ReserveSummary::default();

        let Some(records) = storage::read_reservations(path)? else {
            let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            println!("File not found: {}", abs.display());
            return Ok(summary);
        };

        for (index, record) in records.into_iter().enumerate() {
            let request: ReservationRequest = match serde_json::from_value(record) {
                Ok(request) => request,
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!("Reservation record {} is invalid: {}", index + 1, e);
                    println!("Skipping invalid reservation record {}: {}", index + 1, e);
                    continue;
                }
            };

            match self.api.add_reserved_lease(&request).await {
                Ok(Outcome::Accepted) => {
                    summary.reserved += 1;
                    println!("{}", reservation_line(&request));
                }
                Ok(Outcome::Rejected { status, body }) => {
                    summary.failed += 1;
                    tracing::warn!(
                        "Reservation for {} rejected with {}",
                        request.hardware_address,
                        status
                    );
                    println!(
                        "Failed to add reserved lease for {}: {}",
                        request.hardware_address, body
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!("Reservation for {} failed: {}", request.hardware_address, e);
                    println!(
                        "Failed to add reserved lease for {}: {}",
                        request.hardware_address, e
                    );
                }
            }
        }

        tracing::info!(
            "Reservations: {} added, {} failed",
            summary.reserved,
            summary.failed
        );
        Ok(summary)
    }

    /// Removes leases of `scope_name` that sit in an exclusion range and are not reserved.
    pub async fn cleanup_excluded_leases(&self, scope_name: &str) -> Result<CleanupSummary> {
        let scope = self.api.get_scope(scope_name).await?;
        tracing::debug!(
            "Scope '{}': {} exclusion ranges, {} reserved leases",
            scope_name,
            scope.exclusions.len(),
            scope.reserved_leases.len()
        );
        let filter = ExclusionFilter::new(&scope);
        let leases = self.api.list_leases().await?;

        let mut summary = CleanupSummary::default();
        for raw in leases {
            let lease: Lease = match serde_json::from_value(raw) {
                Ok(lease) => lease,
                Err(e) => {
                    tracing::warn!("Skipping unreadable lease record: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let Ok(addr) = lease.address.parse::<Ipv4Addr>() else {
                tracing::warn!("Skipping lease with invalid address '{}'", lease.address);
                summary.skipped += 1;
                continue;
            };

            match filter.classify(&lease, addr) {
                Disposition::Keep => summary.kept += 1,
                Disposition::Reserved => {
                    tracing::debug!("Lease {} is excluded but reserved, keeping", lease.address);
                    summary.reserved += 1;
                }
                Disposition::Remove => {
                    if self.remove(&lease, scope_name).await {
                        summary.removed += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Cleanup of scope '{}': {} removed, {} failed, {} reserved, {} kept, {} skipped",
            scope_name,
            summary.removed,
            summary.failed,
            summary.reserved,
            summary.kept,
            summary.skipped
        );
        Ok(summary)
    }

    async fn remove(&self, lease: &Lease, default_scope: &str) -> bool {
        let identifier = lease.identifier();
        let label = identifier.map(|id| id.value()).unwrap_or("unknown");
        let scope = lease.scope_name(default_scope);

        match self.api.remove_lease(scope, identifier).await {
            Ok(Outcome::Accepted) => {
                println!("Removed lease {} ({})", lease.address, label);
                true
            }
            Ok(Outcome::Rejected { status, body }) => {
                tracing::warn!("Removal of {} rejected with {}", lease.address, status);
                println!("Failed to remove lease {}: {}", lease.address, body);
                false
            }
            Err(e) => {
                tracing::warn!("Removal of {} failed: {}", lease.address, e);
                println!("Failed to remove lease {}: {}", lease.address, e);
                false
            }
        }
    }
}

/// Fixed-width report line for an accepted reservation.
pub fn reservation_line(request: &ReservationRequest) -> String {
    format!(
        "{:20} {:20} {:15}",
        request.hardware_address,
        request.host_name.as_deref().unwrap_or(""),
        request.address
    )
}
