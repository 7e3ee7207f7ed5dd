//! Records exchanged with the DHCP server's management API
//!
//! Field names follow the server's camelCase JSON. Only the fields this client
//! acts on are modelled; lease lists are persisted from the raw JSON so
//! unknown fields survive untouched.

use serde::Deserialize;
use std::{collections::HashSet, net::Ipv4Addr};

pub const DEFAULT_SCOPE: &str = "Default";

/// Envelope wrapping every successful API payload.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub response: T,
}

#[derive(Debug, Deserialize)]
pub struct LeaseList {
    #[serde(default)]
    pub leases: Vec<serde_json::Value>,
}

/// A dynamic binding reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    #[serde(default)]
    pub hardware_address: Option<String>,
    #[serde(default)]
    pub client_identifier: Option<String>,
    pub address: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// How a lease is addressed in a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseIdentifier<'a> {
    HardwareAddress(&'a str),
    ClientIdentifier(&'a str),
}

impl<'a> LeaseIdentifier<'a> {
    /// Query parameter name and value.
    pub fn as_param(&self) -> (&'static str, &'a str) {
        match self {
            Self::HardwareAddress(value) => ("hardwareAddress", *value),
            Self::ClientIdentifier(value) => ("clientIdentifier", *value),
        }
    }

    pub fn value(&self) -> &'a str {
        self.as_param().1
    }
}

impl Lease {
    /// Hardware address wins over client identifier whenever it is present.
    pub fn identifier(&self) -> Option<LeaseIdentifier<'_>> {
        if let Some(hw) = &self.hardware_address {
            Some(LeaseIdentifier::HardwareAddress(hw))
        } else {
            self.client_identifier
                .as_deref()
                .map(LeaseIdentifier::ClientIdentifier)
        }
    }

    pub fn scope_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.scope.as_deref().unwrap_or(fallback)
    }
}

/// An operator-authored request to pin a lease as a static reservation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub hardware_address: String,
    pub address: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl ReservationRequest {
    pub fn scope_name(&self) -> &str {
        self.scope.as_deref().unwrap_or(DEFAULT_SCOPE)
    }
}

/// Inclusive address interval excluded from dynamic allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRange {
    pub starting_address: Ipv4Addr,
    pub ending_address: Ipv4Addr,
}

impl ExclusionRange {
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.starting_address <= addr && addr <= self.ending_address
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservedLease {
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default)]
    pub exclusions: Vec<ExclusionRange>,
    #[serde(default)]
    pub reserved_leases: Vec<ReservedLease>,
}

impl Scope {
    pub fn is_excluded(&self, addr: Ipv4Addr) -> bool {
        self.exclusions.iter().any(|range| range.contains(addr))
    }

    pub fn reserved_addresses(&self) -> HashSet<&str> {
        self.reserved_leases
            .iter()
            .map(|r| r.address.as_str())
            .collect()
    }
}

/// Verdict for a single lease during cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Inside an exclusion range and not reserved.
    Remove,
    /// Inside an exclusion range but pinned by a reservation.
    Reserved,
    /// Outside every exclusion range.
    Keep,
}

/// Classifies leases of one scope against its exclusions and reservations.
pub struct ExclusionFilter<'a> {
    scope: &'a Scope,
    reserved: HashSet<&'a str>,
}

impl<'a> ExclusionFilter<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            reserved: scope.reserved_addresses(),
        }
    }

    pub fn classify(&self, lease: &Lease, addr: Ipv4Addr) -> Disposition {
        if !self.scope.is_excluded(addr) {
            Disposition::Keep
        } else if self.reserved.contains(lease.address.as_str()) {
            Disposition::Reserved
        } else {
            Disposition::Remove
        }
    }
}
