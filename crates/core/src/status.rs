// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background-execution availability
//!
//! A read-only classification of whether the OS currently permits
//! background execution. Recomputed on demand from the platform adapter,
//! never cached beyond the query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the OS permits background execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    /// Background execution is unavailable and the user cannot enable it
    /// (eg a parental-controls or policy block)
    Restricted,
    /// Background behavior was explicitly disabled for this app or for the
    /// whole system
    Denied,
    /// Background execution is available and enabled
    Available,
}

impl AvailabilityStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Restricted => write!(f, "restricted"),
            AvailabilityStatus::Denied => write!(f, "denied"),
            AvailabilityStatus::Available => write!(f, "available"),
        }
    }
}

impl std::str::FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restricted" => Ok(AvailabilityStatus::Restricted),
            "denied" => Ok(AvailabilityStatus::Denied),
            "available" => Ok(AvailabilityStatus::Available),
            _ => Err(format!("unknown availability status: {}", s)),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
