//! Shared application state for request handlers.
//!
//! The only mutable piece is the availability flag the load balancer probes;
//! everything else is immutable configuration captured at startup.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;

/// Togglable availability flag reported to the load balancer.
///
/// Clones share the underlying flag. All transitions go through atomic
/// swaps, so concurrent toggles never lose an update and concurrent probes
/// never observe a torn value.
#[derive(Clone)]
pub struct Availability {
    available: Arc<AtomicBool>,
}

impl Availability {
    pub fn new(available: bool) -> Self {
        Self {
            available: Arc::new(AtomicBool::new(available)),
        }
    }

    /// Current value, as reported by `HEAD /health`.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Atomically clear the flag. Returns whether it was set before.
    pub fn disable(&self) -> bool {
        self.available.swap(false, Ordering::SeqCst)
    }

    /// Atomically set the flag. Returns whether it was set before.
    pub fn enable(&self) -> bool {
        self.available.swap(true, Ordering::SeqCst)
    }
}

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub availability: Availability,
    /// When this state was built. Reset by a reload/restart; informational only.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the process-wide state, seeding the availability flag from the
    /// zone marker file.
    ///
    /// This is the only construction path; it performs the one startup read
    /// of the marker file so that request handling never touches the disk.
    pub fn initialize(config: AppConfig) -> Self {
        let available = seed_availability(
            config.deployment.zone.as_deref(),
            Path::new(&config.deployment.marker_file),
        );
        Self {
            config: Arc::new(config),
            availability: Availability::new(available),
            started_at: Utc::now(),
        }
    }
}

/// Decide initial availability by comparing the configured zone against the
/// first line of the marker file.
///
/// A missing or unreadable marker means nobody has designated an active zone
/// on this host, so the process assumes it is the current version. A readable
/// marker naming a different zone (or any marker when no zone is configured)
/// seeds the flag to unavailable.
fn seed_availability(zone: Option<&str>, marker_file: &Path) -> bool {
    match std::fs::read_to_string(marker_file) {
        Ok(contents) => {
            let current = contents.lines().next().unwrap_or("");
            let matches = zone == Some(current);
            if matches {
                tracing::debug!(zone = current, "Zone marker matches configured zone");
            } else {
                tracing::info!(
                    marker = current,
                    zone = zone.unwrap_or("<unset>"),
                    "Zone marker names another zone, starting as unavailable"
                );
            }
            matches
        }
        Err(err) => {
            tracing::info!(
                path = %marker_file.display(),
                error = %err,
                "Zone marker not readable, assuming current version"
            );
            true
        }
    }
}
