//! Host capability seams.
//!
//! The core never talks to a device directly. Whatever embeds it (a browser
//! shell, a mobile bridge, the CLI) supplies a [`GeolocationHost`] and a
//! [`NotificationHost`]. Either may be entirely absent on a given host; the
//! implementations report that through `is_supported` and the core records
//! it as `unsupported` instead of failing.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{Coordinate, LocationPermission, NotificationPermission};

/// Options passed to the host with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most precise fix the host can give
    pub high_accuracy: bool,
    /// How long a single fix may take
    pub timeout: Duration,
    /// Oldest cached fix the host may hand back instead of a fresh one
    pub maximum_age: Option<Duration>,
}

/// Failure reported by the host for a position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("timed out")]
    Timeout,
}

/// One delivery from the host: a coordinate or the reason there is none.
pub type PositionFix = Result<Coordinate, PositionError>;

/// Device position provider.
pub trait GeolocationHost: Send + Sync + 'static {
    /// False when the host has no geolocation at all.
    fn is_supported(&self) -> bool;

    /// Permission as the host reports it, or `None` when the host has no way
    /// to query it.
    fn permission(&self) -> Option<LocationPermission> {
        None
    }

    /// Resolves exactly once with a fix or an error.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = PositionFix> + Send;

    /// Starts a continuous subscription. Fixes arrive in host order on the
    /// returned channel. Dropping the receiver releases the subscription; the
    /// host ends it by dropping the sender.
    fn watch_position(
        &self,
        options: &PositionOptions,
    ) -> Result<mpsc::Receiver<PositionFix>, PositionError>;
}

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    /// Alerts with the same tag replace each other on the host
    pub tag: String,
}

/// Failure reported by the host when showing an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DispatchError(pub String);

/// Alert provider.
pub trait NotificationHost: Send + Sync {
    /// False when the host cannot show alerts at all.
    fn is_supported(&self) -> bool;

    /// Permission as the host currently reports it.
    fn permission(&self) -> NotificationPermission;

    /// Prompts the user. Resolves with their answer.
    fn request_permission(&self) -> impl Future<Output = NotificationPermission> + Send;

    fn show(&self, alert: &Alert) -> Result<(), DispatchError>;

    /// Removes a previously shown alert, if the host supports that.
    fn dismiss(&self, _tag: &str) {}
}
