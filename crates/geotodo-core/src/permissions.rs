//! Process-wide permission state, published to observers.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use crate::models::{LocationPermission, NotificationPermission, PermissionState};

/// Shared handle on the current [`PermissionState`].
///
/// Clones share one state. The location watch writes the location field and
/// the notification gate writes the notification field; the last write wins.
/// The presentation layer reads snapshots or subscribes for changes.
#[derive(Debug, Clone)]
pub struct PermissionTracker {
    tx: Arc<watch::Sender<PermissionState>>,
}

impl PermissionTracker {
    pub fn new(initial: PermissionState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Current value of both fields.
    pub fn snapshot(&self) -> PermissionState {
        *self.tx.borrow()
    }

    /// Receiver that is notified whenever either field changes.
    pub fn subscribe(&self) -> watch::Receiver<PermissionState> {
        self.tx.subscribe()
    }

    pub fn location(&self) -> LocationPermission {
        self.tx.borrow().location
    }

    pub fn notification(&self) -> NotificationPermission {
        self.tx.borrow().notification
    }

    /// Records the location permission. Returns true if it changed.
    pub fn set_location(&self, permission: LocationPermission) -> bool {
        self.tx.send_if_modified(|state| {
            if state.location == permission {
                return false;
            }
            debug!("location permission: {} -> {}", state.location.as_str(), permission.as_str());
            state.location = permission;
            true
        })
    }

    /// Records the notification permission. Returns true if it changed.
    pub fn set_notification(&self, permission: NotificationPermission) -> bool {
        self.tx.send_if_modified(|state| {
            if state.notification == permission {
                return false;
            }
            debug!(
                "notification permission: {} -> {}",
                state.notification.as_str(),
                permission.as_str()
            );
            state.notification = permission;
            true
        })
    }
}

impl Default for PermissionTracker {
    fn default() -> Self {
        Self::new(PermissionState::default())
    }
}
