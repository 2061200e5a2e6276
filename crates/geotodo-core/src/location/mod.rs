//! Location watch: turns the host's geolocation into [`LocationSample`]s and
//! keeps `PermissionState.location` current.
//!
//! Two operations sit on top of a [`GeolocationHost`]:
//!
//! - [`LocationWatch::request_once`] resolves exactly once with a sample or
//!   an error. It is bounded by [`LocationConfig::request`]'s timeout and is
//!   not cancellable.
//! - [`LocationWatch::start_watch`] runs at most one subscription, forwarding
//!   every fix to a callback in the order the host delivers them.
//!   [`LocationWatch::stop_watch`] cancels it and waits for the forwarding
//!   task, so no callback runs after it returns.
//!
//! Recomputing proximity on each fix is the caller's job.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Capability, GeoTodoError, Result},
    host::{GeolocationHost, PositionError, PositionFix, PositionOptions},
    models::{LocationPermission, LocationSample},
    permissions::PermissionTracker,
};


/// Request options for the one-shot query and the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationConfig {
    pub request: PositionOptions,
    pub watch: PositionOptions,
}

impl LocationConfig {
    /// Bound on how long [`LocationWatch::request_once`] waits for a fix.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            request: PositionOptions {
                high_accuracy: true,
                timeout: Duration::from_secs(10),
                maximum_age: None,
            },
            watch: PositionOptions {
                high_accuracy: true,
                timeout: Duration::from_secs(20),
                maximum_age: Some(Duration::from_secs(30)),
            },
        }
    }
}

/// Opaque handle of the active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

/// Outcome of [`LocationWatch::start_watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStart {
    /// A new subscription was opened
    Started(WatchId),
    /// A subscription was already running; nothing changed
    AlreadyWatching(WatchId),
}

impl WatchStart {
    pub fn id(&self) -> WatchId {
        match self {
            WatchStart::Started(id) | WatchStart::AlreadyWatching(id) => *id,
        }
    }
}

struct ActiveWatch {
    id: WatchId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the single position subscription and the location permission.
pub struct LocationWatch<H: GeolocationHost> {
    host: Arc<H>,
    config: LocationConfig,
    permissions: PermissionTracker,
    active: Option<ActiveWatch>,
    next_id: u64,
}

impl<H: GeolocationHost> LocationWatch<H> {
    /// Creates the watch and seeds the location permission from the host.
    pub fn new(host: Arc<H>, config: LocationConfig, permissions: PermissionTracker) -> Self {
        let initial = if !host.is_supported() {
            LocationPermission::Unsupported
        } else {
            host.permission().unwrap_or(LocationPermission::Unknown)
        };
        permissions.set_location(initial);

        Self {
            host,
            config,
            permissions,
            active: None,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    pub fn permissions(&self) -> &PermissionTracker {
        &self.permissions
    }

    /// Asks the host for one fix.
    ///
    /// # Errors
    ///
    /// - `CapabilityUnavailable` when the host has no geolocation (the
    ///   permission becomes `unsupported`) or cannot determine a position
    /// - `PermissionDenied` when the user or OS refuses (the permission
    ///   becomes `denied`)
    /// - `Timeout` when no fix arrives within the configured bound
    pub async fn request_once(&self) -> Result<LocationSample> {
        if !self.host.is_supported() {
            self.permissions.set_location(LocationPermission::Unsupported);
            return Err(GeoTodoError::unavailable(
                Capability::Geolocation,
                "host has no geolocation",
            ));
        }

        let options = self.config.request;
        let fix = tokio::time::timeout(options.timeout, self.host.current_position(&options)).await;

        match fix {
            Ok(Ok(coordinate)) => {
                self.permissions.set_location(LocationPermission::Granted);
                Ok(LocationSample::now(coordinate))
            }
            Ok(Err(err)) => {
                warn!("location request failed: {err}");
                Err(self.convert(err))
            }
            Err(_) => {
                warn!("location request timed out after {}ms", options.timeout.as_millis());
                Err(GeoTodoError::Timeout {
                    capability: Capability::Geolocation,
                    after: options.timeout,
                })
            }
        }
    }

    /// Starts the continuous subscription, calling `on_update` for each fix.
    ///
    /// Calling it while a subscription is running is a no-op that returns
    /// the running subscription's id. A subscription the host has already
    /// ended does not count as running.
    ///
    /// # Errors
    ///
    /// - `CapabilityUnavailable` when the host has no geolocation (the
    ///   permission becomes `unsupported`) or refuses to open a subscription
    /// - `PermissionDenied` when the host refuses for lack of permission
    pub async fn start_watch<F>(&mut self, on_update: F) -> Result<WatchStart>
    where
        F: FnMut(LocationSample) + Send + 'static,
    {
        if let Some(active) = &self.active {
            if !active.task.is_finished() {
                debug!("location watch {:?} already active", active.id);
                return Ok(WatchStart::AlreadyWatching(active.id));
            }
            debug!("location watch {:?} ended on the host side", active.id);
            self.active = None;
        }

        if !self.host.is_supported() {
            self.permissions.set_location(LocationPermission::Unsupported);
            return Err(GeoTodoError::unavailable(
                Capability::Geolocation,
                "host has no geolocation",
            ));
        }

        let fixes = self.host.watch_position(&self.config.watch).map_err(|err| {
            warn!("could not open location watch: {err}");
            self.convert(err)
        })?;

        let id = WatchId(self.next_id);
        self.next_id += 1;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(forward_fixes(
            fixes,
            cancel.clone(),
            self.permissions.clone(),
            on_update,
        ));

        info!("location watch {id:?} started");
        self.active = Some(ActiveWatch { id, cancel, task });
        Ok(WatchStart::Started(id))
    }

    /// Cancels the subscription, if any. Returns whether one was running.
    ///
    /// Once this returns, the callback given to `start_watch` will not be
    /// called again.
    pub async fn stop_watch(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        active.cancel.cancel();
        if let Err(err) = active.task.await {
            warn!("location watch {:?} task failed: {err}", active.id);
        }
        info!("location watch {:?} stopped", active.id);
        true
    }

    pub fn is_watching(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.task.is_finished())
    }

    pub fn watch_id(&self) -> Option<WatchId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Maps a host failure to an error value, updating the permission when
    /// the failure says something about it.
    fn convert(&self, err: PositionError) -> GeoTodoError {
        match err {
            PositionError::PermissionDenied => {
                self.permissions.set_location(LocationPermission::Denied);
                GeoTodoError::PermissionDenied {
                    capability: Capability::Geolocation,
                }
            }
            PositionError::Timeout => GeoTodoError::Timeout {
                capability: Capability::Geolocation,
                after: self.config.request.timeout,
            },
            PositionError::Unavailable(reason) => {
                GeoTodoError::unavailable(Capability::Geolocation, reason)
            }
        }
    }
}

impl<H: GeolocationHost> Drop for LocationWatch<H> {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.cancel.cancel();
        }
    }
}

async fn forward_fixes<F>(
    mut fixes: mpsc::Receiver<PositionFix>,
    cancel: CancellationToken,
    permissions: PermissionTracker,
    mut on_update: F,
) where
    F: FnMut(LocationSample) + Send + 'static,
{
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            fix = fixes.recv() => match fix {
                Some(Ok(coordinate)) => {
                    permissions.set_location(LocationPermission::Granted);
                    on_update(LocationSample::now(coordinate));
                }
                Some(Err(PositionError::PermissionDenied)) => {
                    warn!("location watch: permission denied");
                    permissions.set_location(LocationPermission::Denied);
                }
                Some(Err(err)) => warn!("location watch: {err}"),
                None => {
                    debug!("host closed the position stream");
                    break;
                }
            },
        }
    }
}
