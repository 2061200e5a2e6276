//! Terminal implementations of the host capabilities.
//!
//! The terminal has no GPS. One-shot requests answer with the `--at`
//! position; the continuous watch reads `lat,lng` lines from stdin. Alerts go
//! to stderr so they never mix with rendered output.

use std::io::{BufRead, IsTerminal};
use std::sync::Mutex;
use std::thread;

use geotodo_core::{
    host::{Alert, DispatchError, PositionFix},
    models::{Coordinate, LocationPermission, NotificationPermission},
    GeolocationHost, NotificationHost, PositionError, PositionOptions,
};
use log::{debug, warn};
use tokio::sync::mpsc;

/// Position source backed by the command line and stdin.
pub struct TerminalGeolocation {
    at: Option<Coordinate>,
}

impl TerminalGeolocation {
    pub fn new(at: Option<Coordinate>) -> Self {
        Self { at }
    }
}

impl GeolocationHost for TerminalGeolocation {
    fn is_supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Option<LocationPermission> {
        self.at.map(|_| LocationPermission::Granted)
    }

    async fn current_position(&self, _options: &PositionOptions) -> PositionFix {
        self.at.ok_or_else(|| {
            PositionError::Unavailable("no position given, pass --at lat,lng".to_string())
        })
    }

    fn watch_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<mpsc::Receiver<PositionFix>, PositionError> {
        let (tx, rx) = mpsc::channel(16);

        // Off the runtime, so a read parked on an idle terminal cannot stall
        // shutdown
        thread::Builder::new()
            .name("geotodo-stdin".to_string())
            .spawn(move || forward_stdin(std::io::stdin().lock(), &tx))
            .map_err(|e| PositionError::Unavailable(format!("cannot read stdin: {e}")))?;

        Ok(rx)
    }
}

/// Sends one fix per `lat,lng` line until input ends or the subscription is
/// dropped. Blank lines and `#` comments are skipped.
fn forward_stdin<R: BufRead>(input: R, tx: &mpsc::Sender<PositionFix>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading positions: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fix = line
            .parse::<Coordinate>()
            .map_err(|e| PositionError::Unavailable(e.to_string()));
        if tx.blocking_send(fix).is_err() {
            debug!("position subscription dropped");
            return;
        }
    }
    debug!("position input closed");
}

/// Alert sink that prints to stderr.
pub struct TerminalNotifier {
    permission: Mutex<NotificationPermission>,
}

impl TerminalNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
        }
    }

    fn set(&self, permission: NotificationPermission) {
        if let Ok(mut current) = self.permission.lock() {
            *current = permission;
        }
    }
}

impl NotificationHost for TerminalNotifier {
    fn is_supported(&self) -> bool {
        self.permission() != NotificationPermission::Unsupported
    }

    fn permission(&self) -> NotificationPermission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(NotificationPermission::Unsupported)
    }

    /// Grants when someone can see stderr; piped output counts as a refusal.
    async fn request_permission(&self) -> NotificationPermission {
        let answer = if std::io::stderr().is_terminal() {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        };
        self.set(answer);
        answer
    }

    fn show(&self, alert: &Alert) -> Result<(), DispatchError> {
        eprintln!("🔔 {}: {}", alert.title, alert.body);
        Ok(())
    }
}
