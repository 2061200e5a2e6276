//! Notification gate: decides whether a proximity result surfaces an alert,
//! and owns `PermissionState.notification` and the single nearby banner.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    host::{Alert, DispatchError, NotificationHost},
    models::NotificationPermission,
    permissions::PermissionTracker,
    proximity::{NearbySummary, ProximityResult},
};

/// Tag shared by every nearby alert so the host keeps only the latest.
pub const NEARBY_ALERT_TAG: &str = "geotodo-nearby";

/// Title of every nearby alert.
pub const ALERT_TITLE: &str = "GeoTodo";

/// What the gate did for one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Nothing nearby; the banner is hidden
    Hidden,
    /// Banner shown and one alert dispatched
    Alerted(NearbySummary),
    /// Banner shown, no alert because the permission is not granted
    Suppressed {
        summary: NearbySummary,
        permission: NotificationPermission,
    },
    /// Banner shown, the host failed to show the alert
    DispatchFailed {
        summary: NearbySummary,
        error: DispatchError,
    },
}

impl GateOutcome {
    pub fn alerted(&self) -> bool {
        matches!(self, GateOutcome::Alerted(_))
    }
}

/// Builds the alert for a summary.
pub fn nearby_alert(summary: &NearbySummary) -> Alert {
    Alert {
        title: ALERT_TITLE.to_string(),
        body: format!(
            "You're near {}. {} todo(s) need attention.",
            summary.place.name, summary.count
        ),
        tag: NEARBY_ALERT_TAG.to_string(),
    }
}

/// Gates nearby alerts on the notification permission.
pub struct NotificationGate<N: NotificationHost> {
    host: Arc<N>,
    permissions: PermissionTracker,
    banner: Option<NearbySummary>,
}

impl<N: NotificationHost> NotificationGate<N> {
    /// Creates the gate and seeds the notification permission from the host.
    pub fn new(host: Arc<N>, permissions: PermissionTracker) -> Self {
        let initial = if host.is_supported() {
            host.permission()
        } else {
            NotificationPermission::Unsupported
        };
        permissions.set_notification(initial);

        Self {
            host,
            permissions,
            banner: None,
        }
    }

    /// The live banner, if any.
    pub fn banner(&self) -> Option<&NearbySummary> {
        self.banner.as_ref()
    }

    pub fn permissions(&self) -> &PermissionTracker {
        &self.permissions
    }

    /// Handles one recomputation.
    ///
    /// An empty result hides the banner. A non-empty result replaces the
    /// banner and, when alerts are permitted, dispatches exactly one alert.
    /// When the permission is still undecided the user is prompted once.
    pub async fn on_result(&mut self, result: &ProximityResult) -> GateOutcome {
        let Some(summary) = result.summary() else {
            if self.banner.take().is_some() {
                debug!("nothing nearby, hiding banner");
                self.host.dismiss(NEARBY_ALERT_TAG);
            }
            return GateOutcome::Hidden;
        };
        self.banner = Some(summary.clone());

        let permission = self.resolve_permission().await;
        if permission != NotificationPermission::Granted {
            debug!("alert suppressed, notifications {}", permission.as_str());
            return GateOutcome::Suppressed {
                summary,
                permission,
            };
        }

        match self.host.show(&nearby_alert(&summary)) {
            Ok(()) => {
                info!("alerted: {} todo(s) near {}", summary.count, summary.place.name);
                GateOutcome::Alerted(summary)
            }
            Err(error) => {
                warn!("could not show nearby alert: {error}");
                GateOutcome::DispatchFailed { summary, error }
            }
        }
    }

    /// Reads the host permission, prompting once when it is undecided, and
    /// records the final value.
    async fn resolve_permission(&self) -> NotificationPermission {
        if !self.host.is_supported() {
            self.permissions.set_notification(NotificationPermission::Unsupported);
            return NotificationPermission::Unsupported;
        }

        if self.host.permission() == NotificationPermission::Default {
            let answer = self.host.request_permission().await;
            debug!("notification prompt answered: {}", answer.as_str());
            self.permissions.set_notification(answer);
        }

        let permission = self.host.permission();
        self.permissions.set_notification(permission);
        permission
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use jiff::Timestamp;

    use super::*;
    use crate::{
        models::{Coordinate, DateBucket, LocationSample, Place, Priority, Todo},
        proximity::compute_nearby,
    };

    /// Scriptable alert host.
    struct FakeNotifier {
        supported: bool,
        permission: Mutex<NotificationPermission>,
        answer: NotificationPermission,
        fail_dispatch: bool,
        prompts: Mutex<usize>,
        shown: Mutex<Vec<Alert>>,
        dismissed: Mutex<Vec<String>>,
    }

    impl FakeNotifier {
        fn with(permission: NotificationPermission, answer: NotificationPermission) -> Self {
            Self {
                supported: true,
                permission: Mutex::new(permission),
                answer,
                fail_dispatch: false,
                prompts: Mutex::new(0),
                shown: Mutex::new(Vec::new()),
                dismissed: Mutex::new(Vec::new()),
            }
        }

        fn granted() -> Self {
            Self::with(NotificationPermission::Granted, NotificationPermission::Granted)
        }

        fn prompts(&self) -> usize {
            *self.prompts.lock().unwrap()
        }

        fn shown(&self) -> Vec<Alert> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl NotificationHost for FakeNotifier {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn permission(&self) -> NotificationPermission {
            *self.permission.lock().unwrap()
        }

        async fn request_permission(&self) -> NotificationPermission {
            *self.prompts.lock().unwrap() += 1;
            *self.permission.lock().unwrap() = self.answer;
            self.answer
        }

        fn show(&self, alert: &Alert) -> std::result::Result<(), DispatchError> {
            if self.fail_dispatch {
                return Err(DispatchError("no service worker".to_string()));
            }
            self.shown.lock().unwrap().push(alert.clone());
            Ok(())
        }

        fn dismiss(&self, tag: &str) {
            self.dismissed.lock().unwrap().push(tag.to_string());
        }
    }

    fn nearby_result(todo_count: usize) -> ProximityResult {
        let place = Place {
            id: "p1".to_string(),
            name: "Hardware Store".to_string(),
            address: None,
            location: Some(Coordinate::new(0.0, 0.0)),
            radius_meters: 300.0,
            created_at: Timestamp::UNIX_EPOCH,
        };
        let todos: Vec<Todo> = (0..todo_count)
            .map(|i| Todo {
                id: format!("t{i}"),
                title: format!("Errand {i}"),
                description: String::new(),
                action_type: "buy".to_string(),
                date_bucket: DateBucket::Today,
                priority: Priority::default(),
                tags: vec![],
                place_id: Some("p1".to_string()),
                is_done: false,
                created_at: Timestamp::UNIX_EPOCH,
            })
            .collect();
        let sample = LocationSample::now(Coordinate::new(0.0, 0.0));
        compute_nearby(Some(&sample), &[place], &todos)
    }

    fn gate_over(host: &Arc<FakeNotifier>) -> NotificationGate<FakeNotifier> {
        NotificationGate::new(Arc::clone(host), PermissionTracker::default())
    }

    #[tokio::test]
    async fn test_granted_dispatches_one_alert_per_result() {
        let host = Arc::new(FakeNotifier::granted());
        let mut gate = gate_over(&host);

        let outcome = gate.on_result(&nearby_result(2)).await;

        assert!(outcome.alerted());
        let shown = host.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "GeoTodo");
        assert_eq!(shown[0].tag, NEARBY_ALERT_TAG);
        assert_eq!(
            shown[0].body,
            "You're near Hardware Store. 2 todo(s) need attention."
        );
        assert_eq!(gate.banner().map(|b| b.count), Some(2));

        gate.on_result(&nearby_result(1)).await;
        assert_eq!(host.shown().len(), 2);
        assert_eq!(gate.banner().map(|b| b.count), Some(1));
    }

    #[tokio::test]
    async fn test_empty_result_hides_banner_without_alert() {
        let host = Arc::new(FakeNotifier::granted());
        let mut gate = gate_over(&host);

        gate.on_result(&nearby_result(1)).await;
        let outcome = gate.on_result(&ProximityResult::empty()).await;

        assert_eq!(outcome, GateOutcome::Hidden);
        assert!(gate.banner().is_none());
        assert_eq!(host.shown().len(), 1);
        assert_eq!(*host.dismissed.lock().unwrap(), vec![NEARBY_ALERT_TAG.to_string()]);

        // Hiding an already hidden banner does not touch the host again
        gate.on_result(&ProximityResult::empty()).await;
        assert_eq!(host.dismissed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_default_permission_prompts_then_alerts() {
        let host = Arc::new(FakeNotifier::with(
            NotificationPermission::Default,
            NotificationPermission::Granted,
        ));
        let mut gate = gate_over(&host);
        assert_eq!(gate.permissions().notification(), NotificationPermission::Default);

        let outcome = gate.on_result(&nearby_result(1)).await;

        assert!(outcome.alerted());
        assert_eq!(host.prompts(), 1);
        assert_eq!(gate.permissions().notification(), NotificationPermission::Granted);

        // Decided permissions are not asked again
        gate.on_result(&nearby_result(1)).await;
        assert_eq!(host.prompts(), 1);
    }

    #[tokio::test]
    async fn test_refused_prompt_suppresses_but_records() {
        let host = Arc::new(FakeNotifier::with(
            NotificationPermission::Default,
            NotificationPermission::Denied,
        ));
        let mut gate = gate_over(&host);

        let outcome = gate.on_result(&nearby_result(3)).await;

        match outcome {
            GateOutcome::Suppressed { summary, permission } => {
                assert_eq!(summary.count, 3);
                assert_eq!(permission, NotificationPermission::Denied);
            }
            other => panic!("expected suppression, got {other:?}"),
        }
        assert!(host.shown().is_empty());
        assert_eq!(gate.permissions().notification(), NotificationPermission::Denied);
        assert!(gate.banner().is_some());
    }

    #[tokio::test]
    async fn test_unsupported_host_never_prompts() {
        let host = Arc::new(FakeNotifier {
            supported: false,
            ..FakeNotifier::with(NotificationPermission::Default, NotificationPermission::Granted)
        });
        let mut gate = gate_over(&host);
        assert_eq!(
            gate.permissions().notification(),
            NotificationPermission::Unsupported
        );

        let outcome = gate.on_result(&nearby_result(1)).await;

        assert!(matches!(
            outcome,
            GateOutcome::Suppressed {
                permission: NotificationPermission::Unsupported,
                ..
            }
        ));
        assert_eq!(host.prompts(), 0);
        assert!(host.shown().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_reported_not_raised() {
        let host = Arc::new(FakeNotifier {
            fail_dispatch: true,
            ..FakeNotifier::granted()
        });
        let mut gate = gate_over(&host);

        let outcome = gate.on_result(&nearby_result(1)).await;

        assert!(matches!(outcome, GateOutcome::DispatchFailed { .. }));
        assert_eq!(gate.banner().map(|b| b.place.name.as_str()), Some("Hardware Store"));
    }
}
