#![allow(dead_code)]

use std::sync::Mutex;

use geotodo_core::{
    host::{Alert, DispatchError, PositionFix},
    models::{Coordinate, NotificationPermission, User},
    params::{CreatePlace, CreateTodo},
    GeolocationHost, NotificationHost, PositionError, PositionOptions, Store, StoreBuilder,
};
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn test_user() -> User {
    User::new("test-user").with_email("test@example.com")
}

pub fn place_params(name: &str, lat: f64, lng: f64, radius: Option<f64>) -> CreatePlace {
    CreatePlace {
        name: name.to_string(),
        address: None,
        lat,
        lng,
        radius_meters: radius,
    }
}

pub fn todo_params(title: &str, place_id: Option<&str>) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        place_id: place_id.map(String::from),
        ..Default::default()
    }
}

/// Geolocation host driven by the test: one-shot answers come from
/// `position`, watch fixes from `push`.
pub struct ScriptedGeolocation {
    pub position: Mutex<Option<Coordinate>>,
    senders: Mutex<Vec<mpsc::Sender<PositionFix>>>,
}

impl ScriptedGeolocation {
    pub fn at(position: Option<Coordinate>) -> Self {
        Self {
            position: Mutex::new(position),
            senders: Mutex::new(Vec::new()),
        }
    }

    pub async fn push(&self, coordinate: Coordinate) {
        let senders: Vec<_> = self.senders.lock().unwrap().clone();
        for tx in senders {
            let _ = tx.send(Ok(coordinate)).await;
        }
    }
}

impl GeolocationHost for ScriptedGeolocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, _options: &PositionOptions) -> PositionFix {
        let position = *self.position.lock().unwrap();
        position.ok_or_else(|| PositionError::Unavailable("no fix".to_string()))
    }

    fn watch_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<mpsc::Receiver<PositionFix>, PositionError> {
        let (tx, rx) = mpsc::channel(8);
        self.senders.lock().unwrap().push(tx);
        Ok(rx)
    }
}

/// Notification host that records what it was asked to show.
pub struct RecordingNotifier {
    permission: Mutex<NotificationPermission>,
    answer: NotificationPermission,
    pub shown: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new(permission: NotificationPermission, answer: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            answer,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Alert> {
        self.shown.lock().unwrap().clone()
    }
}

impl NotificationHost for RecordingNotifier {
    fn is_supported(&self) -> bool {
        true
    }

    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap() = self.answer;
        self.answer
    }

    fn show(&self, alert: &Alert) -> Result<(), DispatchError> {
        self.shown.lock().unwrap().push(alert.clone());
        Ok(())
    }
}
