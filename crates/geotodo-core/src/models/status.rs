//! Status enumerations for todos and host permissions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse due date of a todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    Today,
    Tomorrow,
    Soon,
    ThisWeek,
    ThisMonth,
    /// Todos without a bucket land here
    #[default]
    Eventually,
}

impl FromStr for DateBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "today" => Ok(DateBucket::Today),
            "tomorrow" => Ok(DateBucket::Tomorrow),
            "soon" => Ok(DateBucket::Soon),
            "this_week" => Ok(DateBucket::ThisWeek),
            "this_month" => Ok(DateBucket::ThisMonth),
            "eventually" => Ok(DateBucket::Eventually),
            _ => Err(format!("Invalid date bucket: {s}")),
        }
    }
}

impl DateBucket {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Tomorrow => "tomorrow",
            DateBucket::Soon => "soon",
            DateBucket::ThisWeek => "this_week",
            DateBucket::ThisMonth => "this_month",
            DateBucket::Eventually => "eventually",
        }
    }
}

/// Location permission as last observed by the location watch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationPermission {
    /// The host cannot report the permission
    #[default]
    Unknown,
    /// The user has not decided yet
    Prompt,
    Granted,
    Denied,
    /// The host has no geolocation at all
    Unsupported,
}

impl LocationPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPermission::Unknown => "unknown",
            LocationPermission::Prompt => "prompt",
            LocationPermission::Granted => "granted",
            LocationPermission::Denied => "denied",
            LocationPermission::Unsupported => "unsupported",
        }
    }
}

impl FromStr for LocationPermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" => Ok(LocationPermission::Unknown),
            "prompt" => Ok(LocationPermission::Prompt),
            "granted" => Ok(LocationPermission::Granted),
            "denied" => Ok(LocationPermission::Denied),
            "unsupported" => Ok(LocationPermission::Unsupported),
            _ => Err(format!("Invalid location permission: {s}")),
        }
    }
}

/// Notification permission as last observed by the notification gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// The user has not decided yet; asking is allowed
    #[default]
    Default,
    Granted,
    Denied,
    /// The host cannot show alerts
    Unsupported,
}

impl NotificationPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPermission::Default => "default",
            NotificationPermission::Granted => "granted",
            NotificationPermission::Denied => "denied",
            NotificationPermission::Unsupported => "unsupported",
        }
    }
}

impl FromStr for NotificationPermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "prompt" => Ok(NotificationPermission::Default),
            "granted" => Ok(NotificationPermission::Granted),
            "denied" => Ok(NotificationPermission::Denied),
            "unsupported" => Ok(NotificationPermission::Unsupported),
            _ => Err(format!("Invalid notification permission: {s}")),
        }
    }
}

/// Both permission states, as one plain value for the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PermissionState {
    pub location: LocationPermission,
    pub notification: NotificationPermission,
}
