//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data types stay free of
//! presentation logic. Output is markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{
        Coordinate, DateBucket, LocationPermission, NotificationPermission, PermissionState, Place,
        Priority, Todo,
    },
    proximity::{NearbySummary, ProximityResult},
};

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateBucket::Today => "Today",
            DateBucket::Tomorrow => "Tomorrow",
            DateBucket::Soon => "Soon",
            DateBucket::ThisWeek => "This week",
            DateBucket::ThisMonth => "This month",
            DateBucket::Eventually => "Eventually",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.value())
    }
}

impl fmt::Display for LocationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Location**: {}", self.location)?;
        writeln!(f, "- **Notifications**: {}", self.notification)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(address) = &self.address {
            writeln!(f, "- **Address**: {address}")?;
        }
        match &self.location {
            Some(center) => writeln!(f, "- **Location**: {center}")?,
            None => writeln!(f, "- **Location**: not set")?,
        }
        writeln!(f, "- **Radius**: {} m", self.radius().round())?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_done { "x" } else { " " };
        writeln!(f, "### [{check}] {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- {} · {} · {}",
            self.action_type.to_uppercase(),
            self.date_bucket,
            self.priority
        )?;
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)
    }
}

/// Banner text for the nearby summary.
impl fmt::Display for NearbySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You're near {}. {} todo(s) need attention here.",
            self.place.name, self.count
        )
    }
}

impl fmt::Display for ProximityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(summary) = self.summary() else {
            return writeln!(f, "Nothing nearby.");
        };

        writeln!(f, "**{summary}**")?;
        writeln!(f)?;
        for m in &self.matches {
            writeln!(
                f,
                "- {} at {} ({} m)",
                m.todo.title, m.place.name, m.distance_meters
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{models::LocationSample, proximity::compute_nearby};

    fn place() -> Place {
        Place {
            id: "p1".to_string(),
            name: "Market".to_string(),
            address: Some("1 Main St".to_string()),
            location: Some(Coordinate::new(0.0, 0.0)),
            radius_meters: 0.0,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn todo() -> Todo {
        Todo {
            id: "t1".to_string(),
            title: "Apples".to_string(),
            description: "Green ones".to_string(),
            action_type: "buy".to_string(),
            date_bucket: DateBucket::ThisWeek,
            priority: Priority::new(4),
            tags: vec!["fruit".to_string(), "weekly".to_string()],
            place_id: Some("p1".to_string()),
            is_done: false,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_place_display() {
        let output = place().to_string();
        assert!(output.contains("## Market (ID: p1)"));
        assert!(output.contains("- **Address**: 1 Main St"));
        assert!(output.contains("- **Location**: 0.000000, 0.000000"));
        assert!(output.contains("- **Radius**: 300 m"));
    }

    #[test]
    fn test_todo_display() {
        let output = todo().to_string();
        assert!(output.contains("### [ ] Apples (ID: t1)"));
        assert!(output.contains("- BUY · This week · P4"));
        assert!(output.contains("- Tags: fruit, weekly"));
        assert!(output.contains("Green ones"));
    }

    #[test]
    fn test_proximity_result_display() {
        assert_eq!(ProximityResult::empty().to_string(), "Nothing nearby.\n");

        let sample = LocationSample::now(Coordinate::new(0.0, 0.0));
        let result = compute_nearby(Some(&sample), &[place()], &[todo()]);
        let output = result.to_string();

        assert!(output.contains("**You're near Market. 1 todo(s) need attention here.**"));
        assert!(output.contains("- Apples at Market (0 m)"));
    }

    #[test]
    fn test_permission_state_display() {
        let state = PermissionState {
            location: LocationPermission::Denied,
            notification: NotificationPermission::Unsupported,
        };
        assert_eq!(
            state.to_string(),
            "- **Location**: denied\n- **Notifications**: unsupported\n"
        );
    }
}
