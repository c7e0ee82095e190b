//! Core data structures for the activity service

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// An extracurricular activity and its current roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Free-text description shown to students
    pub description: String,

    /// Free-text meeting schedule
    pub schedule: String,

    /// Advertised capacity. Informational only, never enforced at signup.
    pub max_participants: u32,

    /// Enrolled emails in signup order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Create an activity with an empty roster
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Replace the roster
    #[must_use]
    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether an email is on the roster
    pub fn is_enrolled(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Number of enrolled participants
    pub fn enrolled_count(&self) -> usize {
        self.participants.len()
    }

    /// Remaining seats against the advertised capacity (zero when over)
    pub fn spots_left(&self) -> usize {
        (self.max_participants as usize).saturating_sub(self.participants.len())
    }

    /// Roster has grown past the advertised capacity
    pub fn is_over_capacity(&self) -> bool {
        self.participants.len() > self.max_participants as usize
    }
}

/// Confirmation of a successful enroll or withdraw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub activity: String,
    pub email: String,
}

impl Enrollment {
    pub fn new(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
        }
    }
}

/// Snapshot of every activity, in seed order.
///
/// Serializes as a JSON object keyed by activity name. Keys are written in
/// seed order rather than sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    entries: Vec<(String, Activity)>,
}

impl ActivityCatalog {
    pub fn new(entries: Vec<(String, Activity)>) -> Self {
        Self { entries }
    }

    /// Look up one activity by exact name
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, activity)| activity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, Activity)> {
        self.entries
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess() -> Activity {
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        )
        .with_participants(["michael@mergington.edu", "daniel@mergington.edu"])
    }

    #[test]
    fn test_activity_roster_helpers() {
        let activity = chess();
        assert!(activity.is_enrolled("michael@mergington.edu"));
        assert!(!activity.is_enrolled("Michael@mergington.edu"));
        assert_eq!(activity.enrolled_count(), 2);
        assert_eq!(activity.spots_left(), 10);
        assert!(!activity.is_over_capacity());
    }

    #[test]
    fn test_over_capacity() {
        let activity = Activity::new("Tiny", "Never", 1).with_participants(["a", "b"]);
        assert!(activity.is_over_capacity());
        assert_eq!(activity.spots_left(), 0);
    }

    #[test]
    fn test_activity_json_shape() {
        let json = serde_json::to_value(chess()).unwrap();
        assert_eq!(json["max_participants"], 12);
        assert_eq!(json["participants"][1], "daniel@mergington.edu");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_catalog_serializes_in_seed_order() {
        let catalog = ActivityCatalog::new(vec![
            ("Zoology".to_string(), Activity::new("z", "z", 1)),
            ("Chess Club".to_string(), chess()),
        ]);

        let json = serde_json::to_string(&catalog).unwrap();
        let zoo = json.find("Zoology").unwrap();
        let chess = json.find("Chess Club").unwrap();
        assert!(zoo < chess);

        assert_eq!(catalog.get("Chess Club").unwrap().max_participants, 12);
        assert!(catalog.get("chess club").is_none());
    }
}
