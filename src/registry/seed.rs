//! Seed data for the activity registry
//!
//! The registry starts from either the built-in Mergington dataset or a
//! seed file. Seed files are TOML by default, or JSON when the file
//! extension is `.json`:
//!
//! ```toml
//! [[activities]]
//! name = "Chess Club"
//! description = "Learn strategies and compete in chess tournaments"
//! schedule = "Fridays, 3:30 PM - 5:00 PM"
//! max_participants = 12
//! participants = ["michael@mergington.edu", "daniel@mergington.edu"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Activity;

/// Errors raised while loading or validating seed data
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML seed file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON seed file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate activity name: {0}")]
    DuplicateActivity(String),

    #[error("Duplicate participant {email} in {activity}")]
    DuplicateParticipant { activity: String, email: String },

    #[error("Activity {0} must allow at least 1 participant")]
    ZeroCapacity(String),
}

/// One activity entry in a seed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl SeedActivity {
    fn into_entry(self) -> (String, Activity) {
        let activity = Activity {
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        };
        (self.name, activity)
    }
}

/// Seed file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub activities: Vec<SeedActivity>,
}

impl SeedFile {
    /// Load a seed file, picking the format from the extension
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|source| SeedError::Json {
                path: display,
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| SeedError::Toml {
                path: display,
                source,
            })
        }
    }

    /// Convert into registry entries, keeping file order
    pub fn into_entries(self) -> Vec<(String, Activity)> {
        self.activities
            .into_iter()
            .map(SeedActivity::into_entry)
            .collect()
    }
}

/// Check the registry invariants on a seed dataset
pub fn validate(entries: &[(String, Activity)]) -> Result<(), SeedError> {
    let mut names = HashSet::new();

    for (name, activity) in entries {
        if !names.insert(name.as_str()) {
            return Err(SeedError::DuplicateActivity(name.clone()));
        }

        if activity.max_participants == 0 {
            return Err(SeedError::ZeroCapacity(name.clone()));
        }

        let mut emails = HashSet::new();
        for email in &activity.participants {
            if !emails.insert(email.as_str()) {
                return Err(SeedError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }

    Ok(())
}

/// The Mergington High School activity list
pub fn default_activities() -> Vec<(String, Activity)> {
    let seed = [
        (
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            ["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        (
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            ["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        (
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            ["john@mergington.edu", "olivia@mergington.edu"],
        ),
        (
            "Soccer Club",
            "Team soccer practice and intramural matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
            ["liam@mergington.edu", "ava@mergington.edu"],
        ),
        (
            "Basketball Team",
            "Skills training and competitive games",
            "Wednesdays, 4:00 PM - 6:00 PM",
            15,
            ["noah@mergington.edu", "mia@mergington.edu"],
        ),
        (
            "Art Studio",
            "Explore drawing, painting, and mixed media",
            "Mondays, 3:30 PM - 5:00 PM",
            18,
            ["lucas@mergington.edu", "ella@mergington.edu"],
        ),
        (
            "Drama Club",
            "Acting workshops and stage productions",
            "Thursdays, 3:30 PM - 5:30 PM",
            16,
            ["henry@mergington.edu", "grace@mergington.edu"],
        ),
        (
            "Math Olympiad",
            "Problem solving and competition preparation",
            "Wednesdays, 3:30 PM - 4:30 PM",
            14,
            ["amelia@mergington.edu", "james@mergington.edu"],
        ),
        (
            "Science Club",
            "Hands-on experiments and research projects",
            "Fridays, 2:30 PM - 4:00 PM",
            18,
            ["isabella@mergington.edu", "ethan@mergington.edu"],
        ),
    ];

    seed.into_iter()
        .map(|(name, description, schedule, max, participants)| {
            (
                name.to_string(),
                Activity::new(description, schedule, max).with_participants(participants),
            )
        })
        .collect()
}
