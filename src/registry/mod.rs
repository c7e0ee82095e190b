//! Activity registry
//!
//! Holds every activity and its roster, and enforces the roster rules for
//! the two mutating operations: enroll and withdraw.
//!
//! The set of activity names is fixed once the registry is seeded, so the
//! name index is plain data. Each activity's record sits behind its own
//! lock; enroll and withdraw hold the write lock across the membership
//! check and the mutation, so concurrent requests against one activity
//! cannot both pass the check.

pub mod seed;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Activity, ActivityCatalog, Enrollment};

pub use seed::{default_activities, SeedActivity, SeedError, SeedFile};

// ============================================================================
// Errors
// ============================================================================

/// Registry errors
///
/// The display text of each variant is the fixed message returned to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No activity with this name
    #[error("Activity not found")]
    ActivityNotFound { activity: String },

    /// Email is already on the roster
    #[error("Student already signed up for this activity")]
    AlreadyEnrolled { activity: String, email: String },

    /// Email is not on the roster
    #[error("Student is not signed up for this activity")]
    NotEnrolled { activity: String, email: String },
}

impl RegistryError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ActivityNotFound { .. } => "not_found",
            Self::AlreadyEnrolled { .. } => "already_enrolled",
            Self::NotEnrolled { .. } => "not_enrolled",
        }
    }

    /// Name of the activity the failed operation targeted
    pub fn activity(&self) -> &str {
        match self {
            Self::ActivityNotFound { activity }
            | Self::AlreadyEnrolled { activity, .. }
            | Self::NotEnrolled { activity, .. } => activity,
        }
    }
}

// ============================================================================
// Activity Registry
// ============================================================================

struct Entry {
    name: String,
    activity: RwLock<Activity>,
}

/// In-memory store of all activities, keyed by exact name
pub struct ActivityRegistry {
    /// Activities in seed order
    entries: Vec<Entry>,

    /// Name to position in `entries`
    index: HashMap<String, usize>,
}

impl ActivityRegistry {
    /// Create a registry from seed entries
    pub fn new(entries: Vec<(String, Activity)>) -> Result<Self, SeedError> {
        seed::validate(&entries)?;
        Ok(Self::from_validated(entries))
    }

    /// Create a registry seeded with the Mergington activity list
    pub fn with_default_activities() -> Self {
        Self::from_validated(default_activities())
    }

    fn from_validated(entries: Vec<(String, Activity)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        let entries = entries
            .into_iter()
            .map(|(name, activity)| Entry {
                name,
                activity: RwLock::new(activity),
            })
            .collect();

        Self { entries, index }
    }

    /// Create a registry from a seed file
    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        let seed = SeedFile::from_path(path)?;
        Self::new(seed.into_entries())
    }

    fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::ActivityNotFound {
                activity: name.to_string(),
            })
    }

    /// Snapshot of every activity, in seed order
    pub async fn list_activities(&self) -> ActivityCatalog {
        let mut snapshot = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let activity = entry.activity.read().await.clone();
            snapshot.push((entry.name.clone(), activity));
        }
        ActivityCatalog::new(snapshot)
    }

    /// Snapshot of a single activity
    pub async fn get_activity(&self, name: &str) -> Option<Activity> {
        let entry = self.entry(name).ok()?;
        Some(entry.activity.read().await.clone())
    }

    /// Add an email to the end of an activity's roster.
    ///
    /// Capacity is not checked; the roster may grow past `max_participants`.
    pub async fn enroll(&self, activity_name: &str, email: &str) -> Result<Enrollment, RegistryError> {
        let entry = self.entry(activity_name)?;
        let mut activity = entry.activity.write().await;

        if activity.is_enrolled(email) {
            return Err(RegistryError::AlreadyEnrolled {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        activity.participants.push(email.to_string());

        tracing::debug!(
            activity = %activity_name,
            email = %email,
            enrolled = activity.participants.len(),
            max_participants = activity.max_participants,
            "Enrolled participant"
        );

        Ok(Enrollment::new(activity_name, email))
    }

    /// Remove an email from an activity's roster, keeping the others in order
    pub async fn withdraw(&self, activity_name: &str, email: &str) -> Result<Enrollment, RegistryError> {
        let entry = self.entry(activity_name)?;
        let mut activity = entry.activity.write().await;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| RegistryError::NotEnrolled {
                activity: activity_name.to_string(),
                email: email.to_string(),
            })?;

        activity.participants.remove(position);

        tracing::debug!(
            activity = %activity_name,
            email = %email,
            enrolled = activity.participants.len(),
            "Withdrew participant"
        );

        Ok(Enrollment::new(activity_name, email))
    }

    /// Check whether an activity exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Activity names in seed order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of activities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get registry statistics
    pub async fn stats(&self) -> RegistryStats {
        let mut total_enrollments = 0;
        let mut total_capacity = 0;
        let mut over_capacity = 0;

        for entry in &self.entries {
            let activity = entry.activity.read().await;
            total_enrollments += activity.enrolled_count();
            total_capacity += activity.max_participants as usize;
            if activity.is_over_capacity() {
                over_capacity += 1;
            }
        }

        RegistryStats {
            total_activities: self.entries.len(),
            total_enrollments,
            total_capacity,
            over_capacity,
        }
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self::with_default_activities()
    }
}

/// Registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_activities: usize,
    pub total_enrollments: usize,
    pub total_capacity: usize,
    /// Activities whose roster exceeds the advertised capacity
    pub over_capacity: usize,
}

impl RegistryStats {
    /// Share of advertised seats taken, as a percentage
    pub fn utilization(&self) -> f64 {
        if self.total_capacity == 0 {
            0.0
        } else {
            (self.total_enrollments as f64 / self.total_capacity as f64) * 100.0
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
