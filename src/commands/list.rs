use std::path::Path;

use anyhow::{Context, Result};

use super::load_registry;

/// Print the activities a server would start with
pub async fn list_activities(seed: Option<&Path>, json: bool) -> Result<()> {
    let registry = load_registry(seed)?;
    let catalog = registry.list_activities().await;

    if json {
        let output =
            serde_json::to_string_pretty(&catalog).context("Failed to serialize activities")?;
        println!("{output}");
        return Ok(());
    }

    println!("Activities ({})", catalog.len());
    println!("================================");

    for (name, activity) in catalog.iter() {
        println!(
            "{name} [{}/{}]",
            activity.enrolled_count(),
            activity.max_participants
        );
        println!("   {}", activity.description);
        println!("   Schedule: {}", activity.schedule);
        if activity.participants.is_empty() {
            println!("   No participants yet");
        } else {
            for email in &activity.participants {
                println!("   - {email}");
            }
        }
        println!();
    }

    let stats = registry.stats().await;
    println!(
        "{} enrollments, {:.1}% of advertised seats taken",
        stats.total_enrollments,
        stats.utilization()
    );

    Ok(())
}
