//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod classify;
pub mod history;
pub mod profiles;
pub mod replay;
pub mod thresholds;
pub mod watch;

pub use classify::run_classify;
pub use history::run_history;
pub use profiles::run_profiles;
pub use replay::run_replay;
pub use thresholds::run_thresholds;
pub use watch::run_watch;

use crate::domain::Profile;
use crate::error::{AppError, Result};
use crate::services::ProfileStore;

/// Look up a profile by id
fn find_profile(store: &impl ProfileStore, id: &str) -> Result<Profile> {
    store
        .get(id)
        .ok_or_else(|| AppError::ProfileNotFound(id.to_string()))
}

/// Look up a profile that can be monitored
fn find_active_profile(store: &impl ProfileStore, id: &str) -> Result<Profile> {
    let profile = find_profile(store, id)?;
    if !profile.is_active() {
        return Err(AppError::ProfileInactive(profile.display_name()));
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryProfileStore;

    #[test]
    fn test_find_profile() {
        let store = InMemoryProfileStore::demo();
        assert_eq!(find_profile(&store, "2").unwrap().first_name, "Jane");
        assert!(matches!(
            find_profile(&store, "42"),
            Err(AppError::ProfileNotFound(id)) if id == "42"
        ));
    }

    #[test]
    fn test_find_active_profile_rejects_inactive() {
        let store = InMemoryProfileStore::demo();
        assert!(find_active_profile(&store, "1").is_ok());
        assert!(matches!(
            find_active_profile(&store, "3"),
            Err(AppError::ProfileInactive(_))
        ));
    }
}
