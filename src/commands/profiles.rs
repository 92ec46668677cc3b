//! Profiles command implementation
//!
//! Lists and shows monitored profiles.

use super::find_profile;
use crate::cli::args::{OutputFormat, ProfilesCommands};
use crate::cli::output::{print_output, ProfileDetail, ProfileList, ProfileListEntry};
use crate::config::Config;
use crate::domain::Profile;
use crate::error::Result;
use crate::services::ProfileStore;

/// Execute profile commands
pub fn run_profiles(command: &ProfilesCommands, format: OutputFormat, config: &Config) -> Result<()> {
    let store = config.profile_store()?;

    match command {
        ProfilesCommands::List { active, search } => {
            let profiles = select_profiles(&store, *active, search.as_deref());
            let list = ProfileList {
                profiles: profiles.iter().map(ProfileListEntry::from).collect(),
            };
            print_output(&list, format)?;
        }
        ProfilesCommands::Show { id } => {
            let detail = ProfileDetail {
                profile: find_profile(&store, id)?,
            };
            print_output(&detail, format)?;
        }
    }

    Ok(())
}

/// Profiles to list, after the status and search filters
fn select_profiles(store: &impl ProfileStore, active: bool, search: Option<&str>) -> Vec<Profile> {
    let profiles = if active { store.active() } else { store.list() };

    match search {
        Some(query) => profiles.into_iter().filter(|p| p.matches(query)).collect(),
        None => profiles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryProfileStore;

    fn ids(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_select_all_profiles() {
        let store = InMemoryProfileStore::demo();
        assert_eq!(ids(&select_profiles(&store, false, None)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_select_by_search() {
        let store = InMemoryProfileStore::demo();
        assert_eq!(ids(&select_profiles(&store, false, Some("building c"))), vec!["3"]);
        assert_eq!(ids(&select_profiles(&store, false, Some("EE:01"))), vec!["1"]);
        assert!(select_profiles(&store, false, Some("nobody")).is_empty());
    }

    #[test]
    fn test_search_combines_with_active_filter() {
        let store = InMemoryProfileStore::demo();
        assert!(select_profiles(&store, true, Some("johnson")).is_empty());
        assert_eq!(ids(&select_profiles(&store, true, Some("smith"))), vec!["2"]);
    }
}
