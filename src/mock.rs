//! Test fixtures
//!
//! Profile builders shared by unit tests.

use crate::domain::{Gender, NewProfile, Profile, ProfileStatus};

/// Build a profile with the fields the monitor cares about
pub fn profile(
    id: &str,
    first_name: &str,
    last_name: &str,
    device_id: &str,
    status: ProfileStatus,
) -> Profile {
    Profile::from_new(
        id,
        NewProfile {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age: 30,
            gender: Gender::Other,
            location: "Test Ward".to_string(),
            device_id: device_id.to_string(),
            status,
            photo: None,
            contact_info: None,
            blood_group: None,
            contact_number: None,
            monitoring_end_time: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let p = profile("7", "Ada", "Lovelace", "dev", ProfileStatus::Inactive);
        assert_eq!(p.id, "7");
        assert_eq!(p.display_name(), "Ada Lovelace");
        assert!(!p.is_active());
    }
}
