//! Profile store
//!
//! CRUD access to monitored profiles. The in-memory store stands in for a
//! real backend and is seeded from configuration or the demo roster.

use crate::domain::{Gender, NewProfile, Profile, ProfileStatus};
use crate::error::StoreError;

/// Trait for profile storage backends
pub trait ProfileStore {
    /// All profiles, in insertion order
    fn list(&self) -> Vec<Profile>;

    /// Profile by id
    fn get(&self, id: &str) -> Option<Profile>;

    /// Add a profile and return it with its assigned id
    fn create(&mut self, profile: NewProfile) -> Result<Profile, StoreError>;

    /// Replace an existing profile
    fn update(&mut self, profile: Profile) -> Result<Profile, StoreError>;

    /// Remove a profile, returning whether it existed
    fn delete(&mut self, id: &str) -> bool;

    /// Profiles that should be monitored
    fn active(&self) -> Vec<Profile> {
        self.list().into_iter().filter(Profile::is_active).collect()
    }
}

/// Profile store backed by a vector
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Vec<Profile>,
}

impl InMemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from create payloads
    pub fn seeded(profiles: Vec<NewProfile>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for profile in profiles {
            store.create(profile)?;
        }
        Ok(store)
    }

    /// Create a store holding the three demo subjects
    pub fn demo() -> Self {
        let roster = [
            (
                "John",
                "Doe",
                35,
                Gender::Male,
                "Building A, Room 101",
                "AA:BB:CC:DD:EE:01",
                ProfileStatus::Active,
                "Emergency: +1 (555) 123-4567",
            ),
            (
                "Jane",
                "Smith",
                28,
                Gender::Female,
                "Building B, Room 205",
                "AA:BB:CC:DD:EE:02",
                ProfileStatus::Active,
                "Emergency: +1 (555) 987-6543",
            ),
            (
                "Michael",
                "Johnson",
                42,
                Gender::Male,
                "Building C, Room 310",
                "AA:BB:CC:DD:EE:03",
                ProfileStatus::Inactive,
                "Emergency: +1 (555) 456-7890",
            ),
        ];

        let profiles = roster
            .into_iter()
            .enumerate()
            .map(
                |(i, (first, last, age, gender, location, device, status, contact))| {
                    Profile::from_new(
                        (i + 1).to_string(),
                        NewProfile {
                            first_name: first.to_string(),
                            last_name: last.to_string(),
                            age,
                            gender,
                            location: location.to_string(),
                            device_id: device.to_string(),
                            status,
                            photo: Some("/placeholder.svg".to_string()),
                            contact_info: Some(contact.to_string()),
                            blood_group: None,
                            contact_number: None,
                            monitoring_end_time: None,
                        },
                    )
                },
            )
            .collect();

        Self { profiles }
    }

    /// One past the highest numeric id in use
    fn next_id(&self) -> u64 {
        self.profiles
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn list(&self) -> Vec<Profile> {
        self.profiles.clone()
    }

    fn get(&self, id: &str) -> Option<Profile> {
        self.profiles.iter().find(|p| p.id == id).cloned()
    }

    fn create(&mut self, profile: NewProfile) -> Result<Profile, StoreError> {
        profile.validate()?;

        let profile = Profile::from_new(self.next_id().to_string(), profile);
        log::debug!("Created profile {} ({})", profile.id, profile.display_name());
        self.profiles.push(profile.clone());
        Ok(profile)
    }

    fn update(&mut self, profile: Profile) -> Result<Profile, StoreError> {
        NewProfile::from(profile.clone()).validate()?;

        let slot = self
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| StoreError::NotFound(profile.id.clone()))?;
        *slot = profile.clone();
        Ok(profile)
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        self.profiles.len() != before
    }
}
