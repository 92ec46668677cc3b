//! Profile domain types
//!
//! Monitored subjects as supplied by the profile store.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a profile is currently being monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A monitored subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    /// Identifier of the wearable that streams this subject's vitals
    pub device_id: String,
    pub status: ProfileStatus,
    pub photo: Option<String>,
    pub contact_info: Option<String>,
    pub blood_group: Option<String>,
    pub contact_number: Option<String>,
    pub monitoring_end_time: Option<String>,
}

impl Profile {
    /// Build a profile from a create payload and an assigned id
    pub fn from_new(id: impl Into<String>, new: NewProfile) -> Self {
        Self {
            id: id.into(),
            first_name: new.first_name,
            last_name: new.last_name,
            age: new.age,
            gender: new.gender,
            location: new.location,
            device_id: new.device_id,
            status: new.status,
            photo: new.photo,
            contact_info: new.contact_info,
            blood_group: new.blood_group,
            contact_number: new.contact_number,
            monitoring_end_time: new.monitoring_end_time,
        }
    }

    /// Name shown in notifications ("First Last")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if the profile should be monitored
    pub fn is_active(&self) -> bool {
        self.status == ProfileStatus::Active
    }

    /// Case-insensitive match on full name, location or device id
    ///
    /// An empty query matches every profile.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [self.display_name(), self.location.clone(), self.device_id.clone()]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Create payload for a profile (everything but the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    pub device_id: String,
    #[serde(default)]
    pub status: ProfileStatus,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub monitoring_end_time: Option<String>,
}

impl NewProfile {
    /// Check that required fields are present
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("device_id", &self.device_id),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::MissingField(field));
            }
        }

        Ok(())
    }
}

impl From<Profile> for NewProfile {
    fn from(profile: Profile) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            age: profile.age,
            gender: profile.gender,
            location: profile.location,
            device_id: profile.device_id,
            status: profile.status,
            photo: profile.photo,
            contact_info: profile.contact_info,
            blood_group: profile.blood_group,
            contact_number: profile.contact_number,
            monitoring_end_time: profile.monitoring_end_time,
        }
    }
}
