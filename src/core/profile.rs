use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{AUTH_KEY, Storage};

/// The signed-in user's identity. Read-only here: login, logout, and
/// profile editing live outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Load the persisted profile, or `None` when nobody is signed in or
    /// the stored data cannot be read.
    pub fn load(storage: &dyn Storage) -> Option<Self> {
        match storage.load(AUTH_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    log::warn!("Corrupt profile data, ignoring: {}", err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("Failed to load profile: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn load_returns_none_when_absent() {
        let storage = MemoryStorage::default();
        assert_eq!(UserProfile::load(&storage), None);
    }

    #[test]
    fn load_returns_none_on_corrupt_data() {
        let mut storage = MemoryStorage::default();
        storage.save(AUTH_KEY, "{broken").unwrap();
        assert_eq!(UserProfile::load(&storage), None);
    }

    #[test]
    fn load_round_trips() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            avatar: None,
        };
        let mut storage = MemoryStorage::default();
        storage
            .save(AUTH_KEY, &serde_json::to_string(&profile).unwrap())
            .unwrap();
        assert_eq!(UserProfile::load(&storage), Some(profile));
    }
}
