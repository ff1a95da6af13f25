//! Typed ID wrappers for catalog records.
//!
//! Record identifiers are UUIDs wrapped in newtypes so a record ID can never be
//! confused with an arbitrary string or a different kind of identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an angle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleId(Uuid);

impl AngleId {
    /// Generate a new random angle ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AngleId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AngleId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AngleId> for Uuid {
    fn from(id: AngleId) -> Self {
        id.0
    }
}

impl FromStr for AngleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for AngleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = AngleId::from(uuid);
        let uuid_back: Uuid = id.into();
        assert_eq!(uuid, uuid_back);
    }

    #[test]
    fn test_angle_id_serialization() {
        let id = AngleId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let deserialized: AngleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_angle_id_parse_round_trips_display() {
        let id = AngleId::new();
        let parsed: AngleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_angle_id_parse_rejects_garbage() {
        assert!("not-an-id".parse::<AngleId>().is_err());
        assert!("".parse::<AngleId>().is_err());
    }

    #[test]
    fn test_angle_id_default_is_unique() {
        assert_ne!(AngleId::default(), AngleId::default());
    }
}
