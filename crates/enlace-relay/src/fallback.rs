//! Synthetic fallback snapshot for when the backing store is unreachable.
//!
//! The relay must keep answering the coordinator even through a database
//! outage, so this module supplies a fixed, clearly-mock snapshot. It is
//! also used unconditionally on the second handshake leg so that leg never
//! depends on the database.

use chrono::{DateTime, TimeZone, Utc};
use enlace_core::{Bike, BikeId, Car, CarId, User, UserId};
use uuid::Uuid;

use crate::snapshot::Snapshot;

/// Fixed timestamp for the synthetic records.
fn mock_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default()
}

fn mock_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Returns the fixed synthetic snapshot.
///
/// Pure and deterministic: two records per collection with mock
/// identifiers, no side effects, no failure mode.
pub fn fallback_snapshot() -> Snapshot {
    let created = mock_time();

    Snapshot {
        users: vec![
            User {
                id: UserId::from(mock_id(0xA001)),
                name: "Mock User One".to_string(),
                email: "mock.one@example.com".to_string(),
                created_at: created,
                updated_at: created,
            },
            User {
                id: UserId::from(mock_id(0xA002)),
                name: "Mock User Two".to_string(),
                email: "mock.two@example.com".to_string(),
                created_at: created,
                updated_at: created,
            },
        ],
        bikes: vec![
            Bike {
                id: BikeId::from(mock_id(0xB001)),
                name: "Mock Bike One".to_string(),
                model: "MB-100".to_string(),
                created_at: created,
                updated_at: created,
            },
            Bike {
                id: BikeId::from(mock_id(0xB002)),
                name: "Mock Bike Two".to_string(),
                model: "MB-200".to_string(),
                created_at: created,
                updated_at: created,
            },
        ],
        cars: vec![
            Car {
                id: CarId::from(mock_id(0xC001)),
                name: "Mock Car One".to_string(),
                model: "MC-100".to_string(),
                created_at: created,
                updated_at: created,
            },
            Car {
                id: CarId::from(mock_id(0xC002)),
                name: "Mock Car Two".to_string(),
                model: "MC-200".to_string(),
                created_at: created,
                updated_at: created,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_deterministic() {
        let a = serde_json::to_value(fallback_snapshot()).unwrap();
        let b = serde_json::to_value(fallback_snapshot()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn snapshot_has_two_records_per_collection() {
        let snapshot = fallback_snapshot();
        assert_eq!(snapshot.users.len(), 2);
        assert_eq!(snapshot.bikes.len(), 2);
        assert_eq!(snapshot.cars.len(), 2);
    }

    #[test]
    fn identifiers_are_clearly_mock() {
        let snapshot = fallback_snapshot();
        // Fixed low-entropy UUIDs distinguish synthetic records from real
        // v4 identifiers at a glance.
        assert_eq!(snapshot.users[0].id.0, Uuid::from_u128(0xA001));
        assert_eq!(snapshot.bikes[0].id.0, Uuid::from_u128(0xB001));
        assert_eq!(snapshot.cars[0].id.0, Uuid::from_u128(0xC001));
    }
}
