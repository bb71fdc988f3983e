//! Domain models and strongly-typed identifiers.
//!
//! Defines the three fleet entities (users, bikes, cars) with newtype ID
//! wrappers for compile-time type safety, plus the creation and update
//! payloads the repository layer accepts. Includes database serialization
//! traits for PostgreSQL.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

type PgDb = sqlx::Postgres;
type PgValueRef<'r> = sqlx::postgres::PgValueRef<'r>;
type PgTypeInfo = sqlx::postgres::PgTypeInfo;
type PgArgumentBuffer = sqlx::postgres::PgArgumentBuffer;
type EncodeResult =
    Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync + 'static>>;
type BoxDynError = sqlx::error::BoxDynError;

/// Strongly-typed user identifier.
///
/// Wraps a UUID to prevent mixing with bike or car identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl sqlx::Type<PgDb> for UserId {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for UserId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let uuid = <Uuid as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(uuid))
    }
}

impl sqlx::Encode<'_, PgDb> for UserId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <Uuid as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// Strongly-typed bike identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BikeId(pub Uuid);

impl BikeId {
    /// Creates a new random bike ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BikeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BikeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl sqlx::Type<PgDb> for BikeId {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for BikeId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let uuid = <Uuid as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(uuid))
    }
}

impl sqlx::Encode<'_, PgDb> for BikeId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <Uuid as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// Strongly-typed car identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarId(pub Uuid);

impl CarId {
    /// Creates a new random car ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CarId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl sqlx::Type<PgDb> for CarId {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for CarId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let uuid = <Uuid as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(uuid))
    }
}

impl sqlx::Encode<'_, PgDb> for CarId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <Uuid as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// A registered user of the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for this user.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Contact email address.
    pub email: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

/// Partial update payload for a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New email address, if changing.
    pub email: Option<String>,
}

/// A bike in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bike {
    /// Unique identifier for this bike.
    pub id: BikeId,

    /// Display name.
    pub name: String,

    /// Manufacturer model designation.
    pub model: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a bike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBike {
    /// Display name.
    pub name: String,
    /// Manufacturer model designation.
    pub model: String,
}

/// Partial update payload for a bike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBike {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New model designation, if changing.
    pub model: Option<String>,
}

/// A car in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    /// Unique identifier for this car.
    pub id: CarId,

    /// Display name.
    pub name: String,

    /// Manufacturer model designation.
    pub model: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCar {
    /// Display name.
    pub name: String,
    /// Manufacturer model designation.
    pub model: String,
}

/// Partial update payload for a car.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCar {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New model designation, if changing.
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(BikeId::new(), BikeId::new());
        assert_ne!(CarId::new(), CarId::new());
    }

    #[test]
    fn id_display_matches_inner_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::from(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn user_serializes_with_expected_fields() {
        let user = User {
            id: UserId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).expect("serializes");
        assert!(json.get("id").is_some());
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn update_payload_defaults_to_no_changes() {
        let update = UpdateBike::default();
        assert!(update.name.is_none());
        assert!(update.model.is_none());
    }
}
