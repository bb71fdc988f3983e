//! Core domain models and storage layer for the Enlace fleet service.
//!
//! Provides strongly-typed entity models, the repository layer over
//! PostgreSQL and the shared error taxonomy. The API and relay crates
//! depend on these foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod storage;
pub mod time;

pub use error::{CoreError, Result};
pub use models::{
    Bike, BikeId, Car, CarId, NewBike, NewCar, NewUser, UpdateBike, UpdateCar, UpdateUser, User,
    UserId,
};
pub use time::{Clock, RealClock, TestClock};
