// surefly-core: domain model and account facade for the Sure Petcare cloud API
//
// Raw payloads from `surefly-api` are converted into the typed entities
// in `model`; the `Account` facade composes the client, the converters,
// and the auth lifecycle into one-shot operations.

pub mod account;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;

pub use account::Account;
pub use config::{AccountConfig, AuthCredentials};
pub use error::CoreError;
pub use model::{
    Curfew, Device, DrinkingState, Entity, EntityId, FeedingState, FoodType, Household, LockState,
    Location, Notification, Pet, PetLocation, PetReport, ProductKind,
};
