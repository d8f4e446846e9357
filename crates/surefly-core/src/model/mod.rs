// ── Domain model ──
//
// Typed entities built from the vendor's raw payloads. Everything here
// is a plain value object; conversion from the wire types lives in
// `crate::convert`.

pub mod device;
pub mod entity;
pub mod enums;
pub mod household;
pub mod ids;
pub mod notification;
pub mod pet;
pub mod report;

pub use device::{Curfew, Device, Signal};
pub use entity::Entity;
pub use enums::{FoodType, LockState, Location, ProductKind};
pub use household::Household;
pub use ids::{DeviceId, EntityId, HouseholdId, PetId, TagId};
pub use notification::Notification;
pub use pet::{DrinkingState, FeedingState, Pet, PetLocation};
pub use report::{MovementDatapoint, PetReport};
