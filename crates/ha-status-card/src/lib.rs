//! Status card engine
//!
//! Turns a registry snapshot, live entity state and a card configuration
//! into per-category summaries, and user gestures into intents for the
//! host:
//!
//! ```text
//! registries + live state → classify → aggregate → summaries
//!                                         ↓
//!              gesture → customization → dispatch → toggle / navigate / details
//! ```
//!
//! All stages are synchronous and side-effect free. [`StatusCard`] caches
//! the classification keyed on the identity of its inputs.

pub mod activity;
pub mod aggregate;
mod card;
pub mod category;
pub mod classifier;
pub mod customization;
mod dispatch;
pub mod grouping;
mod intent;
mod memo;
pub mod person;
pub mod tile;
pub mod toggle;
mod ui_state;

pub use aggregate::AggregatedGroup;
pub use card::{HomeSnapshot, StatusCard};
pub use category::Category;
pub use classifier::ClassifiedEntities;
pub use customization::{CustomizationTable, Resolved, DEFAULT_BACKGROUND};
pub use dispatch::TileTarget;
pub use grouping::{AreaGroup, GroupedEntity};
pub use intent::{DetailTarget, Intent};
pub use person::PersonBadge;
pub use tile::{CategoryTile, EntityTile, Summary, Tile};
pub use ui_state::UiState;
