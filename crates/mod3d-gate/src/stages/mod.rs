//! Built-in gate stages.

pub mod ownership;

pub use ownership::OwnershipStage;
