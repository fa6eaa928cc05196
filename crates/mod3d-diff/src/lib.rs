//! Asset reference differ for the Mod3d catalog.
//!
//! Given a stored record and an edit payload, computes which asset keys the
//! edit supersedes and so must be reclaimed from the object store. The
//! computation is pure; nothing here touches a store.
//!
//! # Key Types
//!
//! - [`AssetDiff`] -- per-slot change flags plus the superseded keys
//! - [`SupersededAsset`] / [`AssetSlot`] -- one superseded key and where it lived

pub mod asset_diff;

pub use asset_diff::{diff_assets, AssetDiff, AssetSlot, SupersededAsset};
