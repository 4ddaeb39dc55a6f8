//! # morph-core
//!
//! Core types and the classification engine for morph.
//!
//! This crate provides the pieces every other morph crate builds on:
//! - The clamped morphological feature vector and its patch type
//! - The Hubble label type and the deterministic decision engine
//! - The quick-set preset catalog and keyboard routing
//! - Annotated item entities and opaque image handles
//! - ID generation and cross-cutting error types

pub mod classify;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod features;
pub mod ids;
pub mod keys;
pub mod label;
pub mod presets;

pub use classify::classify;
pub use features::{FeaturePatch, FeaturePatchBuilder, FeatureVector};
pub use label::{HubbleLabel, SpiralStage};
