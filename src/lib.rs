//! Planet canvas core for the Vortex portal.
//!
//! Users create planets (named, described, image-bearing markers) and pan
//! around a canvas that holds them. Everything is persisted in a local
//! key-value store. This crate owns the whole navigation model: validation,
//! persistence, bounds, viewport clamping with debounced saves, placement of
//! new planets, and click routing. A host (browser glue, a test, the CLI)
//! forwards raw events and applies the returned [`canvas::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`canvas`] | Host-facing [`canvas::PlanetCanvas`]: gestures, ticks, storage sync, planet changes |
//! | [`viewport`] | Drag state machine, clamping, debounced offset persistence |
//! | [`gateway`] | Persistence gateway ([`gateway::PlanetStore`]) |
//! | [`storage`] | Storage port and the memory/file backends |
//! | [`planet`] | Planet entity, sparse patches, tolerant decoding |
//! | [`validate`] | Field validators and localized messages |
//! | [`bounds`] | Pannable extent derived from the planet set |
//! | [`placement`] | Spawn positions for new planets |
//! | [`hit`] | Which planet a click landed on |
//! | [`camera`] | Points and the viewport offset transform |
//! | [`debounce`] | Trailing-edge debounce primitive |
//! | [`image`] | Image descriptors and data-URL ingestion |
//! | [`config`] | Environment configuration |
//! | [`consts`] | Shared constants (limits, margin, timings, storage keys) |

pub mod bounds;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod consts;
pub mod debounce;
pub mod gateway;
pub mod hit;
pub mod image;
pub mod placement;
pub mod planet;
pub mod storage;
pub mod validate;
pub mod viewport;
