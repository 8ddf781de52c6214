//! Crop and resize engine for the profile-picture frame editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! geometry of an interactive crop: translating raw pointer and wheel input
//! into a crop window over the source image, keeping that window inside the
//! image and the on-screen safe area, and zooming or re-fitting the viewport
//! around it. The host JavaScript layer draws the image and handles, and
//! persists the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the action stream |
//! | [`wasm`] | `CropEditor` bindings for the host page |
//! | [`target`] | The cropped image: crop window, position, coordinate maps |
//! | [`store`] | Targets keyed by id, with the active one tracked |
//! | [`handle`] | Crop handles, hit-testing, and handler dispatch |
//! | [`free_crop`] | Edge handlers for an unlocked aspect ratio |
//! | [`fixed_crop`] | Edge handlers for a locked aspect ratio |
//! | [`zoom`] | Zoom bounds, slider mapping, and rescale |
//! | [`animation`] | Auto-fill viewport tween |
//! | [`camera`] | Viewport transform and coordinate conversions |
//! | [`safe_area`] | On-screen region the crop box must stay in |
//! | [`geometry`] | Points, sizes, affine matrices, fit/cover scales |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`config`] | Tunable limits, from defaults, env, or JSON |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |

pub mod animation;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod fixed_crop;
pub mod free_crop;
pub mod geometry;
pub mod handle;
pub mod input;
pub mod safe_area;
pub mod store;
pub mod target;
pub mod wasm;
pub mod zoom;
