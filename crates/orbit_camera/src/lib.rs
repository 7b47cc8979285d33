//! Orbit camera input mapping.
//!
//! Pointer drags rotate (or pan, with a modifier held) and wheel events zoom a camera orbiting a
//! pivot. The controller reports [`ParameterDelta`]s to its owner, which merges them into its
//! [`OrbitParameters`] and passes the result back on the next event.

pub mod controller;
pub mod math;
pub mod params;
pub mod wheel;

pub use controller::{DragState, Modifiers, OrbitController, ViewportSink};
pub use math::{build_viewport, compute_eye, fit_distance, ViewportResult};
pub use params::{OrbitConfig, OrbitParameters, ParameterDelta, ParameterError};
pub use wheel::{normalize_wheel, DeltaMode, WheelInput};
