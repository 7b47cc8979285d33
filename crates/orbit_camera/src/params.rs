use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("viewport size must be positive, got {width}x{height}")]
    ViewportSize { width: f64, height: f64 },
    #[error("distance must be positive, got {0}")]
    Distance(f64),
    #[error("field of view must lie in (0, 180) degrees, got {0}")]
    FieldOfView(f64),
    #[error("distance bounds are invalid: min {min}, max {max}")]
    DistanceBounds { min: f64, max: f64 },
}

/// Authoritative camera state, owned by the caller and passed in on every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParameters {
    pub look_at: DVec3,
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Elevation in degrees, kept within [-90, 90].
    pub rotation_x: f64,
    /// Azimuth in degrees, wrapped into (-360, 360).
    pub rotation_y: f64,
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub width: f64,
    pub height: f64,
}

impl OrbitParameters {
    /// Parameters built from [`OrbitConfig::default`].
    pub fn new(distance: f64, width: f64, height: f64) -> Self {
        OrbitConfig::default().parameters(distance, width, height)
    }

    /// Check the preconditions the orbit math relies on. The controller never calls this.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ParameterError::ViewportSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.distance > 0.0) {
            return Err(ParameterError::Distance(self.distance));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ParameterError::FieldOfView(self.fov));
        }
        if !(self.min_distance >= 0.0 && self.min_distance <= self.max_distance) {
            return Err(ParameterError::DistanceBounds {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        Ok(())
    }
}

/// Named defaults applied by the caller before the parameters reach the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub look_at: [f64; 3],
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub min_distance: f64,
    /// `None` leaves zoom-out unbounded.
    pub max_distance: Option<f64>,
    pub fov: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            look_at: [0.0, 0.0, 0.0],
            rotation_x: 0.0,
            rotation_y: 0.0,
            min_distance: 0.0,
            max_distance: None,
            fov: 50.0,
        }
    }
}

impl OrbitConfig {
    pub fn parameters(&self, distance: f64, width: f64, height: f64) -> OrbitParameters {
        OrbitParameters {
            look_at: DVec3::from_array(self.look_at),
            distance,
            min_distance: self.min_distance,
            max_distance: self.max_distance.unwrap_or(f64::INFINITY),
            rotation_x: self.rotation_x,
            rotation_y: self.rotation_y,
            fov: self.fov,
            width,
            height,
        }
    }
}

/// Partial update emitted by the controller. Only changed fields are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub look_at: Option<DVec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dragging: Option<bool>,
}

impl ParameterDelta {
    pub fn dragging(is_dragging: bool) -> Self {
        Self {
            is_dragging: Some(is_dragging),
            ..Self::default()
        }
    }

    pub fn look_at(look_at: DVec3) -> Self {
        Self {
            look_at: Some(look_at),
            ..Self::default()
        }
    }

    pub fn distance(distance: f64) -> Self {
        Self {
            distance: Some(distance),
            ..Self::default()
        }
    }

    pub fn rotation(rotation_x: f64, rotation_y: f64) -> Self {
        Self {
            rotation_x: Some(rotation_x),
            rotation_y: Some(rotation_y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into the owner's parameters. `is_dragging` has no slot there and is skipped.
    pub fn apply_to(&self, params: &mut OrbitParameters) {
        if let Some(look_at) = self.look_at {
            params.look_at = look_at;
        }
        if let Some(distance) = self.distance {
            params.distance = distance;
        }
        if let Some(rotation_x) = self.rotation_x {
            params.rotation_x = rotation_x;
        }
        if let Some(rotation_y) = self.rotation_y {
            params.rotation_y = rotation_y;
        }
    }
}
