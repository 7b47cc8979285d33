use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::params::OrbitParameters;

pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;

/// Degrees of rotation applied per full viewport width (or height) of drag.
pub const DEGREES_PER_VIEWPORT: f64 = 180.0;
pub const MAX_ELEVATION_DEG: f64 = 90.0;
pub const ZOOM_BASE: f64 = 1.01;

/// Constrain `x` to `[min, max]`.
///
/// Inverted bounds resolve to `min`, even for a NaN `x`. With ordered bounds a NaN `x` is
/// returned unchanged.
pub fn clamp(x: f64, min: f64, max: f64) -> f64 {
    if min > max || x < min {
        return min;
    }
    if x > max {
        return max;
    }
    x
}

pub fn rotate_about_x(point: DVec3, pivot: DVec3, radians: f64) -> DVec3 {
    pivot + DQuat::from_rotation_x(radians) * (point - pivot)
}

pub fn rotate_about_y(point: DVec3, pivot: DVec3, radians: f64) -> DVec3 {
    pivot + DQuat::from_rotation_y(radians) * (point - pivot)
}

/// Express `point` in the orbit frame: elevation about X first, then azimuth about Y, both
/// around `pivot`.
fn orbit_rotate(point: DVec3, pivot: DVec3, rotation_x: f64, rotation_y: f64) -> DVec3 {
    let tilted = rotate_about_x(point, pivot, rotation_x.to_radians());
    rotate_about_y(tilted, pivot, rotation_y.to_radians())
}

pub fn compute_eye(look_at: DVec3, distance: f64, rotation_x: f64, rotation_y: f64) -> DVec3 {
    let start = look_at + DVec3::new(0.0, 0.0, distance);
    orbit_rotate(start, look_at, rotation_x, rotation_y)
}

/// World units covered by one full viewport of drag at the pivot depth.
pub fn units_per_viewport(distance: f64, fov_deg: f64) -> f64 {
    distance / (fov_deg.to_radians() / 2.0).tan() / 2.0
}

/// New pivot after a pan drag of `(dx, dy)` viewport fractions.
pub fn pan_look_at(params: &OrbitParameters, dx: f64, dy: f64) -> DVec3 {
    let units = units_per_viewport(params.distance, params.fov);
    let shifted = params.look_at + DVec3::new(-units * dx, units * dy, 0.0);
    orbit_rotate(shifted, params.look_at, params.rotation_x, params.rotation_y)
}

/// New `(rotation_x, rotation_y)` after a rotate drag of `(dx, dy)` viewport fractions.
///
/// Elevation is clamped to +/-90 degrees, azimuth wraps with a sign-preserving remainder.
pub fn rotation_after_drag(rotation_x: f64, rotation_y: f64, dx: f64, dy: f64) -> (f64, f64) {
    let x = clamp(
        rotation_x - dy * DEGREES_PER_VIEWPORT,
        -MAX_ELEVATION_DEG,
        MAX_ELEVATION_DEG,
    );
    let y = (rotation_y - dx * DEGREES_PER_VIEWPORT) % 360.0;
    (x, y)
}

/// Exponential zoom by a normalized wheel magnitude.
pub fn zoom_distance(distance: f64, wheel: f64, min_distance: f64, max_distance: f64) -> f64 {
    clamp(distance * ZOOM_BASE.powf(wheel), min_distance, max_distance)
}

/// Distance at which a box spanning `min..max` fills the vertical field of view.
pub fn fit_distance(min: DVec3, max: DVec3, fov_deg: f64) -> f64 {
    let size = (max - min).max_element();
    size / (fov_deg.to_radians() / 2.0).tan() / 2.0
}

/// Renderable camera description derived from [`OrbitParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportResult {
    pub eye: DVec3,
    pub look_at: DVec3,
    pub near: f64,
    pub far: f64,
    pub fovy: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportResult {
    pub fn aspect(&self) -> f64 {
        if self.height == 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.look_at, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fovy.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> [[f32; 4]; 4] {
        (self.projection_matrix() * self.view_matrix())
            .as_mat4()
            .to_cols_array_2d()
    }
}

pub fn build_viewport(params: &OrbitParameters) -> ViewportResult {
    ViewportResult {
        eye: compute_eye(
            params.look_at,
            params.distance,
            params.rotation_x,
            params.rotation_y,
        ),
        look_at: params.look_at,
        near: NEAR_PLANE,
        far: FAR_PLANE,
        fovy: params.fov,
        width: params.width,
        height: params.height,
    }
}
