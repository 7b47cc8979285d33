use serde::{Deserialize, Serialize};

/// Approximate pixel height of one scrolled line.
pub const LINE_HEIGHT_PX: f64 = 40.0;

/// Magnitude some platforms report for a single discrete mouse-wheel notch.
pub const WHEEL_TICK: f64 = 4.000244140625;

/// Unit of a wheel delta, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub device_pixel_ratio: f64,
    /// Host doubles pixel-mode deltas on high-DPI screens.
    pub retina_quirk: bool,
}

impl WheelInput {
    pub fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            delta_mode: DeltaMode::Pixel,
            device_pixel_ratio: 1.0,
            retina_quirk: false,
        }
    }

    pub fn lines(delta_y: f64) -> Self {
        Self {
            delta_mode: DeltaMode::Line,
            ..Self::pixels(delta_y)
        }
    }
}

/// Collapse heterogeneous wheel deltas into one logical scroll magnitude.
///
/// Discrete wheel notches become small integers; trackpad deltas pass through unscaled.
pub fn normalize_wheel(input: &WheelInput) -> f64 {
    let mut value = input.delta_y;
    if input.retina_quirk && input.delta_mode == DeltaMode::Pixel {
        value /= input.device_pixel_ratio;
    }
    if input.delta_mode == DeltaMode::Line {
        value *= LINE_HEIGHT_PX;
    }
    if value != 0.0 && value % WHEEL_TICK == 0.0 {
        value = (value / 4.0).floor();
    }
    value
}
