use std::sync::mpsc::Sender;

use glam::DVec3;
use tracing::{debug, trace, warn};

use crate::math::{self, ViewportResult};
use crate::params::{OrbitParameters, ParameterDelta};
use crate::wheel::{normalize_wheel, WheelInput};

/// Receiver of the partial updates produced by [`OrbitController`].
pub trait ViewportSink {
    fn on_viewport_change(&mut self, delta: ParameterDelta);
}

impl<F> ViewportSink for F
where
    F: FnMut(ParameterDelta),
{
    fn on_viewport_change(&mut self, delta: ParameterDelta) {
        self(delta)
    }
}

impl ViewportSink for Vec<ParameterDelta> {
    fn on_viewport_change(&mut self, delta: ParameterDelta) {
        self.push(delta);
    }
}

impl ViewportSink for Sender<ParameterDelta> {
    fn on_viewport_change(&mut self, delta: ParameterDelta) {
        if self.send(delta).is_err() {
            warn!("viewport receiver disconnected, dropping {delta:?}");
        }
    }
}

/// Keyboard modifiers held while a pointer event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last_x: f64, last_y: f64 },
}

/// Turns pointer and wheel input into [`ParameterDelta`]s for the parameter owner.
///
/// The controller never stores camera parameters; the only state kept between events is the
/// last pointer position of an active drag.
#[derive(Debug)]
pub struct OrbitController<S> {
    sink: S,
    drag: DragState,
}

impl<S: ViewportSink> OrbitController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            drag: DragState::Idle,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn viewport(&self, params: &OrbitParameters) -> ViewportResult {
        math::build_viewport(params)
    }

    /// Begin a gesture at the pointer position. Restarting an active drag is allowed.
    pub fn drag_start(&mut self, x: f64, y: f64) {
        debug!(x, y, "orbit drag started");
        self.drag = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
        self.emit(ParameterDelta::dragging(true));
    }

    /// Rotate, or pan when any modifier is held. Ignored unless a drag is active.
    pub fn drag_move(&mut self, x: f64, y: f64, modifiers: Modifiers, params: &OrbitParameters) {
        let DragState::Dragging { last_x, last_y } = self.drag else {
            return;
        };

        let dx = (x - last_x) / params.width;
        let dy = (y - last_y) / params.height;

        let delta = if modifiers.any() {
            let look_at = math::pan_look_at(params, dx, dy);
            trace!(dx, dy, ?look_at, "orbit pan");
            ParameterDelta::look_at(look_at)
        } else {
            let (rotation_x, rotation_y) =
                math::rotation_after_drag(params.rotation_x, params.rotation_y, dx, dy);
            trace!(dx, dy, rotation_x, rotation_y, "orbit rotate");
            ParameterDelta::rotation(rotation_x, rotation_y)
        };
        self.emit(delta);

        self.drag = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
    }

    pub fn drag_end(&mut self) {
        debug!(was_dragging = self.is_dragging(), "orbit drag ended");
        self.drag = DragState::Idle;
        self.emit(ParameterDelta::dragging(false));
    }

    /// Exponential zoom. Never touches the drag state.
    pub fn wheel(&mut self, input: &WheelInput, params: &OrbitParameters) {
        let value = normalize_wheel(input);
        let distance = math::zoom_distance(
            params.distance,
            value,
            params.min_distance,
            params.max_distance,
        );
        trace!(raw = input.delta_y, value, distance, "orbit zoom");
        self.emit(ParameterDelta::distance(distance));
    }

    /// Emit the distance that frames the box `min..max`. The pivot is left to the owner.
    pub fn fit_bounds(&mut self, min: DVec3, max: DVec3, params: &OrbitParameters) {
        let distance = math::fit_distance(min, max, params.fov);
        debug!(?min, ?max, distance, "orbit fit to bounds");
        self.emit(ParameterDelta::distance(distance));
    }

    fn emit(&mut self, delta: ParameterDelta) {
        self.sink.on_viewport_change(delta);
    }
}
