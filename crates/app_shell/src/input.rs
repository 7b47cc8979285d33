use orbit_camera::{DeltaMode, Modifiers, OrbitController, OrbitParameters, ViewportSink, WheelInput};
use tracing::debug;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::ModifiersState,
};

/// Forwards native window events to an [`OrbitController`].
#[derive(Debug)]
pub struct InputAdapter {
    modifiers: ModifiersState,
    scale_factor: f64,
    retina_quirk: bool,
}

impl InputAdapter {
    pub fn new(scale_factor: f64, retina_quirk: bool) -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            scale_factor,
            retina_quirk,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Returns true when the event was routed to the controller.
    pub fn handle_event<S: ViewportSink>(
        &mut self,
        event: &WindowEvent,
        controller: &mut OrbitController<S>,
        params: &OrbitParameters,
        cursor: Option<PhysicalPosition<f64>>,
    ) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match (state, cursor) {
                (ElementState::Pressed, Some(pos)) => {
                    controller.drag_start(pos.x, pos.y);
                    true
                }
                (ElementState::Pressed, None) => {
                    debug!("left press before any cursor position, drag not started");
                    false
                }
                (ElementState::Released, _) => {
                    controller.drag_end();
                    true
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                if !controller.is_dragging() {
                    return false;
                }
                controller.drag_move(
                    position.x,
                    position.y,
                    modifiers_from_state(self.modifiers),
                    params,
                );
                true
            }
            WindowEvent::CursorLeft { .. } => {
                controller.drag_end();
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let input = wheel_input(delta, self.scale_factor, self.retina_quirk);
                controller.wheel(&input, params);
                true
            }
            _ => false,
        }
    }
}

pub fn modifiers_from_state(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// winit reports scrolling away from the user as positive, the opposite of a DOM `deltaY`.
pub fn wheel_input(delta: &MouseScrollDelta, scale_factor: f64, retina_quirk: bool) -> WheelInput {
    let (delta_y, delta_mode) = match delta {
        MouseScrollDelta::LineDelta(_, y) => (-f64::from(*y), DeltaMode::Line),
        MouseScrollDelta::PixelDelta(pos) => (-pos.y, DeltaMode::Pixel),
    };
    WheelInput {
        delta_y,
        delta_mode,
        device_pixel_ratio: scale_factor,
        retina_quirk,
    }
}
