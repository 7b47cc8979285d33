mod input;

use anyhow::{Context, Result};
use glam::DVec3;
use input::InputAdapter;
use orbit_camera::{OrbitController, OrbitParameters, ParameterDelta};
use settings::{SettingsStore, UserSettings};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::Key,
    window::{Window, WindowAttributes, WindowId},
};

/// Box framed by the fit shortcut.
const DEMO_BOUNDS: (DVec3, DVec3) = (DVec3::splat(-1.0), DVec3::splat(1.0));

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings_store = SettingsStore::new().context("settings store init failed")?;
    let user_settings = match settings_store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("using default settings (failed to load): {err}");
            UserSettings::default()
        }
    };

    let params = user_settings.camera.parameters(
        user_settings.viewer.initial_distance,
        f64::from(user_settings.viewer.width.max(1)),
        f64::from(user_settings.viewer.height.max(1)),
    );
    params
        .validate()
        .with_context(|| format!("invalid camera settings in {}", settings_store.path().display()))?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = OrbitViewApp::new(user_settings, params);
    event_loop.run_app(&mut app).context("event loop error")?;
    Ok(())
}

/// Owns the authoritative camera parameters and merges whatever the controller emits.
struct OrbitViewApp {
    user_settings: UserSettings,
    window: Option<Window>,
    window_id: Option<WindowId>,
    params: OrbitParameters,
    dragging: bool,
    controller: OrbitController<Sender<ParameterDelta>>,
    updates: Receiver<ParameterDelta>,
    input: InputAdapter,
    cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitViewApp {
    fn new(user_settings: UserSettings, params: OrbitParameters) -> Self {
        let (tx, rx) = mpsc::channel();
        let input = InputAdapter::new(1.0, user_settings.viewer.retina_wheel_quirk);
        Self {
            user_settings,
            window: None,
            window_id: None,
            params,
            dragging: false,
            controller: OrbitController::new(tx),
            updates: rx,
            input,
            cursor: None,
        }
    }

    fn merge_updates(&mut self) {
        let mut changed = false;
        for delta in self.updates.try_iter() {
            delta.apply_to(&mut self.params);
            if let Some(dragging) = delta.is_dragging {
                self.dragging = dragging;
            }
            changed |= delta.is_dragging.is_none();
        }
        if changed {
            let viewport = self.controller.viewport(&self.params);
            info!(
                eye = ?viewport.eye,
                look_at = ?viewport.look_at,
                distance = self.params.distance,
                rotation_x = self.params.rotation_x,
                rotation_y = self.params.rotation_y,
                dragging = self.dragging,
                "viewport updated"
            );
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.params.width = f64::from(size.width.max(1));
        self.params.height = f64::from(size.height.max(1));
    }

    fn fit_demo_bounds(&mut self) {
        let (min, max) = DEMO_BOUNDS;
        self.params.look_at = (min + max) * 0.5;
        self.controller.fit_bounds(min, max, &self.params);
    }
}

impl ApplicationHandler for OrbitViewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let viewer = &self.user_settings.viewer;
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title(viewer.title.clone())
                .with_inner_size(PhysicalSize::new(viewer.width, viewer.height)),
        ) {
            Ok(window) => window,
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        self.input.set_scale_factor(window.scale_factor());
        self.resize(window.inner_size());
        self.window_id = Some(window.id());
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if Some(window_id) != self.window_id {
            return;
        }

        if self
            .input
            .handle_event(&event, &mut self.controller, &self.params, self.cursor)
        {
            self.merge_updates();
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.input.set_scale_factor(scale_factor);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Key::Character(c) = &event.logical_key {
                    if c.eq_ignore_ascii_case("f") {
                        self.fit_demo_bounds();
                        self.merge_updates();
                    }
                }
            }
            _ => {}
        }
    }
}
