use approx::assert_abs_diff_eq;
use glam::DVec3;
use orbit_camera::{
    build_viewport, compute_eye, DeltaMode, Modifiers, OrbitController, OrbitParameters,
    ParameterDelta, WheelInput,
};

/// Stand-in for the external owner: drives the controller and merges what it emits.
struct Owner {
    params: OrbitParameters,
    controller: OrbitController<Vec<ParameterDelta>>,
    dragging: bool,
}

impl Owner {
    fn new(params: OrbitParameters) -> Self {
        Self {
            params,
            controller: OrbitController::new(Vec::new()),
            dragging: false,
        }
    }

    fn merge(&mut self) -> Vec<ParameterDelta> {
        let deltas = std::mem::take(self.controller.sink_mut());
        for delta in &deltas {
            delta.apply_to(&mut self.params);
            if let Some(dragging) = delta.is_dragging {
                self.dragging = dragging;
            }
        }
        deltas
    }

    fn drag(&mut self, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
        self.controller.drag_start(from.0, from.1);
        self.merge();
        self.controller.drag_move(to.0, to.1, modifiers, &self.params);
        self.merge();
        self.controller.drag_end();
        self.merge();
    }

    fn wheel(&mut self, input: WheelInput) {
        self.controller.wheel(&input, &self.params);
        self.merge();
    }
}

#[test]
fn default_viewport_eye_sits_on_z_axis() {
    let params = OrbitParameters::new(10.0, 500.0, 500.0);
    let viewport = build_viewport(&params);
    assert_abs_diff_eq!(viewport.eye.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(viewport.eye.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(viewport.eye.z, 10.0, epsilon = 1e-9);
    assert_eq!(viewport.look_at, DVec3::ZERO);
    assert_eq!((viewport.near, viewport.far), (0.1, 1000.0));
}

#[test]
fn horizontal_drag_swings_azimuth() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 500.0, 500.0));
    owner.controller.drag_start(100.0, 100.0);
    assert_eq!(owner.merge(), vec![ParameterDelta::dragging(true)]);
    assert!(owner.dragging);

    owner
        .controller
        .drag_move(150.0, 100.0, Modifiers::NONE, &owner.params);
    owner.merge();
    assert_abs_diff_eq!(owner.params.rotation_y, -18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(owner.params.rotation_x, 0.0, epsilon = 1e-9);

    owner.controller.drag_end();
    assert_eq!(owner.merge(), vec![ParameterDelta::dragging(false)]);
    assert!(!owner.dragging);
}

#[test]
fn successive_moves_measure_from_previous_pointer() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 500.0, 500.0));
    owner.controller.drag_start(0.0, 0.0);
    for x in [50.0, 100.0, 150.0] {
        owner.controller.drag_move(x, 0.0, Modifiers::NONE, &owner.params);
        owner.merge();
    }
    assert_abs_diff_eq!(owner.params.rotation_y, -54.0, epsilon = 1e-9);
}

#[test]
fn move_after_drag_end_is_ignored() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 500.0, 500.0));
    owner.drag((0.0, 0.0), (10.0, 10.0), Modifiers::NONE);
    let before = owner.params;
    owner
        .controller
        .drag_move(400.0, 400.0, Modifiers::NONE, &owner.params);
    assert!(owner.merge().is_empty());
    assert_eq!(owner.params, before);
}

#[test]
fn elevation_stays_clamped_over_many_drags() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 400.0, 300.0));
    for step in 0..40 {
        let dy = if step % 3 == 0 { -700.0 } else { 230.0 };
        owner.drag((200.0, 150.0), (200.0, 150.0 + dy), Modifiers::NONE);
        assert!((-90.0..=90.0).contains(&owner.params.rotation_x));
    }
}

#[test]
fn azimuth_stays_within_one_turn_over_many_drags() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 400.0, 300.0));
    for step in 0..40 {
        let dx = if step % 4 == 0 { 1700.0 } else { -950.0 };
        owner.drag((200.0, 150.0), (200.0 + dx, 150.0), Modifiers::NONE);
        assert!(owner.params.rotation_y > -360.0 && owner.params.rotation_y < 360.0);
    }
    assert_abs_diff_eq!(owner.params.rotation_y, 135.0, epsilon = 1e-6);
}

#[test]
fn wheel_tick_zooms_by_one_percent() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 500.0, 500.0));
    owner.wheel(WheelInput::pixels(4.000244140625));
    assert_abs_diff_eq!(owner.params.distance, 10.1, epsilon = 1e-9);
}

#[test]
fn zero_wheel_leaves_distance_unchanged() {
    let mut owner = Owner::new(OrbitParameters::new(10.0, 500.0, 500.0));
    owner.wheel(WheelInput::pixels(0.0));
    assert_abs_diff_eq!(owner.params.distance, 10.0, epsilon = 1e-12);
}

#[test]
fn wheel_distance_respects_bounds() {
    let params = OrbitParameters {
        min_distance: 2.0,
        max_distance: 20.0,
        ..OrbitParameters::new(10.0, 500.0, 500.0)
    };
    let mut owner = Owner::new(params);
    for delta in [120.0, 500.0, -3.0, -900.0, 40.0, 7.5] {
        for mode in [DeltaMode::Pixel, DeltaMode::Line, DeltaMode::Page] {
            owner.wheel(WheelInput {
                delta_mode: mode,
                ..WheelInput::pixels(delta)
            });
            assert!((2.0..=20.0).contains(&owner.params.distance));
        }
    }
}

#[test]
fn pan_then_rotate_orbits_new_pivot() {
    let params = OrbitParameters {
        fov: 90.0,
        ..OrbitParameters::new(10.0, 500.0, 500.0)
    };
    let mut owner = Owner::new(params);
    owner.drag((0.0, 0.0), (0.0, -50.0), Modifiers { alt: true, ..Modifiers::NONE });
    // Dragging up lowers the pivot: units per viewport = 5, dy = -0.1.
    assert_abs_diff_eq!(owner.params.look_at.y, -0.5, epsilon = 1e-9);

    owner.drag((0.0, 0.0), (125.0, 0.0), Modifiers::NONE);
    let eye = build_viewport(&owner.params).eye;
    let expected = compute_eye(owner.params.look_at, 10.0, 0.0, -45.0);
    assert_abs_diff_eq!(eye.x, expected.x, epsilon = 1e-9);
    assert_abs_diff_eq!(eye.y, -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(eye.distance(owner.params.look_at), 10.0, epsilon = 1e-9);
}

#[test]
fn fit_then_wheel_chain() {
    let params = OrbitParameters {
        fov: 90.0,
        ..OrbitParameters::new(1.0, 500.0, 500.0)
    };
    let mut owner = Owner::new(params);
    owner
        .controller
        .fit_bounds(DVec3::ZERO, DVec3::splat(10.0), &owner.params);
    owner.merge();
    assert_abs_diff_eq!(owner.params.distance, 5.0, epsilon = 1e-9);

    owner.wheel(WheelInput::lines(1.0));
    assert_abs_diff_eq!(owner.params.distance, 5.0 * 1.01f64.powf(40.0), epsilon = 1e-9);
}
