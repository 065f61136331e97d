//! Movement domain: unit tests for the controller core and its systems.

use std::f32::consts::{FRAC_PI_2, PI};

use avian3d::prelude::LinearVelocity;
use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::input::ButtonState;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::angle::{lerp_angle, normalize_angle};
use super::systems::input::cursor_to_ndc;
use super::systems::{drive_character, sample_frame_input, track_pointer_activity};
use super::{
    Action, ActionBindings, CharacterModel, CharacterState, CharacterTelemetry, Container,
    ControllerRig, ControllerTuning, FrameInput, Gait, InputSource, JumpCounter, MAX_JUMPS,
    MovementVector, PhysicsBody, Player, PointerSample, PointerState, TuningParam,
    resolve_movement, solve_velocity, step_character,
};
use crate::animation::{AnimationLabel, CharacterAnimation};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn pointer(x: f32, y: f32) -> FrameInput {
    FrameInput {
        pointer: PointerSample { active: true, x, y },
        ..Default::default()
    }
}

struct FakeBody {
    velocity: Vec3,
    translation: Vec3,
    writes: Vec<(Vec3, bool)>,
}

impl FakeBody {
    fn at_height(height: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            translation: Vec3::new(0.0, height, 0.0),
            writes: Vec::new(),
        }
    }
}

impl PhysicsBody for FakeBody {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn set_linear_velocity(&mut self, velocity: Vec3, wake: bool) {
        self.velocity = velocity;
        self.writes.push((velocity, wake));
    }
}

// ---- angles ----

#[test]
fn test_normalize_angle_range_and_idempotence() {
    for raw in [-20.0, -7.0, -PI, -1.0, 0.0, 1.0, PI, 4.0, 13.0, 1000.0] {
        let wrapped = normalize_angle(raw);
        assert!(wrapped > -PI && wrapped <= PI, "{} -> {}", raw, wrapped);
        assert!(close(normalize_angle(wrapped), wrapped));
    }
    assert!(close(normalize_angle(-PI), PI));
    assert!(close(normalize_angle(3.0 * PI / 2.0), -FRAC_PI_2));
}

#[test]
fn test_normalize_angle_passes_non_finite_through() {
    assert!(normalize_angle(f32::NAN).is_nan());
    assert_eq!(normalize_angle(f32::INFINITY), f32::INFINITY);
}

#[test]
fn test_lerp_angle_takes_short_way_across_seam() {
    let mid = lerp_angle(170.0_f32.to_radians(), (-170.0_f32).to_radians(), 0.5);
    assert!(close(mid.abs(), PI), "got {}", mid);

    let quarter = lerp_angle(0.0, FRAC_PI_2, 0.5);
    assert!(close(quarter, FRAC_PI_2 / 2.0));

    assert!(close(lerp_angle(1.0, 2.0, 0.0), 1.0));
    assert!(close(lerp_angle(1.0, 2.0, 1.0), 2.0));
}

// ---- input resolution ----

#[test]
fn test_forward_key_walks() {
    let tuning = ControllerTuning::default();
    let input = FrameInput {
        forward: true,
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &tuning);
    assert_eq!(resolved.movement, MovementVector { x: 0.0, z: 1.0 });
    assert_eq!(resolved.gait, Gait::Walk);
    assert_eq!(resolved.speed, tuning.walk_speed);
}

#[test]
fn test_run_key_runs() {
    let tuning = ControllerTuning::default();
    let input = FrameInput {
        forward: true,
        run: true,
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &tuning);
    assert_eq!(resolved.gait, Gait::Run);
    assert_eq!(resolved.speed, tuning.run_speed);
}

#[test]
fn test_equal_speeds_label_walk_as_run() {
    let tuning = ControllerTuning {
        walk_speed: 1.6,
        run_speed: 1.6,
        ..Default::default()
    };
    let input = FrameInput {
        forward: true,
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &tuning);
    assert_eq!(resolved.speed, 1.6);
    assert_eq!(resolved.gait, Gait::Run);

    let mut state = CharacterState::default();
    let mut body = FakeBody::at_height(1.0);
    let report = step_character(&mut state, &input, &tuning, &mut body);
    assert_eq!(report.animation, AnimationLabel::Run);
}

#[test]
fn test_backward_overrides_forward() {
    let input = FrameInput {
        forward: true,
        backward: true,
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &ControllerTuning::default());
    assert_eq!(resolved.movement.z, -1.0);
}

#[test]
fn test_right_overrides_left() {
    let input = FrameInput {
        left: true,
        right: true,
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &ControllerTuning::default());
    assert_eq!(resolved.movement, MovementVector { x: -1.0, z: 0.0 });
}

#[test]
fn test_no_input_is_idle_walk() {
    let tuning = ControllerTuning::default();
    let resolved = resolve_movement(&FrameInput::default(), &tuning);
    assert!(resolved.movement.is_idle());
    assert_eq!(resolved.gait, Gait::Walk);
    assert_eq!(resolved.speed, tuning.walk_speed);
}

#[test]
fn test_pointer_steers_and_forces_run() {
    let tuning = ControllerTuning::default();
    let resolved = resolve_movement(&pointer(0.8, 0.0), &tuning);
    assert!(close(resolved.movement.x, -0.8));
    assert!(close(resolved.movement.z, 0.4));
    assert_eq!(resolved.gait, Gait::Run);
    assert_eq!(resolved.speed, tuning.run_speed);
}

#[test]
fn test_pointer_dead_zone_and_bias() {
    let tuning = ControllerTuning::default();

    let resolved = resolve_movement(&pointer(0.05, -0.4), &tuning);
    assert!(resolved.movement.is_idle());
    assert_eq!(resolved.gait, Gait::Walk);

    let resolved = resolve_movement(&pointer(0.0, 0.0), &tuning);
    assert_eq!(resolved.movement.x, 0.0);
    assert!(close(resolved.movement.z, 0.4));
    assert_eq!(resolved.gait, Gait::Walk);
}

#[test]
fn test_pointer_overrides_forward_key_but_not_lateral_keys() {
    let mut input = pointer(0.3, -0.4);
    input.forward = true;
    input.left = true;

    let resolved = resolve_movement(&input, &ControllerTuning::default());
    assert_eq!(resolved.movement.x, 1.0);
    assert_eq!(resolved.movement.z, 0.0);
}

#[test]
fn test_inactive_pointer_is_ignored() {
    let input = FrameInput {
        pointer: PointerSample {
            active: false,
            x: 0.9,
            y: 0.9,
        },
        ..Default::default()
    };
    let resolved = resolve_movement(&input, &ControllerTuning::default());
    assert!(resolved.movement.is_idle());
}

struct ScriptedInput {
    held: Vec<Action>,
    pointer_active: bool,
    coordinates: Vec2,
}

impl InputSource for ScriptedInput {
    fn action(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_pointer_active(&self) -> bool {
        self.pointer_active
    }

    fn pointer_coordinates(&self) -> Vec2 {
        self.coordinates
    }
}

#[test]
fn test_frame_input_samples_every_action() {
    let source = ScriptedInput {
        held: vec![Action::Backward, Action::Right, Action::Jump],
        pointer_active: true,
        coordinates: Vec2::new(0.25, -0.5),
    };
    let input = FrameInput::sample(&source);
    assert!(!input.forward);
    assert!(input.backward);
    assert!(!input.left);
    assert!(input.right);
    assert!(!input.run);
    assert!(input.jump);
    assert_eq!(
        input.pointer,
        PointerSample {
            active: true,
            x: 0.25,
            y: -0.5
        }
    );
}

#[test]
fn test_cursor_to_ndc() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(cursor_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
    assert_eq!(cursor_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
    assert_eq!(cursor_to_ndc(size, size), Vec2::new(1.0, -1.0));
    assert_eq!(cursor_to_ndc(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
}

// ---- jumps ----

#[test]
fn test_jump_counter_allows_two_then_blocks() {
    let mut jumps = JumpCounter::default();
    assert!(jumps.try_jump(true));
    assert!(jumps.try_jump(true));
    assert!(!jumps.try_jump(true));
    assert_eq!(jumps.count(), MAX_JUMPS);
    assert!(!jumps.can_jump());
}

#[test]
fn test_jump_counter_ignores_released_button() {
    let mut jumps = JumpCounter::default();
    assert!(!jumps.try_jump(false));
    assert_eq!(jumps.count(), 0);
}

#[test]
fn test_jump_counter_resets_only_when_grounded() {
    let mut jumps = JumpCounter::default();
    jumps.try_jump(true);
    jumps.try_jump(true);

    assert!(!jumps.reset_if_grounded(1.0, 0.0, 0.26));
    assert!(!jumps.reset_if_grounded(0.2, 0.5, 0.26));
    assert_eq!(jumps.count(), 2);

    assert!(jumps.reset_if_grounded(0.26, 0.0, 0.26));
    assert_eq!(jumps.count(), 0);
}

// ---- rotation ----

#[test]
fn test_rotation_targets_follow_movement() {
    let mut state = CharacterState::default();
    state.update_rotation_targets(MovementVector { x: 1.0, z: 0.0 }, 0.01);
    assert!(close(state.container_yaw_target, 0.01));
    assert!(close(state.character_yaw_target, FRAC_PI_2));

    state.update_rotation_targets(MovementVector { x: -1.0, z: 1.0 }, 0.01);
    assert!(close(state.container_yaw_target, 0.0));
    assert!(close(state.character_yaw_target, -PI / 4.0));
}

#[test]
fn test_rotation_targets_hold_when_idle() {
    let mut state = CharacterState::default();
    state.update_rotation_targets(MovementVector { x: 0.0, z: -1.0 }, 0.01);
    let before = state;

    state.update_rotation_targets(MovementVector::ZERO, 0.01);
    assert_eq!(state, before);
    assert!(close(state.character_yaw_target, PI));
}

#[test]
fn test_container_yaw_accumulates_without_wrapping() {
    let mut state = CharacterState::default();
    for _ in 0..1000 {
        state.update_rotation_targets(MovementVector { x: 1.0, z: 0.0 }, 0.01);
    }
    assert!(state.container_yaw_target > 9.9);
}

#[test]
fn test_smooth_rotations_cover_tenth_of_gap() {
    let mut state = CharacterState {
        container_yaw_target: 1.0,
        character_yaw_target: FRAC_PI_2,
        ..Default::default()
    };
    state.smooth_rotations();
    assert!(close(state.visual_container_yaw, 0.1));
    assert!(close(state.visual_character_yaw, FRAC_PI_2 * 0.1));
}

#[test]
fn test_smooth_character_yaw_crosses_seam() {
    let mut state = CharacterState {
        visual_character_yaw: 170.0_f32.to_radians(),
        character_yaw_target: (-170.0_f32).to_radians(),
        ..Default::default()
    };
    state.smooth_rotations();
    assert!(state.visual_character_yaw > 170.0_f32.to_radians());
}

// ---- velocity ----

#[test]
fn test_solve_velocity_heading_and_vertical() {
    let v = solve_velocity(
        Vec3::new(5.0, -2.0, 5.0),
        MovementVector { x: 0.0, z: 1.0 },
        0.8,
        0.0,
        0.0,
    );
    assert!(close(v.x, 0.0));
    assert_eq!(v.y, -2.0);
    assert!(close(v.z, 0.8));

    let v = solve_velocity(
        Vec3::ZERO,
        MovementVector { x: 1.0, z: 0.0 },
        2.0,
        FRAC_PI_2 / 2.0,
        FRAC_PI_2 / 2.0,
    );
    assert!(close(v.x, 2.0));
    assert!(close(v.z, 0.0));
}

#[test]
fn test_solve_velocity_idle_zeroes_horizontal() {
    let v = solve_velocity(
        Vec3::new(3.0, 1.5, -4.0),
        MovementVector::ZERO,
        1.6,
        1.0,
        1.0,
    );
    assert_eq!(v, Vec3::new(0.0, 1.5, 0.0));
}

// ---- controller step ----

#[test]
fn test_step_character_double_jump_then_blocked() {
    let tuning = ControllerTuning::default();
    let mut state = CharacterState::default();
    let input = FrameInput {
        jump: true,
        ..Default::default()
    };

    let mut body = FakeBody::at_height(0.0);
    let report = step_character(&mut state, &input, &tuning, &mut body);
    assert!(report.grounded);
    assert!(report.jumped);
    assert_eq!(report.animation, AnimationLabel::Jump);
    assert_eq!(body.writes, vec![(Vec3::new(0.0, tuning.jump_impulse, 0.0), true)]);

    // Airborne and still rising: the second jump goes out.
    body.translation.y = 1.0;
    let report = step_character(&mut state, &input, &tuning, &mut body);
    assert!(!report.grounded);
    assert!(report.jumped);
    assert_eq!(state.jumps.count(), 2);

    body.velocity.y = 0.5;
    let report = step_character(&mut state, &input, &tuning, &mut body);
    assert!(!report.jumped);
    assert_eq!(report.animation, AnimationLabel::Idle);
    assert_eq!(body.velocity.y, 0.5);
    assert_eq!(state.jumps.count(), 2);
}

#[test]
fn test_step_character_landing_restores_jumps() {
    let tuning = ControllerTuning::default();
    let mut state = CharacterState::default();
    let jump = FrameInput {
        jump: true,
        ..Default::default()
    };

    let mut body = FakeBody::at_height(2.0);
    step_character(&mut state, &jump, &tuning, &mut body);
    step_character(&mut state, &jump, &tuning, &mut body);
    assert!(!state.jumps.can_jump());

    body.translation.y = 0.1;
    body.velocity.y = 0.0;
    let report = step_character(&mut state, &FrameInput::default(), &tuning, &mut body);
    assert!(report.grounded);
    assert_eq!(state.jumps.count(), 0);
}

#[test]
fn test_step_character_writes_velocity_once_and_wakes() {
    let tuning = ControllerTuning::default();
    let mut state = CharacterState::default();
    let input = FrameInput {
        forward: true,
        run: true,
        ..Default::default()
    };

    let mut body = FakeBody::at_height(1.0);
    let report = step_character(&mut state, &input, &tuning, &mut body);
    assert_eq!(report.animation, AnimationLabel::Run);
    assert_eq!(body.writes.len(), 1);
    let (velocity, wake) = body.writes[0];
    assert!(wake);
    assert!(close(velocity.z, tuning.run_speed));
    assert!(close(velocity.x, 0.0));
}

#[test]
fn test_step_character_turning_uses_target_yaws() {
    let tuning = ControllerTuning::default();
    let mut state = CharacterState::default();
    let input = FrameInput {
        left: true,
        ..Default::default()
    };

    let mut body = FakeBody::at_height(1.0);
    step_character(&mut state, &input, &tuning, &mut body);

    let heading = tuning.rotation_speed + FRAC_PI_2;
    assert!(close(body.velocity.x, heading.sin() * tuning.walk_speed));
    assert!(close(body.velocity.z, heading.cos() * tuning.walk_speed));
    // Visuals lag behind the targets.
    assert!(state.visual_character_yaw < state.character_yaw_target);
}

// ---- tuning ----

#[test]
fn test_tuning_param_nudge_clamps_to_range() {
    let param = TuningParam::WalkSpeed;
    assert!(close(param.nudge(0.8, 1), 0.9));
    assert!(close(param.nudge(0.8, -100), 0.1));
    assert!(close(param.nudge(3.95, 5), 4.0));

    let rotation = TuningParam::RotationSpeed;
    let (min, max) = rotation.range();
    assert!(close(rotation.nudge(0.0, 0), min));
    assert!(close(rotation.nudge(1.0, 0), max));
}

#[test]
fn test_tuning_get_and_set() {
    let mut tuning = ControllerTuning::default();
    for param in TuningParam::ALL {
        tuning.set(param, 0.3);
        assert_eq!(tuning.get(param), 0.3);
    }
    assert_eq!(tuning.jump_impulse, 4.0);
    assert_eq!(TuningParam::RotationSpeed.display(0.5_f32.to_radians()), "0.5 deg");
    assert_eq!(TuningParam::RunSpeed.display(1.6), "1.6");
}

// ---- systems ----

fn controller_world(body_height: f32, input: FrameInput) -> (World, Entity, Entity, Entity) {
    let mut world = World::new();
    world.insert_resource(input);
    world.insert_resource(ControllerTuning::default());
    world.insert_resource(CharacterTelemetry::default());

    let container = world
        .spawn((Container, Transform::default()))
        .id();
    let model = world
        .spawn((CharacterModel, Transform::default()))
        .id();
    let player = world
        .spawn((
            Player,
            CharacterState::default(),
            CharacterAnimation::default(),
            LinearVelocity::default(),
            Transform::from_xyz(0.5, body_height, -0.5),
            ControllerRig { container, model },
        ))
        .id();

    (world, player, container, model)
}

#[test]
fn test_drive_character_moves_body_and_publishes_pose() {
    let input = FrameInput {
        forward: true,
        left: true,
        ..Default::default()
    };
    let (mut world, player, container, model) = controller_world(1.0, input);

    world
        .run_system_once(drive_character)
        .expect("controller system should run");

    let velocity = world.get::<LinearVelocity>(player).unwrap().0;
    assert!(velocity.length() > 0.0);

    let state = *world.get::<CharacterState>(player).unwrap();
    let telemetry = *world.resource::<CharacterTelemetry>();
    assert_eq!(telemetry.position, [0.5, 1.0, -0.5]);
    assert_eq!(telemetry.container_yaw, state.visual_container_yaw);

    let container_rotation = world.get::<Transform>(container).unwrap().rotation;
    assert!(container_rotation.abs_diff_eq(Quat::from_rotation_y(state.visual_container_yaw), 1e-6));
    let model_rotation = world.get::<Transform>(model).unwrap().rotation;
    assert!(model_rotation.abs_diff_eq(Quat::from_rotation_y(state.visual_character_yaw), 1e-6));

    assert_eq!(
        world.get::<CharacterAnimation>(player).unwrap().current,
        AnimationLabel::Walk
    );
}

#[test]
fn test_drive_character_skips_frame_without_player() {
    let input = FrameInput {
        forward: true,
        ..Default::default()
    };
    let (mut world, player, container, _) = controller_world(1.0, input);
    world.entity_mut(player).remove::<Player>();

    world
        .run_system_once(drive_character)
        .expect("controller system should run");

    assert_eq!(*world.resource::<CharacterTelemetry>(), CharacterTelemetry::default());
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec3::ZERO);
    assert_eq!(world.get::<Transform>(container).unwrap().rotation, Quat::IDENTITY);
}

#[test]
fn test_drive_character_skips_frame_without_rig() {
    let input = FrameInput {
        forward: true,
        ..Default::default()
    };
    let (mut world, player, container, _) = controller_world(1.0, input);
    world.despawn(container);

    world
        .run_system_once(drive_character)
        .expect("controller system should run");

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec3::ZERO);
    assert_eq!(*world.resource::<CharacterTelemetry>(), CharacterTelemetry::default());
    assert_eq!(
        *world.get::<CharacterState>(player).unwrap(),
        CharacterState::default()
    );
}

#[test]
fn test_sample_frame_input_reads_bindings_and_pointer() {
    let mut world = World::new();
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::ArrowUp);
    keyboard.press(KeyCode::ShiftRight);
    world.insert_resource(keyboard);
    world.insert_resource(ActionBindings::default());
    world.insert_resource(PointerState {
        active: true,
        ndc: Vec2::new(0.2, 0.3),
    });
    world.insert_resource(FrameInput::default());

    world
        .run_system_once(sample_frame_input)
        .expect("sampling system should run");

    let input = *world.resource::<FrameInput>();
    assert!(input.forward);
    assert!(input.run);
    assert!(!input.jump);
    assert_eq!(
        input.pointer,
        PointerSample {
            active: true,
            x: 0.2,
            y: 0.3
        }
    );
}

fn pointer_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<MouseButtonInput>>();
    world.init_resource::<Messages<TouchInput>>();
    world.insert_resource(PointerState::default());
    world
}

fn run_pointer_frame(world: &mut World) -> PointerState {
    world
        .run_system_once(track_pointer_activity)
        .expect("pointer system should run");
    world.resource_mut::<Messages<MouseButtonInput>>().clear();
    world.resource_mut::<Messages<TouchInput>>().clear();
    *world.resource::<PointerState>()
}

fn touch(window: Entity, phase: TouchPhase, position: Vec2) -> TouchInput {
    TouchInput {
        phase,
        position,
        window,
        force: None,
        id: 0,
    }
}

#[test]
fn test_mouse_press_and_release_toggle_pointer() {
    let mut world = pointer_world();
    let window = world.spawn_empty().id();

    world.write_message(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
        window,
    });
    assert!(run_pointer_frame(&mut world).active);

    // No input this frame: the flag holds.
    assert!(run_pointer_frame(&mut world).active);

    world.write_message(MouseButtonInput {
        button: MouseButton::Right,
        state: ButtonState::Released,
        window,
    });
    assert!(!run_pointer_frame(&mut world).active);
}

#[test]
fn test_touch_start_and_cancel_toggle_pointer() {
    let mut world = pointer_world();
    let window = world.spawn_empty().id();

    world.write_message(touch(window, TouchPhase::Started, Vec2::ZERO));
    assert!(run_pointer_frame(&mut world).active);

    world.write_message(touch(window, TouchPhase::Canceled, Vec2::ZERO));
    assert!(!run_pointer_frame(&mut world).active);

    world.write_message(touch(window, TouchPhase::Started, Vec2::ZERO));
    run_pointer_frame(&mut world);
    world.write_message(touch(window, TouchPhase::Ended, Vec2::ZERO));
    assert!(!run_pointer_frame(&mut world).active);
}

#[test]
fn test_touch_position_sets_ndc() {
    let mut world = pointer_world();
    let window = world.spawn((Window::default(), PrimaryWindow)).id();
    let size = world.get::<Window>(window).unwrap().size();

    let position = Vec2::new(size.x * 0.75, size.y * 0.25);
    world.write_message(touch(window, TouchPhase::Started, position));
    let pointer = run_pointer_frame(&mut world);

    assert!(pointer.active);
    assert_eq!(pointer.ndc, cursor_to_ndc(position, size));
    assert!(pointer.ndc.distance(Vec2::new(0.5, 0.5)) < 1e-5);
}
