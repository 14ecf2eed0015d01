use crate::prelude::*;

/// Gravitational acceleration in units per second squared
pub const GRAVITY: f32 = -9.81;
/// Vertical velocity held while grounded so the capsule stays seated on the floor
pub const GROUNDED_VELOCITY: f32 = -1.0;
/// Camera tilt limit in degrees, both up and down
pub const PITCH_LIMIT: f32 = 89.0;

/// Per-player locomotion state, written by input handlers and read each frame
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionState {
    /// Last move axis (x = right, y = forward)
    pub movement_input: Vector2<f32>,
    /// Last look delta
    pub look_input: Vector2<f32>,
    pub vertical_velocity: f32,
    /// Camera tilt in degrees, positive looks down
    pub pitch: f32,
    pub is_jumping: bool,
    pub is_sprinting: bool,
    pub is_crouching: bool,
    /// Capsule height recorded at activation
    pub original_height: f32,
    /// Velocity handed to the mover: planar motion in x/z, vertical velocity in y
    pub direction: Vector3<f32>,
}

impl LocomotionState {
    pub fn new(original_height: f32) -> Self {
        Self {
            movement_input: Vector2::zeros(),
            look_input: Vector2::zeros(),
            vertical_velocity: 0.0,
            pitch: 0.0,
            is_jumping: false,
            is_sprinting: false,
            is_crouching: false,
            original_height,
            direction: Vector3::zeros(),
        }
    }
}

/// First-person walk, sprint, crouch, jump and mouse look for one player.
///
/// Input handlers only record state. [`CharacterLocomotion::update`] consumes
/// it once per frame against the host capabilities it is handed.
#[derive(Component, Clone, Debug)]
pub struct CharacterLocomotion {
    pub settings: LocomotionSettings,
    state: LocomotionState,
}

impl CharacterLocomotion {
    pub fn new(settings: LocomotionSettings, original_height: f32) -> Self {
        Self {
            settings,
            state: LocomotionState::new(original_height),
        }
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn on_move(&mut self, context: &ActionContext) {
        self.state.movement_input = context.read_vector2();
    }

    pub fn on_look(&mut self, context: &ActionContext) {
        self.state.look_input = context.read_vector2();
    }

    pub fn on_jump(&mut self, context: &ActionContext) {
        self.state.is_jumping = context.read_as_button();
    }

    pub fn on_sprint(&mut self, context: &ActionContext) {
        self.state.is_sprinting = context.read_as_button();
    }

    /// Toggle crouch on the performed edge only
    pub fn on_crouch(&mut self, context: &ActionContext) {
        if context.performed() {
            self.state.is_crouching = !self.state.is_crouching;
            log::debug!("Crouch toggled: {}", self.state.is_crouching);
        }
    }

    /// Route an action callback to its handler
    pub fn handle(&mut self, action: InputAction, context: &ActionContext) {
        match action {
            InputAction::Move => self.on_move(context),
            InputAction::Look => self.on_look(context),
            InputAction::Jump => self.on_jump(context),
            InputAction::Sprint => self.on_sprint(context),
            InputAction::Crouch => self.on_crouch(context),
        }
    }

    /// Advance one frame. Step order matters: movement reads the vertical
    /// velocity written by gravity, and a jump launched this frame is first
    /// moved by next frame's gravity step.
    pub fn update<M, T, C>(&mut self, mover: &mut M, body: &mut T, camera: &mut C, delta_time: f32)
    where
        M: Mover,
        T: TransformHandle,
        C: CameraHandle,
    {
        self.apply_gravity(&*mover, delta_time);
        self.apply_rotation(&mut *body, &mut *camera);
        self.apply_movement(&mut *mover, &*body, delta_time);
        self.apply_jump(&*mover);
    }

    /// Planar speed for the current sprint and crouch flags; crouch wins
    pub fn effective_speed(&self) -> f32 {
        let settings = &self.settings;
        let mut speed = if self.state.is_sprinting {
            settings.speed * settings.sprint_multiplier
        } else {
            settings.speed
        };

        if self.state.is_crouching {
            speed = settings.crouch_speed;
        }

        speed
    }

    /// Upward velocity that peaks at `jump_power` units under unscaled gravity
    pub fn launch_velocity(&self) -> f32 {
        (self.settings.jump_power * -2.0 * GRAVITY).sqrt()
    }

    fn apply_gravity(&mut self, mover: &impl Mover, delta_time: f32) {
        if mover.is_grounded() && self.state.vertical_velocity < 0.0 {
            self.state.vertical_velocity = GROUNDED_VELOCITY;
        } else {
            self.state.vertical_velocity +=
                GRAVITY * self.settings.gravity_multiplier * delta_time;
        }

        self.state.direction.y = self.state.vertical_velocity;
    }

    fn apply_rotation(&mut self, body: &mut impl TransformHandle, camera: &mut impl CameraHandle) {
        let look = self.state.look_input * self.settings.look_speed;

        self.state.pitch = (self.state.pitch - look.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        camera.set_local_rotation(pitch_rotation(self.state.pitch));
        body.rotate_yaw(look.x);
    }

    fn apply_movement(
        &mut self,
        mover: &mut impl Mover,
        body: &impl TransformHandle,
        delta_time: f32,
    ) {
        let speed = self.effective_speed();

        if self.state.is_crouching {
            mover.set_height(self.settings.crouch_height);
        } else {
            mover.set_height(self.state.original_height);
        }

        let input = self.state.movement_input;
        let planar = body.right() * input.x + body.forward() * input.y;

        // y already holds this frame's vertical velocity
        self.state.direction.x = planar.x * speed;
        self.state.direction.z = planar.z * speed;

        mover.move_by(self.state.direction * delta_time);
    }

    fn apply_jump(&mut self, mover: &impl Mover) {
        if self.state.is_jumping && mover.is_grounded() {
            self.state.vertical_velocity = self.launch_velocity();
            log::debug!("Jump launched at {:.2} u/s", self.state.vertical_velocity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    struct FakeMover {
        height: f32,
        grounded: bool,
        moves: Vec<Vector3<f32>>,
    }

    impl FakeMover {
        fn new(grounded: bool) -> Self {
            Self {
                height: 2.0,
                grounded,
                moves: Vec::new(),
            }
        }
    }

    impl Mover for FakeMover {
        fn height(&self) -> f32 {
            self.height
        }

        fn set_height(&mut self, height: f32) {
            self.height = height;
        }

        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn move_by(&mut self, displacement: Vector3<f32>) {
            self.moves.push(displacement);
        }
    }

    #[derive(Default)]
    struct FakeBody {
        yaw: f32,
    }

    impl TransformHandle for FakeBody {
        fn right(&self) -> Vector3<f32> {
            let yaw = self.yaw.to_radians();
            Vector3::new(yaw.cos(), 0.0, yaw.sin())
        }

        fn forward(&self) -> Vector3<f32> {
            let yaw = self.yaw.to_radians();
            Vector3::new(yaw.sin(), 0.0, -yaw.cos())
        }

        fn rotate_yaw(&mut self, degrees: f32) {
            self.yaw += degrees;
        }
    }

    struct FakeCamera {
        rotation: UnitQuaternion<f32>,
    }

    impl Default for FakeCamera {
        fn default() -> Self {
            Self {
                rotation: UnitQuaternion::identity(),
            }
        }
    }

    impl CameraHandle for FakeCamera {
        fn local_rotation(&self) -> UnitQuaternion<f32> {
            self.rotation
        }

        fn set_local_rotation(&mut self, rotation: UnitQuaternion<f32>) {
            self.rotation = rotation;
        }
    }

    fn locomotion() -> CharacterLocomotion {
        CharacterLocomotion::new(LocomotionSettings::default(), 2.0)
    }

    fn performed_button() -> ActionContext {
        ActionContext::button(ActionPhase::Performed, true)
    }

    fn step(locomotion: &mut CharacterLocomotion, mover: &mut FakeMover) {
        let mut body = FakeBody::default();
        let mut camera = FakeCamera::default();
        locomotion.update(mover, &mut body, &mut camera, DT);
    }

    #[test]
    fn test_grounded_descent_pins_velocity() {
        for initial in [-0.001, -1.0, -3.5, -250.0] {
            let mut locomotion = locomotion();
            let mut mover = FakeMover::new(true);
            locomotion.state.vertical_velocity = initial;

            step(&mut locomotion, &mut mover);

            assert_eq!(locomotion.state().vertical_velocity, GROUNDED_VELOCITY);
            assert_eq!(locomotion.state().direction.y, -1.0);
        }
    }

    #[test]
    fn test_airborne_velocity_falls_by_gravity_step() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(false);
        locomotion.state.vertical_velocity = 3.0;
        let drop = (GRAVITY * locomotion.settings.gravity_multiplier * DT).abs();

        for _ in 0..30 {
            let before = locomotion.state().vertical_velocity;
            step(&mut locomotion, &mut mover);
            let after = locomotion.state().vertical_velocity;

            assert!(after < before);
            assert!(((before - after) - drop).abs() < 1e-5);
        }
    }

    #[test]
    fn test_grounded_rising_still_integrates() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        locomotion.state.vertical_velocity = 4.0;

        step(&mut locomotion, &mut mover);

        let expected = 4.0 + GRAVITY * 3.0 * DT;
        assert!((locomotion.state().vertical_velocity - expected).abs() < 1e-5);
    }

    #[test]
    fn test_grounded_at_rest_integrates_instead_of_pinning() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        locomotion.state.vertical_velocity = 0.0;

        step(&mut locomotion, &mut mover);

        // Zero is not descending, so gravity applies instead of the -1.0 pin
        let expected = GRAVITY * locomotion.settings.gravity_multiplier * DT;
        assert_eq!(locomotion.state().vertical_velocity, expected);
        assert_ne!(locomotion.state().vertical_velocity, GROUNDED_VELOCITY);
        assert_eq!(locomotion.state().direction.y, expected);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        let mut body = FakeBody::default();
        let mut camera = FakeCamera::default();

        let looks = [
            250.0, -4000.0, 12.5, 90000.0, -90000.0, 1.0, -1.0, 3000.0, -889.0, 0.0,
        ];
        for y in looks {
            locomotion.on_look(&ActionContext::axis(ActionPhase::Performed, Vector2::new(0.0, y)));
            locomotion.update(&mut mover, &mut body, &mut camera, DT);

            let pitch = locomotion.state().pitch;
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch), "pitch {}", pitch);
            assert_eq!(camera.local_rotation(), pitch_rotation(pitch));
        }

        // Mouse up looks up, saturating at the limit
        let look_up = Vector2::new(0.0, 5000.0);
        locomotion.on_look(&ActionContext::axis(ActionPhase::Performed, look_up));
        locomotion.update(&mut mover, &mut body, &mut camera, DT);
        assert_eq!(locomotion.state().pitch, -PITCH_LIMIT);

        let look_down = Vector2::new(0.0, -5000.0);
        locomotion.on_look(&ActionContext::axis(ActionPhase::Performed, look_down));
        locomotion.update(&mut mover, &mut body, &mut camera, DT);
        assert_eq!(locomotion.state().pitch, PITCH_LIMIT);
    }

    #[test]
    fn test_horizontal_look_yaws_body_only() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        let mut body = FakeBody::default();
        let mut camera = FakeCamera::default();

        locomotion.on_look(&ActionContext::axis(ActionPhase::Performed, Vector2::new(900.0, 0.0)));
        locomotion.update(&mut mover, &mut body, &mut camera, DT);

        assert!((body.yaw - 90.0).abs() < 1e-4);
        assert_eq!(locomotion.state().pitch, 0.0);
        assert!(camera.local_rotation().angle() < 1e-6);
    }

    #[test]
    fn test_crouch_toggles_only_on_performed() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);

        locomotion.on_crouch(&ActionContext::button(ActionPhase::Started, true));
        assert!(!locomotion.state().is_crouching);

        locomotion.on_crouch(&performed_button());
        assert!(locomotion.state().is_crouching);

        // Held across frames without a new edge
        for _ in 0..10 {
            step(&mut locomotion, &mut mover);
        }
        assert!(locomotion.state().is_crouching);

        locomotion.on_crouch(&ActionContext::button(ActionPhase::Canceled, false));
        assert!(locomotion.state().is_crouching);

        locomotion.on_crouch(&performed_button());
        assert!(!locomotion.state().is_crouching);
    }

    #[test]
    fn test_speed_selection() {
        let cases = [
            (false, false, 5.0),
            (false, true, 10.0),
            (true, false, 2.5),
            (true, true, 2.5),
        ];

        for (crouching, sprinting, expected) in cases {
            let mut locomotion = locomotion();
            let mut mover = FakeMover::new(true);
            locomotion.state.is_crouching = crouching;
            locomotion.state.is_sprinting = sprinting;
            let forward = Vector2::new(0.0, 1.0);
            locomotion.on_move(&ActionContext::axis(ActionPhase::Performed, forward));

            step(&mut locomotion, &mut mover);

            assert_eq!(locomotion.effective_speed(), expected);
            let direction = locomotion.state().direction;
            assert!(direction.x.abs() < 1e-6);
            assert!((direction.z + expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_move_per_frame_keeps_vertical_velocity() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(false);
        locomotion.on_move(&ActionContext::axis(ActionPhase::Performed, Vector2::new(1.0, 0.0)));

        step(&mut locomotion, &mut mover);

        assert_eq!(mover.moves.len(), 1);
        let direction = locomotion.state().direction;
        assert_eq!(direction.y, locomotion.state().vertical_velocity);
        assert!((direction.x - 5.0).abs() < 1e-5);
        assert!((mover.moves[0] - direction * DT).magnitude() < 1e-6);
    }

    #[test]
    fn test_strafe_follows_body_heading() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        let mut body = FakeBody { yaw: 90.0 };
        let mut camera = FakeCamera::default();
        locomotion.on_move(&ActionContext::axis(ActionPhase::Performed, Vector2::new(0.0, 1.0)));

        locomotion.update(&mut mover, &mut body, &mut camera, DT);

        let direction = locomotion.state().direction;
        assert!((direction.x - 5.0).abs() < 1e-4);
        assert!(direction.z.abs() < 1e-4);
    }

    #[test]
    fn test_jump_launch_when_grounded() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        locomotion.state.vertical_velocity = GROUNDED_VELOCITY;
        locomotion.on_jump(&performed_button());

        step(&mut locomotion, &mut mover);

        let velocity = locomotion.state().vertical_velocity;
        assert_eq!(velocity, locomotion.launch_velocity());
        assert!((velocity - 9.9045).abs() < 1e-3);
        // The launch reaches the mover on the next frame
        assert_eq!(locomotion.state().direction.y, GROUNDED_VELOCITY);
    }

    #[test]
    fn test_jump_ignored_when_airborne() {
        let mut locomotion = locomotion();
        let mover = FakeMover::new(false);
        locomotion.on_jump(&performed_button());
        locomotion.state.vertical_velocity = 2.0;

        locomotion.apply_jump(&mover);
        assert_eq!(locomotion.state().vertical_velocity, 2.0);

        let mut mover = mover;
        step(&mut locomotion, &mut mover);
        let expected = 2.0 + GRAVITY * 3.0 * DT;
        assert!((locomotion.state().vertical_velocity - expected).abs() < 1e-6);
    }

    #[test]
    fn test_held_jump_relaunches_every_grounded_frame() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);
        locomotion.on_jump(&performed_button());

        for _ in 0..3 {
            step(&mut locomotion, &mut mover);
            assert_eq!(locomotion.state().vertical_velocity, locomotion.launch_velocity());
        }

        locomotion.on_jump(&ActionContext::button(ActionPhase::Canceled, false));
        step(&mut locomotion, &mut mover);
        assert!(locomotion.state().vertical_velocity < locomotion.launch_velocity());
    }

    #[test]
    fn test_crouch_sets_and_restores_height_same_frame() {
        let mut locomotion = locomotion();
        let mut mover = FakeMover::new(true);

        locomotion.on_crouch(&performed_button());
        step(&mut locomotion, &mut mover);
        assert_eq!(mover.height(), 0.5);

        locomotion.on_crouch(&performed_button());
        step(&mut locomotion, &mut mover);
        assert_eq!(mover.height(), 2.0);
    }

    #[test]
    fn test_handle_routes_actions() {
        let mut locomotion = locomotion();

        locomotion.handle(
            InputAction::Move,
            &ActionContext::axis(ActionPhase::Performed, Vector2::new(0.5, -1.0)),
        );
        locomotion.handle(InputAction::Sprint, &performed_button());
        locomotion.handle(InputAction::Crouch, &performed_button());
        locomotion.handle(InputAction::Jump, &performed_button());

        let state = locomotion.state();
        assert_eq!(state.movement_input, Vector2::new(0.5, -1.0));
        assert!(state.is_sprinting);
        assert!(state.is_crouching);
        assert!(state.is_jumping);
    }
}
