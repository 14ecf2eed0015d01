use crate::prelude::*;

use winit::keyboard::KeyCode;

/// Raw device change applied by [`ScriptedInputLayer`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptedInput {
    Press(KeyCode),
    Release(KeyCode),
    /// Mouse movement reported during a single frame
    Look(Vector2<f32>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptStep {
    pub frame: u64,
    pub input: ScriptedInput,
}

impl ScriptStep {
    pub fn new(frame: u64, input: ScriptedInput) -> Self {
        Self { frame, input }
    }
}

/// Walk, sprint, look around, jump and crouch over five seconds at 60 Hz
pub fn default_script() -> Vec<ScriptStep> {
    use ScriptedInput::*;

    vec![
        ScriptStep::new(0, Press(KeyCode::KeyW)),
        ScriptStep::new(60, Press(KeyCode::ShiftLeft)),
        ScriptStep::new(90, Look(Vector2::new(450.0, 0.0))),
        ScriptStep::new(120, Release(KeyCode::ShiftLeft)),
        ScriptStep::new(120, Press(KeyCode::Space)),
        ScriptStep::new(122, Release(KeyCode::Space)),
        ScriptStep::new(150, Look(Vector2::new(0.0, 200.0))),
        ScriptStep::new(180, Press(KeyCode::KeyC)),
        ScriptStep::new(185, Release(KeyCode::KeyC)),
        ScriptStep::new(240, Press(KeyCode::KeyC)),
        ScriptStep::new(242, Release(KeyCode::KeyC)),
        ScriptStep::new(270, Release(KeyCode::KeyW)),
    ]
}

/// Stands in for a device backend: replays a frame-indexed input script into `InputState`
pub struct ScriptedInputLayer {
    script: Vec<ScriptStep>,
}

impl ScriptedInputLayer {
    pub fn new(context: &LayerContext, script: Vec<ScriptStep>) -> Result<Self> {
        if !context.world()?.contains_resource::<InputState>() {
            anyhow::bail!("InputState resource not found - build the world with ApplicationBuilder");
        }
        Ok(Self { script })
    }
}

impl Layer for ScriptedInputLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world()?;
        let frame = world.resource::<FrameCount>().0;
        let mut input = world.resource_mut::<InputState>();

        for step in self.script.iter().filter(|step| step.frame == frame) {
            match step.input {
                ScriptedInput::Press(key) => input.press_key(key),
                ScriptedInput::Release(key) => input.release_key(key),
                ScriptedInput::Look(delta) => input.add_mouse_delta(delta.x, delta.y),
            }
        }

        Ok(())
    }

    fn detach(&mut self, _context: &LayerContext) {}
}

/// Logs every player's pose at a fixed frame interval
pub struct ReportLayer {
    interval: u64,
}

impl ReportLayer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Layer for ReportLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world()?;
        let frame = world.resource::<FrameCount>().0;
        if frame % self.interval != 0 {
            return Ok(());
        }

        let mut players =
            world.query::<(&Tag, &Transform, &CapsuleController, &CharacterLocomotion)>();
        for (tag, transform, capsule, locomotion) in players.iter(&world) {
            let state = locomotion.state();
            log::info!(
                "[frame {}] {} at ({:.2}, {:.2}, {:.2}) pitch {:.1} height {:.2} grounded {} crouching {}",
                frame,
                tag.label,
                transform.position.x,
                transform.position.y,
                transform.position.z,
                state.pitch,
                capsule.height,
                capsule.is_grounded,
                state.is_crouching
            );
        }

        Ok(())
    }

    fn detach(&mut self, _context: &LayerContext) {}
}
