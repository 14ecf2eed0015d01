use crate::prelude::*;

use super::translate_input;
use bevy_ecs::schedule::Schedule;

/// Layer that turns raw device state into buffered action callbacks.
/// Must run after anything that writes `InputState` and before gameplay layers.
pub struct InputLayer {
    schedule: Schedule,
}

impl InputLayer {
    pub fn new(context: &LayerContext) -> Result<Self> {
        {
            let mut world = context.world()?;
            if !world.contains_resource::<InputState>() {
                anyhow::bail!(
                    "InputState resource not found - build the world with ApplicationBuilder"
                );
            }
            world.init_resource::<InputBindings>();
            world.init_resource::<ActionEvents>();
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(translate_input);
        Ok(Self { schedule })
    }
}

impl Layer for InputLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world()?;
        self.schedule.run(&mut world);
        Ok(())
    }

    fn detach(&mut self, context: &LayerContext) {
        if let Ok(mut world) = context.world() {
            if let Some(mut events) = world.get_resource_mut::<ActionEvents>() {
                let dropped = events.drain().count();
                if dropped > 0 {
                    log::debug!("Dropped {} unconsumed input actions", dropped);
                }
            }
        }
    }
}
