use crate::prelude::*;

use bevy_ecs::schedule::Schedule;

/// Layer that activates every player carrying [`LocomotionSettings`] and then
/// drives their locomotion once per frame.
pub struct PlayerLayer {
    schedule: Schedule,
}

impl PlayerLayer {
    pub fn new(context: &LayerContext) -> Result<Self> {
        {
            let mut world = context.world()?;
            let players = pending_players(&mut world);
            if players.is_empty() {
                anyhow::bail!(
                    "No entity with LocomotionSettings to activate - spawn the player before starting"
                );
            }

            activate_all(&mut world, &players)?;
        }

        let mut schedule = Schedule::default();
        schedule.add_systems((dispatch_locomotion_input, update_locomotion).chain());
        Ok(Self { schedule })
    }
}

impl Layer for PlayerLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world()?;
        self.schedule.run(&mut world);
        Ok(())
    }

    fn detach(&mut self, context: &LayerContext) {
        if let Ok(mut world) = context.world() {
            if let Some(mut input) = world.get_resource_mut::<InputState>() {
                input.unlock_cursor();
            }
        }
    }
}
