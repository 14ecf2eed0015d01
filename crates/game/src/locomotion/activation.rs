use crate::prelude::*;

use anyhow::anyhow;

/// Everything needed to bind locomotion to one entity, gathered without
/// touching the world
#[derive(Clone, Debug)]
pub struct Activation {
    pub entity: Entity,
    pub settings: LocomotionSettings,
    pub original_height: f32,
    pub camera: Entity,
}

impl Activation {
    /// Lock the cursor and attach the controller and its camera binding
    pub fn apply(self, world: &mut World) {
        if let Some(mut input) = world.get_resource_mut::<InputState>() {
            input.lock_cursor();
        }

        world.entity_mut(self.entity).insert((
            CharacterLocomotion::new(self.settings, self.original_height),
            PlayerCamera(self.camera),
        ));

        log::info!(
            "Activated locomotion for {:?} (standing height {}, camera {:?})",
            self.entity,
            self.original_height,
            self.camera
        );
    }
}

/// Check that `entity` can be activated: it needs a capsule, the world needs a
/// main camera and an `InputState`. Nothing is written.
pub fn prepare_activation(world: &mut World, entity: Entity) -> Result<Activation> {
    let original_height = world
        .get::<CapsuleController>(entity)
        .map(|capsule| capsule.height)
        .ok_or_else(|| {
            anyhow!(
                "Entity {:?} has no CapsuleController - locomotion needs a capsule to move",
                entity
            )
        })?;

    let settings = world
        .get::<LocomotionSettings>(entity)
        .cloned()
        .unwrap_or_default();

    let camera = find_main_camera(world).ok_or_else(|| {
        anyhow!(
            "No main camera found - spawn a Camera with is_main set before activating locomotion"
        )
    })?;

    if !world.contains_resource::<InputState>() {
        anyhow::bail!("InputState resource not found - build the world with ApplicationBuilder");
    }

    Ok(Activation {
        entity,
        settings,
        original_height,
        camera,
    })
}

/// Bind locomotion to `entity`: capture its capsule, record the standing
/// height, bind the main camera and lock the cursor.
///
/// Every required reference is checked before anything is written, so a
/// failed activation leaves the world untouched.
pub fn activate_locomotion(world: &mut World, entity: Entity) -> Result<()> {
    prepare_activation(world, entity)?.apply(world);
    Ok(())
}

/// Activate every entity in `entities`, or none of them if any one fails
pub fn activate_all(world: &mut World, entities: &[Entity]) -> Result<()> {
    let activations = entities
        .iter()
        .map(|&entity| prepare_activation(world, entity))
        .collect::<Result<Vec<_>>>()?;

    for activation in activations {
        activation.apply(world);
    }
    Ok(())
}

/// Entities that carry settings but have not been activated yet
pub fn pending_players(world: &mut World) -> Vec<Entity> {
    let mut query =
        world.query_filtered::<Entity, (With<LocomotionSettings>, Without<CharacterLocomotion>)>();
    query.iter(world).collect()
}

fn find_main_camera(world: &mut World) -> Option<Entity> {
    let mut cameras = world.query::<(Entity, &Camera)>();
    cameras
        .iter(world)
        .find(|(_, camera)| camera.is_main)
        .map(|(entity, _)| entity)
}
