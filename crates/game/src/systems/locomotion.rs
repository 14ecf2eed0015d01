use crate::prelude::*;

/// Deliver buffered action callbacks to every active player, in arrival order
pub fn dispatch_locomotion_input(
    mut events: ResMut<ActionEvents>,
    mut players: Query<&mut CharacterLocomotion>,
) {
    if events.is_empty() {
        return;
    }

    let pending: Vec<_> = events.drain().collect();
    for mut locomotion in players.iter_mut() {
        for (action, context) in &pending {
            locomotion.handle(*action, context);
        }
    }
}

/// Run one locomotion frame for every active player
pub fn update_locomotion(
    time: Res<Time>,
    mut players: Query<(
        Entity,
        &mut CharacterLocomotion,
        &PlayerCamera,
        &mut Transform,
        &mut CapsuleController,
    )>,
    mut cameras: Query<&mut Camera>,
) {
    let dt = time.0.as_secs_f32();

    for (entity, mut locomotion, player_camera, mut transform, mut capsule) in players.iter_mut() {
        let Ok(mut camera) = cameras.get_mut(player_camera.0) else {
            log::warn!(
                "Camera {:?} bound to {:?} no longer exists; skipping frame",
                player_camera.0,
                entity
            );
            continue;
        };

        let Transform {
            position, rotation, ..
        } = &mut *transform;
        let mut mover = CapsuleMover::new(&mut *capsule, position);
        let mut body = BodyOrientation::new(rotation);

        locomotion.update(&mut mover, &mut body, &mut *camera, dt);
    }
}
