use crate::prelude::*;

/// Device state seen by `translate_input` on the previous frame
#[derive(Default)]
pub struct PreviousInput {
    move_axis: Vector2<f32>,
    look: Vector2<f32>,
    jump: bool,
    sprint: bool,
    crouch: bool,
}

impl PreviousInput {
    fn button_mut(&mut self, action: InputAction) -> Option<&mut bool> {
        match action {
            InputAction::Jump => Some(&mut self.jump),
            InputAction::Sprint => Some(&mut self.sprint),
            InputAction::Crouch => Some(&mut self.crouch),
            InputAction::Move | InputAction::Look => None,
        }
    }
}

/// Emit action callbacks for every change in raw input since the last frame.
///
/// Axes report `Performed` while non-zero and `Canceled` when they return to
/// zero. Buttons report `Started` + `Performed` on press and `Canceled` on
/// release; holding a button emits nothing further.
pub fn translate_input(
    input: Res<InputState>,
    bindings: Res<InputBindings>,
    mut events: ResMut<ActionEvents>,
    mut previous: Local<PreviousInput>,
) {
    let move_axis = bindings.move_axis(&input);
    if move_axis != previous.move_axis {
        let phase = if move_axis == Vector2::zeros() {
            ActionPhase::Canceled
        } else {
            ActionPhase::Performed
        };
        log::debug!("Move {:?} ({}, {})", phase, move_axis.x, move_axis.y);
        events.push(InputAction::Move, ActionContext::axis(phase, move_axis));
        previous.move_axis = move_axis;
    }

    let look = input.mouse_delta;
    if look != Vector2::zeros() {
        events.push(
            InputAction::Look,
            ActionContext::axis(ActionPhase::Performed, look),
        );
    } else if previous.look != Vector2::zeros() {
        events.push(
            InputAction::Look,
            ActionContext::axis(ActionPhase::Canceled, Vector2::zeros()),
        );
    }
    previous.look = look;

    for action in [InputAction::Jump, InputAction::Sprint, InputAction::Crouch] {
        let (Some(key), Some(was_pressed)) =
            (bindings.button(action), previous.button_mut(action))
        else {
            continue;
        };
        let pressed = input.is_key_pressed(key);

        if pressed && !*was_pressed {
            log::debug!("{:?} pressed", action);
            events.push(action, ActionContext::button(ActionPhase::Started, true));
            events.push(action, ActionContext::button(ActionPhase::Performed, true));
        } else if !pressed && *was_pressed {
            log::debug!("{:?} released", action);
            events.push(action, ActionContext::button(ActionPhase::Canceled, false));
        }

        *was_pressed = pressed;
    }
}
