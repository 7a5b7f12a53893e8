//! Player input handling for the Dream Story client.
//!
//! Buttons carry a [`ButtonAction`]; keyboard shortcuts map onto the same
//! actions so both paths go through [`perform`].

use bevy::prelude::*;
use dreamstory_logic::content::Choice;
use dreamstory_logic::session::GameSession;

use crate::state::{ButtonAction, OnBack, Session};
use crate::theme::Theme;

pub fn handle_buttons(
    buttons: Query<(&Interaction, &ButtonAction), (Changed<Interaction>, With<Button>)>,
    mut session: ResMut<Session>,
    mut theme: ResMut<Theme>,
    on_back: Res<OnBack>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, action) in &buttons {
        if *interaction == Interaction::Pressed {
            perform(action, &mut session.0, &mut theme, &on_back, &mut exit);
        }
    }
}

pub fn handle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut theme: ResMut<Theme>,
    on_back: Res<OnBack>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(action) = key_action(&keyboard, &session.0) {
        perform(&action, &mut session.0, &mut theme, &on_back, &mut exit);
    }
}

fn key_action(keyboard: &ButtonInput<KeyCode>, session: &GameSession) -> Option<ButtonAction> {
    let state = session.state();

    if state.pending_situation().is_some() {
        if keyboard.just_pressed(KeyCode::KeyY) {
            return Some(ButtonAction::Accept);
        }
        if keyboard.just_pressed(KeyCode::KeyN) {
            return Some(ButtonAction::Decline);
        }
        return None;
    }
    if state.pending_consequence().is_some() {
        if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::Space) {
            return Some(ButtonAction::Continue);
        }
        return None;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        return Some(ButtonAction::Back);
    }
    if keyboard.just_pressed(KeyCode::Space) {
        return Some(ButtonAction::TogglePlay);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        return Some(ButtonAction::Reset);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        return Some(ButtonAction::ToggleTheme);
    }
    let digits = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
    for (key, speed) in digits.iter().zip(&session.config().speed_options) {
        if keyboard.just_pressed(*key) {
            return Some(ButtonAction::Speed(*speed));
        }
    }
    None
}

/// Apply one action. Rejections are already logged by the session.
fn perform(
    action: &ButtonAction,
    session: &mut GameSession,
    theme: &mut ResMut<Theme>,
    on_back: &OnBack,
    exit: &mut EventWriter<AppExit>,
) {
    let result = match action {
        ButtonAction::Room(id) => session.change_room(id),
        ButtonAction::Activity(id) => session.start_activity(id),
        ButtonAction::Speed(speed) => session.set_speed(*speed),
        ButtonAction::TogglePlay => session.toggle_play(),
        ButtonAction::Accept => session.choose(Choice::Accept),
        ButtonAction::Decline => session.choose(Choice::Decline),
        ButtonAction::Continue => session.acknowledge(),
        ButtonAction::Reset => {
            session.reset();
            Ok(())
        }
        ButtonAction::ToggleTheme => {
            **theme = theme.toggled();
            Ok(())
        }
        ButtonAction::Back => {
            (on_back.0)();
            exit.send(AppExit::Success);
            Ok(())
        }
    };
    if let Err(e) = result {
        debug!("Ignored {:?}: {}", action, e);
    }
}
