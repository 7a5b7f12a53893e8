//! Dream Story Client - Bevy front-end for the life-simulation mini-game
//!
//! All rules live in `dreamstory-logic`. The client owns a session, ticks
//! it from a wall-clock timer, renders its presentation model and maps
//! buttons and keys onto session actions.

use bevy::prelude::*;
use dreamstory_logic::content::Catalog;
use dreamstory_logic::session::GameSession;

mod input;
mod state;
mod theme;
mod tick;
mod ui;

use state::{ClientConfig, OnBack, RenderedRevision, Session, TickTimer};

fn main() {
    let client = ClientConfig::from_args();
    run(client, || info!("Back pressed, leaving Dream Story"));
}

/// Build and run the app. `on_back` fires when the player navigates back,
/// after which the app exits.
fn run(client: ClientConfig, on_back: impl Fn() + Send + Sync + 'static) {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Dream Story".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: bevy::window::PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    // Logging is live once DefaultPlugins is added.
    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            error!("Built-in content failed to load: {}", e);
            return;
        }
    };
    let config = client.game_config();
    info!(
        "Starting Dream Story: {} situations, {} rooms, {:?} matching",
        catalog.situations.len(),
        catalog.rooms.len(),
        config.situation_matching
    );

    app.insert_resource(TickTimer::from_millis(config.tick_interval_ms))
        .insert_resource(Session(GameSession::new(catalog, config)))
        .insert_resource(OnBack(Box::new(on_back)))
        .insert_resource(RenderedRevision::default())
        .insert_resource(client.theme())
        .add_systems(Startup, ui::setup_camera)
        .add_systems(
            Update,
            (
                input::handle_buttons,
                input::handle_keys,
                tick::advance_session,
                ui::rebuild_ui,
                ui::button_colors,
            )
                .chain(),
        )
        .run();
}
