//! UI rendering for the Dream Story client.
//!
//! The whole screen is rebuilt from the logic crate's presentation model
//! whenever the session revision changes.

use bevy::prelude::*;
use dreamstory_logic::content::SituationDef;
use dreamstory_logic::view::{
    Dashboard, FactorRow, Screen, ACCEPT_LABEL, CONSEQUENCE_TITLE, CONTINUE_LABEL, DECLINE_LABEL,
};

use crate::state::{ButtonAction, RenderedRevision, Session, UiRoot};
use crate::theme::{Palette, Theme};

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn rebuild_ui(
    mut commands: Commands,
    session: Res<Session>,
    theme: Res<Theme>,
    mut rendered: ResMut<RenderedRevision>,
    roots: Query<Entity, With<UiRoot>>,
) {
    let revision = session.0.revision();
    if rendered.0 == Some(revision) && !theme.is_changed() {
        return;
    }
    rendered.0 = Some(revision);

    for root in &roots {
        commands.entity(root).despawn_recursive();
    }

    let theme = *theme;
    let p = theme.palette();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(p.background),
            UiRoot,
        ))
        .with_children(|parent| match session.0.screen() {
            Screen::Situation(situation) => spawn_situation(parent, p, situation),
            Screen::Consequence { text } => spawn_consequence(parent, p, text),
            Screen::Dashboard(dashboard) => spawn_dashboard(parent, theme, &dashboard),
        });
}

/// Highlighted option; keeps its color on hover.
#[derive(Component)]
pub struct Selected;

/// Hover feedback for enabled buttons.
pub fn button_colors(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, Without<Selected>),
    >,
    theme: Res<Theme>,
) {
    let p = theme.palette();
    for (interaction, mut color) in &mut buttons {
        *color = match interaction {
            Interaction::Hovered | Interaction::Pressed => BackgroundColor(p.button_hover),
            Interaction::None => BackgroundColor(p.button),
        };
    }
}

// ============================================================================
// SCREENS
// ============================================================================

fn spawn_situation(parent: &mut ChildBuilder, p: &Palette, situation: &SituationDef) {
    spawn_card(parent, p, |card| {
        spawn_text(card, situation.title.clone(), 26.0, p.accent);
        spawn_text(card, situation.description.clone(), 18.0, p.text);
        spawn_row(card, |row| {
            spawn_button(row, p, ACCEPT_LABEL, ButtonAction::Accept, true, false);
            spawn_button(row, p, DECLINE_LABEL, ButtonAction::Decline, true, false);
        });
        spawn_text(card, "[Y] yes   [N] no", 12.0, p.text_dim);
    });
}

fn spawn_consequence(parent: &mut ChildBuilder, p: &Palette, text: &str) {
    spawn_card(parent, p, |card| {
        spawn_text(card, CONSEQUENCE_TITLE, 26.0, p.accent);
        spawn_text(card, text.to_string(), 18.0, p.text);
        spawn_button(card, p, CONTINUE_LABEL, ButtonAction::Continue, true, false);
        spawn_text(card, "[Enter] continue", 12.0, p.text_dim);
    });
}

fn spawn_dashboard(parent: &mut ChildBuilder, theme: Theme, dashboard: &Dashboard) {
    let p = theme.palette();
    // Header: back, clock and score, play controls
    spawn_row(parent, |row| {
        spawn_button(row, p, "< Back", ButtonAction::Back, true, false);
        spawn_text(row, dashboard.header.clone(), 22.0, p.text);
        let play = if dashboard.is_playing { "Pause" } else { "Play" };
        spawn_button(row, p, play, ButtonAction::TogglePlay, true, false);
        for speed in &dashboard.speeds {
            spawn_button(
                row,
                p,
                speed.label(),
                ButtonAction::Speed(speed.speed),
                true,
                speed.selected,
            );
        }
        spawn_button(row, p, "Reset", ButtonAction::Reset, true, false);
        let switch = theme.switch_label();
        spawn_button(row, p, switch, ButtonAction::ToggleTheme, true, false);
    });

    // Factors
    spawn_panel(parent, p, |panel| {
        for row in &dashboard.factors {
            spawn_factor_row(panel, p, row);
        }
    });

    if let Some(active) = &dashboard.active {
        spawn_panel(parent, p, |panel| {
            spawn_text(
                panel,
                format!("{} {} ... {}%", active.icon, active.name, active.percent),
                16.0,
                p.accent,
            );
            spawn_bar(panel, p, active.percent as f32, p.accent);
        });
    }

    spawn_text(parent, "Rooms", 14.0, p.text_dim);
    spawn_row(parent, |row| {
        for room in &dashboard.rooms {
            spawn_button(
                row,
                p,
                room.name.clone(),
                ButtonAction::Room(room.id.clone()),
                room.enabled,
                room.selected,
            );
        }
    });

    spawn_text(parent, "Activities", 14.0, p.text_dim);
    spawn_row(parent, |row| {
        for activity in &dashboard.activities {
            let check = if activity.completed { " ✓" } else { "" };
            spawn_button(
                row,
                p,
                format!(
                    "{} {} ({} min){}",
                    activity.icon, activity.name, activity.duration_minutes, check
                ),
                ButtonAction::Activity(activity.id.clone()),
                activity.enabled,
                false,
            );
        }
    });

    spawn_text(
        parent,
        "[Space] play/pause   [1-3] speed   [R] reset   [T] theme   [Esc] back",
        12.0,
        p.text_dim,
    );
}

fn spawn_factor_row(parent: &mut ChildBuilder, p: &Palette, row: &FactorRow) {
    let color = p.tier(row.tier);
    spawn_row(parent, |line| {
        line.spawn((
            Text::new(format!("{:<13}{:>3}%", row.label, row.value)),
            TextFont {
                font_size: 15.0,
                ..default()
            },
            TextColor(p.text),
            Node {
                width: Val::Px(140.0),
                ..default()
            },
        ));
        spawn_bar(line, p, row.value as f32, color);
        spawn_text(line, format!("{:?}", row.tier), 13.0, color);
    });
}

// ============================================================================
// WIDGETS
// ============================================================================

fn spawn_text(parent: &mut ChildBuilder, text: impl Into<String>, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

fn spawn_row(parent: &mut ChildBuilder, children: impl FnOnce(&mut ChildBuilder)) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(children);
}

fn spawn_panel(parent: &mut ChildBuilder, p: &Palette, children: impl FnOnce(&mut ChildBuilder)) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(p.panel),
        ))
        .with_children(children);
}

/// Centered card used by the prompt screens.
fn spawn_card(parent: &mut ChildBuilder, p: &Palette, children: impl FnOnce(&mut ChildBuilder)) {
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|outer| {
            outer
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        max_width: Val::Px(560.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(p.panel),
                ))
                .with_children(children);
        });
}

fn spawn_bar(parent: &mut ChildBuilder, p: &Palette, percent: f32, color: Color) {
    parent
        .spawn((
            Node {
                width: Val::Px(220.0),
                height: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(p.button_disabled),
        ))
        .with_children(|track| {
            track.spawn((
                Node {
                    width: Val::Percent(percent.clamp(0.0, 100.0)),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
            ));
        });
}

/// Disabled buttons are drawn without `Button`, so they never take input.
fn spawn_button(
    parent: &mut ChildBuilder,
    p: &Palette,
    label: impl Into<String>,
    action: ButtonAction,
    enabled: bool,
    selected: bool,
) {
    let node = Node {
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    };
    let border = BorderColor(if selected { p.accent } else { p.panel });
    let label_color = if enabled { p.text } else { p.text_dim };

    let mut entity = if !enabled {
        parent.spawn((node, border, BackgroundColor(p.button_disabled)))
    } else if selected {
        parent.spawn((
            Button,
            Selected,
            node,
            border,
            BackgroundColor(p.button_selected),
            action,
        ))
    } else {
        parent.spawn((Button, node, border, BackgroundColor(p.button), action))
    };
    entity.with_children(|b| {
        b.spawn((
            Text::new(label),
            TextFont {
                font_size: 15.0,
                ..default()
            },
            TextColor(label_color),
        ));
    });
}
