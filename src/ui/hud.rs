//! In-game HUD - score, speedometer, and the dying fade-to-black.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::core::{Score, ScoreEvent};
use crate::player::{DeathWatch, Player};

/// Marker for the HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the score readout.
#[derive(Component)]
pub struct ScoreText;

/// Marker for the speed readout.
#[derive(Component)]
pub struct Speedometer;

/// Marker for the full-screen darkness overlay.
#[derive(Component)]
pub struct Darkness;

/// Marker for the level-complete banner.
#[derive(Component)]
pub struct CompleteBanner;

/// Spawn the HUD UI.
pub fn spawn_hud(mut commands: Commands) {
    // Fade-to-black overlay, fully transparent until the ball starts dying.
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(5),
        HudRoot,
        Darkness,
    ));

    // Readouts in the top-left corner.
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(16.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            GlobalZIndex(10),
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));
            parent.spawn((
                Text::new("0 km/h"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Speedometer,
            ));
        });
}

/// Remove all HUD entities, banner included.
pub fn cleanup_hud(
    mut commands: Commands,
    hud_query: Query<Entity, Or<(With<HudRoot>, With<CompleteBanner>)>>,
) {
    for entity in hud_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Rewrite the score text whenever the score changes.
pub fn update_score_text(
    mut score_events: EventReader<ScoreEvent>,
    score: Res<Score>,
    mut text_query: Query<&mut Text, With<ScoreText>>,
) {
    if score_events.read().next().is_none() {
        return;
    }
    for mut text in &mut text_query {
        text.0 = format!("Score: {}", score.total);
    }
}

/// Show the ball's speed in whole km/h.
pub fn update_speedometer(
    player_query: Query<&Velocity, With<Player>>,
    mut text_query: Query<&mut Text, With<Speedometer>>,
) {
    let Ok(velocity) = player_query.get_single() else {
        return;
    };
    for mut text in &mut text_query {
        text.0 = format!("{} km/h", (velocity.linvel.length() * 3.6).round());
    }
}

/// Fade the screen towards black as the death watchdog counts up.
///
/// The 1.25 factor means the screen is fully black slightly before the
/// respawn actually fires.
pub fn update_darkness(
    player_query: Query<&DeathWatch, With<Player>>,
    mut overlay_query: Query<&mut BackgroundColor, With<Darkness>>,
) {
    let Ok(watch) = player_query.get_single() else {
        return;
    };
    let alpha = (1.25 * watch.dying_ratio()).min(1.0);
    for mut background in &mut overlay_query {
        background.0 = Color::srgba(0.0, 0.0, 0.0, alpha);
    }
}

/// Show the level-complete banner.
pub fn spawn_complete_banner(mut commands: Commands, score: Res<Score>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            GlobalZIndex(20),
            CompleteBanner,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Level Complete!"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.4)),
            ));
            parent.spawn((
                Text::new(format!("Final score: {}", score.total)),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}
