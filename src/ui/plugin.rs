use bevy::prelude::*;

use crate::core::{GameState, ScoreSet};

use super::hud::{
    cleanup_hud, spawn_complete_banner, spawn_hud, update_darkness, update_score_text,
    update_speedometer,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnTransition {
                exited: GameState::Loading,
                entered: GameState::InGame,
            },
            spawn_hud,
        )
        .add_systems(OnEnter(GameState::Loading), cleanup_hud)
        .add_systems(OnEnter(GameState::LevelComplete), spawn_complete_banner)
        .add_systems(
            Update,
            (
                update_score_text.after(ScoreSet),
                update_speedometer,
                update_darkness,
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
