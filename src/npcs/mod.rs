//! NPC domain plugin for Shorebound.
//!
//! Covers the beach's seven residents: proximity dialogue, quest hand-offs,
//! and game completion. Communicates exclusively through shared resources
//! and events.

use bevy::prelude::*;
use crate::shared::*;

pub mod dialogue;
pub mod quests;
mod spawning;

use dialogue::{
    fade_dialogue, render_dialogue_text, sync_npc_sprites, update_npc_interaction,
    update_npc_presentation,
};
use quests::{
    apply_prior_completions, check_game_complete, handle_quest_talk, update_quest_markers,
};
use spawning::spawn_npcs;

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), spawn_npcs);

        app.add_systems(
            Update,
            (
                apply_prior_completions,
                update_npc_interaction,
                handle_quest_talk,
                check_game_complete,
                update_npc_presentation,
                sync_npc_sprites,
                fade_dialogue,
                render_dialogue_text,
                update_quest_markers,
            )
                .chain()
                .in_set(StageSet::Npcs)
                .run_if(in_state(PlayState::Running)),
        );
    }
}
