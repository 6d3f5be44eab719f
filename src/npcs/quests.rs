//! Quest dispatch over the NPC kinds, plus game completion.
//!
//! All quest state lives in `SaveData`. These systems are its only
//! writers, at most one mutation per tick per NPC.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::maps::quest_items;
use crate::world::LevelMap;

use super::dialogue::{Dialogue, Npc, NpcKind, QuestMarker};

/// Receivers completed in an earlier session must not offer the quest
/// dialogue again. Applied once per spawned NPC via the `check_finished`
/// latch.
pub fn apply_prior_completions(
    save: Res<SaveData>,
    mut npc_query: Query<(&Npc, &mut Dialogue)>,
) {
    for (npc, mut dialogue) in npc_query.iter_mut() {
        if dialogue.check_finished {
            continue;
        }
        dialogue.check_finished = true;

        let NpcKind::QuestReceiver {
            item,
            finished_lines,
        } = &npc.kind
        else {
            continue;
        };
        if save.items_delivered.contains(item) {
            dialogue.lines = finished_lines.clone();
        }
    }
}

/// Dispatch quest behavior for NPCs whose conversation is open.
pub fn handle_quest_talk(
    mut save: ResMut<SaveData>,
    mut npc_query: Query<(&Npc, &mut Dialogue)>,
    mut accepted: EventWriter<QuestAcceptedEvent>,
    mut completed: EventWriter<QuestCompletedEvent>,
    mut save_requests: EventWriter<SaveRequestEvent>,
) {
    for (npc, mut dialogue) in npc_query.iter_mut() {
        if !dialogue.talking {
            continue;
        }
        match &npc.kind {
            NpcKind::Talking => {}
            NpcKind::QuestGiver { item } => {
                if save.accept_item(item) {
                    info!("Quest accepted: {} from {}", item, npc.id);
                    accepted.send(QuestAcceptedEvent { item: item.clone() });
                }
            }
            NpcKind::QuestReceiver {
                item,
                finished_lines,
            } => {
                if save.deliver_item(item) {
                    info!("Quest completed: {} to {}", item, npc.id);
                    dialogue.lines = finished_lines.clone();
                    completed.send(QuestCompletedEvent { item: item.clone() });
                    save_requests.send(SaveRequestEvent);
                }
            }
        }
    }
}

/// When the last quest item lands, the game is won: mark the profile and
/// fade out to the credits.
pub fn check_game_complete(
    mut completed: EventReader<QuestCompletedEvent>,
    level: Res<LevelMap>,
    save: Res<SaveData>,
    mut profile: ResMut<Profile>,
    mut transition: ResMut<ScreenTransition>,
    mut save_requests: EventWriter<SaveRequestEvent>,
) {
    if completed.read().next().is_none() {
        return;
    }
    let all_delivered = quest_items(&level.0)
        .iter()
        .all(|item| save.items_delivered.contains(*item));
    if !all_delivered || profile.game_complete {
        return;
    }

    profile.game_complete = true;
    transition.request(Screen::Credits);
    save_requests.send(SaveRequestEvent);
    info!("All quest items delivered; rolling credits");
}

/// Show the "!" over quest givers whose item is still up for grabs, and
/// hide it while a conversation is open so it doesn't sit on the text.
pub fn update_quest_markers(
    save: Res<SaveData>,
    npc_query: Query<(&Npc, &Dialogue, &Children)>,
    mut marker_query: Query<&mut Visibility, With<QuestMarker>>,
) {
    for (npc, dialogue, children) in npc_query.iter() {
        let NpcKind::QuestGiver { item } = &npc.kind else {
            continue;
        };
        let show = save.quest_available(item) && !dialogue.interacting;
        for child in children.iter() {
            if let Ok(mut visibility) = marker_query.get_mut(*child) {
                *visibility = if show {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}
