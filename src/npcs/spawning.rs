//! Spawn the level's NPCs from the map's placements.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::maps::{NpcPlacement, NpcRole};
use crate::world::LevelMap;

use super::dialogue::{Dialogue, DialogueText, Npc, NpcKind, QuestMarker};

pub const NPC_SIZE: Vec2 = Vec2::new(14.0, 16.0);

/// Vertical offset of the floating dialogue line above an NPC's head.
const TEXT_OFFSET_Y: f32 = 14.0;

fn split_lines(text: &str) -> Vec<String> {
    text.split("\n\n").map(str::to_string).collect()
}

fn kind_for(placement: &NpcPlacement) -> NpcKind {
    match placement.role {
        NpcRole::Talking => NpcKind::Talking,
        NpcRole::QuestGiver => NpcKind::QuestGiver {
            item: placement.item.unwrap_or_default().to_string(),
        },
        NpcRole::QuestReceiver => NpcKind::QuestReceiver {
            item: placement.item.unwrap_or_default().to_string(),
            finished_lines: split_lines(placement.text_if_item.unwrap_or_default()),
        },
    }
}

pub fn spawn_npcs(
    mut commands: Commands,
    level: Res<LevelMap>,
    asset_server: Res<AssetServer>,
) {
    for placement in &level.0.npcs {
        // Placements anchor at the feet; the body wants the top-left corner.
        let pos = placement.bottom_center - Vec2::new(NPC_SIZE.x / 2.0, NPC_SIZE.y);
        let kind = kind_for(placement);
        let image = asset_server.load(format!("sprites/npcs/{}.png", placement.id));

        commands
            .spawn((
                ScreenScoped,
                Npc {
                    id: placement.id.to_string(),
                    kind,
                },
                Dialogue::new(split_lines(placement.text)),
                Body::new(pos, NPC_SIZE),
                PoseState::default(),
                Sprite {
                    image,
                    ..default()
                },
                Transform::from_xyz(
                    placement.bottom_center.x,
                    -(pos.y + NPC_SIZE.y / 2.0),
                    4.0,
                ),
            ))
            .with_children(|parent| {
                parent.spawn((
                    DialogueText,
                    Text2d::new(""),
                    TextFont {
                        font_size: 8.0,
                        ..default()
                    },
                    TextColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
                    Transform::from_xyz(0.0, TEXT_OFFSET_Y, 1.0),
                ));
                parent.spawn((
                    QuestMarker,
                    Text2d::new("!"),
                    TextFont {
                        font_size: 8.0,
                        ..default()
                    },
                    TextColor(Color::srgb_u8(248, 216, 88)),
                    Transform::from_xyz(0.0, TEXT_OFFSET_Y, 1.0),
                    Visibility::Hidden,
                ));
            });
    }

    info!("Spawned {} NPCs", level.0.npcs.len());
}
