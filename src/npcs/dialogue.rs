//! NPC interaction and dialogue presentation.
//!
//! One system handles proximity and line advancement for every NPC
//! regardless of kind; quest behavior dispatches separately in `quests.rs`.

use bevy::prelude::*;
use crate::shared::*;

/// What a given NPC does when talked to, as a closed set of variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpcKind {
    /// Flavor dialogue only.
    Talking,
    /// Hands `item` to the player on the first talking tick.
    QuestGiver { item: String },
    /// Takes `item` back and swaps to `finished_lines` afterwards.
    QuestReceiver {
        item: String,
        finished_lines: Vec<String>,
    },
}

#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub id: String,
    pub kind: NpcKind,
}

/// Per-NPC conversation state.
#[derive(Component, Debug, Clone, Default)]
pub struct Dialogue {
    pub lines: Vec<String>,
    /// 0 shows the interact prompt; 1..=lines.len() indexes into `lines`.
    pub line_index: usize,
    /// Player is close enough to talk.
    pub interacting: bool,
    /// The conversation has been started (line_index > 0).
    pub talking: bool,
    /// Dialogue text opacity, 0..255, rises while interacting.
    pub alpha: f32,
    /// Set once prior-session quest completion has been applied.
    pub check_finished: bool,
}

pub const INTERACT_PROMPT: &str = "Press E to talk";

/// How far beyond the NPC's own rect the player counts as adjacent.
const INTERACT_MARGIN: f32 = TILE_SIZE;

impl Dialogue {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Default::default()
        }
    }

    /// The line currently on screen.
    pub fn current_line(&self) -> &str {
        if self.line_index == 0 {
            INTERACT_PROMPT
        } else {
            &self.lines[self.line_index - 1]
        }
    }

    /// Advance one line, holding at the last one.
    pub fn advance(&mut self) {
        if self.line_index < self.lines.len() {
            self.line_index += 1;
        }
        self.talking = self.line_index > 0;
    }

    /// Player walked away; the conversation restarts from the prompt.
    pub fn reset(&mut self) {
        self.line_index = 0;
        self.talking = false;
    }
}

/// Marker on the floating dialogue text child.
#[derive(Component, Debug, Clone, Copy)]
pub struct DialogueText;

/// Marker on the "!" quest-available child.
#[derive(Component, Debug, Clone, Copy)]
pub struct QuestMarker;

/// Proximity and line advancement. Only one NPC can be close enough at a
/// time given the authored spacing, so the interact press goes to every
/// adjacent NPC without a claim flag.
pub fn update_npc_interaction(
    input: Res<PlayerInput>,
    player_query: Query<&Body, With<Player>>,
    mut npc_query: Query<(&Body, &mut Dialogue), Without<Player>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let player_rect = player.rect();

    for (body, mut dialogue) in npc_query.iter_mut() {
        let reach = body.rect().inflate(INTERACT_MARGIN);
        let near = rects_overlap(player_rect, reach);

        if near && !dialogue.interacting {
            dialogue.interacting = true;
        } else if !near && dialogue.interacting {
            dialogue.interacting = false;
            dialogue.reset();
        }

        if dialogue.interacting && input.interact {
            dialogue.advance();
        }
    }
}

/// Facing, pose, and dialogue fade. NPCs look at the player while a
/// conversation is open and mouth along with it.
pub fn update_npc_presentation(
    player_query: Query<&Body, With<Player>>,
    mut npc_query: Query<(&Body, &Dialogue, &mut PoseState), Without<Player>>,
) {
    let player_center = player_query.get_single().map(|body| body.center()).ok();

    for (body, dialogue, mut pose) in npc_query.iter_mut() {
        if dialogue.interacting {
            if let Some(center) = player_center {
                pose.facing = if center.x < body.center().x {
                    Facing::Left
                } else {
                    Facing::Right
                };
            }
        }
        pose.pose = if dialogue.talking {
            Pose::Talk
        } else {
            Pose::Idle
        };
    }
}

/// Step the dialogue alpha toward its target, bounded 0..255.
pub fn fade_dialogue(delta: Res<FrameDelta>, mut npc_query: Query<&mut Dialogue>) {
    for mut dialogue in npc_query.iter_mut() {
        let step = DIALOGUE_ALPHA_RATE * delta.0;
        if dialogue.interacting {
            dialogue.alpha = (dialogue.alpha + step).min(255.0);
        } else {
            dialogue.alpha = (dialogue.alpha - step).max(0.0);
        }
    }
}

/// NPC art faces right; flip it when the pose says otherwise. NPCs use
/// single-image sprites, so facing is the only visual to sync.
pub fn sync_npc_sprites(mut npc_query: Query<(&PoseState, &mut Sprite), With<Npc>>) {
    for (pose, mut sprite) in npc_query.iter_mut() {
        sprite.flip_x = pose.facing == Facing::Left;
    }
}

/// Push the current line and opacity into the floating text child.
pub fn render_dialogue_text(
    npc_query: Query<(&Dialogue, &Children), With<Npc>>,
    mut text_query: Query<(&mut Text2d, &mut TextColor), With<DialogueText>>,
) {
    for (dialogue, children) in npc_query.iter() {
        for child in children.iter() {
            let Ok((mut text, mut color)) = text_query.get_mut(*child) else {
                continue;
            };
            text.0 = dialogue.current_line().to_string();
            color.0 = Color::srgba(1.0, 1.0, 1.0, dialogue.alpha / 255.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_liner() -> Dialogue {
        Dialogue::new(vec!["First.".to_string(), "Second.".to_string()])
    }

    #[test]
    fn test_prompt_shows_before_first_advance() {
        let dialogue = two_liner();
        assert_eq!(dialogue.current_line(), INTERACT_PROMPT);
        assert!(!dialogue.talking);
    }

    #[test]
    fn test_advance_caps_at_last_line() {
        let mut dialogue = two_liner();
        for _ in 0..5 {
            dialogue.advance();
        }
        assert_eq!(dialogue.line_index, 2);
        assert_eq!(dialogue.current_line(), "Second.");
        assert!(dialogue.talking);
    }

    #[test]
    fn test_reset_returns_to_prompt() {
        let mut dialogue = two_liner();
        dialogue.advance();
        dialogue.reset();
        assert_eq!(dialogue.line_index, 0);
        assert!(!dialogue.talking);
        assert_eq!(dialogue.current_line(), INTERACT_PROMPT);
    }
}
