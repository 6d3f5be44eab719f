//! Shared components, resources, events, and states for Shorebound.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════
// SCREENS — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// The four screens of the game plus the boot step that loads persisted
/// records. Each screen owns its entities: `OnEnter` builds them,
/// `OnExit` tears them down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum Screen {
    #[default]
    Boot,
    Menu,
    Intro,
    Game,
    Credits,
}

/// Pause sub-state. Only exists while `Screen::Game` is active. Gameplay
/// stage sets run in `Running`; the pause menu runs in `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SubStates, Default)]
#[source(Screen = Screen::Game)]
pub enum PlayState {
    #[default]
    Running,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// STAGE PIPELINE
// ═══════════════════════════════════════════════════════════════════════

/// The per-frame update pipeline, as an explicit ordered chain of system
/// sets (configured with `.chain()` in `main.rs`). The order is load
/// bearing: collision integrates last frame's velocities before the player
/// computes new ones, checkpoints observe the post-collision rect, and the
/// camera follows the settled player.
/// PreUpdate set for the hardware input reader, so downstream intent
/// merging can order itself after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct InputReadSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum StageSet {
    Background,
    Collision,
    Npcs,
    Player,
    Checkpoints,
    Camera,
    Ui,
    Pause,
    Transition,
}

// ═══════════════════════════════════════════════════════════════════════
// TIME BASE
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame delta in game time units (wall-clock seconds × `TIME_SCALE`),
/// capped at `MAX_FRAME_DELTA` so a frame hitch cannot blow up physics.
/// Every gameplay system reads this instead of `Time`, which also lets
/// headless tests inject fixed deltas.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameDelta(pub f32);

pub const TIME_SCALE: f32 = 10.0;
pub const MAX_FRAME_DELTA: f32 = 0.7;

// ═══════════════════════════════════════════════════════════════════════
// ENTITIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Animation pose tag. Combined with `Facing` to pick a sprite row —
/// an enum pair instead of the string keys the data originally used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pose {
    #[default]
    Idle,
    Walk,
    Jump,
    Talk,
}

/// Axis-aligned kinematic body in y-down pixel space. `pos` is the
/// top-left corner of the bounding rectangle; y grows toward the sea
/// floor. Rendering converts to Bevy's y-up world via `sync_transforms`.
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub jumping: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            jumping: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.pos, self.pos + self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Strict AABB overlap in y-down space. Touching edges do not count.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Current animation tag for an entity: which pose row to draw and which
/// way to flip it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PoseState {
    pub pose: Pose,
    pub facing: Facing,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Cleared when the player falls past the death plane. The transition
/// stage observes this and schedules a respawn of the Game screen.
#[derive(Component, Debug, Clone, Copy)]
pub struct Alive(pub bool);

/// Marker for entities that belong to the current screen and are torn
/// down on exit.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScreenScoped;

// ═══════════════════════════════════════════════════════════════════════
// PERSISTED RECORDS
// ═══════════════════════════════════════════════════════════════════════

/// The per-playthrough save record. Quest state lives here and nowhere
/// else; NPC systems are the only writers, at most one mutation per tick.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub inventory: HashSet<String>,
    pub checkpoint_pos: [f32; 2],
    pub items_delivered: HashSet<String>,
    pub seashells: u32,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            inventory: HashSet::new(),
            checkpoint_pos: [0.0, 129.0],
            items_delivered: HashSet::new(),
            seashells: 0,
        }
    }
}

impl SaveData {
    /// Whether the quest for `item` has neither been accepted nor finished.
    pub fn quest_available(&self, item: &str) -> bool {
        !self.inventory.contains(item) && !self.items_delivered.contains(item)
    }

    /// Accept a quest: put its item in the inventory. No-op if the item is
    /// already held or already delivered.
    pub fn accept_item(&mut self, item: &str) -> bool {
        if !self.quest_available(item) {
            return false;
        }
        self.inventory.insert(item.to_string());
        true
    }

    /// Deliver a quest item: atomically move it from inventory to
    /// delivered and grant one seashell. Inventory membership is the
    /// guard, so a second delivery of the same item is a no-op and an
    /// item can never sit in both sets.
    pub fn deliver_item(&mut self, item: &str) -> bool {
        if !self.inventory.remove(item) {
            return false;
        }
        self.items_delivered.insert(item.to_string());
        self.seashells += 1;
        true
    }
}

/// Cross-playthrough record: whether to run the intro on "play", and
/// whether the game has been finished (unlocks the menu's sunset layer).
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Profile {
    pub run_intro: bool,
    pub game_complete: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            run_intro: true,
            game_complete: false,
        }
    }
}

/// Menu music playback offset in seconds, carried numerically between
/// Menu instantiations. The only state besides the persisted records that
/// survives a screen swap.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MusicPosition(pub f32);

// ═══════════════════════════════════════════════════════════════════════
// SCREEN TRANSITIONS
// ═══════════════════════════════════════════════════════════════════════

/// The requested-but-not-committed transition target. Gameplay triggers
/// (death, pause menu, dialogue completion) write `pending`; the fade
/// stage commits it to `NextState<Screen>` only when its fade-out
/// finishes, so no screen swap ever happens mid-fade.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScreenTransition {
    pub pending: Option<Screen>,
}

impl ScreenTransition {
    /// First writer wins; a transition already underway is never replaced.
    pub fn request(&mut self, target: Screen) {
        if self.pending.is_none() {
            self.pending = Some(target);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Game actions for the current frame, written once per frame by the
/// input reader. Edge-detected fields are true only on the press frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// -1.0, 0.0 or 1.0. Simultaneous opposing keys cancel to 0.0.
    pub move_axis: f32,
    pub jump: bool,
    pub interact: bool,
    pub pause: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
    pub any_key: bool,
    /// Pointer position in logical view pixels, if inside the window.
    pub pointer: Option<Vec2>,
}

/// Which slice of hardware input is live, derived from the active states.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct KeyBindings {
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub jump: KeyCode,
    pub interact: KeyCode,
    pub pause: KeyCode,
    pub ui_confirm: KeyCode,
    pub ui_cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            jump: KeyCode::Space,
            interact: KeyCode::KeyE,
            pause: KeyCode::Escape,
            ui_confirm: KeyCode::Enter,
            ui_cancel: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MENU KIT
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame menu intent, merged from pointer observers and keyboard.
#[derive(Resource, Debug, Clone, Default)]
pub struct MenuAction {
    pub move_up: bool,
    pub move_down: bool,
    pub activate: bool,
    pub cancel: bool,
    /// Pointer hover moved the cursor to this item.
    pub set_cursor: Option<usize>,
    /// Pointer clicked this item directly.
    pub clicked: Option<usize>,
}

/// Marker for a selectable menu entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct MenuItem {
    pub index: usize,
}

/// Shared menu colors, sized for the pixel font.
#[derive(Resource, Debug, Clone)]
pub struct MenuTheme {
    pub button_normal: Color,
    pub button_selected: Color,
    pub text_color: Color,
    pub text_dim: Color,
    pub overlay: Color,
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self {
            button_normal: Color::srgb_u8(109, 117, 141),
            button_selected: Color::srgb_u8(139, 147, 175),
            text_color: Color::srgb_u8(6, 6, 8),
            text_dim: Color::srgb(0.75, 0.75, 0.78),
            overlay: Color::srgba(0.0, 0.0, 0.0, 0.59),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// One-shot sound effect by id; the audio module maps ids to files.
#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

/// Swap the looping music track.
#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

/// A quest giver handed its item to the player.
#[derive(Event, Debug, Clone)]
pub struct QuestAcceptedEvent {
    pub item: String,
}

/// A quest receiver took its item and paid a seashell.
#[derive(Event, Debug, Clone)]
pub struct QuestCompletedEvent {
    pub item: String,
}

/// The player touched a checkpoint trigger; `pos` is the stored respawn
/// coordinate (checkpoint x, player y).
#[derive(Event, Debug, Clone)]
pub struct CheckpointReachedEvent {
    pub pos: [f32; 2],
}

/// Reset the player to the persisted checkpoint inside the current Game
/// screen. Emitted by the transition commit when the pending target equals
/// the active screen (death restart).
#[derive(Event, Debug, Clone)]
pub struct RespawnEvent;

/// Write the save record to disk.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Rewrite both persisted records with defaults (menu "reset").
#[derive(Event, Debug, Clone)]
pub struct ResetSaveEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (320×180 logical → 960×540)
pub const VIEW_WIDTH: f32 = 320.0;
pub const VIEW_HEIGHT: f32 = 180.0;

pub const PLAYER_SIZE: Vec2 = Vec2::new(14.0, 16.0);
pub const PLAYER_SPEED: f32 = 4.0;
pub const PLAYER_GRAVITY: f32 = 3.5;
pub const PLAYER_JUMP_SPEED: f32 = 15.0;

/// Falling below this y kills the player (y-down space).
pub const DEATH_PLANE_Y: f32 = 260.0;

/// Tile-window radius for the collision broad phase.
pub const NEIGHBOR_RADIUS: i32 = 3;

/// Fade overlay speed in alpha units (0-255) per time unit.
pub const FADE_SPEED: f32 = 40.0;

/// Dialogue text fade rate in alpha units per time unit.
pub const DIALOGUE_ALPHA_RATE: f32 = 25.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliver_moves_item_between_sets() {
        let mut save = SaveData::default();
        save.accept_item("shell_A");
        assert!(save.inventory.contains("shell_A"));

        assert!(save.deliver_item("shell_A"));
        assert!(!save.inventory.contains("shell_A"));
        assert!(save.items_delivered.contains("shell_A"));
        assert_eq!(save.seashells, 1);
    }

    #[test]
    fn test_deliver_twice_is_noop() {
        let mut save = SaveData::default();
        save.accept_item("shell_A");
        assert!(save.deliver_item("shell_A"));
        assert!(!save.deliver_item("shell_A"));
        assert_eq!(save.seashells, 1);
    }

    #[test]
    fn test_accept_after_delivery_is_noop() {
        let mut save = SaveData::default();
        save.accept_item("shell_A");
        save.deliver_item("shell_A");
        assert!(!save.accept_item("shell_A"));
        assert!(!save.inventory.contains("shell_A"));
    }

    #[test]
    fn test_item_never_in_both_sets() {
        let mut save = SaveData::default();
        for _ in 0..3 {
            save.accept_item("bottle");
            save.deliver_item("bottle");
            let both: Vec<_> = save
                .inventory
                .intersection(&save.items_delivered)
                .collect();
            assert!(both.is_empty());
        }
    }

    #[test]
    fn test_transition_request_first_writer_wins() {
        let mut transition = ScreenTransition::default();
        transition.request(Screen::Menu);
        transition.request(Screen::Game);
        assert_eq!(transition.pending, Some(Screen::Menu));
    }

    #[test]
    fn test_rects_overlap_excludes_touching_edges() {
        let a = Rect::new(0.0, 0.0, 16.0, 16.0);
        let b = Rect::new(16.0, 0.0, 32.0, 16.0);
        assert!(!rects_overlap(a, b));

        let c = Rect::new(15.0, 8.0, 31.0, 24.0);
        assert!(rects_overlap(a, c));
    }
}
