//! Headless integration tests for Shorebound.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI spawning), and drive
//! time through the injected `FrameDelta` so every run is deterministic.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use shorebound::npcs::dialogue::{update_npc_interaction, Dialogue, Npc, NpcKind};
use shorebound::npcs::quests::{apply_prior_completions, handle_quest_talk};
use shorebound::player::movement::player_movement;
use shorebound::player::spawn::handle_respawn;
use shorebound::player::{camera::CameraScroll, JumpSfxCycle};
use shorebound::shared::*;
use shorebound::ui::transitions::{update_transition, ScreenFade};
use shorebound::world::checkpoints::{capture_checkpoints, Checkpoint};
use shorebound::world::collision::{resolve_player_collisions, TileIndex};
use shorebound::world::maps::beach_map;
use shorebound::world::{LevelMap, WorldBounds};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with the shared resources and events
/// registered but NO rendering, windowing, or asset loading. Systems are
/// added per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    app.init_state::<Screen>();
    app.add_sub_state::<PlayState>();

    app.init_resource::<FrameDelta>()
        .init_resource::<ScreenTransition>()
        .init_resource::<ScreenFade>()
        .init_resource::<PlayerInput>()
        .init_resource::<JumpSfxCycle>()
        .init_resource::<CameraScroll>()
        .init_resource::<SaveData>()
        .init_resource::<Profile>()
        .init_resource::<MusicPosition>()
        .init_resource::<TileIndex>()
        .init_resource::<WorldBounds>()
        .insert_resource(LevelMap(beach_map()));

    app.add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        .add_event::<QuestAcceptedEvent>()
        .add_event::<QuestCompletedEvent>()
        .add_event::<CheckpointReachedEvent>()
        .add_event::<RespawnEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<ResetSaveEvent>();

    app
}

/// Moves the app to the given screen and ticks once to apply it.
fn enter_screen(app: &mut App, screen: Screen) {
    app.world_mut()
        .resource_mut::<NextState<Screen>>()
        .set(screen);
    app.update();
}

fn set_frame_delta(app: &mut App, dt: f32) {
    app.world_mut().resource_mut::<FrameDelta>().0 = dt;
}

fn spawn_test_player(app: &mut App, pos: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            Alive(true),
            Body::new(pos, PLAYER_SIZE),
            PoseState::default(),
        ))
        .id()
}

fn player_body(app: &App, entity: Entity) -> Body {
    app.world().entity(entity).get::<Body>().cloned().unwrap()
}

fn drain_sfx(app: &mut App) -> Vec<String> {
    app.world_mut()
        .resource_mut::<Events<PlaySfxEvent>>()
        .drain()
        .map(|event| event.sfx_id)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Collision
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_falling_player_lands_without_tile_overlap() {
    let mut app = build_test_app();
    app.add_systems(Update, (player_movement, resolve_player_collisions).chain());
    enter_screen(&mut app, Screen::Game);

    let index = TileIndex::build(&beach_map());
    app.insert_resource(index);
    set_frame_delta(&mut app, 0.5);

    // Above the left dune, ground row top at y = 144.
    let player = spawn_test_player(&mut app, Vec2::new(0.0, 80.0));

    for _ in 0..80 {
        app.update();
        let body = player_body(&app, player);
        let tiles = app.world().resource::<TileIndex>();
        for tile in tiles.neighbor_tiles(
            (
                (body.pos.x / TILE_SIZE).round() as i32,
                (body.pos.y / TILE_SIZE).round() as i32,
            ),
            NEIGHBOR_RADIUS,
        ) {
            assert!(
                !rects_overlap(body.rect(), tile),
                "player overlaps a solid tile after resolution"
            );
        }
    }

    let body = player_body(&app, player);
    assert_eq!(body.pos.y, 144.0 - PLAYER_SIZE.y);
    assert!(!body.jumping, "landed player must be able to jump");
    assert_eq!(body.vel.y, 0.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Jump sound rotation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_jump_cues_rotate_through_all_four() {
    let mut app = build_test_app();
    app.add_systems(Update, player_movement);
    enter_screen(&mut app, Screen::Game);
    set_frame_delta(&mut app, 0.1);

    let player = spawn_test_player(&mut app, Vec2::new(0.0, 128.0));

    let mut played = Vec::new();
    for _ in 0..6 {
        // Put the player back on the ground so each press is a fresh jump.
        {
            let mut entity = app.world_mut().entity_mut(player);
            let mut body = entity.get_mut::<Body>().unwrap();
            body.jumping = false;
            body.vel.y = 0.0;
        }
        app.world_mut().resource_mut::<PlayerInput>().jump = true;
        app.update();
        played.extend(drain_sfx(&mut app));
    }

    assert_eq!(
        played,
        ["jump_1", "jump_2", "jump_3", "jump_4", "jump_1", "jump_2"]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkpoints
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_checkpoint_stores_checkpoint_x_and_player_y() {
    let mut app = build_test_app();
    app.add_systems(Update, capture_checkpoints);
    enter_screen(&mut app, Screen::Game);

    app.world_mut().spawn(Checkpoint {
        rect: Rect::new(560.0, 96.0, 576.0, 160.0),
    });
    spawn_test_player(&mut app, Vec2::new(565.0, 120.0));

    app.update();

    let save = app.world().resource::<SaveData>();
    assert_eq!(save.checkpoint_pos, [560.0, 120.0]);

    let events = app.world().resource::<Events<CheckpointReachedEvent>>();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_checkpoint_does_not_refire_on_unchanged_position() {
    let mut app = build_test_app();
    app.add_systems(Update, capture_checkpoints);
    enter_screen(&mut app, Screen::Game);

    app.world_mut().spawn(Checkpoint {
        rect: Rect::new(0.0, 96.0, 16.0, 160.0),
    });
    spawn_test_player(&mut app, Vec2::new(2.0, 129.0));

    for _ in 0..5 {
        app.update();
    }

    // The default save already stores [0, 129]; standing in the trigger
    // must not rewrite it or spam events.
    let save = app.world().resource::<SaveData>();
    assert_eq!(save.checkpoint_pos, [0.0, 129.0]);
    let events = app.world().resource::<Events<CheckpointReachedEvent>>();
    assert!(events.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Quests
// ─────────────────────────────────────────────────────────────────────────────

fn spawn_npc(app: &mut App, kind: NpcKind, pos: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Npc {
                id: "test_npc".to_string(),
                kind,
            },
            Dialogue::new(vec!["Hello.".to_string(), "Bye.".to_string()]),
            Body::new(pos, Vec2::new(14.0, 16.0)),
            PoseState::default(),
        ))
        .id()
}

fn add_quest_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            apply_prior_completions,
            update_npc_interaction,
            handle_quest_talk,
        )
            .chain(),
    );
}

#[test]
fn test_quest_giver_hands_item_on_first_talking_tick() {
    let mut app = build_test_app();
    add_quest_systems(&mut app);
    enter_screen(&mut app, Screen::Game);

    spawn_test_player(&mut app, Vec2::new(100.0, 128.0));
    spawn_npc(
        &mut app,
        NpcKind::QuestGiver {
            item: "amber_shell".to_string(),
        },
        Vec2::new(110.0, 128.0),
    );

    // Adjacent but not yet talking: nothing handed over.
    app.update();
    assert!(!app
        .world()
        .resource::<SaveData>()
        .inventory
        .contains("amber_shell"));

    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();

    let save = app.world().resource::<SaveData>();
    assert!(save.inventory.contains("amber_shell"));
    let events = app.world().resource::<Events<QuestAcceptedEvent>>();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_quest_receiver_delivers_once_and_swaps_lines() {
    let mut app = build_test_app();
    add_quest_systems(&mut app);
    enter_screen(&mut app, Screen::Game);

    app.world_mut()
        .resource_mut::<SaveData>()
        .accept_item("message_bottle");

    spawn_test_player(&mut app, Vec2::new(100.0, 128.0));
    let npc = spawn_npc(
        &mut app,
        NpcKind::QuestReceiver {
            item: "message_bottle".to_string(),
            finished_lines: vec!["Thank you!".to_string()],
        },
        Vec2::new(110.0, 128.0),
    );

    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    app.world_mut().resource_mut::<PlayerInput>().interact = false;
    for _ in 0..5 {
        app.update();
    }

    let save = app.world().resource::<SaveData>();
    assert!(!save.inventory.contains("message_bottle"));
    assert!(save.items_delivered.contains("message_bottle"));
    assert_eq!(save.seashells, 1, "repeat talking ticks must not pay twice");

    let dialogue = app.world().entity(npc).get::<Dialogue>().unwrap();
    assert_eq!(dialogue.lines, vec!["Thank you!".to_string()]);
}

#[test]
fn test_receiver_completed_last_session_starts_with_finished_lines() {
    let mut app = build_test_app();
    add_quest_systems(&mut app);
    enter_screen(&mut app, Screen::Game);

    app.world_mut()
        .resource_mut::<SaveData>()
        .items_delivered
        .insert("lucky_starfish".to_string());

    spawn_test_player(&mut app, Vec2::new(100.0, 128.0));
    let npc = spawn_npc(
        &mut app,
        NpcKind::QuestReceiver {
            item: "lucky_starfish".to_string(),
            finished_lines: vec!["Five!".to_string()],
        },
        Vec2::new(400.0, 128.0),
    );

    app.update();

    let dialogue = app.world().entity(npc).get::<Dialogue>().unwrap();
    assert_eq!(dialogue.lines, vec!["Five!".to_string()]);
    assert!(dialogue.check_finished);
    // And the save was not touched.
    assert_eq!(app.world().resource::<SaveData>().seashells, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Transition commit ordering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_screen_swap_waits_for_fade_out_completion() {
    let mut app = build_test_app();
    app.add_systems(Update, update_transition);
    enter_screen(&mut app, Screen::Menu);

    app.world_mut().resource_mut::<ScreenFade>().alpha = 0.0;
    set_frame_delta(&mut app, 1.0);
    app.world_mut()
        .resource_mut::<ScreenTransition>()
        .request(Screen::Game);

    // FADE_SPEED 40/tick: alpha hits 255 on the 7th tick; the state
    // machine applies the commit at the start of the 8th update.
    for tick in 1..=7 {
        app.update();
        if tick < 7 {
            assert_eq!(
                *app.world().resource::<State<Screen>>().get(),
                Screen::Menu,
                "screen must not swap mid-fade (tick {tick})"
            );
        }
    }
    app.update();
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);
    assert!(app
        .world()
        .resource::<ScreenTransition>()
        .pending
        .is_none());
}

#[test]
fn test_second_request_does_not_hijack_pending_transition() {
    let mut app = build_test_app();
    app.add_systems(Update, update_transition);
    enter_screen(&mut app, Screen::Menu);

    app.world_mut().resource_mut::<ScreenFade>().alpha = 0.0;
    set_frame_delta(&mut app, 1.0);
    {
        let mut transition = app.world_mut().resource_mut::<ScreenTransition>();
        transition.request(Screen::Game);
        transition.request(Screen::Credits);
    }

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);
}

#[test]
fn test_request_behind_full_black_commits_immediately() {
    let mut app = build_test_app();
    app.add_systems(Update, update_transition);
    enter_screen(&mut app, Screen::Intro);

    // A screen's first frame sits behind a fully opaque overlay; a
    // request made right then must still go through, not wait for an
    // alpha crossing that can never happen.
    assert_eq!(app.world().resource::<ScreenFade>().alpha, 255.0);
    set_frame_delta(&mut app, 1.0);
    app.world_mut()
        .resource_mut::<ScreenTransition>()
        .request(Screen::Game);

    app.update();
    app.update();
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);
    assert!(app
        .world()
        .resource::<ScreenTransition>()
        .pending
        .is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Death and respawn
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_death_plane_respawns_in_place_from_checkpoint() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (player_movement, update_transition, handle_respawn).chain(),
    );
    enter_screen(&mut app, Screen::Game);

    app.world_mut().resource_mut::<ScreenFade>().alpha = 0.0;
    set_frame_delta(&mut app, 1.0);

    // Well past the death plane.
    let player = spawn_test_player(&mut app, Vec2::new(300.0, 280.0));

    app.update();
    {
        let world = app.world();
        let alive = world.entity(player).get::<Alive>().unwrap();
        assert!(!alive.0, "crossing the death plane clears alive");
        assert_eq!(
            world.resource::<ScreenTransition>().pending,
            Some(Screen::Game)
        );
    }

    // Ride out the fade; the commit resolves to a respawn, not a state
    // change, because the target is the current screen.
    for _ in 0..10 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);
    let body = player_body(&app, player);
    assert_eq!(body.pos, Vec2::new(0.0, 129.0));
    assert!(!body.jumping);
    let alive = app.world().entity(player).get::<Alive>().unwrap();
    assert!(alive.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pause sub-state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_pause_substate_exists_only_inside_game() {
    let mut app = build_test_app();

    enter_screen(&mut app, Screen::Menu);
    assert!(app.world().get_resource::<State<PlayState>>().is_none());

    enter_screen(&mut app, Screen::Game);
    assert_eq!(
        *app.world().resource::<State<PlayState>>().get(),
        PlayState::Running
    );

    app.world_mut()
        .resource_mut::<NextState<PlayState>>()
        .set(PlayState::Paused);
    app.update();
    assert_eq!(
        *app.world().resource::<State<PlayState>>().get(),
        PlayState::Paused
    );
    // Pausing never leaves the Game screen.
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);

    enter_screen(&mut app, Screen::Menu);
    assert!(app.world().get_resource::<State<PlayState>>().is_none());
}
