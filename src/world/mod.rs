//! World domain: level data, tile index, collision, checkpoints, and the
//! menu parallax background.

pub mod background;
pub mod checkpoints;
pub mod collision;
pub mod maps;

use bevy::prelude::*;
use crate::shared::*;

use collision::TileIndex;
use maps::{beach_map, MapDef, TileKind};

/// The authored level, parsed once at startup. Other domains read NPC
/// placements and quest items from here.
#[derive(Resource, Debug, Clone)]
pub struct LevelMap(pub MapDef);

/// Pixel dimensions of the loaded level; the camera clamps its scroll to
/// these bounds.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LevelMap(beach_map()))
            .init_resource::<TileIndex>()
            .init_resource::<WorldBounds>()
            .init_resource::<background::MenuScroll>();

        app.add_systems(OnEnter(Screen::Game), setup_level);
        app.add_systems(OnExit(Screen::Game), teardown_level);

        app.add_systems(
            Update,
            collision::resolve_player_collisions
                .in_set(StageSet::Collision)
                .run_if(in_state(PlayState::Running)),
        );
        app.add_systems(
            Update,
            checkpoints::capture_checkpoints
                .in_set(StageSet::Checkpoints)
                .run_if(in_state(PlayState::Running)),
        );

        // Menu parallax.
        app.add_systems(
            OnEnter(Screen::Menu),
            (background::spawn_menu_background, background::reset_menu_camera),
        );
        app.add_systems(
            Update,
            (background::scroll_menu_background, background::apply_parallax)
                .chain()
                .in_set(StageSet::Background)
                .run_if(in_state(Screen::Menu)),
        );
    }
}

const SAND: Color = Color::srgb(0.839, 0.722, 0.518);
const SAND_DEEP: Color = Color::srgb(0.706, 0.573, 0.384);

/// Build the tile index and spawn the level's visible geometry and
/// checkpoint triggers. Ledge tiles are collidable but invisible, so they
/// get no sprite.
fn setup_level(
    mut commands: Commands,
    level: Res<LevelMap>,
    mut tile_index: ResMut<TileIndex>,
    mut bounds: ResMut<WorldBounds>,
) {
    let map = &level.0;
    *tile_index = TileIndex::build(map);
    bounds.width = map.pixel_width();
    bounds.height = map.pixel_height();

    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            if map.get_tile(x, y) != TileKind::Ground {
                continue;
            }
            // Surface tiles are lighter than buried ones.
            let exposed = map.get_tile(x, y - 1) != TileKind::Ground;
            let center = Vec2::new(
                x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            );
            commands.spawn((
                ScreenScoped,
                Sprite {
                    color: if exposed { SAND } else { SAND_DEEP },
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_xyz(center.x, -center.y, 0.0),
            ));
        }
    }

    for rect in &map.checkpoints {
        commands.spawn((
            ScreenScoped,
            checkpoints::Checkpoint { rect: *rect },
            Sprite {
                color: Color::srgba(0.9, 0.3, 0.3, 0.6),
                custom_size: Some(rect.size()),
                ..default()
            },
            Transform::from_xyz(
                rect.center().x,
                -rect.center().y,
                1.0,
            ),
        ));
    }

    info!(
        "Level built: {}x{} tiles, {} checkpoints",
        map.width,
        map.height,
        map.checkpoints.len()
    );
}

/// ScreenScoped entities are despawned by the shared screen teardown;
/// the index just resets so stale geometry can't collide.
fn teardown_level(mut tile_index: ResMut<TileIndex>) {
    *tile_index = TileIndex::default();
}
