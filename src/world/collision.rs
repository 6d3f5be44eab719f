//! Tile index and the axis-separated collision resolver.
//!
//! The index maps integer tile coordinates to solid rects and is built
//! once when the level loads. Resolution advances one axis at a time:
//! X fully, then Y fully. That avoids diagonal tunneling at the cost of
//! corner catching at high speed, which the capped frame delta keeps out
//! of reach.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;
use super::maps::{MapDef, TileKind};

/// Height of the trigger rect for collidable-invisible ledge tiles.
const LEDGE_RECT_HEIGHT: f32 = 2.0;

/// Spatial index of solid geometry for the loaded level.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileIndex {
    tiles: HashMap<(i32, i32), Rect>,
    pub initialised: bool,
}

impl TileIndex {
    /// Build the index from map data: full rects for ground, thin rects
    /// for ledges. Immutable once built.
    pub fn build(map: &MapDef) -> Self {
        let mut tiles = HashMap::new();
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                let origin = Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE);
                let rect = match map.get_tile(x, y) {
                    TileKind::Ground => {
                        Rect::from_corners(origin, origin + Vec2::splat(TILE_SIZE))
                    }
                    TileKind::Ledge => Rect::from_corners(
                        origin,
                        origin + Vec2::new(TILE_SIZE, LEDGE_RECT_HEIGHT),
                    ),
                    TileKind::Empty => continue,
                };
                tiles.insert((x, y), rect);
            }
        }
        Self {
            tiles,
            initialised: true,
        }
    }

    pub fn get(&self, tile: (i32, i32)) -> Option<Rect> {
        self.tiles.get(&tile).copied()
    }

    /// Every solid rect within a `(2 * radius + 1)²` window around
    /// `center`. Cells outside the populated bounds are silently skipped;
    /// this is the broad phase.
    pub fn neighbor_tiles(&self, center: (i32, i32), radius: i32) -> Vec<Rect> {
        let mut neighbors = Vec::new();
        for x in (center.0 - radius)..=(center.0 + radius) {
            for y in (center.1 - radius)..=(center.1 + radius) {
                if let Some(rect) = self.tiles.get(&(x, y)) {
                    neighbors.push(*rect);
                }
            }
        }
        neighbors
    }
}

/// Nearest tile coordinate for a pixel position.
pub fn pixel_to_tile(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).round() as i32,
        (pos.y / TILE_SIZE).round() as i32,
    )
}

/// Axis-separated sweep: integrate X and clamp against overlaps, then Y.
/// Landing zeroes vertical velocity and clears `jumping`; hitting a
/// ceiling zeroes vertical velocity. An entity still falling after
/// resolution is flagged `jumping` so mid-air jumps can't start.
pub fn resolve(body: &mut Body, tiles: &TileIndex, dt: f32) {
    let neighbors = tiles.neighbor_tiles(pixel_to_tile(body.pos), NEIGHBOR_RADIUS);

    body.pos.x += body.vel.x * dt;
    for tile in &neighbors {
        if rects_overlap(body.rect(), *tile) {
            if body.vel.x > 0.0 {
                body.pos.x = tile.min.x - body.size.x;
            } else if body.vel.x < 0.0 {
                body.pos.x = tile.max.x;
            }
        }
    }

    body.pos.y += body.vel.y * dt;
    for tile in &neighbors {
        if rects_overlap(body.rect(), *tile) {
            if body.vel.y > 0.0 {
                body.pos.y = tile.min.y - body.size.y;
                body.jumping = false;
                body.vel.y = 0.0;
            } else if body.vel.y < 0.0 {
                body.pos.y = tile.max.y;
                body.vel.y = 0.0;
            }
        }
    }

    if body.vel.y > 0.0 {
        body.jumping = true;
    }
}

/// System wrapper: resolve the player body against the level each tick.
pub fn resolve_player_collisions(
    frame: Res<FrameDelta>,
    tiles: Res<TileIndex>,
    mut query: Query<&mut Body, With<Player>>,
) {
    if !tiles.initialised {
        return;
    }
    for mut body in &mut query {
        resolve(&mut body, &tiles, frame.0);
    }
}
