//! Level data for the beach crossing.
//!
//! The map is defined as an ASCII grid plus object placements (NPCs and
//! checkpoint triggers), in pixel coordinates of the y-down world.

use bevy::prelude::*;
use crate::shared::*;

/// One cell of level geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    /// Full-height solid block.
    Ground,
    /// Collidable-but-invisible ledge: gets a 2px-tall trigger rect so the
    /// player can stand on it without a visible wall.
    Ledge,
}

/// Which behavior an NPC placement gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcRole {
    Talking,
    QuestGiver,
    QuestReceiver,
}

/// An NPC as authored in the level: position is the bottom-center anchor,
/// matching how the sprites sit on the ground.
#[derive(Debug, Clone)]
pub struct NpcPlacement {
    pub id: &'static str,
    pub role: NpcRole,
    pub bottom_center: Vec2,
    /// Dialogue; two newlines separate the lines the NPC says.
    pub text: &'static str,
    pub item: Option<&'static str>,
    /// Replacement dialogue once `item` has been delivered (receivers).
    pub text_if_item: Option<&'static str>,
}

/// Complete definition of the level.
#[derive(Debug, Clone)]
pub struct MapDef {
    pub width: usize,
    pub height: usize,
    /// Row-major tile data: tiles[y * width + x]
    pub tiles: Vec<TileKind>,
    pub npcs: Vec<NpcPlacement>,
    /// Checkpoint trigger rects in pixel space.
    pub checkpoints: Vec<Rect>,
}

impl MapDef {
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            TileKind::Empty
        } else {
            self.tiles[y as usize * self.width + x as usize]
        }
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }
}

// ---------------------------------------------------------------------------
// The beach: 96×14 tiles (1536×224 px). Dunes on the left, tide pools in
// the middle, the lighthouse jetty on the right. Gaps in the ground are
// water pits; falling in drops the player past the death plane.
// Legend: '#' ground, '-' invisible ledge, '.' air.
// ---------------------------------------------------------------------------
#[rustfmt::skip]
const BEACH_ROWS: [&str; 14] = [
    "................................................................................................",
    "................................................................................................",
    "................................................................................................",
    "......................................----......................................##..............",
    "..........................................................--.--.--.............##...............",
    "................##.............................................................###..............",
    "...............####..........----.....................##.......................####.............",
    "..............######..................##..............###............##.......#####.............",
    "........................................................#.............#................#########",
    "#############.######....#########.#########......#########....#########.....###########.########",
    "#############.######....#########.#########......#########....#########.....###########.########",
    "#############.######....#########.#########......#########....#########.....###########.########",
    "##############################....#########......#########....#########.....####################",
    "##############################....#########......#########....#########.....####################",
];

fn parse_rows(rows: &[&str]) -> (usize, usize, Vec<TileKind>) {
    let height = rows.len();
    let width = rows[0].len();
    let mut tiles = vec![TileKind::Empty; width * height];
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            tiles[y * width + x] = match cell {
                b'#' => TileKind::Ground,
                b'-' => TileKind::Ledge,
                _ => TileKind::Empty,
            };
        }
    }
    (width, height, tiles)
}

/// Build the one level of the game.
pub fn beach_map() -> MapDef {
    let (width, height, tiles) = parse_rows(&BEACH_ROWS);

    let npcs = vec![
        NpcPlacement {
            id: "surf_bum",
            role: NpcRole::Talking,
            bottom_center: Vec2::new(120.0, 144.0),
            text: "Whoa, a visitor!\n\nThe tide's been weird all week.\n\nIf you fall in, you wash right back to the last dune marker.",
            item: None,
            text_if_item: None,
        },
        NpcPlacement {
            id: "hermit_crab",
            role: NpcRole::QuestGiver,
            bottom_center: Vec2::new(290.0, 96.0),
            text: "Psst. Up here.\n\nI outgrew this amber shell ages ago.\n\nTake it to the collector past the tide pools, would you?",
            item: Some("amber_shell"),
            text_if_item: None,
        },
        NpcPlacement {
            id: "shell_collector",
            role: NpcRole::QuestReceiver,
            bottom_center: Vec2::new(600.0, 144.0),
            text: "I catalogue every shell on this beach.\n\nAn amber one would complete the spiral wing...",
            item: Some("amber_shell"),
            text_if_item: Some("The amber shell! Magnificent.\n\nHere, a seashell for your trouble."),
        },
        NpcPlacement {
            id: "old_sailor",
            role: NpcRole::QuestGiver,
            bottom_center: Vec2::new(700.0, 144.0),
            text: "Found a bottle with a letter inside.\n\nCan't read a word without my glasses.\n\nThe lighthouse keeper will want it.",
            item: Some("message_bottle"),
            text_if_item: None,
        },
        NpcPlacement {
            id: "starfish_kid",
            role: NpcRole::QuestGiver,
            bottom_center: Vec2::new(900.0, 128.0),
            text: "Look what the tide pools left!\n\nA five-armed lucky starfish!\n\nGranny collects them. She's just past the jetty.",
            item: Some("lucky_starfish"),
            text_if_item: None,
        },
        NpcPlacement {
            id: "tide_pool_granny",
            role: NpcRole::QuestReceiver,
            bottom_center: Vec2::new(1220.0, 144.0),
            text: "These old eyes have counted four lucky starfish.\n\nA fifth would round things out nicely.",
            item: Some("lucky_starfish"),
            text_if_item: Some("Five! That's a full constellation.\n\nTake a seashell, dear."),
        },
        NpcPlacement {
            id: "lighthouse_keeper",
            role: NpcRole::QuestReceiver,
            bottom_center: Vec2::new(1460.0, 128.0),
            text: "Nobody writes to a lighthouse.\n\nUnless... the sea does it for them.",
            item: Some("message_bottle"),
            text_if_item: Some("My sister's handwriting! After thirty years.\n\nA seashell is the least I owe you."),
        },
    ];

    let checkpoints = vec![
        Rect::new(0.0, 96.0, 16.0, 160.0),
        Rect::new(560.0, 96.0, 576.0, 160.0),
        Rect::new(1152.0, 96.0, 1168.0, 160.0),
    ];

    MapDef {
        width,
        height,
        tiles,
        npcs,
        checkpoints,
    }
}

/// Every quest item authored in the level. Delivering all of them finishes
/// the game.
pub fn quest_items(map: &MapDef) -> Vec<&'static str> {
    map.npcs
        .iter()
        .filter(|npc| npc.role == NpcRole::QuestGiver)
        .filter_map(|npc| npc.item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beach_map_dimensions_consistent() {
        let map = beach_map();
        assert_eq!(map.tiles.len(), map.width * map.height);
        for row in BEACH_ROWS {
            assert_eq!(row.len(), map.width, "ragged map row");
        }
    }

    #[test]
    fn test_every_giver_item_has_a_receiver() {
        let map = beach_map();
        for item in quest_items(&map) {
            assert!(
                map.npcs.iter().any(|npc| {
                    npc.role == NpcRole::QuestReceiver && npc.item == Some(item)
                }),
                "no receiver for quest item {item}"
            );
        }
    }

    #[test]
    fn test_out_of_bounds_tiles_are_empty() {
        let map = beach_map();
        assert_eq!(map.get_tile(-1, 0), TileKind::Empty);
        assert_eq!(map.get_tile(0, -1), TileKind::Empty);
        assert_eq!(map.get_tile(map.width as i32, 0), TileKind::Empty);
    }

    #[test]
    fn test_default_checkpoint_sits_above_ground() {
        // The default save drops the player at x=0, y=129; row 9 (y=144)
        // must be solid there so the spawn has a floor.
        let map = beach_map();
        assert_eq!(map.get_tile(0, 9), TileKind::Ground);
    }
}
