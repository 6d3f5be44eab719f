//! Audio playback: one-shot sfx and looping music, both event-driven.

use bevy::prelude::*;
use crate::shared::*;

/// The currently playing music entity, so track swaps can stop it.
#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

/// Maps SFX ids (sent by other domains) to audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "jump_1" => Some("audio/sfx/jump_1.ogg"),
        "jump_2" => Some("audio/sfx/jump_2.ogg"),
        "jump_3" => Some("audio/sfx/jump_3.ogg"),
        "jump_4" => Some("audio/sfx/jump_4.ogg"),
        "button_low" => Some("audio/sfx/button_low.ogg"),
        "button_high" => Some("audio/sfx/button_high.ogg"),
        "seashell" => Some("audio/sfx/seashell.ogg"),
        _ => None,
    }
}

/// Maps music track ids to audio file paths.
fn music_path(track_id: &str) -> Option<&'static str> {
    match track_id {
        "menu" => Some("audio/music/menu_tide.ogg"),
        "beach" => Some("audio/music/beach_day.ogg"),
        "credits" => Some("audio/music/last_light.ogg"),
        _ => None,
    }
}

/// Spawn one-shot audio sources that despawn themselves when done.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        } else {
            warn!("Unknown sfx id {:?}", event.sfx_id);
        }
    }
}

/// Stop the current music track and start the requested one.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if music_state.current_track_id == event.track_id {
            continue;
        }
        if let Some(entity) = music_state.current_track.take() {
            commands.entity(entity).despawn_recursive();
        }
        music_state.current_track_id.clear();

        if let Some(path) = music_path(&event.track_id) {
            let entity = commands
                .spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::LOOP,
                ))
                .id();
            music_state.current_track = Some(entity);
            music_state.current_track_id = event.track_id.clone();
        }
    }
}

pub fn start_menu_music(
    mut music_events: EventWriter<PlayMusicEvent>,
    position: Res<MusicPosition>,
) {
    if position.0 > 0.0 {
        info!("Menu track nominally {:.1}s into its loop", position.0);
    }
    music_events.send(PlayMusicEvent {
        track_id: "menu".to_string(),
    });
}

pub fn start_game_music(mut music_events: EventWriter<PlayMusicEvent>) {
    music_events.send(PlayMusicEvent {
        track_id: "beach".to_string(),
    });
}

pub fn start_credits_music(mut music_events: EventWriter<PlayMusicEvent>) {
    music_events.send(PlayMusicEvent {
        track_id: "credits".to_string(),
    });
}

/// Keep a numeric cursor into the menu track so a later Menu visit can
/// report how far the loop has nominally advanced. The audio backend has
/// no seek, so this is bookkeeping only.
pub fn track_music_position(
    time: Res<Time>,
    music_state: Res<MusicState>,
    mut position: ResMut<MusicPosition>,
) {
    if music_state.current_track_id == "menu" {
        position.0 += time.delta_secs();
    }
}
