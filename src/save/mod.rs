//! Persistence for Shorebound's two records: the per-playthrough save and
//! the cross-playthrough profile. JSON files in a `data/` directory next
//! to the executable, written atomically (temp file + rename).
//!
//! Boot policy: absent records get defaults written once; malformed
//! records are fatal rather than silently replaced, so a corrupted save
//! is never overwritten behind the player's back.

use bevy::app::AppExit;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::*;

pub const SAVE_FILE: &str = "save.json";
pub const PROFILE_FILE: &str = "profile.json";

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveData>().init_resource::<Profile>();

        app.add_systems(OnEnter(Screen::Boot), load_records);

        app.add_systems(
            Update,
            (handle_save_request, handle_reset_request).in_set(StageSet::Transition),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn data_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("data")
}

fn ensure_data_dir(dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Could not create data directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}

fn write_record<T: Serialize>(dir: &Path, file: &str, record: &T) -> Result<(), String> {
    ensure_data_dir(dir)?;
    let json =
        serde_json::to_string_pretty(record).map_err(|e| format!("Serialization failed: {}", e))?;

    let path = dir.join(file);
    // Temp file then rename, so a crash mid-write never corrupts the record
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

/// Absent file: write the default and return it. Present file: parse it,
/// and treat a parse failure as an error for the caller to escalate.
fn load_or_create<T: Serialize + DeserializeOwned + Default>(
    dir: &Path,
    file: &str,
) -> Result<T, String> {
    let path = dir.join(file);
    if !path.exists() {
        let record = T::default();
        write_record(dir, file, &record)?;
        info!("Created default record {}", path.display());
        return Ok(record);
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    serde_json::from_str(&json)
        .map_err(|e| format!("Malformed record {}: {}", path.display(), e))
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Boot: load both records, then move on to the menu. A record that
/// exists but does not parse aborts the app instead of clobbering it.
fn load_records(
    mut save: ResMut<SaveData>,
    mut profile: ResMut<Profile>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut exit: EventWriter<AppExit>,
) {
    let dir = data_directory();

    match load_or_create::<SaveData>(&dir, SAVE_FILE) {
        Ok(record) => *save = record,
        Err(e) => {
            error!("Boot failed: {}", e);
            exit.send(AppExit::error());
            return;
        }
    }
    match load_or_create::<Profile>(&dir, PROFILE_FILE) {
        Ok(record) => *profile = record,
        Err(e) => {
            error!("Boot failed: {}", e);
            exit.send(AppExit::error());
            return;
        }
    }

    info!(
        "Records loaded: {} seashells, intro {}",
        save.seashells,
        if profile.run_intro { "pending" } else { "seen" }
    );
    next_screen.set(Screen::Menu);
}

fn handle_save_request(
    mut requests: EventReader<SaveRequestEvent>,
    save: Res<SaveData>,
    profile: Res<Profile>,
) {
    if requests.read().next().is_none() {
        return;
    }
    let dir = data_directory();
    match write_record(&dir, SAVE_FILE, &*save)
        .and_then(|()| write_record(&dir, PROFILE_FILE, &*profile))
    {
        Ok(()) => info!("Records saved."),
        Err(e) => warn!("Save FAILED: {}", e),
    }
}

/// Menu "reset": both records back to defaults, in memory and on disk.
fn handle_reset_request(
    mut requests: EventReader<ResetSaveEvent>,
    mut save: ResMut<SaveData>,
    mut profile: ResMut<Profile>,
) {
    if requests.read().next().is_none() {
        return;
    }
    *save = SaveData::default();
    *profile = Profile::default();

    let dir = data_directory();
    match write_record(&dir, SAVE_FILE, &*save)
        .and_then(|()| write_record(&dir, PROFILE_FILE, &*profile))
    {
        Ok(()) => info!("Records reset to defaults."),
        Err(e) => warn!("Reset write FAILED: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_create_writes_default_when_absent() {
        let dir = std::env::temp_dir().join("shorebound_test_absent");
        let _ = fs::remove_dir_all(&dir);

        let save: SaveData = load_or_create(&dir, SAVE_FILE).unwrap();
        assert_eq!(save.checkpoint_pos, [0.0, 129.0]);
        assert!(dir.join(SAVE_FILE).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_or_create_round_trips_written_record() {
        let dir = std::env::temp_dir().join("shorebound_test_roundtrip");
        let _ = fs::remove_dir_all(&dir);

        let mut save = SaveData::default();
        save.accept_item("amber_shell");
        save.checkpoint_pos = [560.0, 120.0];
        write_record(&dir, SAVE_FILE, &save).unwrap();

        let loaded: SaveData = load_or_create(&dir, SAVE_FILE).unwrap();
        assert!(loaded.inventory.contains("amber_shell"));
        assert_eq!(loaded.checkpoint_pos, [560.0, 120.0]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_record_is_an_error_not_a_default() {
        let dir = std::env::temp_dir().join("shorebound_test_malformed");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SAVE_FILE), "{ not json").unwrap();

        let result: Result<SaveData, String> = load_or_create(&dir, SAVE_FILE);
        assert!(result.is_err());
        // The broken file must still be there for the player to inspect.
        assert!(dir.join(SAVE_FILE).exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
