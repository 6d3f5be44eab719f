//! UI domain: menus, HUD, fade overlay, and audio playback.

mod audio;
mod credits;
mod hud;
mod intro;
mod main_menu;
pub mod menu_kit;
mod pause_menu;
pub mod transitions;

use bevy::prelude::*;
use crate::shared::*;

/// The pixel font, loaded once at startup and shared by every text node.
#[derive(Resource)]
pub struct UiFontHandle(pub Handle<Font>);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuTheme>()
            .init_resource::<MenuAction>()
            .init_resource::<transitions::ScreenFade>()
            .init_resource::<audio::MusicState>()
            .init_resource::<hud::QuestToast>();

        app.add_systems(Startup, (load_ui_font, transitions::spawn_fade_overlay));

        // Menu intent: clear early, merge keyboard after the input reader.
        app.add_systems(
            PreUpdate,
            (menu_kit::reset_menu_action, menu_kit::merge_keyboard_menu_action)
                .chain()
                .after(InputReadSet),
        );

        // ─── FADE + COMMIT — runs in every screen ───
        app.add_systems(
            Update,
            transitions::update_transition.in_set(StageSet::Transition),
        );

        // ─── SCREEN TEARDOWN — every screen's entities die on exit ───
        for screen in [Screen::Menu, Screen::Intro, Screen::Game, Screen::Credits] {
            app.add_systems(OnEnter(screen), transitions::begin_fade_in);
            app.add_systems(OnExit(screen), despawn_screen_scoped);
        }

        // ─── MAIN MENU ───
        app.add_systems(
            OnEnter(Screen::Menu),
            (main_menu::spawn_main_menu, audio::start_menu_music),
        );
        app.add_systems(OnExit(Screen::Menu), main_menu::despawn_main_menu_state);
        app.add_systems(
            Update,
            (
                main_menu::main_menu_navigation,
                main_menu::update_main_menu_visuals,
            )
                .chain()
                .in_set(StageSet::Ui)
                .run_if(in_state(Screen::Menu)),
        );

        // ─── INTRO / CREDITS ───
        app.add_systems(OnEnter(Screen::Intro), intro::spawn_intro);
        app.add_systems(
            Update,
            intro::advance_intro
                .in_set(StageSet::Ui)
                .run_if(in_state(Screen::Intro)),
        );
        app.add_systems(
            OnEnter(Screen::Credits),
            (credits::spawn_credits, audio::start_credits_music),
        );
        app.add_systems(
            Update,
            credits::advance_credits
                .in_set(StageSet::Ui)
                .run_if(in_state(Screen::Credits)),
        );

        // ─── HUD ───
        app.add_systems(
            OnEnter(Screen::Game),
            (hud::spawn_hud, audio::start_game_music),
        );
        app.add_systems(
            Update,
            (hud::update_seashell_counter, hud::update_quest_toast)
                .in_set(StageSet::Ui)
                .run_if(in_state(PlayState::Running)),
        );

        // ─── PAUSE ───
        app.add_systems(
            Update,
            pause_menu::toggle_pause
                .in_set(StageSet::Pause)
                .run_if(in_state(Screen::Game)),
        );
        app.add_systems(OnEnter(PlayState::Paused), pause_menu::spawn_pause_menu);
        app.add_systems(OnExit(PlayState::Paused), pause_menu::despawn_pause_menu);
        app.add_systems(
            Update,
            (
                pause_menu::pause_menu_navigation,
                pause_menu::update_pause_menu_visuals,
            )
                .chain()
                .in_set(StageSet::Pause)
                .run_if(in_state(PlayState::Paused)),
        );

        // ─── AUDIO ───
        app.add_systems(
            Update,
            (
                audio::handle_play_sfx,
                audio::handle_play_music,
                audio::track_music_position,
            )
                .in_set(StageSet::Ui),
        );
    }
}

fn load_ui_font(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(UiFontHandle(asset_server.load("fonts/pixel.ttf")));
}

/// Shared teardown: everything tagged for the departing screen goes.
fn despawn_screen_scoped(mut commands: Commands, query: Query<Entity, With<ScreenScoped>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
