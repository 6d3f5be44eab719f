mod input;
mod npcs;
mod player;
mod save;
mod shared;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Shorebound".into(),
                        resolution: WindowResolution::new(
                            VIEW_WIDTH * PIXEL_SCALE,
                            VIEW_HEIGHT * PIXEL_SCALE,
                        ),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::BLACK))
        // States
        .init_state::<Screen>()
        .add_sub_state::<PlayState>()
        // Shared resources
        .init_resource::<FrameDelta>()
        .init_resource::<ScreenTransition>()
        .init_resource::<MusicPosition>()
        // Events
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        .add_event::<QuestAcceptedEvent>()
        .add_event::<QuestCompletedEvent>()
        .add_event::<CheckpointReachedEvent>()
        .add_event::<RespawnEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<ResetSaveEvent>()
        // The per-frame pipeline, as one explicit chain. Gameplay sets gate
        // on the pause sub-state, which only exists inside Screen::Game.
        .configure_sets(
            Update,
            (
                StageSet::Background,
                StageSet::Collision,
                StageSet::Npcs,
                StageSet::Player,
                StageSet::Checkpoints,
                StageSet::Camera,
                StageSet::Ui,
                StageSet::Pause,
                StageSet::Transition,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                StageSet::Collision,
                StageSet::Npcs,
                StageSet::Player,
                StageSet::Checkpoints,
                StageSet::Camera,
            )
                .run_if(in_state(PlayState::Running)),
        )
        .configure_sets(Update, StageSet::Pause.run_if(in_state(Screen::Game)))
        // Time base
        .add_systems(PreUpdate, compute_frame_delta)
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(npcs::NpcPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(save::SavePlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

/// Wall-clock delta in game time units, capped so a hitch cannot launch
/// the player through geometry.
fn compute_frame_delta(time: Res<Time>, mut delta: ResMut<FrameDelta>) {
    delta.0 = (time.delta_secs() * TIME_SCALE).min(MAX_FRAME_DELTA);
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXEL_SCALE)),
    ));
}
