//! Camera scroll: critically-damped follow in y-down pixel space, with
//! world-bound clamps, and the sync systems that convert logical
//! positions into Bevy's y-up render transforms.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::WorldBounds;

/// The camera's 2D scroll offset. `apply` maps world to screen
/// coordinates; `adjust_to` nudges the scroll toward a target each tick.
/// Deterministic: scroll is the only state.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraScroll {
    pub scroll: Vec2,
    pub viewport: Vec2,
    /// Upper scroll bounds, configured from the loaded level.
    pub max_scroll: Vec2,
}

impl Default for CameraScroll {
    fn default() -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport: Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            max_scroll: Vec2::splat(f32::MAX),
        }
    }
}

impl CameraScroll {
    /// One critically-damped step toward `target` per axis. The target
    /// anchors at mid-width and two-thirds height; the vertical axis
    /// follows at half rate so jumps don't bounce the horizon.
    pub fn adjust_to(&mut self, dt: f32, target: Rect) {
        self.scroll.x += (target.min.x - self.scroll.x - self.viewport.x / 2.0) * dt;
        self.scroll.y += (target.min.y - self.scroll.y - self.viewport.y / 1.5) * 0.5 * dt;
        self.scroll.x = self.scroll.x.clamp(0.0, self.max_scroll.x);
        self.scroll.y = self.scroll.y.clamp(0.0, self.max_scroll.y);
    }

    /// Jump straight to the target without smoothing (screen entry).
    pub fn snap_to(&mut self, target: Rect) {
        self.scroll.x = (target.min.x - self.viewport.x / 2.0).clamp(0.0, self.max_scroll.x);
        self.scroll.y = (target.min.y - self.viewport.y / 1.5).clamp(0.0, self.max_scroll.y);
    }

    /// World position to screen position.
    pub fn apply(&self, world: Vec2) -> Vec2 {
        (world - self.scroll).ceil()
    }
}

/// Follow the player, clamped so the viewport never leaves the level.
pub fn camera_follow_player(
    frame: Res<FrameDelta>,
    bounds: Res<WorldBounds>,
    mut camera: ResMut<CameraScroll>,
    query: Query<&Body, With<Player>>,
) {
    let Ok(body) = query.get_single() else {
        return;
    };

    if bounds.width > 0.0 {
        camera.max_scroll = Vec2::new(
            (bounds.width - camera.viewport.x).max(0.0),
            (bounds.height - camera.viewport.y).max(0.0),
        );
    }
    camera.adjust_to(frame.0, body.rect());
}

/// Map the logical scroll to the render camera's transform.
pub fn sync_camera_transform(
    camera: Res<CameraScroll>,
    mut query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    transform.translation.x = camera.scroll.x + camera.viewport.x / 2.0;
    transform.translation.y = -(camera.scroll.y + camera.viewport.y / 2.0);
}

/// Map each kinematic body's y-down rect to its y-up render transform.
pub fn sync_body_transforms(mut query: Query<(&Body, &mut Transform)>) {
    for (body, mut transform) in &mut query {
        let center = body.center();
        transform.translation.x = center.x;
        transform.translation.y = -center.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_converges_monotonically_to_stationary_target() {
        let mut camera = CameraScroll {
            max_scroll: Vec2::new(1000.0, 1000.0),
            ..default()
        };
        let target = Rect::new(600.0, 500.0, 614.0, 516.0);

        let goal_x = target.min.x - camera.viewport.x / 2.0;
        let mut last = (camera.scroll.x - goal_x).abs();
        for _ in 0..200 {
            camera.adjust_to(0.3, target);
            let error = (camera.scroll.x - goal_x).abs();
            assert!(error <= last, "horizontal error must shrink every tick");
            last = error;
        }
        assert!(last < 1.0, "scroll should settle within a bounded tick count");
    }

    #[test]
    fn test_scroll_never_exceeds_clamps() {
        let mut camera = CameraScroll {
            max_scroll: Vec2::new(100.0, 40.0),
            ..default()
        };
        let far = Rect::new(5000.0, 5000.0, 5014.0, 5016.0);
        for _ in 0..100 {
            camera.adjust_to(0.5, far);
        }
        assert_eq!(camera.scroll, Vec2::new(100.0, 40.0));

        let behind = Rect::new(-5000.0, -5000.0, -4986.0, -4984.0);
        for _ in 0..100 {
            camera.adjust_to(0.5, behind);
        }
        assert_eq!(camera.scroll, Vec2::ZERO);
    }

    #[test]
    fn test_apply_subtracts_scroll() {
        let camera = CameraScroll {
            scroll: Vec2::new(10.0, 4.0),
            ..default()
        };
        assert_eq!(camera.apply(Vec2::new(30.0, 20.0)), Vec2::new(20.0, 16.0));
    }
}
