use glam::Vec2;
use neo_engine::Controls;

use crate::config::ShipConfig;

/// The player's ship. Starts docked at the Earth anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// World position in pixels.
    pub pos: Vec2,
    /// Heading in degrees, 0 = up (-Y), increasing clockwise on screen.
    pub heading_deg: f32,
    /// Signed speed in pixels per frame, in [-max_speed / 2, max_speed].
    pub speed: f32,
    anchor: Vec2,
    docked: bool,
}

impl Ship {
    pub fn docked_at(anchor: Vec2) -> Self {
        Self {
            pos: anchor,
            heading_deg: 0.0,
            speed: 0.0,
            anchor,
            docked: true,
        }
    }

    pub fn is_docked(&self) -> bool {
        self.docked
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn heading_rad(&self) -> f32 {
        self.heading_deg.to_radians()
    }

    /// Advance one frame from the current control state.
    pub fn step(&mut self, controls: Controls, config: &ShipConfig) {
        // Both rotation keys held cancel out.
        if controls.left {
            self.heading_deg += config.rotation_speed_deg;
        }
        if controls.right {
            self.heading_deg -= config.rotation_speed_deg;
        }
        self.heading_deg = self.heading_deg.rem_euclid(360.0);

        // Forward thrust wins when both are held. Reverse tops out at half speed.
        if controls.up {
            self.speed = (self.speed + config.acceleration).min(config.max_speed);
        } else if controls.down {
            self.speed = (self.speed - config.acceleration).max(-config.max_speed / 2.0);
        } else if self.speed > 0.0 {
            self.speed = (self.speed - config.deceleration).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + config.deceleration).min(0.0);
        }

        // Undocking is permanent.
        if controls.up || controls.down {
            self.docked = false;
        }

        if self.docked {
            self.pos = self.anchor;
            return;
        }

        let heading = self.heading_rad();
        self.pos.x += heading.sin() * self.speed;
        self.pos.y -= heading.cos() * self.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> Controls {
        Controls { left, right, up, down }
    }

    const IDLE: Controls = Controls { left: false, right: false, up: false, down: false };

    #[test]
    fn forward_speed_clamps_at_max() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        for frame in 1..=30 {
            ship.step(held(true, false, false, false), &config);
            assert!(ship.speed <= config.max_speed, "frame {frame}: {}", ship.speed);
            if frame == 25 {
                assert!((ship.speed - 5.0).abs() < 1e-4);
            }
        }
        assert_eq!(ship.speed, 5.0);
    }

    #[test]
    fn reverse_is_half_strength() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        for _ in 0..40 {
            ship.step(held(false, true, false, false), &config);
        }
        assert_eq!(ship.speed, -2.5);
    }

    #[test]
    fn idle_speed_decays_without_overshoot() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        ship.speed = 0.25;
        ship.docked = false;
        for _ in 0..3 {
            ship.step(IDLE, &config);
        }
        assert_eq!(ship.speed, 0.0);

        ship.speed = -0.15;
        ship.step(IDLE, &config);
        ship.step(IDLE, &config);
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn docked_ship_stays_on_anchor_while_turning() {
        let config = ShipConfig::default();
        let anchor = Vec2::new(12.0, -7.0);
        let mut ship = Ship::docked_at(anchor);
        ship.speed = 3.0;
        for _ in 0..10 {
            ship.step(held(false, false, true, false), &config);
            assert_eq!(ship.pos, anchor);
            assert!(ship.is_docked());
        }
        assert!((ship.heading_deg - 30.0).abs() < 1e-4);
        // Speed kept decaying underneath.
        assert!((ship.speed - 2.0).abs() < 1e-4);
    }

    #[test]
    fn undocking_is_one_way() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        ship.step(held(false, true, false, false), &config);
        assert!(!ship.is_docked());

        let sequences = [IDLE, held(true, true, true, true), held(false, false, false, true)];
        for controls in sequences.iter().cycle().take(60) {
            ship.step(*controls, &config);
            assert!(!ship.is_docked());
        }
    }

    #[test]
    fn heading_zero_moves_up_the_screen() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        ship.step(held(true, false, false, false), &config);
        assert!((ship.pos.y + 0.2).abs() < 1e-6);
        assert!(ship.pos.x.abs() < 1e-6);
    }

    #[test]
    fn heading_wraps() {
        let config = ShipConfig::default();
        let mut ship = Ship::docked_at(Vec2::ZERO);
        ship.step(held(false, false, false, true), &config);
        assert!((ship.heading_deg - 357.0).abs() < 1e-4);
        for _ in 0..200 {
            ship.step(held(false, false, false, true), &config);
            assert!((0.0..360.0).contains(&ship.heading_deg));
        }
    }
}
