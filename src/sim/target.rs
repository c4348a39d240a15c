//! The moving target
//!
//! A square target bouncing up and down a fixed column. Position is its center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{FieldConfig, LevelParams};

/// Vertical travel direction (screen coordinates: Down means +y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    /// Fixed horizontal column
    pub x: f32,
    /// Vertical center, always within [min_y, max_y]
    pub position: f32,
    pub direction: Direction,
    /// Pixels per motion tick
    pub speed: f32,
    /// Edge length
    pub size: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl TargetState {
    pub fn new(field: &FieldConfig, params: &LevelParams) -> Self {
        Self {
            x: field.target_x,
            position: field.start_y(),
            direction: Direction::Down,
            speed: params.speed,
            size: params.size,
            min_y: field.target_min_y,
            max_y: field.target_max_y,
        }
    }

    /// Advance one motion tick, flipping direction on a bound
    pub fn step(&mut self) {
        match self.direction {
            Direction::Down => {
                self.position += self.speed;
                if self.position >= self.max_y {
                    self.position = self.max_y;
                    self.direction = Direction::Up;
                }
            }
            Direction::Up => {
                self.position -= self.speed;
                if self.position <= self.min_y {
                    self.position = self.min_y;
                    self.direction = Direction::Down;
                }
            }
        }
    }

    /// Take on a new level's speed and size (applies from the next tick)
    pub fn apply_level(&mut self, params: &LevelParams) {
        self.speed = params.speed;
        self.size = params.size;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.position)
    }

    /// Axis-aligned bounds as (min corner, max corner)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::splat(self.size / 2.0);
        let c = self.center();
        (c - half, c + half)
    }

    /// Inclusive point-in-box test
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        point.cmpge(min).all() && point.cmple(max).all()
    }
}
