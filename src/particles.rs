//! Hit-explosion particles.

use crate::config::ParticleConfig;
use rand::random_range;

/// One shrinking dot. Velocity is fixed at spawn; size doubles as lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Palette index for the terminal's indexed colors.
    pub hue: u8,
}

/// Burst of particles centered on a point, flung in random directions.
pub fn create_explosion(x: f32, y: f32, count: usize, cfg: &ParticleConfig) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x,
            y,
            vx: random_range(-cfg.max_speed..cfg.max_speed),
            vy: random_range(-cfg.max_speed..cfg.max_speed),
            size: random_range(cfg.min_size..cfg.max_size),
            hue: random_range(0u8..=255),
        })
        .collect()
}

/// All live particles, advanced once per tick.
pub struct ParticleField {
    particles: Vec<Particle>,
    cfg: ParticleConfig,
}

impl ParticleField {
    pub fn new(cfg: ParticleConfig) -> Self {
        Self {
            particles: Vec::new(),
            cfg,
        }
    }

    /// Append one burst. When the cap is exceeded the oldest particles are
    /// evicted first, so fresh explosions always show.
    pub fn spawn_explosion(&mut self, x: f32, y: f32) {
        self.particles
            .extend(create_explosion(x, y, self.cfg.burst_size, &self.cfg));
        let over = self.particles.len().saturating_sub(self.cfg.max_active);
        if over > 0 {
            self.particles.drain(..over);
        }
    }

    /// Move every particle by its velocity, shrink it, and drop the ones
    /// that ran out of size.
    pub fn advance(&mut self) {
        let shrink = self.cfg.shrink_per_tick;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.size -= shrink;
        }
        self.particles.retain(|p| p.size > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ParticleField {
        ParticleField::new(ParticleConfig::default())
    }

    #[test]
    fn explosion_spawns_the_configured_count() {
        let mut f = field();
        f.spawn_explosion(400.0, 300.0);
        assert_eq!(f.len(), 30);
    }

    #[test]
    fn particles_start_at_the_burst_point_with_bounded_velocity() {
        let cfg = ParticleConfig::default();
        for p in create_explosion(100.0, 200.0, 50, &cfg) {
            assert_eq!((p.x, p.y), (100.0, 200.0));
            assert!(p.vx.abs() <= cfg.max_speed);
            assert!(p.vy.abs() <= cfg.max_speed);
            assert!(p.size >= cfg.min_size && p.size <= cfg.max_size);
        }
    }

    #[test]
    fn advance_shrinks_every_particle() {
        let mut f = field();
        f.spawn_explosion(0.0, 0.0);
        let before: Vec<f32> = f.iter().map(|p| p.size).collect();
        f.advance();
        for (p, old) in f.iter().zip(before) {
            assert!((old - p.size - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn particles_die_when_size_reaches_zero() {
        // min size 4.0, shrink 0.1 -> everything is gone within 80 ticks
        let mut f = field();
        f.spawn_explosion(0.0, 0.0);
        for _ in 0..80 {
            f.advance();
        }
        assert!(f.is_empty());
    }

    #[test]
    fn cap_evicts_the_oldest_burst() {
        let mut f = field();
        for _ in 0..25 {
            f.spawn_explosion(0.0, 0.0);
        }
        assert_eq!(f.len(), 600);
    }

    #[test]
    fn advance_moves_by_velocity() {
        let cfg = ParticleConfig::default();
        let mut f = ParticleField::new(cfg);
        f.spawn_explosion(10.0, 20.0);
        let vels: Vec<(f32, f32)> = f.iter().map(|p| (p.vx, p.vy)).collect();
        f.advance();
        for (p, (vx, vy)) in f.iter().zip(vels) {
            assert_eq!(p.x, 10.0 + vx);
            assert_eq!(p.y, 20.0 + vy);
        }
    }
}
