// Array-of-Structs vs Struct-of-Arrays
//
// Both layouts hold the same particles; the measured pass reads only the
// position fields, so the AoS layout drags the unused velocity fields
// through the cache while SoA streams three dense columns.

// ============================================================================
// Full particles: position + velocity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

/// Particle `i` is `{i, i+1, i+2, i+3, i+4, i+5}`.
pub fn particles_aos(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let i = i as i32;
            Particle {
                x: i,
                y: i + 1,
                z: i + 2,
                dx: i + 3,
                dy: i + 4,
                dz: i + 5,
            }
        })
        .collect()
}

pub struct ParticlesSoA {
    pub x: Vec<i32>,
    pub y: Vec<i32>,
    pub z: Vec<i32>,
    pub dx: Vec<i32>,
    pub dy: Vec<i32>,
    pub dz: Vec<i32>,
}

impl ParticlesSoA {
    /// Same values as [`particles_aos`], one column per field.
    pub fn new(n: usize) -> Self {
        let column = |offset: i32| (0..n).map(|i| i as i32 + offset).collect::<Vec<_>>();
        ParticlesSoA {
            x: column(0),
            y: column(1),
            z: column(2),
            dx: column(3),
            dy: column(4),
            dz: column(5),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub fn sum_positions_aos(particles: &[Particle]) -> i64 {
    particles
        .iter()
        .map(|p| i64::from(p.x) + i64::from(p.y) + i64::from(p.z))
        .sum()
}

pub fn sum_positions_soa(particles: &ParticlesSoA) -> i64 {
    sum_columns(&particles.x, &particles.y, &particles.z)
}

// ============================================================================
// Compact particles: position only
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactParticle {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

pub fn compact_particles_aos(n: usize) -> Vec<CompactParticle> {
    (0..n)
        .map(|i| {
            let i = i as i32;
            CompactParticle {
                x: i,
                y: i + 1,
                z: i + 2,
            }
        })
        .collect()
}

pub struct CompactParticlesSoA {
    pub x: Vec<i32>,
    pub y: Vec<i32>,
    pub z: Vec<i32>,
}

impl CompactParticlesSoA {
    pub fn new(n: usize) -> Self {
        let column = |offset: i32| (0..n).map(|i| i as i32 + offset).collect::<Vec<_>>();
        CompactParticlesSoA {
            x: column(0),
            y: column(1),
            z: column(2),
        }
    }
}

pub fn sum_compact_aos(particles: &[CompactParticle]) -> i64 {
    particles
        .iter()
        .map(|p| i64::from(p.x) + i64::from(p.y) + i64::from(p.z))
        .sum()
}

pub fn sum_compact_soa(particles: &CompactParticlesSoA) -> i64 {
    sum_columns(&particles.x, &particles.y, &particles.z)
}

fn sum_columns(x: &[i32], y: &[i32], z: &[i32]) -> i64 {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| i64::from(x) + i64::from(y) + i64::from(z))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    // sum over i of (3i + 3) = 3 * n(n-1)/2 + 3n
    fn expected(n: i64) -> i64 {
        3 * n * (n - 1) / 2 + 3 * n
    }

    #[test]
    fn test_layouts_hold_same_values() {
        let aos = particles_aos(4);
        let soa = ParticlesSoA::new(4);
        assert_eq!(soa.len(), 4);
        for (i, p) in aos.iter().enumerate() {
            assert_eq!(p.x, soa.x[i]);
            assert_eq!(p.dz, soa.dz[i]);
        }
        assert_eq!(aos[2], Particle { x: 2, y: 3, z: 4, dx: 5, dy: 6, dz: 7 });
    }

    #[test]
    fn test_position_sums_agree() {
        let n = 1_000;
        assert_eq!(sum_positions_aos(&particles_aos(n)), expected(n as i64));
        assert_eq!(sum_positions_soa(&ParticlesSoA::new(n)), expected(n as i64));
    }

    #[test]
    fn test_compact_sums_agree() {
        let n = 777;
        assert_eq!(sum_compact_aos(&compact_particles_aos(n)), expected(n as i64));
        assert_eq!(sum_compact_soa(&CompactParticlesSoA::new(n)), expected(n as i64));
    }

    #[test]
    fn test_empty() {
        assert!(ParticlesSoA::new(0).is_empty());
        assert_eq!(sum_positions_aos(&[]), 0);
    }
}
