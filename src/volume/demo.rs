// ============================================
// Demo Scene - Сцена по умолчанию без файла
// ============================================
// Шар радиуса 20 с центром (50, 50, 50) в кубе 256^3 на нулевом фоне.
// Внутри шара индексы 1..=3, выбранные хешем координат и seed.

use super::{DenseVolume, Palette};

/// Сторона демо-куба
pub const DEMO_WIDTH: u32 = 256;
/// Центр шара
pub const DEMO_CENTER: [u32; 3] = [50, 50, 50];
/// Радиус шара
pub const DEMO_RADIUS: u32 = 20;

/// Хеш координат вокселя
fn voxel_hash(x: u32, y: u32, z: u32, seed: u32) -> u32 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(z.wrapping_mul(2246822519))
        .wrapping_add(seed.wrapping_mul(3266489917));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n ^ (n >> 16)
}

impl DenseVolume {
    /// Куб со стороной width: шар (включая границу) из индексов 1..=3, снаружи 0
    pub fn sphere(width: u32, center: [u32; 3], radius: u32, seed: u32) -> Self {
        let [cx, cy, cz] = center.map(i64::from);
        let r2 = i64::from(radius) * i64::from(radius);
        Self::from_fn(width, |x, y, z| {
            let dx = i64::from(x) - cx;
            let dy = i64::from(y) - cy;
            let dz = i64::from(z) - cz;
            if dx * dx + dy * dy + dz * dz <= r2 {
                1 + (voxel_hash(x, y, z, seed) % 3) as u8
            } else {
                0
            }
        })
    }

    /// Демо-сцена 256^3
    pub fn demo(seed: u32) -> Self {
        Self::sphere(DEMO_WIDTH, DEMO_CENTER, DEMO_RADIUS, seed)
    }
}

impl Palette {
    /// Индексы 1, 2, 3 = красный, зелёный, синий с яркостью 0.8
    pub fn primaries() -> Self {
        let mut palette = Self::new();
        palette.set_color(1, [0.8, 0.0, 0.0]);
        palette.set_color(2, [0.0, 0.8, 0.0]);
        palette.set_color(3, [0.0, 0.0, 0.8]);
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OctreeConfig;
    use crate::octree::Octree;

    #[test]
    fn test_sphere_bounds_and_indices() {
        let (width, center, radius) = (64, [32, 32, 32], 20u32);
        let volume = DenseVolume::sphere(width, center, radius, 7);

        let mut seen = [false; 4];
        for z in 0..width {
            for y in 0..width {
                for x in 0..width {
                    let d2 = [x, y, z]
                        .iter()
                        .zip(center)
                        .map(|(&p, c)| (p as i64 - c as i64).pow(2))
                        .sum::<i64>();
                    let v = volume.get(x, y, z).unwrap();
                    if d2 <= (radius * radius) as i64 {
                        assert!((1..=3).contains(&v), "({}, {}, {}) = {}", x, y, z, v);
                    } else {
                        assert_eq!(v, 0);
                    }
                    seen[v as usize] = true;
                }
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_sphere_is_deterministic() {
        let a = DenseVolume::sphere(32, [16, 16, 16], 10, 1);
        assert_eq!(a, DenseVolume::sphere(32, [16, 16, 16], 10, 1));
        assert_ne!(a, DenseVolume::sphere(32, [16, 16, 16], 10, 2));
    }

    #[test]
    fn test_sphere_builds_at_default_depth() {
        let volume = DenseVolume::sphere(64, [32, 32, 32], 20, 0);
        let octree = Octree::build(&volume, &OctreeConfig::default()).unwrap();
        assert_eq!(octree.max_depth(), 5);
        assert_eq!(octree.chunk_width(), 2);
        assert!(octree.nodes().len() > 1);
        for (x, y, z) in [(0, 0, 0), (32, 32, 32), (12, 32, 32), (63, 63, 63)] {
            assert_eq!(octree.voxel_at(x, y, z), volume.get(x, y, z));
        }
    }

    #[test]
    fn test_primaries_palette() {
        let palette = Palette::primaries();
        assert_eq!(palette.color(0), [0.0; 3]);
        assert_eq!(palette.color(1), [0.8, 0.0, 0.0]);
        assert_eq!(palette.color(2), [0.0, 0.8, 0.0]);
        assert_eq!(palette.color(3), [0.0, 0.0, 0.8]);
        assert_eq!(palette.color(4), [0.0; 3]);
    }
}
