// ============================================
// Build Error - Ошибки построения октодерева
// ============================================

use std::fmt;

/// Нарушенные предусловия построения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Сторона объёма равна 0
    EmptyVolume,
    /// Объём не куб
    DimensionMismatch { x: u32, y: u32, z: u32 },
    /// Ширина не делится на 2^(max_depth + 1)
    DepthWidthMismatch { width: u32, max_depth: u32 },
    /// Смещения в данных листьев не помещаются в u32
    VolumeTooLarge { width: u32 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyVolume => write!(f, "volume is empty"),
            BuildError::DimensionMismatch { x, y, z } => {
                write!(f, "volume must be a cube, got {}x{}x{}", x, y, z)
            }
            BuildError::DepthWidthMismatch { width, max_depth } => write!(
                f,
                "world width {} is not divisible by 2^(maxDepth + 1) for maxDepth {}",
                width, max_depth
            ),
            BuildError::VolumeTooLarge { width } => {
                write!(f, "volume of width {} is too large for 32-bit offsets", width)
            }
        }
    }
}

impl std::error::Error for BuildError {}
