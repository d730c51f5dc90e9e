// ============================================
// Octree Module - Разреженное октодерево для GPU
// ============================================
//
// Плотный куб -> плоский массив узлов + данные листьев.
// Массив узлов загружается в GPU как есть (GpuOctreeNode),
// после построения дерево не меняется.

mod builder;
mod error;
mod iter;
mod node;
mod parallel;

pub use error::BuildError;
pub use iter::{Region, RegionContent, RegionIter};
pub use node::{GpuOctreeNode, NodeData, OctreeNode, ROOT_INDEX};

use crate::config::OctreeConfig;
use crate::volume::DenseVolume;
use builder::{Sampler, SubtreeBuilder};

/// Статистика построенного дерева
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub node_count: usize,
    pub uniform_nodes: usize,
    pub leaf_nodes: usize,
    pub branch_nodes: usize,
    pub leaf_bytes: usize,
    /// Узлы + данные листьев в байтах
    pub upload_bytes: usize,
}

/// Октодерево: узлы (0 = корень) и данные листьев
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Octree {
    world_width: u32,
    max_depth: u32,
    nodes: Vec<OctreeNode>,
    leaf_data: Vec<u8>,
}

/// Проверить предусловия, вернуть сторону куба
pub fn validate(volume: &DenseVolume, max_depth: u32) -> Result<u32, BuildError> {
    let [x, y, z] = volume.dims();
    if x == 0 || y == 0 || z == 0 {
        return Err(BuildError::EmptyVolume);
    }
    if !volume.is_cube() {
        return Err(BuildError::DimensionMismatch { x, y, z });
    }

    let width = x;
    if (width as u64).pow(3) > u32::MAX as u64 {
        return Err(BuildError::VolumeTooLarge { width });
    }
    if max_depth > 0 {
        let divisor = 1u64.checked_shl(max_depth.saturating_add(1)).unwrap_or(0);
        if divisor == 0 || width as u64 % divisor != 0 {
            return Err(BuildError::DepthWidthMismatch { width, max_depth });
        }
    }

    Ok(width)
}

impl Octree {
    /// Построить дерево из кубического объёма
    pub fn build(volume: &DenseVolume, config: &OctreeConfig) -> Result<Self, BuildError> {
        let world_width = validate(volume, config.max_depth)?;
        let sampler = Sampler::new(volume.as_bytes(), world_width);

        let fragment = if config.parallel && config.parallel_depth > 0 {
            parallel::build_parallel(sampler, config.max_depth, config.parallel_depth)
        } else {
            SubtreeBuilder::new(sampler, config.max_depth).build(0, [0, 0, 0])
        };

        let octree = Self {
            world_width,
            max_depth: config.max_depth,
            nodes: fragment.nodes,
            leaf_data: fragment.leaf_data,
        };

        let stats = octree.stats();
        log::debug!(
            "Octree built: width {}, depth {}, {} nodes ({} uniform, {} leaves, {} branches), {} leaf bytes",
            world_width,
            config.max_depth,
            stats.node_count,
            stats.uniform_nodes,
            stats.leaf_nodes,
            stats.branch_nodes,
            stats.leaf_bytes,
        );

        Ok(octree)
    }

    /// Как build, но при ошибке возвращает один однородный корень и саму ошибку
    pub fn build_or_degenerate(volume: &DenseVolume, config: &OctreeConfig) -> (Self, Option<BuildError>) {
        match Self::build(volume, config) {
            Ok(octree) => (octree, None),
            Err(e) => {
                log::warn!("{}, using a single solid root", e);
                (Self::degenerate(volume.dims()[0], config.max_depth), Some(e))
            }
        }
    }

    /// Один корень цвета 0
    pub fn degenerate(world_width: u32, max_depth: u32) -> Self {
        Self {
            world_width,
            max_depth,
            nodes: vec![OctreeNode::uniform(ROOT_INDEX, 0)],
            leaf_data: Vec::new(),
        }
    }

    #[inline]
    pub fn world_width(&self) -> u32 {
        self.world_width
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Сторона листа на максимальной глубине
    #[inline]
    pub fn chunk_width(&self) -> u32 {
        self.world_width.checked_shr(self.max_depth).unwrap_or(0)
    }

    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: u32) -> Option<&OctreeNode> {
        self.nodes.get(index as usize)
    }

    #[inline]
    pub fn leaf_data(&self) -> &[u8] {
        &self.leaf_data
    }

    /// Байты листа для области (None для однородной)
    pub fn leaf_bytes(&self, region: &Region) -> Option<&[u8]> {
        match region.content {
            RegionContent::Leaf { offset } => {
                let w = region.width as usize;
                let start = offset as usize;
                self.leaf_data.get(start..start + w * w * w)
            }
            RegionContent::Uniform(_) => None,
        }
    }

    /// Индекс палитры в ячейке - спуск от корня
    pub fn voxel_at(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        if x >= self.world_width || y >= self.world_width || z >= self.world_width {
            return None;
        }

        let mut node = self.nodes.first()?;
        let mut origin = [0u32; 3];
        let mut width = self.world_width;

        loop {
            match node.data {
                NodeData::Uniform(value) => return Some(value),
                NodeData::LeafData(offset) => {
                    let w = width as usize;
                    let lx = (x - origin[0]) as usize;
                    let ly = (y - origin[1]) as usize;
                    let lz = (z - origin[2]) as usize;
                    return self
                        .leaf_data
                        .get(offset as usize + lx + ly * w + lz * w * w)
                        .copied();
                }
                NodeData::Children(children) => {
                    let half = width / 2;
                    let hx = (x >= origin[0] + half) as u32;
                    let hy = (y >= origin[1] + half) as u32;
                    let hz = (z >= origin[2] + half) as u32;
                    origin = [origin[0] + hx * half, origin[1] + hy * half, origin[2] + hz * half];
                    width = half;
                    node = self.nodes.get(children[(hx | (hy << 1) | (hz << 2)) as usize] as usize)?;
                }
            }
        }
    }

    /// Конечные области в порядке обхода
    pub fn regions(&self) -> RegionIter<'_> {
        RegionIter::new(self)
    }

    /// Записи узлов для storage buffer
    pub fn gpu_nodes(&self) -> Vec<GpuOctreeNode> {
        self.nodes.iter().map(OctreeNode::to_gpu).collect()
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            node_count: self.nodes.len(),
            leaf_bytes: self.leaf_data.len(),
            upload_bytes: self.nodes.len() * std::mem::size_of::<GpuOctreeNode>() + self.leaf_data.len(),
            ..Default::default()
        };
        for node in &self.nodes {
            match node.data {
                NodeData::Uniform(_) => stats.uniform_nodes += 1,
                NodeData::LeafData(_) => stats.leaf_nodes += 1,
                NodeData::Children(_) => stats.branch_nodes += 1,
            }
        }
        stats
    }
}
