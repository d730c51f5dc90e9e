// ============================================
// Octree Node - Узел в плоском массиве
// ============================================
//
// Все узлы хранятся в непрерывном Vec, ссылки через u32 индексы.
// Индекс 0 = корень, поэтому 0 в массиве детей значит "нет ребёнка".

use bytemuck::{Pod, Zeroable};

/// Индекс корня
pub const ROOT_INDEX: u32 = 0;

/// Данные узла
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeData {
    /// Вся область одного цвета (индекс палитры)
    Uniform(u8),
    /// Смешанный узел выше максимальной глубины - 8 детей
    Children([u32; 8]),
    /// Смешанный узел на максимальной глубине - смещение в данных листьев
    LeafData(u32),
}

/// Узел октодерева
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OctreeNode {
    /// Индекс родителя (у корня 0)
    pub parent: u32,
    pub data: NodeData,
}

impl OctreeNode {
    #[inline]
    pub fn uniform(parent: u32, index: u8) -> Self {
        Self {
            parent,
            data: NodeData::Uniform(index),
        }
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self.data, NodeData::Uniform(_))
    }

    #[inline]
    pub fn children(&self) -> Option<&[u32; 8]> {
        match &self.data {
            NodeData::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Запись для GPU
    pub fn to_gpu(&self) -> GpuOctreeNode {
        let (children_indices, is_solid_color, data_index) = match self.data {
            NodeData::Uniform(index) => ([0; 8], 1, index as u32),
            NodeData::Children(children) => (children, 0, 0),
            NodeData::LeafData(offset) => ([0; 8], 0, offset),
        };
        GpuOctreeNode {
            parent_index: self.parent,
            children_indices,
            is_solid_color,
            data_index,
        }
    }
}

/// Узел для загрузки в storage buffer (44 байта)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuOctreeNode {
    pub parent_index: u32,
    pub children_indices: [u32; 8],
    /// 1 если узел одного цвета
    pub is_solid_color: u32,
    /// Индекс палитры (solid) или смещение в данных листьев
    pub data_index: u32,
}
