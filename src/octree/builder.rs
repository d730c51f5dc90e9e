// ============================================
// Octree Builder - Рекурсивное разбиение объёма
// ============================================
//
// Для каждой ячейки:
// 1. Один цвет во всей области -> Uniform, дальше не идём
// 2. Смешанная на максимальной глубине -> байты области в данные листьев
// 3. Иначе 8 детей подряд в массиве узлов, рекурсия в порядке октантов 0..7
//
// Октант: бит 0 = X, бит 1 = Y, бит 2 = Z (1 = верхняя половина).

use super::node::{NodeData, OctreeNode, ROOT_INDEX};

/// Доступ на чтение к кубу вокселей
#[derive(Clone, Copy)]
pub(crate) struct Sampler<'a> {
    voxels: &'a [u8],
    world_width: usize,
}

impl<'a> Sampler<'a> {
    pub fn new(voxels: &'a [u8], world_width: u32) -> Self {
        Self {
            voxels,
            world_width: world_width as usize,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.world_width + z * self.world_width * self.world_width
    }

    /// Сторона ячейки на глубине depth
    #[inline]
    pub fn width_at(&self, depth: u32) -> usize {
        self.world_width >> depth
    }

    /// Индекс палитры, если вся область одного цвета
    pub fn uniform_value(&self, origin: [usize; 3], width: usize) -> Option<u8> {
        let [ox, oy, oz] = origin;
        let first = self.voxels[self.index(ox, oy, oz)];
        for z in oz..oz + width {
            for y in oy..oy + width {
                let row = self.index(ox, y, z);
                if self.voxels[row..row + width].iter().any(|&v| v != first) {
                    return None;
                }
            }
        }
        Some(first)
    }

    /// Дописать область в out: x быстрее всех, затем y, затем z
    pub fn copy_region(&self, origin: [usize; 3], width: usize, out: &mut Vec<u8>) {
        let [ox, oy, oz] = origin;
        out.reserve(width * width * width);
        for z in oz..oz + width {
            for y in oy..oy + width {
                let row = self.index(ox, y, z);
                out.extend_from_slice(&self.voxels[row..row + width]);
            }
        }
    }
}

/// Начало дочерней ячейки
#[inline]
pub(crate) fn child_origin(origin: [usize; 3], half: usize, octant: usize) -> [usize; 3] {
    [
        origin[0] + (octant & 1) * half,
        origin[1] + ((octant >> 1) & 1) * half,
        origin[2] + ((octant >> 2) & 1) * half,
    ]
}

/// Поддерево с локальной нумерацией: узел 0 = корень поддерева
#[derive(Debug, Default)]
pub(crate) struct Fragment {
    pub nodes: Vec<OctreeNode>,
    pub leaf_data: Vec<u8>,
}

/// Последовательный построитель (арена + данные листьев)
pub(crate) struct SubtreeBuilder<'a> {
    sampler: Sampler<'a>,
    max_depth: u32,
    nodes: Vec<OctreeNode>,
    leaf_data: Vec<u8>,
}

impl<'a> SubtreeBuilder<'a> {
    pub fn new(sampler: Sampler<'a>, max_depth: u32) -> Self {
        Self {
            sampler,
            max_depth,
            nodes: Vec::with_capacity(64),
            leaf_data: Vec::new(),
        }
    }

    /// Построить поддерево, корень которого лежит на глубине depth
    pub fn build(mut self, depth: u32, origin: [usize; 3]) -> Fragment {
        self.nodes.push(OctreeNode::uniform(ROOT_INDEX, 0));
        self.build_node(ROOT_INDEX, depth, origin);
        Fragment {
            nodes: self.nodes,
            leaf_data: self.leaf_data,
        }
    }

    fn build_node(&mut self, node_index: u32, depth: u32, origin: [usize; 3]) {
        let width = self.sampler.width_at(depth);

        if let Some(value) = self.sampler.uniform_value(origin, width) {
            self.nodes[node_index as usize].data = NodeData::Uniform(value);
            return;
        }

        if depth >= self.max_depth {
            let offset = self.leaf_data.len() as u32;
            self.sampler.copy_region(origin, width, &mut self.leaf_data);
            self.nodes[node_index as usize].data = NodeData::LeafData(offset);
            return;
        }

        // Дети идут подряд: first, first+1, ..., first+7
        let first = self.nodes.len() as u32;
        let children: [u32; 8] = std::array::from_fn(|i| first + i as u32);
        self.nodes
            .extend(std::iter::repeat(OctreeNode::uniform(node_index, 0)).take(8));
        self.nodes[node_index as usize].data = NodeData::Children(children);

        let half = width / 2;
        for (octant, &child) in children.iter().enumerate() {
            self.build_node(child, depth + 1, child_origin(origin, half, octant));
        }
    }
}
