// ============================================
// Region Iterator - Обход конечных областей
// ============================================

use super::node::NodeData;
use super::Octree;

/// Содержимое конечной области
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionContent {
    /// Вся область одного цвета
    Uniform(u8),
    /// width^3 байт в данных листьев начиная с offset
    Leaf { offset: u32 },
}

/// Конечная область дерева (узел без детей)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub node: u32,
    pub origin: [u32; 3],
    pub width: u32,
    pub depth: u32,
    pub content: RegionContent,
}

/// Итератор по конечным областям (stack-based), в порядке октантов
pub struct RegionIter<'a> {
    octree: &'a Octree,
    /// Стек: (node_idx, origin, width, depth)
    stack: Vec<(u32, [u32; 3], u32, u32)>,
}

impl<'a> RegionIter<'a> {
    pub(super) fn new(octree: &'a Octree) -> Self {
        let mut stack = Vec::with_capacity(32);
        if !octree.nodes().is_empty() {
            stack.push((0, [0, 0, 0], octree.world_width(), 0));
        }
        Self { octree, stack }
    }
}

impl<'a> Iterator for RegionIter<'a> {
    type Item = Region;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node_idx, origin, width, depth)) = self.stack.pop() {
            let node = &self.octree.nodes()[node_idx as usize];
            let content = match node.data {
                NodeData::Uniform(value) => RegionContent::Uniform(value),
                NodeData::LeafData(offset) => RegionContent::Leaf { offset },
                NodeData::Children(children) => {
                    let half = width / 2;
                    // В обратном порядке, чтобы октант 0 вышел первым
                    for octant in (0..8u32).rev() {
                        let child_origin = [
                            origin[0] + (octant & 1) * half,
                            origin[1] + ((octant >> 1) & 1) * half,
                            origin[2] + ((octant >> 2) & 1) * half,
                        ];
                        self.stack
                            .push((children[octant as usize], child_origin, half, depth + 1));
                    }
                    continue;
                }
            };
            return Some(Region {
                node: node_idx,
                origin,
                width,
                depth,
                content,
            });
        }
        None
    }
}
