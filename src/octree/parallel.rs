// ============================================
// Parallel Build - Поддеревья на пуле Rayon
// ============================================
//
// Верхние уровни строятся параллельно в отдельные фрагменты,
// затем склеиваются в порядке октантов. Результат совпадает
// с последовательным построением байт в байт:
//   [корень][8 корней детей][потомки ребёнка 0]...[потомки ребёнка 7]

use rayon::prelude::*;

use super::builder::{child_origin, Fragment, Sampler, SubtreeBuilder};
use super::node::{NodeData, OctreeNode, ROOT_INDEX};

/// Построить всё дерево, деля первые parallel_depth уровней между потоками
pub(crate) fn build_parallel(sampler: Sampler<'_>, max_depth: u32, parallel_depth: u32) -> Fragment {
    build_fragment(sampler, max_depth, parallel_depth, 0, [0, 0, 0])
}

fn build_fragment(
    sampler: Sampler<'_>,
    max_depth: u32,
    parallel_depth: u32,
    depth: u32,
    origin: [usize; 3],
) -> Fragment {
    if depth >= parallel_depth || depth >= max_depth {
        return SubtreeBuilder::new(sampler, max_depth).build(depth, origin);
    }

    let width = sampler.width_at(depth);
    if let Some(value) = sampler.uniform_value(origin, width) {
        return Fragment {
            nodes: vec![OctreeNode::uniform(ROOT_INDEX, value)],
            leaf_data: Vec::new(),
        };
    }

    let half = width / 2;
    let children: Vec<Fragment> = (0..8usize)
        .into_par_iter()
        .map(|octant| {
            build_fragment(
                sampler,
                max_depth,
                parallel_depth,
                depth + 1,
                child_origin(origin, half, octant),
            )
        })
        .collect();

    splice(&children)
}

/// Перенумерация узлов одного дочернего фрагмента
struct Rebase {
    /// Куда попадает корень фрагмента
    root: u32,
    /// Куда попадает узел 1 фрагмента
    descendants: u32,
    /// Смещение данных листьев
    leaf: u32,
}

impl Rebase {
    #[inline]
    fn index(&self, local: u32) -> u32 {
        if local == ROOT_INDEX {
            self.root
        } else {
            self.descendants + local - 1
        }
    }

    fn apply(&self, node: &OctreeNode, is_root: bool) -> OctreeNode {
        let parent = if is_root { ROOT_INDEX } else { self.index(node.parent) };
        let data = match node.data {
            NodeData::Uniform(value) => NodeData::Uniform(value),
            NodeData::Children(children) => NodeData::Children(children.map(|c| self.index(c))),
            NodeData::LeafData(offset) => NodeData::LeafData(offset + self.leaf),
        };
        OctreeNode { parent, data }
    }
}

/// Склеить 8 дочерних фрагментов под новым смешанным корнем
fn splice(children: &[Fragment]) -> Fragment {
    let node_total = 1 + children.iter().map(|c| c.nodes.len()).sum::<usize>();
    let leaf_total = children.iter().map(|c| c.leaf_data.len()).sum::<usize>();

    let mut bases = Vec::with_capacity(children.len());
    let mut next_descendant = 1 + children.len() as u32;
    let mut next_leaf = 0u32;
    for (octant, child) in children.iter().enumerate() {
        bases.push(Rebase {
            root: 1 + octant as u32,
            descendants: next_descendant,
            leaf: next_leaf,
        });
        next_descendant += child.nodes.len() as u32 - 1;
        next_leaf += child.leaf_data.len() as u32;
    }

    let mut nodes = Vec::with_capacity(node_total);
    let mut leaf_data = Vec::with_capacity(leaf_total);

    let root_children: [u32; 8] = std::array::from_fn(|i| 1 + i as u32);
    nodes.push(OctreeNode {
        parent: ROOT_INDEX,
        data: NodeData::Children(root_children),
    });
    for (child, base) in children.iter().zip(&bases) {
        nodes.push(base.apply(&child.nodes[0], true));
    }
    for (child, base) in children.iter().zip(&bases) {
        nodes.extend(child.nodes[1..].iter().map(|n| base.apply(n, false)));
        leaf_data.extend_from_slice(&child.leaf_data);
    }

    Fragment { nodes, leaf_data }
}
