// ============================================
// Voxel Octree - Разреженное октодерево из XRAW
// ============================================
// XRAW файл -> (DenseVolume, Palette) -> Octree (узлы + данные листьев)
//
// Два независимых этапа:
// - loader: чтение и проверка файла, перестановка осей, палитра
// - octree: рекурсивное разбиение куба в плоский массив узлов

pub mod config;
pub mod loader;
pub mod octree;
pub mod volume;

pub use config::{ChannelNormalization, LoaderConfig, OctreeConfig, PipelineConfig, VoxelAxis};
pub use loader::{load_voxel_file, parse_voxel_file, LoadError, LoadedVoxels};
pub use octree::{BuildError, GpuOctreeNode, NodeData, Octree, OctreeNode, OctreeStats};
pub use volume::{DenseVolume, Palette};
