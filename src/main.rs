// ============================================
// voxel-octree - Загрузка XRAW и построение дерева
// ============================================
// Использование: voxel-octree [file.xraw] [config.json]
// Без файла строится демо-сцена (шар из трёх цветов).

use std::process::ExitCode;

use voxel_octree::{load_voxel_file, DenseVolume, Octree, Palette, PipelineConfig};

/// Seed демо-сцены
const DEMO_SEED: u32 = 0;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args.next();

    let config = match args.next() {
        Some(config_path) => match PipelineConfig::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", config_path, e);
                return ExitCode::FAILURE;
            }
        },
        None => PipelineConfig::default(),
    };

    let (source, volume, palette) = match path {
        Some(path) => match load_voxel_file(&path, &config.loader) {
            Ok(loaded) => (path, loaded.volume, loaded.palette),
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => (
            "demo scene".to_string(),
            DenseVolume::demo(DEMO_SEED),
            Palette::primaries(),
        ),
    };
    let [x, y, z] = volume.dims();
    log::info!("Loaded {} ({}x{}x{}, axis {:?})", source, x, y, z, config.loader.axis);
    log::debug!("Palette: {} bytes", palette.as_bytes().len());

    // При несовпадении глубины и ширины остаётся один сплошной корень
    let (octree, error) = Octree::build_or_degenerate(&volume, &config.octree);
    if let Some(e) = error {
        log::error!("{}: {}", source, e);
    }

    let stats = octree.stats();
    log::info!(
        "Octree: {} nodes ({} uniform, {} leaves, {} branches), chunk width {}",
        stats.node_count,
        stats.uniform_nodes,
        stats.leaf_nodes,
        stats.branch_nodes,
        octree.chunk_width(),
    );
    // leaf bytes, nodes : upload bytes
    println!("{}, {} : {}", stats.leaf_bytes, stats.node_count, stats.upload_bytes);

    ExitCode::SUCCESS
}
