// ============================================
// Loader Module - Загрузка воксельных файлов
// ============================================
// Формат XRAW: заголовок, индексы вокселей, палитра 256 цветов

mod channel;
mod error;
mod header;
mod voxel_file;

pub use channel::decode_channel;
pub use error::LoadError;
pub use header::{ChannelType, XrawHeader, HEADER_SIZE, MAGIC, PALETTE_COLORS};
pub use voxel_file::{load_voxel_file, parse_voxel_file, LoadedVoxels};
