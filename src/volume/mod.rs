// ============================================
// Volume Module - Плотный объём и палитра
// ============================================
// Общие типы между загрузчиком и построителем октодерева

mod dense;
mod demo;
mod palette;

pub use demo::{DEMO_CENTER, DEMO_RADIUS, DEMO_WIDTH};
pub use dense::DenseVolume;
pub use palette::{Palette, Rgb, PALETTE_SIZE};
