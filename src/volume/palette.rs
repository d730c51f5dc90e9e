// ============================================
// Palette - 256 цветов RGB
// ============================================
// Индексируется теми же значениями, что лежат в объёме

/// Количество цветов в палитре
pub const PALETTE_SIZE: usize = 256;

/// Цвет в диапазоне [0, 1]
pub type Rgb = [f32; 3];

/// Палитра фиксированного размера
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Чёрная палитра
    pub fn new() -> Self {
        Self {
            colors: [[0.0; 3]; PALETTE_SIZE],
        }
    }

    pub fn from_colors(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    #[inline]
    pub fn set_color(&mut self, index: u8, color: Rgb) {
        self.colors[index as usize] = color;
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// 768 float подряд (r, g, b, r, g, b, ...)
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Байты для загрузки в GPU
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
