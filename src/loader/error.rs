// ============================================
// Load Error - Ошибки декодирования
// ============================================

use std::fmt;

/// Ошибки загрузки воксельного файла
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// Неизвестный magic (не XRAW)
    UnsupportedFormat,
    /// Поддерживается только палитра из 256 цветов
    InvalidPaletteSize(u32),
    /// Файл короче, чем объявлено в заголовке
    TruncatedFile { expected: u64, actual: u64 },
    /// Объявленный размер данных не помещается в u64
    PayloadOverflow { size: [u32; 3] },
    /// Ширина не кратна байту или не поддерживается
    UnsupportedBitWidth { field: &'static str, bits: u8 },
    /// 16/32-битный индекс не помещается в палитру
    PaletteIndexOverflow { value: u32 },
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "could not read voxel file: {}", e),
            LoadError::UnsupportedFormat => write!(f, "unsupported file type"),
            LoadError::InvalidPaletteSize(n) => {
                write!(f, "number of palette colors must be 256, got {}", n)
            }
            LoadError::TruncatedFile { expected, actual } => {
                write!(f, "file too small: need {} bytes, have {}", expected, actual)
            }
            LoadError::PayloadOverflow { size } => write!(
                f,
                "declared volume {}x{}x{} exceeds the addressable file size",
                size[0], size[1], size[2]
            ),
            LoadError::UnsupportedBitWidth { field, bits } => {
                write!(f, "unsupported {}: {} bits", field, bits)
            }
            LoadError::PaletteIndexOverflow { value } => {
                write!(f, "voxel index {} does not fit a 256-color palette", value)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}
