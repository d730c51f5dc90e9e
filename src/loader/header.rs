// ============================================
// XRAW Header - Заголовок файла (24 байта)
// ============================================
// Все многобайтовые поля little-endian:
//   0..4   magic "XRAW"
//   4      тип данных канала (0 = uint, 1 = int, 3 = float)
//   5      число каналов цвета
//   6      бит на канал
//   7      бит на индекс
//   8..20  размеры x, y, z (u32)
//   20..24 число цветов палитры (u32)

use super::error::LoadError;

/// Магическое число "XRAW" в ASCII
pub const MAGIC: [u8; 4] = *b"XRAW";

/// Размер заголовка в байтах
pub const HEADER_SIZE: usize = 24;

/// Единственный поддерживаемый размер палитры
pub const PALETTE_COLORS: u32 = 256;

/// Тип данных канала цвета
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelType {
    Unsigned,
    Signed,
    Float,
    /// Неизвестный код, каналы читаются как 0.0
    Other(u8),
}

impl ChannelType {
    pub fn code(self) -> u8 {
        match self {
            ChannelType::Unsigned => 0,
            ChannelType::Signed => 1,
            ChannelType::Float => 3,
            ChannelType::Other(code) => code,
        }
    }
}

impl From<u8> for ChannelType {
    fn from(code: u8) -> Self {
        match code {
            0 => ChannelType::Unsigned,
            1 => ChannelType::Signed,
            3 => ChannelType::Float,
            other => ChannelType::Other(other),
        }
    }
}

/// Заголовок XRAW
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XrawHeader {
    pub channel_type: ChannelType,
    pub channel_count: u8,
    pub bits_per_channel: u8,
    pub bits_per_index: u8,
    /// Размеры x, y, z
    pub size: [u32; 3],
    pub palette_colors: u32,
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Допустимые ширины: целое число байт 1, 2 или 4
#[inline]
fn is_supported_width(bits: u8) -> bool {
    matches!(bits, 8 | 16 | 32)
}

impl XrawHeader {
    /// Прочитать и проверить заголовок.
    /// Порядок проверок: magic, длина заголовка, размер палитры, ширины
    pub fn parse(bytes: &[u8]) -> Result<Self, LoadError> {
        if bytes.len() < MAGIC.len() {
            return Err(LoadError::TruncatedFile {
                expected: MAGIC.len() as u64,
                actual: bytes.len() as u64,
            });
        }
        if bytes[..4] != MAGIC {
            return Err(LoadError::UnsupportedFormat);
        }
        if bytes.len() < HEADER_SIZE {
            return Err(LoadError::TruncatedFile {
                expected: HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let header = Self {
            channel_type: ChannelType::from(bytes[4]),
            channel_count: bytes[5],
            bits_per_channel: bytes[6],
            bits_per_index: bytes[7],
            size: [read_u32(bytes, 8), read_u32(bytes, 12), read_u32(bytes, 16)],
            palette_colors: read_u32(bytes, 20),
        };

        if header.palette_colors != PALETTE_COLORS {
            return Err(LoadError::InvalidPaletteSize(header.palette_colors));
        }
        if !is_supported_width(header.bits_per_index) {
            return Err(LoadError::UnsupportedBitWidth {
                field: "bits per index",
                bits: header.bits_per_index,
            });
        }
        if header.channel_count > 0 && !is_supported_width(header.bits_per_channel) {
            return Err(LoadError::UnsupportedBitWidth {
                field: "bits per channel",
                bits: header.bits_per_channel,
            });
        }

        Ok(header)
    }

    /// Сериализовать заголовок обратно в байты
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..4].copy_from_slice(&MAGIC);
        out[4] = self.channel_type.code();
        out[5] = self.channel_count;
        out[6] = self.bits_per_channel;
        out[7] = self.bits_per_index;
        for (axis, &extent) in self.size.iter().enumerate() {
            let offset = 8 + axis * 4;
            out[offset..offset + 4].copy_from_slice(&extent.to_le_bytes());
        }
        out[20..24].copy_from_slice(&self.palette_colors.to_le_bytes());
        out
    }

    #[inline]
    pub fn bytes_per_index(&self) -> usize {
        (self.bits_per_index / 8) as usize
    }

    #[inline]
    pub fn bytes_per_channel(&self) -> usize {
        (self.bits_per_channel / 8) as usize
    }

    /// Количество вокселей x*y*z (None при переполнении)
    pub fn voxel_count(&self) -> Option<u64> {
        let [x, y, z] = self.size;
        (x as u64).checked_mul(y as u64)?.checked_mul(z as u64)
    }

    /// Размер блока индексов
    pub fn voxel_payload_len(&self) -> Option<u64> {
        self.voxel_count()?.checked_mul(self.bytes_per_index() as u64)
    }

    /// Размер блока палитры
    pub fn palette_payload_len(&self) -> u64 {
        self.channel_count as u64 * self.bytes_per_channel() as u64 * self.palette_colors as u64
    }

    /// Полный ожидаемый размер файла
    pub fn file_len(&self) -> Option<u64> {
        (HEADER_SIZE as u64)
            .checked_add(self.voxel_payload_len()?)?
            .checked_add(self.palette_payload_len())
    }
}
