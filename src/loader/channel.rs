// ============================================
// Palette Channel - Декодирование канала цвета
// ============================================
// Неподдерживаемые комбинации (тип, ширина) дают 0.0, без ошибки

use crate::config::ChannelNormalization;
use super::header::ChannelType;

/// Делитель для целочисленного канала
fn divisor(signed: bool, bytes: usize, normalization: ChannelNormalization) -> f64 {
    match normalization {
        ChannelNormalization::Legacy => 255.0,
        ChannelNormalization::BitWidth => {
            let bits = (bytes * 8) as i32;
            if signed {
                2f64.powi(bits - 1) - 1.0
            } else {
                2f64.powi(bits) - 1.0
            }
        }
    }
}

/// Декодировать одно значение канала.
/// `raw` - ровно bytes_per_channel байт little-endian.
/// None если комбинация не поддерживается
pub fn decode_channel(
    raw: &[u8],
    channel_type: ChannelType,
    normalization: ChannelNormalization,
) -> Option<f32> {
    let value = match (channel_type, raw) {
        (ChannelType::Unsigned, &[a]) => a as f64,
        (ChannelType::Unsigned, &[a, b]) => u16::from_le_bytes([a, b]) as f64,
        (ChannelType::Unsigned, &[a, b, c, d]) => u32::from_le_bytes([a, b, c, d]) as f64,
        (ChannelType::Signed, &[a]) => a as i8 as f64,
        (ChannelType::Signed, &[a, b]) => i16::from_le_bytes([a, b]) as f64,
        (ChannelType::Signed, &[a, b, c, d]) => i32::from_le_bytes([a, b, c, d]) as f64,
        (ChannelType::Float, &[a, b, c, d]) => return Some(f32::from_le_bytes([a, b, c, d])),
        _ => return None,
    };

    let signed = matches!(channel_type, ChannelType::Signed);
    Some((value / divisor(signed, raw.len(), normalization)) as f32)
}
