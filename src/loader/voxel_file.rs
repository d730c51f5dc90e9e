// ============================================
// Voxel File - Чтение XRAW в плотный объём
// ============================================
// Файл читается целиком, затем:
// 1. Проверка заголовка (magic, палитра, ширины)
// 2. Проверка длины: заголовок + индексы + палитра (без переполнения)
// 3. Индексы -> DenseVolume (с перестановкой осей для Z-up)
// 4. Палитра -> 256 цветов RGB

use std::fs;
use std::path::Path;

use crate::config::{ChannelNormalization, LoaderConfig, VoxelAxis};
use crate::volume::{DenseVolume, Palette, PALETTE_SIZE};

use super::channel::decode_channel;
use super::error::LoadError;
use super::header::{XrawHeader, HEADER_SIZE};

/// Результат загрузки
#[derive(Debug, Clone)]
pub struct LoadedVoxels {
    pub header: XrawHeader,
    pub volume: DenseVolume,
    pub palette: Palette,
}

/// Загрузить воксельный файл с диска
pub fn load_voxel_file<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> Result<LoadedVoxels, LoadError> {
    let bytes = fs::read(path.as_ref())?;
    parse_voxel_file(&bytes, config)
}

/// Разобрать содержимое файла
pub fn parse_voxel_file(bytes: &[u8], config: &LoaderConfig) -> Result<LoadedVoxels, LoadError> {
    let header = XrawHeader::parse(bytes)?;
    log::debug!(
        "XRAW header: type {:?}, {} channels x {} bits, {} bits/index, size {:?}, {} colors",
        header.channel_type,
        header.channel_count,
        header.bits_per_channel,
        header.bits_per_index,
        header.size,
        header.palette_colors,
    );

    let actual = bytes.len() as u64;
    let expected = header
        .file_len()
        .ok_or(LoadError::PayloadOverflow { size: header.size })?;
    if actual < expected {
        return Err(LoadError::TruncatedFile { expected, actual });
    }

    // Длины уже проверены, все срезы в пределах файла
    let voxel_end = HEADER_SIZE + header.voxel_payload_len().unwrap_or_default() as usize;
    let voxel_bytes = &bytes[HEADER_SIZE..voxel_end];
    let palette_bytes = &bytes[voxel_end..expected as usize];

    let indices = read_indices(voxel_bytes, header.bytes_per_index())?;
    let voxels = match config.axis {
        VoxelAxis::AsStored => indices,
        VoxelAxis::ZUp => remap_z_up(&indices, header.size),
    };
    let volume = DenseVolume::from_raw(header.size, voxels);
    let palette = decode_palette(palette_bytes, &header, config.channel_normalization);

    Ok(LoadedVoxels {
        header,
        volume,
        palette,
    })
}

/// Индексы фиксированной ширины -> байты палитры
fn read_indices(raw: &[u8], bytes_per_index: usize) -> Result<Vec<u8>, LoadError> {
    let narrow = |value: u32| {
        u8::try_from(value).map_err(|_| LoadError::PaletteIndexOverflow { value })
    };

    match bytes_per_index {
        2 => raw
            .chunks_exact(2)
            .map(|c| narrow(u16::from_le_bytes([c[0], c[1]]) as u32))
            .collect(),
        4 => raw
            .chunks_exact(4)
            .map(|c| narrow(u32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        _ => Ok(raw.to_vec()),
    }
}

/// Z-up: ячейка (x, y, z) берётся из x + z*sx + y*sx*sz.
/// Строки по x непрерывны в обоих порядках, копируем строками
fn remap_z_up(src: &[u8], size: [u32; 3]) -> Vec<u8> {
    let [sx, sy, sz] = size.map(|d| d as usize);
    let mut dest = vec![0u8; src.len()];

    for z in 0..sz {
        for y in 0..sy {
            let dst_row = y * sx + z * sx * sy;
            let src_row = z * sx + y * sx * sz;
            dest[dst_row..dst_row + sx].copy_from_slice(&src[src_row..src_row + sx]);
        }
    }

    dest
}

/// Палитра: используются первые 3 канала, остальные пропускаются
fn decode_palette(
    raw: &[u8],
    header: &XrawHeader,
    normalization: ChannelNormalization,
) -> Palette {
    let channel_count = header.channel_count as usize;
    let used_channels = channel_count.min(3);
    let bytes_per_channel = header.bytes_per_channel();

    if channel_count > 3 {
        log::debug!("Ignoring {} extra color channels", channel_count - 3);
    }

    let mut palette = Palette::new();
    let mut unsupported = false;

    for color_index in 0..PALETTE_SIZE {
        let mut color = [0.0f32; 3];
        for (channel_index, value) in color.iter_mut().enumerate().take(used_channels) {
            let start = (color_index * channel_count + channel_index) * bytes_per_channel;
            let channel = &raw[start..start + bytes_per_channel];
            *value = decode_channel(channel, header.channel_type, normalization).unwrap_or_else(|| {
                unsupported = true;
                0.0
            });
        }
        palette.set_color(color_index as u8, color);
    }

    if unsupported {
        log::warn!(
            "Unsupported palette channel encoding ({:?}, {} bits), channels read as 0.0",
            header.channel_type,
            header.bits_per_channel,
        );
    }

    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ChannelType, PALETTE_COLORS};

    fn header(size: [u32; 3]) -> XrawHeader {
        XrawHeader {
            channel_type: ChannelType::Unsigned,
            channel_count: 4,
            bits_per_channel: 8,
            bits_per_index: 8,
            size,
            palette_colors: PALETTE_COLORS,
        }
    }

    /// RGBA8: (i, 255 - i, i / 2, 255)
    fn rgba8_palette() -> Vec<u8> {
        (0..=255u8).flat_map(|i| [i, 255 - i, i / 2, 255]).collect()
    }

    fn encode(header: &XrawHeader, voxels: &[u8], palette: &[u8]) -> Vec<u8> {
        let mut out = header.to_bytes().to_vec();
        out.extend_from_slice(voxels);
        out.extend_from_slice(palette);
        out
    }

    fn norm(v: u8) -> f32 {
        (v as f64 / 255.0) as f32
    }

    #[test]
    fn test_decode_dimensions_and_palette() {
        let voxels: Vec<u8> = (0..60).collect();
        let bytes = encode(&header([3, 4, 5]), &voxels, &rgba8_palette());

        let loaded = parse_voxel_file(&bytes, &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.volume.dims(), [3, 4, 5]);
        assert_eq!(loaded.volume.len(), 60);
        assert_eq!(loaded.volume.as_bytes(), &voxels[..]);

        assert_eq!(loaded.palette.color(0), [0.0, 1.0, 0.0]);
        assert_eq!(loaded.palette.color(255), [1.0, 0.0, norm(127)]);
        assert_eq!(loaded.palette.color(10), [norm(10), norm(245), norm(5)]);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = encode(&header([2, 2, 2]), &[1; 8], &rgba8_palette());
        bytes.extend_from_slice(&[0xAA; 16]);
        let loaded = parse_voxel_file(&bytes, &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.volume.as_bytes(), &[1; 8]);
    }

    #[test]
    fn test_palette_size_255_fails_without_payload() {
        let mut h = header([64, 64, 64]);
        h.palette_colors = 255;
        // Только заголовок: полезная нагрузка не должна читаться
        let bytes = h.to_bytes();
        assert!(matches!(
            parse_voxel_file(&bytes, &LoaderConfig::default()),
            Err(LoadError::InvalidPaletteSize(255))
        ));
    }

    #[test]
    fn test_truncated_file() {
        let mut bytes = encode(&header([2, 2, 2]), &[0; 8], &rgba8_palette());
        let full = bytes.len() as u64;
        bytes.pop();
        match parse_voxel_file(&bytes, &LoaderConfig::default()) {
            Err(LoadError::TruncatedFile { expected, actual }) => {
                assert_eq!(expected, full);
                assert_eq!(actual, full - 1);
            }
            other => panic!("expected TruncatedFile, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_dims_report_payload_overflow() {
        let mut h = header([u32::MAX; 3]);
        h.bits_per_index = 32;
        let bytes = h.to_bytes();
        let err = parse_voxel_file(&bytes, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::PayloadOverflow { size: [u32::MAX, u32::MAX, u32::MAX] }));
        assert!(!err.to_string().contains(&u64::MAX.to_string()));
    }

    #[test]
    fn test_normalization_reaches_palette() {
        let mut h = header([1, 1, 1]);
        h.channel_count = 3;
        h.bits_per_channel = 16;
        let palette: Vec<u8> = (0..=255u16)
            .flat_map(|i| [i * 257, u16::MAX, 0])
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let bytes = encode(&h, &[0], &palette);

        let config = LoaderConfig {
            channel_normalization: ChannelNormalization::BitWidth,
            ..LoaderConfig::default()
        };
        let loaded = parse_voxel_file(&bytes, &config).unwrap();
        assert_eq!(loaded.palette.color(0), [0.0, 1.0, 0.0]);
        assert_eq!(loaded.palette.color(255), [1.0, 1.0, 0.0]);
        assert_eq!(loaded.palette.color(51), [norm(51), 1.0, 0.0]);

        // По умолчанию 16 бит тоже делятся на 255
        let loaded = parse_voxel_file(&bytes, &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.palette.color(1), [(257.0f64 / 255.0) as f32, 257.0, 0.0]);
    }

    #[test]
    fn test_unknown_magic() {
        let mut bytes = encode(&header([1, 1, 1]), &[0], &rgba8_palette());
        bytes[..4].copy_from_slice(b"VOX ");
        assert!(matches!(
            parse_voxel_file(&bytes, &LoaderConfig::default()),
            Err(LoadError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_z_up_swaps_y_and_z_source_axes() {
        let size = [2, 3, 4];
        let voxels: Vec<u8> = (0..24).collect();
        let bytes = encode(&header(size), &voxels, &rgba8_palette());

        let stored = parse_voxel_file(&bytes, &LoaderConfig::with_axis(VoxelAxis::AsStored)).unwrap();
        let z_up = parse_voxel_file(&bytes, &LoaderConfig::with_axis(VoxelAxis::ZUp)).unwrap();
        assert_eq!(z_up.volume.dims(), size);

        let [sx, sy, sz] = size;
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let src = (x + z * sx + y * sx * sz) as usize;
                    assert_eq!(z_up.volume.get(x, y, z), Some(voxels[src]));
                }
            }
        }

        // Обратная перестановка восстанавливает AsStored
        let mut undone = vec![0u8; 24];
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let src = (x + z * sx + y * sx * sz) as usize;
                    undone[src] = z_up.volume.as_bytes()[z_up.volume.index(x, y, z)];
                }
            }
        }
        assert_eq!(&undone[..], stored.volume.as_bytes());

        // Перестановка не меняет значения
        let mut sorted = z_up.volume.as_bytes().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, voxels);
    }

    #[test]
    fn test_wide_indices() {
        let mut h = header([2, 1, 1]);
        h.bits_per_index = 16;
        let voxels: Vec<u8> = [7u16, 200].iter().flat_map(|v| v.to_le_bytes()).collect();
        let loaded = parse_voxel_file(&encode(&h, &voxels, &rgba8_palette()), &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.volume.as_bytes(), &[7, 200]);

        h.bits_per_index = 32;
        let voxels: Vec<u8> = [1u32, 300].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert!(matches!(
            parse_voxel_file(&encode(&h, &voxels, &rgba8_palette()), &LoaderConfig::default()),
            Err(LoadError::PaletteIndexOverflow { value: 300 })
        ));
    }

    #[test]
    fn test_two_channel_palette_leaves_blue_zero() {
        let mut h = header([1, 1, 1]);
        h.channel_count = 2;
        let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, 255]).collect();
        let loaded = parse_voxel_file(&encode(&h, &[0], &palette), &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.palette.color(51), [norm(51), 1.0, 0.0]);
    }

    #[test]
    fn test_float_palette() {
        let mut h = header([1, 1, 1]);
        h.channel_type = ChannelType::Float;
        h.channel_count = 3;
        h.bits_per_channel = 32;
        let palette: Vec<u8> = (0..256)
            .flat_map(|i| [i as f32 / 256.0, 0.5, 2.0])
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let loaded = parse_voxel_file(&encode(&h, &[0], &palette), &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.palette.color(128), [0.5, 0.5, 2.0]);
    }

    #[test]
    fn test_unsupported_channel_encoding_is_not_fatal() {
        let mut h = header([1, 1, 1]);
        h.channel_type = ChannelType::Other(2);
        let loaded = parse_voxel_file(&encode(&h, &[9], &rgba8_palette()), &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.volume.as_bytes(), &[9]);
        assert!(loaded.palette.as_flat().iter().all(|&c| c == 0.0));

        let mut h = header([1, 1, 1]);
        h.channel_type = ChannelType::Float;
        h.bits_per_channel = 16;
        let palette = vec![0x3Cu8; 256 * 4 * 2];
        let loaded = parse_voxel_file(&encode(&h, &[0], &palette), &LoaderConfig::default()).unwrap();
        assert!(loaded.palette.as_flat().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("voxel_octree_test_load.xraw");
        let bytes = encode(&header([2, 2, 2]), &[3; 8], &rgba8_palette());
        fs::write(&path, &bytes).unwrap();

        let loaded = load_voxel_file(&path, &LoaderConfig::default()).unwrap();
        assert_eq!(loaded.volume.as_bytes(), &[3; 8]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("voxel_octree_definitely_missing.xraw");
        assert!(matches!(
            load_voxel_file(&path, &LoaderConfig::default()),
            Err(LoadError::Io(_))
        ));
    }
}
