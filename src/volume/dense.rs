// ============================================
// Dense Volume - Плотный массив индексов палитры
// ============================================
// Один байт на воксель, линеаризация: x + y*sx + z*sx*sy

/// Плотный объём: индекс палитры на каждую ячейку
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseVolume {
    /// Размеры по осям (x, y, z)
    dims: [u32; 3],
    /// Индексы палитры, x быстрее всех, z медленнее всех
    voxels: Vec<u8>,
}

impl DenseVolume {
    /// Создать объём из готового буфера.
    /// None если длина буфера не совпадает с x*y*z
    pub fn new(dims: [u32; 3], voxels: Vec<u8>) -> Option<Self> {
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))?;
        if voxels.len() != expected {
            return None;
        }
        Some(Self { dims, voxels })
    }

    /// Без проверки длины: вызывающий уже сверил буфер с размерами
    pub(crate) fn from_raw(dims: [u32; 3], voxels: Vec<u8>) -> Self {
        debug_assert_eq!(
            voxels.len() as u64,
            dims.iter().map(|&d| d as u64).product::<u64>()
        );
        Self { dims, voxels }
    }

    /// Кубический объём со стороной width
    pub fn cube(width: u32, voxels: Vec<u8>) -> Option<Self> {
        Self::new([width; 3], voxels)
    }

    /// Куб, заполненный одним индексом
    pub fn filled(width: u32, index: u8) -> Self {
        let w = width as usize;
        Self {
            dims: [width; 3],
            voxels: vec![index; w * w * w],
        }
    }

    /// Заполнить куб функцией от координат
    pub fn from_fn(width: u32, mut f: impl FnMut(u32, u32, u32) -> u8) -> Self {
        let w = width as usize;
        let mut voxels = Vec::with_capacity(w * w * w);
        for z in 0..width {
            for y in 0..width {
                for x in 0..width {
                    voxels.push(f(x, y, z));
                }
            }
        }
        Self {
            dims: [width; 3],
            voxels,
        }
    }

    #[inline]
    pub fn dims(&self) -> [u32; 3] {
        self.dims
    }

    /// Все ли стороны равны
    #[inline]
    pub fn is_cube(&self) -> bool {
        self.dims[0] == self.dims[1] && self.dims[1] == self.dims[2]
    }

    /// Пустой объём (хотя бы одна сторона 0)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Линейный индекс ячейки
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let [sx, sy, _] = self.dims;
        x as usize + y as usize * sx as usize + z as usize * sx as usize * sy as usize
    }

    /// Индекс палитры в ячейке (None вне границ)
    #[inline]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        let [sx, sy, sz] = self.dims;
        if x >= sx || y >= sy || z >= sz {
            return None;
        }
        Some(self.voxels[self.index(x, y, z)])
    }

    /// Сырые байты (для загрузки в текстуру или построителя)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.voxels
    }

    /// Забрать буфер
    pub fn into_bytes(self) -> Vec<u8> {
        self.voxels
    }
}
