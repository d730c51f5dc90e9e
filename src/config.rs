// ============================================
// Config - Параметры загрузки и построения
// ============================================
// Data-Driven: всё можно задать JSON файлом, глобального состояния нет

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ориентация осей в исходном файле
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoxelAxis {
    /// Прямое копирование (Y вверх)
    #[default]
    AsStored,
    /// Z вверх: оси Y и Z источника меняются местами
    ZUp,
}

/// Нормализация целочисленных каналов палитры
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelNormalization {
    /// Деление на 255.0 для любой ширины канала (как в исходном инструменте)
    #[default]
    Legacy,
    /// Деление на максимум для ширины канала
    BitWidth,
}

/// Параметры декодера
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub axis: VoxelAxis,
    pub channel_normalization: ChannelNormalization,
}

impl LoaderConfig {
    pub fn with_axis(axis: VoxelAxis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }
}

/// Глубина по умолчанию (как в исходном приложении)
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Параметры построения октодерева
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Максимальная глубина разбиения
    pub max_depth: u32,
    /// Строить поддеревья на пуле rayon
    pub parallel: bool,
    /// Сколько верхних уровней делить между потоками
    pub parallel_depth: u32,
}

impl OctreeConfig {
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
            parallel_depth: 2,
        }
    }
}

/// Полная конфигурация: файл -> октодерево
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub loader: LoaderConfig,
    pub octree: OctreeConfig,
}

/// Ошибки чтения конфигурации
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) => None,
        }
    }
}

impl PipelineConfig {
    /// Загрузить из JSON строки
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Загрузить из файла
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}
