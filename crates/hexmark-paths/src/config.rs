use hexmark_core::{BLOCK_SIZE, BoardSize};

/// Physical layout of a distance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StorageKind {
    /// Row-major storage, every cell allocated up front.
    Flat,
    /// 32×32 blocks, allocated as the fill reaches them.
    #[default]
    Blocked,
    /// Flat for boards that fit in a single block, blocked otherwise.
    Auto,
}

impl StorageKind {
    /// Resolve [`StorageKind::Auto`] for a board of `size`.
    pub fn resolve(self, size: BoardSize) -> StorageKind {
        match self {
            StorageKind::Auto if size.width() <= BLOCK_SIZE && size.height() <= BLOCK_SIZE => {
                StorageKind::Flat
            }
            StorageKind::Auto => StorageKind::Blocked,
            kind => kind,
        }
    }
}

/// Priority queue used by landmark builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueueKind {
    /// [`HeapPriorityQueue`](crate::HeapPriorityQueue).
    #[default]
    Heap,
    /// [`BucketPriorityQueue`](crate::BucketPriorityQueue).
    Bucket,
}

/// Settings for distance-field fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulatorConfig {
    pub storage: StorageKind,
    pub queue: QueueKind,
    /// Allocate the whole field on the rayon pool before the fill starts,
    /// instead of letting blocked storage allocate as the fill spreads.
    pub parallel_init: bool,
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = PopulatorConfig {
            storage: StorageKind::Auto,
            queue: QueueKind::Bucket,
            parallel_init: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"storage":"auto","queue":"bucket","parallel_init":true}"#);
        let back: PopulatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: PopulatorConfig = serde_json::from_str(r#"{"queue":"bucket"}"#).unwrap();
        assert_eq!(config.storage, StorageKind::Blocked);
        assert_eq!(config.queue, QueueKind::Bucket);
        assert!(!config.parallel_init);
    }
}
