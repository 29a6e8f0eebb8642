use serde::Deserialize;

use crate::error::ConfigError;

// -----------------------------------------------------------------------------
// EngineConfig

/// Tuning knobs of an [`Engine`](crate::Engine).
///
/// Every field has a default, so a partial document deserializes fine.
///
/// # Examples
///
/// ```
/// use vc_encode::EngineConfig;
///
/// let cfg = EngineConfig {
///     max_depth: 8,
///     ..EngineConfig::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of idle output buffers kept for reuse.
    pub buffer_pool_size: usize,
    /// Number of idle map cursors kept for reuse.
    pub cursor_pool_size: usize,
    /// Capacity of a freshly created output buffer.
    pub initial_buffer_capacity: usize,
    /// Buffers that grew past this capacity are dropped instead of pooled.
    pub max_pooled_buffer_capacity: usize,
    /// Map cursors that grew past this many entries are dropped instead of
    /// pooled.
    pub max_pooled_cursor_entries: usize,
    /// Maximum nesting of types the compiler follows.
    pub max_depth: usize,
}

impl EngineConfig {
    pub const DEFAULT_POOL_SIZE: usize = 64;
    pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;
    pub const DEFAULT_MAX_POOLED_CAPACITY: usize = 1 << 20;
    pub const DEFAULT_MAX_CURSOR_ENTRIES: usize = 1 << 16;
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Checks that the configuration can build an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_pool_size == 0 {
            return Err(ConfigError::Zero("buffer_pool_size"));
        }
        if self.cursor_pool_size == 0 {
            return Err(ConfigError::Zero("cursor_pool_size"));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Zero("max_depth"));
        }
        if self.initial_buffer_capacity > self.max_pooled_buffer_capacity {
            return Err(ConfigError::CapacityOrder {
                initial: self.initial_buffer_capacity,
                max: self.max_pooled_buffer_capacity,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_pool_size: Self::DEFAULT_POOL_SIZE,
            cursor_pool_size: Self::DEFAULT_POOL_SIZE,
            initial_buffer_capacity: Self::DEFAULT_BUFFER_CAPACITY,
            max_pooled_buffer_capacity: Self::DEFAULT_MAX_POOLED_CAPACITY,
            max_pooled_cursor_entries: Self::DEFAULT_MAX_CURSOR_ENTRIES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::error::ConfigError;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.buffer_pool_size, 64);
        assert_eq!(cfg.initial_buffer_capacity, 1024);
        assert_eq!(cfg.max_pooled_buffer_capacity, 1024 * 1024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let cfg: EngineConfig =
            ron::from_str("(max_depth: 4, cursor_pool_size: 2, max_pooled_cursor_entries: 10)")
                .unwrap();
        assert_eq!(cfg.max_depth, 4);
        assert_eq!(cfg.cursor_pool_size, 2);
        assert_eq!(cfg.max_pooled_cursor_entries, 10);
        assert_eq!(cfg.max_pooled_buffer_capacity, EngineConfig::DEFAULT_MAX_POOLED_CAPACITY);
        assert_eq!(cfg.buffer_pool_size, EngineConfig::DEFAULT_POOL_SIZE);
    }

    #[test]
    fn rejects_zero_sizes() {
        let cfg = EngineConfig {
            cursor_pool_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("cursor_pool_size")));

        let cfg = EngineConfig {
            max_depth: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("max_depth")));
    }

    #[test]
    fn rejects_inverted_capacities() {
        let cfg = EngineConfig {
            initial_buffer_capacity: 4096,
            max_pooled_buffer_capacity: 1024,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CapacityOrder { initial: 4096, max: 1024 })
        ));
    }
}
