//! Run-time options for the edge-state driver.

use crate::bds::limiter::{CornerLimiter, StandardLimiter};
use crate::types::TileSize;

/// Configuration for edge-state reconstruction.
///
/// # Example
///
/// ```
/// use bds_rs::bds::BdsConfig;
/// use bds_rs::types::TileSize;
///
/// let config = BdsConfig::new()
///     .without_limiting()
///     .with_tile_size(TileSize::new(64, 4));
/// assert_eq!(config.limiter_name(), "none");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BdsConfig {
    /// Corner limiter applied by the slope fit
    pub limiter: StandardLimiter,
    /// Tile extent for stage evaluation
    pub tile_size: TileSize,
}

impl BdsConfig {
    /// Constrained limiting, default tiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the corner limiter.
    pub fn with_limiter(mut self, limiter: StandardLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Use unlimited slopes.
    pub fn without_limiting(self) -> Self {
        self.with_limiter(StandardLimiter::Unlimited)
    }

    /// Set the tile extent.
    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Whether slopes are limited.
    pub fn limits_slopes(&self) -> bool {
        !self.limiter.is_identity()
    }

    pub fn limiter_name(&self) -> &'static str {
        self.limiter.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_slopes() {
        let config = BdsConfig::default();
        assert!(config.limits_slopes());
        assert_eq!(config.limiter, StandardLimiter::Constrained);
        assert_eq!(config.tile_size, TileSize::new(1024, 8));
    }

    #[test]
    fn test_builders() {
        let config = BdsConfig::new()
            .without_limiting()
            .with_tile_size(TileSize::new(3, 2));
        assert!(!config.limits_slopes());
        assert_eq!(config.tile_size.nx, 3);

        let config = config.with_limiter(StandardLimiter::Constrained);
        assert_eq!(config.limiter_name(), "constrained");
    }
}
