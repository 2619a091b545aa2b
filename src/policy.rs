//! Resize thresholds of the linear probing table.

/// Load-factor thresholds driving the geometric resizing of a
/// [`LinProbTable`](crate::LinProbTable).
///
/// Before a put, the table doubles when `size / capacity >= grow_at`; after a delete it halves
/// when `size / capacity <= shrink_at`. The check runs before the entry lands, so a put can
/// leave the load factor one entry above `grow_at`. With the default, `(size - 1) * 2 <=
/// capacity` holds after every put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    /// Load factor at or above which a put grows the table first
    grow_at: f64,
    /// Load factor at or below which a delete shrinks the table, `None` to never shrink
    shrink_at: Option<f64>,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self { grow_at: Self::DEFAULT_GROW_AT, shrink_at: Some(Self::DEFAULT_SHRINK_AT) }
    }
}

impl ResizePolicy {
    /// Default growth threshold
    pub const DEFAULT_GROW_AT: f64 = 0.5;
    /// Default shrink threshold
    pub const DEFAULT_SHRINK_AT: f64 = 0.125;
    /// Lowest accepted growth threshold
    const MIN_GROW_AT: f64 = 0.05;

    /// Grows only once the table is completely full and never shrinks.
    ///
    /// Capacity then stays where the caller put it, which is what load-factor experiments need.
    #[must_use]
    pub const fn fixed() -> Self {
        Self { grow_at: 1.0, shrink_at: None }
    }

    /// Sets the growth threshold, clamped into `[0.05, 1.0]`.
    ///
    /// A shrink threshold above a quarter of the new growth threshold is lowered to it, so a
    /// halving can never land the table right back above the growth threshold.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn with_grow_threshold(mut self, threshold: f64) -> Self {
        self.grow_at = threshold.clamp(Self::MIN_GROW_AT, 1.0);
        self.shrink_at = self.shrink_at.map(|shrink| shrink.min(self.grow_at / 4.0));
        self
    }

    /// Sets the shrink threshold, clamped into `[0.0, grow_at / 4]`; `None` disables shrinking.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn with_shrink_threshold(mut self, threshold: Option<f64>) -> Self {
        self.shrink_at = threshold.map(|shrink| shrink.clamp(0.0, self.grow_at / 4.0));
        self
    }

    /// Load factor at or above which puts grow the table
    #[must_use]
    pub const fn grow_threshold(&self) -> f64 {
        self.grow_at
    }

    /// Load factor at or below which deletes shrink the table
    #[must_use]
    pub const fn shrink_threshold(&self) -> Option<f64> {
        self.shrink_at
    }

    /// Returns true if a put on a table with `size` entries in `capacity` slots must grow first
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn should_grow(&self, size: usize, capacity: usize) -> bool {
        capacity == 0 || size as f64 / capacity as f64 >= self.grow_at
    }

    /// Returns true if a delete leaving `size` entries in `capacity` slots must shrink the table
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn should_shrink(&self, size: usize, capacity: usize) -> bool {
        match self.shrink_at {
            Some(shrink_at) if capacity > 0 => size as f64 / capacity as f64 <= shrink_at,
            _ => false,
        }
    }
}
