//! # chartkit
//!
//! Core chart primitives: scales and path builders.
//! Implements Strategy pattern for flexible scale behaviors.

use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// INDEX SCALE
// ============================================================================

/// Evenly spaced positions for an ordered series.
///
/// Index `0` sits at the start of the range and `count - 1` at the end. A
/// single element is centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexScale {
    count: usize,
    range: (f64, f64),
}

impl IndexScale {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            range: (0.0, 1.0),
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Get position for index
    pub fn scale(&self, index: usize) -> f64 {
        let (r_min, r_max) = self.range;
        if self.count <= 1 {
            return (r_min + r_max) / 2.0;
        }
        r_min + (index as f64 / (self.count - 1) as f64) * (r_max - r_min)
    }

    /// Nearest index for a position, or `None` outside the range
    pub fn nearest_index(&self, position: f64) -> Option<usize> {
        let (r_min, r_max) = self.range;
        if self.count == 0 || !(position >= r_min && position <= r_max) {
            return None;
        }
        if self.count == 1 || r_max <= r_min {
            return Some(0);
        }

        let relative = (position - r_min) / (r_max - r_min);
        let index = (relative * (self.count - 1) as f64).round() as usize;
        Some(index.min(self.count - 1))
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |builder, &(x, y)| {
            builder.line_to(x, y)
        })
        .build()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(100.0, 0.0);
        assert_eq!(scale.scale(10.0), 0.0);
        assert_eq!(scale.invert(25.0), 7.5);
    }

    #[test]
    fn test_linear_ticks_evenly_spaced() {
        let scale = LinearScale::new().domain(10.0, 20.0);
        assert_eq!(scale.ticks(6), vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0]);
    }

    #[test]
    fn test_index_scale() {
        let scale = IndexScale::new(5).range(60.0, 460.0);
        assert_eq!(scale.scale(0), 60.0);
        assert_eq!(scale.scale(2), 260.0);
        assert_eq!(scale.scale(4), 460.0);

        let single = IndexScale::new(1).range(60.0, 460.0);
        assert_eq!(single.scale(0), 260.0);
    }

    #[test]
    fn test_index_scale_nearest() {
        let scale = IndexScale::new(5).range(0.0, 100.0);
        assert_eq!(scale.nearest_index(0.0), Some(0));
        assert_eq!(scale.nearest_index(12.4), Some(0));
        assert_eq!(scale.nearest_index(12.6), Some(1));
        assert_eq!(scale.nearest_index(100.0), Some(4));
        assert_eq!(scale.nearest_index(-0.1), None);
        assert_eq!(scale.nearest_index(100.1), None);
        assert_eq!(scale.nearest_index(f64::NAN), None);
        assert_eq!(IndexScale::new(0).range(0.0, 100.0).nearest_index(50.0), None);
    }

    #[test]
    fn test_line_path() {
        let path = line_path(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);
        assert_eq!(path, "M0.00,0.00L50.00,50.00L100.00,0.00");
        assert!(line_path(&[]).is_empty());
    }
}
