//! FILENAME: core/datasource/src/layout.rs
//! PURPOSE: Height rule for a scrollable table container.
//! CONTEXT: Pure function over explicit geometry, so a renderer measures
//! its surface and passes the numbers in; nothing here touches a real
//! rendering surface.

use serde::{Deserialize, Serialize};

/// Space kept free below the table (pixels).
pub const BOTTOM_RESERVE: f64 = 80.0;

/// Ancestors whose spacing counts towards the container padding.
pub const MAX_PADDING_ANCESTORS: usize = 6;

/// Vertical spacing of one ancestor element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSpacing {
    pub margin_bottom: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl BoxSpacing {
    pub fn total(&self) -> f64 {
        self.margin_bottom + self.padding_top + self.padding_bottom
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerMetrics {
    /// Explicit height requested by the host; wins over measurement.
    pub fixed_height: Option<f64>,
    pub window_height: f64,
    pub document_height: f64,
    /// Distance from the document top to the table container.
    pub offset_top: f64,
    /// Spacing of the container's ancestors, nearest first, up to (not
    /// including) the document body.
    pub ancestors: Vec<BoxSpacing>,
}

/// Maximum height for the scrollable table area.
pub fn compute_height(metrics: &ContainerMetrics) -> f64 {
    if let Some(height) = metrics.fixed_height {
        return height;
    }

    let padding: f64 = metrics
        .ancestors
        .iter()
        .take(MAX_PADDING_ANCESTORS)
        .map(BoxSpacing::total)
        .sum();

    let viewport = metrics.window_height.max(metrics.document_height);
    viewport - padding - metrics.offset_top - BOTTOM_RESERVE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spacing(v: f64) -> BoxSpacing {
        BoxSpacing {
            margin_bottom: v,
            padding_top: v,
            padding_bottom: v,
        }
    }

    #[test]
    fn test_fixed_height_wins() {
        let metrics = ContainerMetrics {
            fixed_height: Some(420.0),
            window_height: 1000.0,
            ..Default::default()
        };
        assert_eq!(compute_height(&metrics), 420.0);
    }

    #[test]
    fn test_uses_larger_of_window_and_document() {
        let metrics = ContainerMetrics {
            window_height: 900.0,
            document_height: 1200.0,
            offset_top: 100.0,
            ancestors: vec![spacing(10.0)],
            ..Default::default()
        };
        // 1200 - 30 - 100 - 80
        assert_eq!(compute_height(&metrics), 990.0);
    }

    #[test]
    fn test_padding_limited_to_six_ancestors() {
        let metrics = ContainerMetrics {
            window_height: 1000.0,
            ancestors: vec![spacing(1.0); 10],
            ..Default::default()
        };
        assert_eq!(compute_height(&metrics), 1000.0 - 18.0 - 80.0);
    }
}
