//! Availability Chart Renderer
//!
//! Builds the line chart configuration for one item and owns the single
//! live chart of the availability surface. The chart library itself sits
//! behind [`ChartBackend`].

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::item::{AvailabilityPoint, RentalItem};

/// Axis headroom above the highest availability value
///
/// Empty data counts as a peak of zero.
pub fn suggested_max(points: &[AvailabilityPoint]) -> i64 {
    points.iter().map(|point| point.value).max().unwrap_or(0) + 1
}

/// Look of the availability dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub label: String,
    pub background_color: String,
    pub border_color: String,
    pub left_padding: u32,
    pub legend_position: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            label: "Availability".to_string(),
            background_color: "rgba(51, 122, 183, 0.4)".to_string(),
            border_color: "rgba(46, 109, 164, 1)".to_string(),
            left_padding: 50,
            legend_position: "bottom".to_string(),
        }
    }
}

// ========================
// Chart.js configuration
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<AvailabilityPoint>,
    pub background_color: String,
    pub border_color: String,
    pub stepped_line: bool,
    pub border_dash_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub layout: Layout,
    pub legend: Legend,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub padding: Padding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Padding {
    pub left: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<TimeAxis>,
    pub y_axes: Vec<ValueAxis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub time: TimeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub min_unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub begin_at_zero: bool,
    pub suggested_max: i64,
}

impl ChartConfig {
    /// Stepped line over an hour-granular time axis
    pub fn availability(points: &[AvailabilityPoint], style: &ChartStyle) -> Self {
        Self {
            kind: "line",
            data: ChartData {
                datasets: vec![Dataset {
                    label: style.label.clone(),
                    data: points.to_vec(),
                    background_color: style.background_color.clone(),
                    border_color: style.border_color.clone(),
                    stepped_line: true,
                    border_dash_offset: 0.0,
                }],
            },
            options: ChartOptions {
                layout: Layout {
                    padding: Padding {
                        left: style.left_padding,
                    },
                },
                legend: Legend {
                    position: style.legend_position.clone(),
                },
                scales: Scales {
                    x_axes: vec![TimeAxis {
                        kind: "time",
                        time: TimeOptions { min_unit: "hour" },
                    }],
                    y_axes: vec![ValueAxis {
                        ticks: Ticks {
                            begin_at_zero: true,
                            suggested_max: suggested_max(points),
                        },
                    }],
                },
            },
        }
    }
}

// ========================
// Chart lifecycle
// ========================

/// A chart instance created by a backend
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// Charting library able to draw a configuration
pub trait ChartBackend {
    type Handle: ChartHandle;

    fn create(&mut self, config: &ChartConfig) -> EngineResult<Self::Handle>;
}

/// Owned chart instance, destroyed when dropped
pub struct LiveChart<H: ChartHandle>(H);

impl<H: ChartHandle> LiveChart<H> {
    pub fn new(handle: H) -> Self {
        Self(handle)
    }
}

impl<H: ChartHandle> Drop for LiveChart<H> {
    fn drop(&mut self) {
        self.0.destroy();
    }
}

/// Holds at most one live chart for the availability surface
pub struct AvailabilityChartRenderer<B: ChartBackend> {
    backend: B,
    style: ChartStyle,
    caption: Option<String>,
    live: Option<LiveChart<B::Handle>>,
}

impl<B: ChartBackend> AvailabilityChartRenderer<B> {
    pub fn new(backend: B, style: ChartStyle) -> Self {
        Self {
            backend,
            style,
            caption: None,
            live: None,
        }
    }

    /// Show `item`, replacing any chart still alive
    pub fn on_surface_opened(&mut self, item: &RentalItem) -> EngineResult<()> {
        self.live = None;
        self.caption = None;

        if item.availability.is_empty() {
            log::debug!("no availability data for {}, drawing an empty chart", item.id);
        }

        let config = ChartConfig::availability(&item.availability, &self.style);
        let handle = self.backend.create(&config)?;
        self.live = Some(LiveChart::new(handle));
        self.caption = Some(item.name.clone());
        Ok(())
    }

    pub fn on_surface_closed(&mut self) {
        self.caption = None;
        self.live = None;
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::quantity::QuantityBounds;
    use chrono::{Duration, NaiveDate};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Backend counting how many charts exist
    #[derive(Default)]
    pub(crate) struct CountingBackend {
        pub created: Rc<Cell<usize>>,
        pub alive: Rc<Cell<usize>>,
        pub last_max: Rc<Cell<i64>>,
        pub fail: bool,
    }

    pub(crate) struct CountingHandle {
        alive: Rc<Cell<usize>>,
    }

    impl ChartHandle for CountingHandle {
        fn destroy(&mut self) {
            self.alive.set(self.alive.get() - 1);
        }
    }

    impl ChartBackend for CountingBackend {
        type Handle = CountingHandle;

        fn create(&mut self, config: &ChartConfig) -> EngineResult<CountingHandle> {
            if self.fail {
                return Err(EngineError::ChartUnavailable("canvas not mounted".to_string()));
            }
            self.created.set(self.created.get() + 1);
            self.alive.set(self.alive.get() + 1);
            self.last_max.set(config.options.scales.y_axes[0].ticks.suggested_max);
            Ok(CountingHandle {
                alive: self.alive.clone(),
            })
        }
    }

    pub(crate) fn points(values: &[i64]) -> Vec<AvailabilityPoint> {
        let base = NaiveDate::from_ymd_opt(2017, 3, 10)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| AvailabilityPoint::new(base + Duration::hours(i as i64), *v))
            .collect()
    }

    fn item(id: &str, values: &[i64]) -> RentalItem {
        RentalItem::new(id, format!("Item {}", id), "Shelf", QuantityBounds::new(0, 5).unwrap())
            .with_availability(points(values))
    }

    #[test]
    fn test_suggested_max() {
        assert_eq!(suggested_max(&points(&[2, 5, 1])), 6);
        assert_eq!(suggested_max(&[]), 1);
    }

    #[test]
    fn test_config_document() {
        let config = ChartConfig::availability(&points(&[2, 5]), &ChartStyle::default());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["steppedLine"], true);
        assert_eq!(json["data"]["datasets"][0]["label"], "Availability");
        assert_eq!(json["data"]["datasets"][0]["data"][1]["y"], 5);
        assert_eq!(json["data"]["datasets"][0]["data"][0]["x"], "2017-03-10T00:00:00");
        assert_eq!(json["options"]["layout"]["padding"]["left"], 50);
        assert_eq!(json["options"]["legend"]["position"], "bottom");
        assert_eq!(json["options"]["scales"]["xAxes"][0]["type"], "time");
        assert_eq!(json["options"]["scales"]["xAxes"][0]["time"]["minUnit"], "hour");
        assert_eq!(json["options"]["scales"]["yAxes"][0]["ticks"]["beginAtZero"], true);
        assert_eq!(json["options"]["scales"]["yAxes"][0]["ticks"]["suggestedMax"], 6);
    }

    #[test]
    fn test_reopen_replaces_chart() {
        let backend = CountingBackend::default();
        let alive = backend.alive.clone();
        let created = backend.created.clone();
        let last_max = backend.last_max.clone();
        let mut renderer = AvailabilityChartRenderer::new(backend, ChartStyle::default());

        renderer.on_surface_opened(&item("A", &[2, 5, 1])).unwrap();
        assert_eq!(renderer.caption(), Some("Item A"));
        renderer.on_surface_opened(&item("B", &[1])).unwrap();
        assert_eq!(renderer.caption(), Some("Item B"));
        assert_eq!(created.get(), 2);
        assert_eq!(alive.get(), 1);
        assert_eq!(last_max.get(), 2);

        renderer.on_surface_closed();
        assert_eq!(alive.get(), 0);
        assert!(!renderer.is_live());
        assert_eq!(renderer.caption(), None);

        // Closing twice does nothing
        renderer.on_surface_closed();
        assert_eq!(alive.get(), 0);
    }

    #[test]
    fn test_empty_availability_still_renders() {
        let backend = CountingBackend::default();
        let last_max = backend.last_max.clone();
        let mut renderer = AvailabilityChartRenderer::new(backend, ChartStyle::default());
        renderer.on_surface_opened(&item("A", &[])).unwrap();
        assert!(renderer.is_live());
        assert_eq!(last_max.get(), 1);
    }

    #[test]
    fn test_dropping_renderer_releases_chart() {
        let backend = CountingBackend::default();
        let alive = backend.alive.clone();
        {
            let mut renderer = AvailabilityChartRenderer::new(backend, ChartStyle::default());
            renderer.on_surface_opened(&item("A", &[3])).unwrap();
            assert_eq!(alive.get(), 1);
        }
        assert_eq!(alive.get(), 0);
    }

    #[test]
    fn test_backend_failure_leaves_no_chart() {
        let backend = CountingBackend {
            fail: true,
            ..Default::default()
        };
        let mut renderer = AvailabilityChartRenderer::new(backend, ChartStyle::default());
        let err = renderer.on_surface_opened(&item("A", &[3])).unwrap_err();
        assert!(matches!(err, EngineError::ChartUnavailable(_)));
        assert!(!renderer.is_live());
        assert_eq!(renderer.caption(), None);
    }

    #[test]
    fn test_failed_reopen_clears_previous_caption() {
        let mut renderer = AvailabilityChartRenderer::new(CountingBackend::default(), ChartStyle::default());
        renderer.on_surface_opened(&item("A", &[3])).unwrap();
        renderer.backend.fail = true;
        assert!(renderer.on_surface_opened(&item("B", &[1])).is_err());
        assert!(!renderer.is_live());
        assert_eq!(renderer.caption(), None);
    }
}
