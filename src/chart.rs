//! Chart.js Bindings
//!
//! Draws availability charts with the page's global `Chart` class.

use leptos::html::Canvas;
use leptos::prelude::*;
use rental_engine::{ChartBackend, ChartConfig, ChartHandle, EngineError, EngineResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &web_sys::HtmlCanvasElement, config: &JsValue) -> Result<JsChart, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &JsChart);
}

/// A chart drawn on the availability canvas
pub struct ChartJsHandle(JsChart);

impl ChartHandle for ChartJsHandle {
    fn destroy(&mut self) {
        self.0.destroy();
    }
}

/// Creates charts on the canvas behind `canvas`
pub struct CanvasChartBackend {
    canvas: NodeRef<Canvas>,
}

impl CanvasChartBackend {
    pub fn new(canvas: NodeRef<Canvas>) -> Self {
        Self { canvas }
    }
}

impl ChartBackend for CanvasChartBackend {
    type Handle = ChartJsHandle;

    fn create(&mut self, config: &ChartConfig) -> EngineResult<ChartJsHandle> {
        let canvas = self
            .canvas
            .get_untracked()
            .ok_or_else(|| EngineError::ChartUnavailable("canvas is not mounted".to_string()))?;

        // Plain objects, not Maps: Chart.js reads options by property access
        let js_config = config
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| EngineError::ChartUnavailable(e.to_string()))?;

        JsChart::new(&canvas, &js_config)
            .map(ChartJsHandle)
            .map_err(|e| EngineError::ChartUnavailable(format!("{:?}", e)))
    }
}
