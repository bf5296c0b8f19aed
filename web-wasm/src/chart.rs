//! ECharts ブリッジ
//!
//! 描画はJavaScript側（`js/chart-bridge.js`）に委譲する。チャートの
//! インスタンスは要素IDごとにJS側で1つだけ保持し、`render` は毎回系列を置き換える。

use mushroom_scout_common::chart::{CHART_TITLE, VALUE_SUFFIX};
use mushroom_scout_common::ChartAdapter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/chart-bridge.js")]
extern "C" {
    /// 単一系列の棒グラフを描画
    ///
    /// # Arguments
    /// * `element_id` - チャートを描画するコンテナ要素のID
    /// * `categories` - カテゴリ名の配列（JS Array）
    /// * `values` - 値（Float64Array）
    #[wasm_bindgen(js_name = "renderChart")]
    fn render_chart_js(
        element_id: &str,
        title: &str,
        suffix: &str,
        categories: JsValue,
        values: &[f64],
    );

    #[wasm_bindgen(js_name = "resizeChart")]
    fn resize_chart_js(element_id: &str);
}

/// 統計パネルのチャート
#[derive(Debug, Clone)]
pub struct EchartsChart {
    element_id: String,
}

impl EchartsChart {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

impl ChartAdapter for EchartsChart {
    fn render(&mut self, categories: &[String], values: &[f64]) {
        match serde_wasm_bindgen::to_value(categories) {
            Ok(names) => render_chart_js(&self.element_id, CHART_TITLE, VALUE_SUFFIX, names, values),
            Err(e) => gloo::console::error!(format!("カテゴリの変換に失敗: {}", e)),
        }
    }

    fn resize(&mut self) {
        resize_chart_js(&self.element_id);
    }
}
