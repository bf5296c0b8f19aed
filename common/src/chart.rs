//! チャートアダプタ
//!
//! 描画エンジン（ECharts / 端末表示）との境界。通信もビジネスロジックも持たない。

use crate::types::ClassCount;

pub const CHART_TITLE: &str = "菌类分布";
/// 値ラベルの接尾辞
pub const VALUE_SUFFIX: &str = "次";

/// 単一系列のカテゴリチャート
pub trait ChartAdapter {
    /// 系列を丸ごと置き換えて描画する（最後の呼び出しが勝つ）
    fn render(&mut self, categories: &[String], values: &[f64]);

    /// コンテナサイズに合わせて再レイアウト
    fn resize(&mut self);
}

/// 軸ラベルと値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn render_to<C: ChartAdapter + ?Sized>(&self, chart: &mut C) {
        chart.render(&self.categories, &self.values);
    }
}

impl From<&[ClassCount]> for ChartData {
    fn from(counts: &[ClassCount]) -> Self {
        Self {
            categories: counts.iter().map(|c| c.name.clone()).collect(),
            values: counts.iter().map(|c| c.count as f64).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Vec<String>, Vec<f64>)>,
    }

    impl ChartAdapter for Recorder {
        fn render(&mut self, categories: &[String], values: &[f64]) {
            self.calls.push((categories.to_vec(), values.to_vec()));
        }

        fn resize(&mut self) {}
    }

    #[test]
    fn test_chart_data_preserves_order() {
        let counts = vec![ClassCount::new("鸡油菌", 4), ClassCount::new("松茸", 1)];
        let data = ChartData::from(counts.as_slice());
        assert_eq!(data.categories, vec!["鸡油菌", "松茸"]);
        assert_eq!(data.values, vec![4.0, 1.0]);
    }

    #[test]
    fn test_render_to_adapter() {
        let mut recorder = Recorder::default();
        let data = ChartData::from([ClassCount::new("竹荪", 2)].as_slice());
        data.render_to(&mut recorder);
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, vec!["竹荪"]);
    }
}
