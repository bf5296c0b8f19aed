//! 端末向け描画
//!
//! コントローラのスナップショットを文字列にするだけで状態は持たない（チャートを除く）。

use mushroom_scout_common::chart::{CHART_TITLE, VALUE_SUFFIX};
use mushroom_scout_common::detail::{ORIGINAL_IMAGE_LABEL, RESULT_IMAGE_LABEL};
use mushroom_scout_common::{ChartAdapter, DetailView, HistoryView, OverviewView, ResultCard};

const HISTORY_HEADERS: [&str; 6] = ["识别时间", "菌类", "位置", "置信度", "提示", "操作"];
const DEFAULT_WIDTH: usize = 80;

/// 結果カード
pub fn render_result_card(card: &ResultCard) -> String {
    let mut lines = vec![
        format!("菌类：{}", card.mushroom_type),
        format!("置信度：{}", card.confidence),
    ];
    if !card.danger_tip.is_empty() {
        lines.push(card.danger_tip.clone());
    }
    lines.push(format!("识别时间：{}", card.detect_time));
    match (card.visible_image(), card.image_label()) {
        (Some(url), _) => lines.push(format!("标注图片：{}", url)),
        (None, Some(label)) => lines.push(label.to_string()),
        (None, None) => {}
    }
    lines.join("\n")
}

/// 履歴テーブル
pub fn render_history(view: &HistoryView) -> String {
    let mut lines = vec![format!(
        "[{} / {}]",
        view.days.label(),
        view.type_filter.label()
    )];
    lines.push(HISTORY_HEADERS.join(" | "));

    if let Some(placeholder) = view.placeholder {
        // 全列結合の1行
        lines.push(format!("{:^width$}", placeholder, width = HISTORY_HEADERS.join(" | ").len()));
    } else {
        for (index, row) in view.rows.iter().enumerate() {
            lines.push(format!(
                "{} | {} | {} | {} | {} | 详情#{}",
                row.detect_time,
                row.mushroom_type,
                row.location,
                row.confidence,
                row.danger_tip,
                index + 1
            ));
        }
    }

    let prev = if view.prev_enabled { "< 上一页" } else { "  " };
    let next = if view.next_enabled { "下一页 >" } else { "" };
    let page_info = match view.total {
        Some(total) => format!("{}（共 {} 条）", view.page_label, total),
        None => view.page_label.clone(),
    };
    lines.push(format!("{}  {}  {}", prev, page_info, next));
    lines.join("\n")
}

/// 詳細オーバーレイ
pub fn render_detail(view: &DetailView) -> String {
    [
        format!("{}：{}", ORIGINAL_IMAGE_LABEL, view.original_image),
        format!("{}：{}", RESULT_IMAGE_LABEL, view.result_image),
        view.mushroom_type.clone(),
        format!("置信度：{}", view.confidence),
        view.danger_tip.clone(),
        format!("识别时间：{}", view.detect_time),
    ]
    .join("\n")
}

/// 概要カウンタ
pub fn render_overview(view: &OverviewView) -> String {
    let mut text = format!("今日识别：{}    累计识别：{}", view.today_count, view.total_count);
    if let Some(latest) = &view.latest_time {
        text.push_str(&format!("    最近识别：{}", latest));
    }
    text
}

/// 端末幅（`COLUMNS`）
fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|w| *w >= 20)
        .unwrap_or(DEFAULT_WIDTH)
}

/// 横棒グラフで描画するチャート
#[derive(Debug, Clone)]
pub struct TerminalChart {
    width: usize,
    categories: Vec<String>,
    values: Vec<f64>,
    output: String,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self::with_width(terminal_width())
    }
}

impl TerminalChart {
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            categories: Vec::new(),
            values: Vec::new(),
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn draw(&mut self) {
        let label_width = self
            .categories
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        // ラベル（全角は2桁）と値ラベル分を除いた幅
        let bar_space = self.width.saturating_sub(label_width * 2 + 12).max(1);
        let max_value = self.values.iter().cloned().fold(0.0_f64, f64::max);

        let mut lines = vec![CHART_TITLE.to_string()];
        for (name, value) in self.categories.iter().zip(&self.values) {
            let bar_len = if max_value > 0.0 {
                ((value / max_value) * bar_space as f64).round() as usize
            } else {
                0
            };
            let padding = "  ".repeat(label_width - name.chars().count());
            lines.push(format!(
                "{}{} {} {}{}",
                name,
                padding,
                "█".repeat(bar_len),
                value,
                VALUE_SUFFIX
            ));
        }
        self.output = lines.join("\n");
    }
}

impl ChartAdapter for TerminalChart {
    fn render(&mut self, categories: &[String], values: &[f64]) {
        self.categories = categories.to_vec();
        self.values = values.to_vec();
        self.draw();
    }

    fn resize(&mut self) {
        self.width = terminal_width();
        self.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushroom_scout_common::{DetectionRecord, HistoryController, PageResult};

    #[test]
    fn test_chart_renders_every_category() {
        let mut chart = TerminalChart::with_width(60);
        let categories = vec!["松茸".to_string(), "鸡油菌".to_string()];
        chart.render(&categories, &[4.0, 2.0]);

        let output = chart.output();
        assert!(output.starts_with(CHART_TITLE));
        assert!(output.contains("松茸"));
        assert!(output.contains("4次"));
        assert!(output.contains("2次"));
    }

    #[test]
    fn test_chart_rerender_replaces_series() {
        let mut chart = TerminalChart::with_width(60);
        chart.render(&["松茸".to_string()], &[1.0]);
        chart.render(&["竹荪".to_string()], &[3.0]);
        assert!(!chart.output().contains("松茸"));
        assert_eq!(chart.values(), &[3.0]);
    }

    #[test]
    fn test_chart_all_zero() {
        let mut chart = TerminalChart::with_width(60);
        chart.render(&["松茸".to_string(), "松露".to_string()], &[0.0, 0.0]);
        assert!(!chart.output().contains('█'));
        assert_eq!(chart.output().matches("0次").count(), 2);
    }

    #[test]
    fn test_history_placeholder_row() {
        let mut controller = HistoryController::default();
        let issued = controller.mount();
        controller.apply(
            issued.ticket,
            Ok(PageResult { records: vec![], total_pages: 0, total: Some(0) }),
        );

        let text = render_history(&controller.view());
        assert!(text.contains("暂无数据"));
        assert!(text.contains("第 1 页"));
    }

    #[test]
    fn test_history_rows() {
        let mut controller = HistoryController::default();
        let issued = controller.mount();
        let record = DetectionRecord {
            detect_time: "2024-01-01 10:00:00".into(),
            mushroom_type: "松茸".into(),
            confidence: Some(0.8675),
            ..Default::default()
        };
        controller.apply(
            issued.ticket,
            Ok(PageResult { records: vec![record], total_pages: 2, total: Some(9) }),
        );

        let text = render_history(&controller.view());
        assert!(text.contains("86.75%"));
        assert!(text.contains("第 1 页（共 9 条）"));
        assert!(text.contains("下一页"));
        assert!(!text.contains("暂无数据"));
    }

    #[test]
    fn test_overview_with_latest_time() {
        let view = OverviewView {
            today_count: "2".into(),
            total_count: "10".into(),
            latest_time: Some("2024-01-01 10:00:00".into()),
        };
        let text = render_overview(&view);
        assert!(text.contains("今日识别：2"));
        assert!(text.contains("最近识别：2024-01-01 10:00:00"));
    }
}
