//! 統計ダッシュボードコントローラ
//!
//! `refresh()` は概要と分布の2つの独立したリクエストを発行する。
//! 片方の失敗がもう片方に影響しないよう、シーケンスも表示領域も別々に持つ。

use crate::api::ApiOutcome;
use crate::chart::{ChartAdapter, ChartData};
use crate::sequence::{RequestSeq, Ticket};
use crate::types::{default_distribution, ClassCount, StatsOverview};

/// まだ一度も取得していない値の表示
const UNKNOWN_COUNT: &str = "--";

/// `refresh()` で発行されたチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTickets {
    pub overview: Ticket,
    pub classes: Ticket,
}

/// 概要カウンタの表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewView {
    pub today_count: String,
    pub total_count: String,
    pub latest_time: Option<String>,
}

#[derive(Debug, Default)]
pub struct StatsDashboard {
    overview: Option<StatsOverview>,
    distribution: Option<Vec<ClassCount>>,
    distribution_fallback: bool,
    overview_seq: RequestSeq,
    classes_seq: RequestSeq,
}

impl StatsDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 概要と分布の再取得を発行
    pub fn refresh(&mut self) -> RefreshTickets {
        RefreshTickets {
            overview: self.overview_seq.issue(),
            classes: self.classes_seq.issue(),
        }
    }

    /// 概要の応答を適用
    ///
    /// 失敗時は前回の表示値をそのまま残す（0にしない）
    ///
    /// # Returns
    /// 表示値が更新された場合true
    pub fn apply_overview(&mut self, ticket: Ticket, outcome: ApiOutcome<StatsOverview>) -> bool {
        if !self.overview_seq.settle(ticket) {
            return false;
        }
        match outcome {
            Ok(overview) => {
                self.overview = Some(overview);
                true
            }
            Err(_) => false,
        }
    }

    /// 分布の応答を適用してチャートへ反映
    ///
    /// 失敗時は12種・0件のデフォルト分布を描画する（空のチャートにはしない）
    ///
    /// # Returns
    /// チャートを描画した場合true（古い応答はfalse）
    pub fn apply_classes<C>(
        &mut self,
        ticket: Ticket,
        outcome: ApiOutcome<Vec<ClassCount>>,
        chart: &mut C,
    ) -> bool
    where
        C: ChartAdapter + ?Sized,
    {
        if !self.classes_seq.settle(ticket) {
            return false;
        }
        let (distribution, fallback) = match outcome {
            Ok(counts) => (counts, false),
            Err(_) => (default_distribution(), true),
        };
        self.distribution = Some(distribution);
        self.distribution_fallback = fallback;
        self.chart_data().render_to(chart);
        true
    }

    /// 現在の分布（未取得時はデフォルト分布）
    pub fn distribution(&self) -> Vec<ClassCount> {
        self.distribution.clone().unwrap_or_else(default_distribution)
    }

    /// 最後の分布がデフォルト分布で代替されたか
    pub fn is_fallback(&self) -> bool {
        self.distribution_fallback
    }

    pub fn chart_data(&self) -> ChartData {
        match &self.distribution {
            Some(counts) => ChartData::from(counts.as_slice()),
            None => ChartData::from(default_distribution().as_slice()),
        }
    }

    pub fn overview(&self) -> Option<&StatsOverview> {
        self.overview.as_ref()
    }

    pub fn overview_view(&self) -> OverviewView {
        match &self.overview {
            Some(overview) => OverviewView {
                today_count: overview.today_count.to_string(),
                total_count: overview.total_count.to_string(),
                latest_time: overview.latest_time.clone(),
            },
            None => OverviewView {
                today_count: UNKNOWN_COUNT.to_string(),
                total_count: UNKNOWN_COUNT.to_string(),
                latest_time: None,
            },
        }
    }

    /// 進行中のリクエストを中断
    pub fn cancel(&mut self) -> (Option<Ticket>, Option<Ticket>) {
        (self.overview_seq.cancel(), self.classes_seq.cancel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;
    use crate::types::MUSHROOM_CLASSES;

    #[derive(Default)]
    struct Recorder {
        renders: Vec<(Vec<String>, Vec<f64>)>,
    }

    impl ChartAdapter for Recorder {
        fn render(&mut self, categories: &[String], values: &[f64]) {
            self.renders.push((categories.to_vec(), values.to_vec()));
        }

        fn resize(&mut self) {}
    }

    fn overview(today: u64, total: u64) -> StatsOverview {
        StatsOverview { today_count: today, total_count: total, latest_time: None }
    }

    #[test]
    fn test_overview_before_load() {
        let dashboard = StatsDashboard::new();
        let view = dashboard.overview_view();
        assert_eq!(view.today_count, "--");
        assert_eq!(view.total_count, "--");
    }

    #[test]
    fn test_overview_success() {
        let mut dashboard = StatsDashboard::new();
        let tickets = dashboard.refresh();
        assert!(dashboard.apply_overview(tickets.overview, Ok(overview(3, 120))));
        let view = dashboard.overview_view();
        assert_eq!(view.today_count, "3");
        assert_eq!(view.total_count, "120");
    }

    #[test]
    fn test_overview_failure_keeps_previous_values() {
        let mut dashboard = StatsDashboard::new();
        let tickets = dashboard.refresh();
        dashboard.apply_overview(tickets.overview, Ok(overview(3, 120)));

        let tickets = dashboard.refresh();
        let changed = dashboard.apply_overview(tickets.overview, Err(ApiFailure::Timeout));
        assert!(!changed);
        assert_eq!(dashboard.overview(), Some(&overview(3, 120)));
    }

    #[test]
    fn test_classes_success_preserves_response_order() {
        let mut dashboard = StatsDashboard::new();
        let mut chart = Recorder::default();
        let tickets = dashboard.refresh();
        let counts = vec![ClassCount::new("鸡油菌", 7), ClassCount::new("奶浆菌", 2)];

        assert!(dashboard.apply_classes(tickets.classes, Ok(counts), &mut chart));
        assert_eq!(chart.renders.len(), 1);
        assert_eq!(chart.renders[0].0, vec!["鸡油菌", "奶浆菌"]);
        assert_eq!(chart.renders[0].1, vec![7.0, 2.0]);
        assert!(!dashboard.is_fallback());
    }

    #[test]
    fn test_classes_failure_renders_default_distribution() {
        let mut dashboard = StatsDashboard::new();
        let mut chart = Recorder::default();
        let tickets = dashboard.refresh();

        let failure = ApiFailure::Application(Some("db down".into()));
        assert!(dashboard.apply_classes(tickets.classes, Err(failure), &mut chart));

        let (categories, values) = &chart.renders[0];
        let expected: Vec<String> = MUSHROOM_CLASSES.iter().map(|s| s.to_string()).collect();
        assert_eq!(categories, &expected);
        assert_eq!(values, &vec![0.0; 12]);
        assert!(dashboard.is_fallback());
    }

    #[test]
    fn test_failures_are_independent() {
        let mut dashboard = StatsDashboard::new();
        let mut chart = Recorder::default();
        let tickets = dashboard.refresh();

        dashboard.apply_classes(
            tickets.classes,
            Err(ApiFailure::Transport("reset".into())),
            &mut chart,
        );
        assert!(dashboard.apply_overview(tickets.overview, Ok(overview(1, 2))));
        assert_eq!(dashboard.overview_view().total_count, "2");
    }

    #[test]
    fn test_stale_classes_response_ignored() {
        let mut dashboard = StatsDashboard::new();
        let mut chart = Recorder::default();
        let first = dashboard.refresh();
        let second = dashboard.refresh();

        assert!(dashboard.apply_classes(second.classes, Ok(vec![ClassCount::new("松露", 5)]), &mut chart));
        assert!(!dashboard.apply_classes(first.classes, Ok(vec![ClassCount::new("松露", 1)]), &mut chart));
        assert!(!dashboard.apply_overview(first.overview, Ok(overview(9, 9))));

        assert_eq!(chart.renders.len(), 1);
        assert_eq!(dashboard.distribution(), vec![ClassCount::new("松露", 5)]);
    }

    #[test]
    fn test_repeated_render_last_wins() {
        let mut dashboard = StatsDashboard::new();
        let mut chart = Recorder::default();

        let tickets = dashboard.refresh();
        dashboard.apply_classes(tickets.classes, Ok(vec![ClassCount::new("竹荪", 1)]), &mut chart);
        let tickets = dashboard.refresh();
        dashboard.apply_classes(tickets.classes, Ok(vec![ClassCount::new("竹荪", 2)]), &mut chart);

        assert_eq!(chart.renders.last().map(|r| r.1.clone()), Some(vec![2.0]));
        assert_eq!(dashboard.chart_data().values, vec![2.0]);
    }
}
