//! メインアプリケーションコンポーネント
//!
//! 画面の状態はすべて共通ライブラリのコントローラが持つ。イベントハンドラと
//! 通信の完了処理はコントローラを更新するだけで、描画はシグナル経由で行う。

use crate::api::abort::{Lane, Lanes};
use crate::api::client;
use crate::chart::EchartsChart;
use crate::components::{
    detail_modal::DetailModal, header::Header, history_table::HistoryTable,
    result_card::ResultCardView, stats_panel::StatsPanel, upload_area::UploadArea,
};
use gloo::file::ObjectUrl;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mushroom_scout_common::{
    ApiFailure, ChartAdapter, DaysFilter, DetailViewer, DetectEffect, HistoryController,
    HistoryUpdate, Issued, PageQuery, StatsDashboard, Submission, TypeFilter, UploadController,
};
use web_sys::{AbortController, File};

/// チャートを描画するコンテナのID
pub const CHART_ELEMENT_ID: &str = "type-chart";

/// アプリケーションの状態
#[derive(Clone, Copy)]
pub struct AppState {
    pub upload: RwSignal<UploadController>,
    /// ローカルプレビューのObject URL
    pub preview_url: RwSignal<Option<String>>,
    pub history: RwSignal<HistoryController>,
    pub detail: RwSignal<DetailViewer>,
    pub stats: RwSignal<StatsDashboard>,
    chart: StoredValue<EchartsChart>,
    lanes: StoredValue<Lanes, LocalStorage>,
    object_url: StoredValue<Option<ObjectUrl>, LocalStorage>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            upload: RwSignal::new(UploadController::new()),
            preview_url: RwSignal::new(None),
            history: RwSignal::new(HistoryController::new(PageQuery::default())),
            detail: RwSignal::new(DetailViewer::new()),
            stats: RwSignal::new(StatsDashboard::new()),
            chart: StoredValue::new(EchartsChart::new(CHART_ELEMENT_ID)),
            lanes: StoredValue::new_local(Lanes::default()),
            object_url: StoredValue::new_local(None),
        }
    }

    fn begin(self, lane: Lane) -> Result<AbortController, ApiFailure> {
        self.lanes
            .try_update_value(|lanes| lanes.lane_mut(lane).begin())
            .unwrap_or(Err(ApiFailure::Aborted))
    }

    // ============================================
    // アップロード & 識別
    // ============================================

    /// 選択またはドロップされたファイル
    pub fn submit_file(self, file: File) {
        let name = file.name();
        let mime = file.type_();
        let Some(submission) = self.upload.try_update(|u| u.submit(&name, &mime)) else {
            return;
        };

        match submission {
            Submission::Rejected { message } => {
                gloo::console::warn!(message);
            }
            Submission::PreviewOnly => self.show_preview(&file),
            Submission::Detect { ticket } => {
                self.show_preview(&file);
                let begun = self.begin(Lane::Detect);
                gloo::console::debug!(format!("识别请求 {} {}", ticket, name));

                spawn_local(async move {
                    let outcome = match begun {
                        Ok(controller) => client::detect(&file, &controller).await,
                        Err(failure) => Err(failure),
                    };
                    let token = js_sys::Date::now() as u64;
                    let effect = self.upload.try_update(|u| u.apply(ticket, outcome, token));

                    match effect {
                        Some(DetectEffect::ShowResult) => self.refresh_stats(),
                        Some(DetectEffect::ShowMessage(message)) => {
                            gloo::console::warn!(message.clone());
                            gloo::dialogs::alert(&message);
                        }
                        Some(DetectEffect::Discarded) | None => {
                            gloo::console::debug!(format!("丢弃过期的识别结果 {}", ticket));
                        }
                    }
                });
            }
        }
    }

    fn show_preview(self, file: &File) {
        let blob = web_sys::Blob::from(file.clone());
        let url = ObjectUrl::from(gloo::file::Blob::from(blob));
        self.preview_url.set(Some(url.to_string()));
        // 前のObject URLはここでdropされて解放される
        self.object_url.set_value(Some(url));
    }

    /// プレビュー画像クリックで消す
    pub fn clear_preview(self) {
        self.upload.update(|u| u.clear_preview());
        self.preview_url.set(None);
        self.object_url.set_value(None);
    }

    pub fn mark_image_failed(self) {
        self.upload.update(|u| u.mark_image_failed());
    }

    // ============================================
    // 統計
    // ============================================

    /// 概要と分布を独立して再取得
    pub fn refresh_stats(self) {
        let Some(tickets) = self.stats.try_update(|s| s.refresh()) else {
            return;
        };
        let overview_lane = self.begin(Lane::Overview);
        let classes_lane = self.begin(Lane::Classes);

        spawn_local(async move {
            let outcome = match overview_lane {
                Ok(controller) => client::overview(&controller).await,
                Err(failure) => Err(failure),
            };
            if let Err(failure) = &outcome {
                gloo::console::warn!(format!("获取统计概要失败: {}", failure));
            }
            self.stats.update(|s| {
                s.apply_overview(tickets.overview, outcome);
            });
        });

        spawn_local(async move {
            let outcome = match classes_lane {
                Ok(controller) => client::classes(&controller).await,
                Err(failure) => Err(failure),
            };
            if let Err(failure) = &outcome {
                gloo::console::warn!(format!("获取菌类统计数据失败，显示默认数据: {}", failure));
            }
            self.chart.update_value(|chart| {
                self.stats.update(|s| {
                    s.apply_classes(tickets.classes, outcome, chart);
                });
            });
        });
    }

    pub fn resize_chart(self) {
        self.chart.update_value(|chart| chart.resize());
    }

    // ============================================
    // 履歴
    // ============================================

    fn run_history(self, issued: Option<Issued<PageQuery>>) {
        let Some(issued) = issued else {
            return;
        };
        let begun = self.begin(Lane::History);

        spawn_local(async move {
            let outcome = match begun {
                Ok(controller) => client::history(&issued.request, &controller).await,
                Err(failure) => Err(failure),
            };
            if let Err(failure) = &outcome {
                gloo::console::warn!(format!("获取历史记录失败: {}", failure));
            }
            match self.history.try_update(|h| h.apply(issued.ticket, outcome)) {
                Some(HistoryUpdate::Applied) => {}
                Some(HistoryUpdate::Refetch(next)) => self.run_history(Some(next)),
                Some(HistoryUpdate::Stale) | None => {
                    gloo::console::debug!(format!("丢弃过期的历史记录 {}", issued.ticket));
                }
            }
        });
    }

    pub fn mount_history(self) {
        self.run_history(self.history.try_update(|h| h.mount()));
    }

    pub fn set_days(self, days: DaysFilter) {
        self.run_history(self.history.try_update(|h| h.set_days(days)).flatten());
    }

    pub fn set_type(self, type_filter: TypeFilter) {
        self.run_history(self.history.try_update(|h| h.set_type(type_filter)).flatten());
    }

    pub fn prev_page(self) {
        self.run_history(self.history.try_update(|h| h.prev_page()).flatten());
    }

    pub fn next_page(self) {
        self.run_history(self.history.try_update(|h| h.next_page()).flatten());
    }

    // ============================================
    // 詳細
    // ============================================

    pub fn open_detail(self, index: usize) {
        let record = self.history.with_untracked(|h| h.select(index).cloned());
        if let Some(record) = record {
            self.detail.update(|d| {
                d.open(&record);
            });
        }
    }

    pub fn close_detail(self) {
        self.detail.update(|d| d.close());
    }

    pub fn click_overlay(self, inside_content: bool) {
        self.detail.update(|d| d.click(inside_content));
    }

    /// 進行中のリクエストをすべて中断
    fn shutdown(self) {
        self.lanes.try_update_value(|lanes| lanes.abort_all());
        self.upload.try_update_untracked(|u| u.cancel());
        self.history.try_update_untracked(|h| h.cancel());
        self.stats.try_update_untracked(|s| s.cancel());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    // 初回表示: 履歴1ページ目と統計
    Effect::new(move |_| {
        state.mount_history();
        state.refresh_stats();
    });

    on_cleanup(move || state.shutdown());

    view! {
        <div class="container">
            <Header />

            <div class="main-grid">
                <section class="detect-section">
                    <UploadArea state=state />
                    <ResultCardView state=state />
                </section>

                <StatsPanel state=state />
            </div>

            <HistoryTable state=state />

            <DetailModal state=state />
        </div>
    }
}
