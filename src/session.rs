//! 画面1つ分のクライアントセッション
//!
//! 共通コントローラにAPI呼び出しを組み合わせる。通信結果は必ずコントローラの
//! `apply` を通して反映し、描画はコントローラのスナップショットから行う。

use crate::client::{MushroomApi, Upload};
use crate::render::TerminalChart;
use mushroom_scout_common::{
    DaysFilter, DetailView, DetailViewer, DetectEffect, HistoryController, HistoryUpdate, Issued,
    PageQuery, StatsDashboard, Submission, TypeFilter, UploadController,
};

/// `submit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    Detected(DetectEffect),
    /// 動画はプレビューのみ
    PreviewOnly,
    Rejected(String),
}

pub struct Session<A> {
    api: A,
    upload: UploadController,
    history: HistoryController,
    detail: DetailViewer,
    stats: StatsDashboard,
    chart: TerminalChart,
}

impl<A: MushroomApi> Session<A> {
    pub fn new(api: A, query: PageQuery) -> Self {
        Self::with_chart(api, query, TerminalChart::default())
    }

    pub fn with_chart(api: A, query: PageQuery, chart: TerminalChart) -> Self {
        Self {
            api,
            upload: UploadController::new(),
            history: HistoryController::new(query),
            detail: DetailViewer::new(),
            stats: StatsDashboard::new(),
            chart,
        }
    }

    pub fn upload(&self) -> &UploadController {
        &self.upload
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn detail(&self) -> &DetailViewer {
        &self.detail
    }

    pub fn stats(&self) -> &StatsDashboard {
        &self.stats
    }

    pub fn chart(&self) -> &TerminalChart {
        &self.chart
    }

    /// ファイルを送信して識別、成功したら統計を更新
    pub async fn submit(&mut self, upload: Upload) -> SubmitReport {
        let ticket = match self.upload.submit(&upload.file_name, &upload.mime_type) {
            Submission::Detect { ticket } => ticket,
            Submission::PreviewOnly => {
                tracing::info!(file = %upload.file_name, "動画はプレビューのみ");
                return SubmitReport::PreviewOnly;
            }
            Submission::Rejected { message } => {
                tracing::warn!(%message, "ファイルを拒否");
                return SubmitReport::Rejected(message);
            }
        };

        tracing::debug!(%ticket, file = %upload.file_name, "識別リクエスト発行");
        let outcome = self.api.detect(upload).await;
        let effect = self.upload.apply(ticket, outcome, cache_token());

        match &effect {
            DetectEffect::ShowResult => self.refresh_stats().await,
            DetectEffect::ShowMessage(message) => tracing::warn!(%message, "識別失敗"),
            DetectEffect::Discarded => tracing::debug!(%ticket, "古い識別結果を破棄"),
        }
        SubmitReport::Detected(effect)
    }

    /// 結果画像の読み込み失敗を通知
    pub fn mark_image_failed(&mut self) {
        self.upload.mark_image_failed();
    }

    /// 概要と分布を並行して取得（順不同・互いに独立）
    pub async fn refresh_stats(&mut self) {
        let tickets = self.stats.refresh();
        tracing::debug!(overview = %tickets.overview, classes = %tickets.classes, "統計更新");

        let (overview, classes) = tokio::join!(self.api.overview(), self.api.classes());
        if let Err(failure) = &overview {
            tracing::warn!(%failure, "統計概要の取得に失敗（前回値を維持）");
        }
        if let Err(failure) = &classes {
            tracing::warn!(%failure, "分布の取得に失敗");
        }

        self.stats.apply_overview(tickets.overview, overview);
        if self.stats.apply_classes(tickets.classes, classes, &mut self.chart) && self.stats.is_fallback() {
            tracing::info!("デフォルト分布を表示");
        }
    }

    /// 履歴を取得して反映
    ///
    /// ページが範囲外になった場合は最終ページを取り直す（要求ページは毎回減るので必ず終わる）
    async fn run_history(&mut self, mut issued: Issued<PageQuery>) -> bool {
        loop {
            tracing::debug!(ticket = %issued.ticket, query = %issued.request.to_query_string(), "履歴リクエスト発行");
            let outcome = self.api.history(&issued.request).await;
            if let Err(failure) = &outcome {
                tracing::warn!(%failure, "履歴の取得に失敗");
            }
            match self.history.apply(issued.ticket, outcome) {
                HistoryUpdate::Applied => return true,
                HistoryUpdate::Stale => {
                    tracing::debug!(ticket = %issued.ticket, "古い履歴応答を破棄");
                    return false;
                }
                HistoryUpdate::Refetch(next) => {
                    tracing::info!(page = next.request.page(), "ページが範囲外のため再取得");
                    issued = next;
                }
            }
        }
    }

    /// 初回読み込み
    pub async fn load_history(&mut self) -> bool {
        let issued = self.history.mount();
        self.run_history(issued).await
    }

    pub async fn reload_history(&mut self) -> bool {
        let issued = self.history.reload();
        self.run_history(issued).await
    }

    pub async fn next_page(&mut self) -> bool {
        match self.history.next_page() {
            Some(issued) => self.run_history(issued).await,
            None => false,
        }
    }

    pub async fn prev_page(&mut self) -> bool {
        match self.history.prev_page() {
            Some(issued) => self.run_history(issued).await,
            None => false,
        }
    }

    pub async fn set_days(&mut self, days: DaysFilter) -> bool {
        match self.history.set_days(days) {
            Some(issued) => self.run_history(issued).await,
            None => false,
        }
    }

    pub async fn set_type(&mut self, type_filter: TypeFilter) -> bool {
        match self.history.set_type(type_filter) {
            Some(issued) => self.run_history(issued).await,
            None => false,
        }
    }

    /// 行を選択して詳細を開く
    pub fn open_detail(&mut self, index: usize) -> Option<&DetailView> {
        let record = self.history.select(index)?;
        Some(self.detail.open(record))
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }
}

/// 結果画像URL用のトークン（現在時刻ミリ秒）
fn cache_token() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(1)
}
