//! 履歴クエリコントローラ
//!
//! 状態: Idle → Loading → Loaded / Empty / Error
//!
//! フィルタ変更・ページ移動のたびに新しい [`PageQuery`] を作ってリクエストを発行する。
//! 応答は最後に発行したチケットのものだけを適用する。
//! 件数が減って要求ページが範囲外になった応答は表示せず、最終ページを取り直す。

use crate::api::ApiOutcome;
use crate::format::format_confidence;
use crate::query::{DaysFilter, PageQuery, TypeFilter};
use crate::sequence::{Issued, RequestSeq, Ticket};
use crate::types::{DetectionRecord, PageResult};

/// 履歴テーブルの列数（時刻・菌類・場所・信頼度・提示・操作）
pub const HISTORY_COLUMNS: usize = 6;
/// データなしのプレースホルダー
pub const NO_DATA_TEXT: &str = "暂无数据";
/// 履歴取得失敗時のメッセージ
pub const HISTORY_FAILED_TEXT: &str = "获取历史记录失败";

/// 外から見える状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPhase {
    Idle,
    Loading,
    Loaded,
    Empty,
    Error,
}

/// 最後に確定した結果
#[derive(Debug, Clone, PartialEq, Default)]
enum Settled {
    #[default]
    Nothing,
    Rows(Vec<DetectionRecord>),
    Empty,
    Error(String),
}

/// [`HistoryController::apply`] の結果
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryUpdate {
    /// 古い応答なので捨てた
    Stale,
    Applied,
    /// 要求ページが範囲外だったので最終ページを発行した
    Refetch(Issued<PageQuery>),
}

impl HistoryUpdate {
    /// 応答を受け付けたか（再取得も含む）
    pub fn is_applied(&self) -> bool {
        !matches!(self, HistoryUpdate::Stale)
    }
}

/// テーブル1行分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub detect_time: String,
    pub mushroom_type: String,
    pub location: String,
    pub confidence: String,
    pub danger_tip: String,
}

impl From<&DetectionRecord> for HistoryRow {
    fn from(record: &DetectionRecord) -> Self {
        Self {
            detect_time: record.detect_time.clone(),
            mushroom_type: record.mushroom_type.clone(),
            location: record.location.clone().unwrap_or_default(),
            confidence: format_confidence(record.confidence),
            danger_tip: record.danger_tip.clone().unwrap_or_default(),
        }
    }
}

/// 描画用スナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub phase: HistoryPhase,
    pub rows: Vec<HistoryRow>,
    /// 行がない場合の全列結合プレースホルダー
    pub placeholder: Option<&'static str>,
    pub colspan: usize,
    /// Error状態のときの理由（表示するかは呼び出し側が決める）
    pub error: Option<String>,
    pub page_label: String,
    /// 条件に一致する総件数（サーバが返した場合のみ）
    pub total: Option<u64>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub days: DaysFilter,
    pub type_filter: TypeFilter,
}

#[derive(Debug)]
pub struct HistoryController {
    query: PageQuery,
    total_pages: u32,
    total: Option<u64>,
    /// 表示中の行を取得したクエリ
    shown: PageQuery,
    settled: Settled,
    seq: RequestSeq,
}

impl Default for HistoryController {
    fn default() -> Self {
        Self::new(PageQuery::default())
    }
}

impl HistoryController {
    pub fn new(query: PageQuery) -> Self {
        Self {
            query,
            total_pages: 1,
            total: None,
            shown: query,
            settled: Settled::Nothing,
            seq: RequestSeq::new(),
        }
    }

    pub fn query(&self) -> PageQuery {
        self.query
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.seq.pending()
    }

    pub fn phase(&self) -> HistoryPhase {
        if self.seq.is_pending() {
            return HistoryPhase::Loading;
        }
        match self.settled {
            Settled::Nothing => HistoryPhase::Idle,
            Settled::Rows(_) => HistoryPhase::Loaded,
            Settled::Empty => HistoryPhase::Empty,
            Settled::Error(_) => HistoryPhase::Error,
        }
    }

    fn issue(&mut self, query: PageQuery) -> Issued<PageQuery> {
        self.query = query;
        Issued { ticket: self.seq.issue(), request: query }
    }

    /// 初回表示
    pub fn mount(&mut self) -> Issued<PageQuery> {
        self.issue(self.query)
    }

    /// 同じ条件で再取得
    pub fn reload(&mut self) -> Issued<PageQuery> {
        self.issue(self.query)
    }

    /// 期間フィルタ変更（ページは1に戻る）
    ///
    /// 値が変わらない場合はNone
    pub fn set_days(&mut self, days: DaysFilter) -> Option<Issued<PageQuery>> {
        if days == self.query.days() {
            return None;
        }
        Some(self.issue(self.query.with_days(days)))
    }

    /// 菌類フィルタ変更（ページは1に戻る）
    pub fn set_type(&mut self, type_filter: TypeFilter) -> Option<Issued<PageQuery>> {
        if type_filter == self.query.type_filter() {
            return None;
        }
        Some(self.issue(self.query.with_type(type_filter)))
    }

    pub fn can_prev(&self) -> bool {
        self.query.page() > 1
    }

    pub fn can_next(&self) -> bool {
        self.query.page() < self.total_pages
    }

    /// 前のページ（1ページ目ではNone）
    pub fn prev_page(&mut self) -> Option<Issued<PageQuery>> {
        if !self.can_prev() {
            return None;
        }
        Some(self.issue(self.query.with_page(self.query.page() - 1)))
    }

    /// 次のページ（最終ページではNone）
    pub fn next_page(&mut self) -> Option<Issued<PageQuery>> {
        if !self.can_next() {
            return None;
        }
        Some(self.issue(self.query.with_page(self.query.page() + 1)))
    }

    /// 応答を適用
    ///
    /// 失敗時はエラー状態になり、ページ表示は失敗したリクエストのページになる。
    /// 総ページ数が減って要求ページが範囲外になった場合は行を表示せず、
    /// 最終ページ（最低1）のリクエストを発行して返す。
    pub fn apply(&mut self, ticket: Ticket, outcome: ApiOutcome<PageResult>) -> HistoryUpdate {
        if !self.seq.settle(ticket) {
            return HistoryUpdate::Stale;
        }
        match outcome {
            Ok(page) => {
                self.total_pages = page.total_pages;
                self.total = page.total;
                let last_page = self.total_pages.max(1);
                if self.query.page() > last_page {
                    return HistoryUpdate::Refetch(self.issue(self.query.with_page(last_page)));
                }
                self.shown = self.query;
                self.settled = if page.records.is_empty() {
                    Settled::Empty
                } else {
                    Settled::Rows(page.records)
                };
            }
            Err(failure) => {
                self.shown = self.query;
                self.settled = Settled::Error(failure.user_message(HISTORY_FAILED_TEXT));
            }
        }
        HistoryUpdate::Applied
    }

    /// 進行中のリクエストを中断
    ///
    /// クエリは表示中の行を取得したものに戻る
    pub fn cancel(&mut self) -> Option<Ticket> {
        let cancelled = self.seq.cancel();
        if cancelled.is_some() {
            self.query = self.shown;
        }
        cancelled
    }

    /// 表示中のレコード
    pub fn records(&self) -> &[DetectionRecord] {
        match &self.settled {
            Settled::Rows(records) => records,
            _ => &[],
        }
    }

    /// 行選択（クエリ状態は変えない）
    pub fn select(&self, index: usize) -> Option<&DetectionRecord> {
        self.records().get(index)
    }

    pub fn view(&self) -> HistoryView {
        let rows: Vec<HistoryRow> = self.records().iter().map(HistoryRow::from).collect();
        let placeholder = match self.settled {
            Settled::Empty | Settled::Error(_) => Some(NO_DATA_TEXT),
            _ => None,
        };
        let error = match &self.settled {
            Settled::Error(message) => Some(message.clone()),
            _ => None,
        };
        HistoryView {
            phase: self.phase(),
            rows,
            placeholder,
            colspan: HISTORY_COLUMNS,
            error,
            page_label: format!("第 {} 页", self.shown.page()),
            total: self.total,
            prev_enabled: self.can_prev(),
            next_enabled: self.can_next(),
            days: self.query.days(),
            type_filter: self.query.type_filter(),
        }
    }
}
