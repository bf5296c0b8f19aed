//! Mushroom Scout Common Library
//!
//! CLIとWeb(WASM)で共有される型とコントローラ
//!
//! コントローラはすべてI/Oを持たない状態機械として実装し、
//! 通信はフロントエンド側（reqwest / gloo-net）が行う。
//! リクエスト発行時に受け取った [`Ticket`] を結果と一緒に `apply` に渡す。

pub mod api;
pub mod chart;
pub mod detail;
pub mod error;
pub mod format;
pub mod history;
pub mod media;
pub mod query;
pub mod sequence;
pub mod stats;
pub mod types;
pub mod upload;

pub use api::{decode_response, ApiFailure, ApiOutcome, IntoOutcome};
pub use chart::{ChartAdapter, ChartData};
pub use detail::{DetailView, DetailViewer};
pub use error::{Error, Result};
pub use format::{cache_busted, format_confidence};
pub use history::{HistoryController, HistoryPhase, HistoryRow, HistoryUpdate, HistoryView};
pub use media::MediaKind;
pub use query::{DaysFilter, PageQuery, TypeFilter};
pub use sequence::{Issued, RequestSeq, Ticket};
pub use stats::{OverviewView, RefreshTickets, StatsDashboard};
pub use types::{
    default_distribution, ClassCount, DetectionRecord, DetectionResult, PageResult, StatsOverview,
    MUSHROOM_CLASSES,
};
pub use upload::{DetectEffect, Preview, ResultCard, Submission, UploadController, UploadState};
