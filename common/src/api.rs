//! REST APIの定義とレスポンス変換
//!
//! すべてのレスポンスは `success: bool` を持つ。`success=false` の場合は
//! 任意の `message` が付く。HTTPステータスに関係なくボディを解釈する。

use crate::query::PageQuery;
use crate::types::{
    null_as_empty, ClassCount, DetectionRecord, DetectionResult, PageResult, StatsOverview,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

pub const DETECT_PATH: &str = "/api/detect";
pub const HISTORY_PATH: &str = "/api/history";
pub const OVERVIEW_PATH: &str = "/api/stats/overview";
pub const CLASSES_PATH: &str = "/api/stats/classes";

/// multipartのファイルフィールド名
pub const DETECT_FILE_FIELD: &str = "file";

/// リクエストタイムアウトのデフォルト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// ベースURLとパスを連結
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 履歴APIのURL（クエリ付き）
pub fn history_url(base_url: &str, query: &PageQuery) -> String {
    format!("{}?{}", endpoint(base_url, HISTORY_PATH), query.to_query_string())
}

/// リクエスト失敗の分類
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// 通信自体が失敗した
    Transport(String),
    /// 期限内に応答がなかった
    Timeout,
    /// 新しいリクエストに置き換えられて中断した
    Aborted,
    /// ボディがJSONとして解釈できない
    Decode(String),
    /// `success=false`
    Application(Option<String>),
}

impl ApiFailure {
    /// ユーザーに見せるメッセージ
    ///
    /// `success=false` でメッセージがあればそのまま返す
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiFailure::Application(Some(message)) if !message.is_empty() => message.clone(),
            ApiFailure::Application(_) => fallback.to_string(),
            ApiFailure::Transport(detail) => format!("{}（网络错误：{}）", fallback, detail),
            ApiFailure::Timeout => format!("{}（请求超时）", fallback),
            ApiFailure::Aborted => format!("{}（请求已取消）", fallback),
            ApiFailure::Decode(_) => format!("{}（响应格式错误）", fallback),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Transport(detail) => write!(f, "transport failure: {}", detail),
            ApiFailure::Timeout => f.write_str("request timed out"),
            ApiFailure::Aborted => f.write_str("request aborted"),
            ApiFailure::Decode(detail) => write!(f, "malformed response: {}", detail),
            ApiFailure::Application(Some(message)) => write!(f, "server reported failure: {}", message),
            ApiFailure::Application(None) => f.write_str("server reported failure"),
        }
    }
}

impl std::error::Error for ApiFailure {}

pub type ApiOutcome<T> = std::result::Result<T, ApiFailure>;

/// レスポンスエンベロープをペイロードへ変換
pub trait IntoOutcome {
    type Payload;

    fn into_outcome(self) -> ApiOutcome<Self::Payload>;
}

/// ボディ文字列をデコードしてペイロードを取り出す
pub fn decode_response<R>(body: &str) -> ApiOutcome<R::Payload>
where
    R: DeserializeOwned + IntoOutcome,
{
    let envelope: R =
        serde_json::from_str(body).map_err(|e| ApiFailure::Decode(e.to_string()))?;
    envelope.into_outcome()
}

/// `/api/detect`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub mushroom_type: String,
    pub confidence: Option<f64>,
    pub danger_tip: Option<String>,
    pub detect_time: Option<String>,
    pub result_image: Option<String>,
}

impl IntoOutcome for DetectResponse {
    type Payload = DetectionResult;

    fn into_outcome(self) -> ApiOutcome<DetectionResult> {
        if !self.success {
            return Err(ApiFailure::Application(self.message));
        }
        Ok(DetectionResult {
            mushroom_type: self.mushroom_type,
            confidence: self.confidence,
            danger_tip: self.danger_tip.unwrap_or_default(),
            detect_time: self.detect_time.unwrap_or_default(),
            result_image: self.result_image.filter(|url| !url.is_empty()),
        })
    }
}

/// `/api/history`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Vec<DetectionRecord>>,
    pub pages: u32,
    pub total: Option<u64>,
}

impl IntoOutcome for HistoryResponse {
    type Payload = PageResult;

    fn into_outcome(self) -> ApiOutcome<PageResult> {
        if !self.success {
            return Err(ApiFailure::Application(self.message));
        }
        Ok(PageResult {
            records: self.data.unwrap_or_default(),
            total_pages: self.pages,
            total: self.total,
        })
    }
}

/// `/api/stats/overview`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OverviewResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<StatsOverview>,
}

impl IntoOutcome for OverviewResponse {
    type Payload = StatsOverview;

    fn into_outcome(self) -> ApiOutcome<StatsOverview> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiFailure::Decode("missing data".into())),
            (false, _) => Err(ApiFailure::Application(self.message)),
        }
    }
}

/// `/api/stats/classes`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassesResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Vec<ClassCount>>,
}

impl IntoOutcome for ClassesResponse {
    type Payload = Vec<ClassCount>;

    fn into_outcome(self) -> ApiOutcome<Vec<ClassCount>> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiFailure::Decode("missing data".into())),
            (false, _) => Err(ApiFailure::Application(self.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash() {
        assert_eq!(endpoint("http://localhost:8888/", DETECT_PATH), "http://localhost:8888/api/detect");
        assert_eq!(endpoint("", OVERVIEW_PATH), "/api/stats/overview");
    }

    #[test]
    fn test_history_url() {
        let url = history_url("http://h", &PageQuery::default());
        assert_eq!(url, "http://h/api/history?days=7&type=all&page=1&page_size=8");
    }

    #[test]
    fn test_decode_detect_success() {
        let body = r#"{"success":true,"mushroom_type":"松茸","confidence":0.9234,
            "danger_tip":"","detect_time":"2024-01-01 10:00","result_image":"/r/1.png"}"#;
        let result = decode_response::<DetectResponse>(body).expect("デコード失敗");
        assert_eq!(result.mushroom_type, "松茸");
        assert_eq!(result.confidence, Some(0.9234));
        assert_eq!(result.result_image.as_deref(), Some("/r/1.png"));
    }

    #[test]
    fn test_decode_detect_failure_message() {
        let body = r#"{"success":false,"message":"no mushroom detected"}"#;
        let failure = decode_response::<DetectResponse>(body).unwrap_err();
        assert_eq!(failure, ApiFailure::Application(Some("no mushroom detected".into())));
        assert_eq!(failure.user_message("识别失败"), "no mushroom detected");
    }

    #[test]
    fn test_decode_history_empty() {
        let body = r#"{"success":true,"data":[],"pages":0,"total":0}"#;
        let page = decode_response::<HistoryResponse>(body).expect("デコード失敗");
        assert!(page.records.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn test_decode_invalid_json() {
        let failure = decode_response::<ClassesResponse>("<html>500</html>").unwrap_err();
        assert!(matches!(failure, ApiFailure::Decode(_)));
    }

    #[test]
    fn test_overview_success_without_data() {
        let failure = decode_response::<OverviewResponse>(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(failure, ApiFailure::Decode(_)));
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(ApiFailure::Application(None).user_message("识别失败"), "识别失败");
        assert_eq!(ApiFailure::Application(Some(String::new())).user_message("识别失败"), "识别失败");
        assert!(ApiFailure::Timeout.user_message("识别失败").starts_with("识别失败"));
    }
}
