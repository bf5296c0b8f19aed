//! 野生菌識別APIクライアント
//!
//! [`MushroomApi`] はセッションが使う通信境界。本番は [`HttpClient`]（reqwest）、
//! テストではメモリ上の実装に差し替える。

use crate::error::{MushroomScoutError, Result};
use mushroom_scout_common::api::{
    endpoint, history_url, ClassesResponse, DetectResponse, HistoryResponse, OverviewResponse,
    CLASSES_PATH, DETECT_FILE_FIELD, DETECT_PATH, OVERVIEW_PATH,
};
use mushroom_scout_common::media::guess_mime;
use mushroom_scout_common::{
    decode_response, ApiFailure, ApiOutcome, ClassCount, DetectionResult, IntoOutcome, PageQuery,
    PageResult, StatsOverview,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

/// 拡張子から種別が分からないファイルのMIMEタイプ
const UNKNOWN_MIME: &str = "application/octet-stream";

/// アップロードするファイル
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// ファイルを読み込み、拡張子からMIMEタイプを推定する
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(MushroomScoutError::FileNotFound(path.display().to_string()));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = guess_mime(path).unwrap_or(UNKNOWN_MIME).to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { file_name, mime_type, bytes })
    }
}

/// 識別・履歴・統計の4エンドポイント
#[allow(async_fn_in_trait)]
pub trait MushroomApi {
    async fn detect(&self, upload: Upload) -> ApiOutcome<DetectionResult>;

    async fn history(&self, query: &PageQuery) -> ApiOutcome<PageResult>;

    async fn overview(&self) -> ApiOutcome<StatsOverview>;

    async fn classes(&self) -> ApiOutcome<Vec<ClassCount>>;
}

/// reqwestによる実装
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// # Arguments
    /// * `base_url` - 例: "http://127.0.0.1:8888"
    /// * `timeout` - 1リクエストあたりの期限
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 送信してボディをエンベロープとして解釈
    ///
    /// HTTPエラーステータスでもボディに `success:false` が入っているので先にボディを読む
    async fn fetch<R>(&self, request: RequestBuilder) -> ApiOutcome<R::Payload>
    where
        R: DeserializeOwned + IntoOutcome,
    {
        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport)?;
        tracing::debug!(%status, bytes = body.len(), "レスポンス受信");

        let outcome = decode_response::<R>(&body);
        if let Err(ApiFailure::Decode(detail)) = &outcome {
            if !status.is_success() {
                return Err(ApiFailure::Transport(format!("HTTP {}", status)));
            }
            tracing::warn!(%detail, "レスポンスの解析に失敗");
        }
        outcome
    }
}

fn map_transport(error: reqwest::Error) -> ApiFailure {
    if error.is_timeout() {
        ApiFailure::Timeout
    } else {
        ApiFailure::Transport(error.to_string())
    }
}

impl MushroomApi for HttpClient {
    async fn detect(&self, upload: Upload) -> ApiOutcome<DetectionResult> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(map_transport)?;
        let form = Form::new().part(DETECT_FILE_FIELD, part);
        let request = self
            .client
            .post(endpoint(&self.base_url, DETECT_PATH))
            .multipart(form);
        self.fetch::<DetectResponse>(request).await
    }

    async fn history(&self, query: &PageQuery) -> ApiOutcome<PageResult> {
        let request = self.client.get(history_url(&self.base_url, query));
        self.fetch::<HistoryResponse>(request).await
    }

    async fn overview(&self) -> ApiOutcome<StatsOverview> {
        let request = self.client.get(endpoint(&self.base_url, OVERVIEW_PATH));
        self.fetch::<OverviewResponse>(request).await
    }

    async fn classes(&self) -> ApiOutcome<Vec<ClassCount>> {
        let request = self.client.get(endpoint(&self.base_url, CLASSES_PATH));
        self.fetch::<ClassesResponse>(request).await
    }
}
