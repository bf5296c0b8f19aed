//! 野生菌識別APIクライアント（ブラウザ）
//!
//! 同一オリジンのAPIを gloo-net で呼ぶ。各リクエストは AbortSignal 付きで、
//! 期限を過ぎたら中断して `ApiFailure::Timeout` を返す。

use futures::future::{select, Either};
use gloo::net::http::Request;
use gloo::timers::future::TimeoutFuture;
use mushroom_scout_common::api::{
    history_url, ClassesResponse, DetectResponse, HistoryResponse, OverviewResponse, CLASSES_PATH,
    DEFAULT_TIMEOUT_SECS, DETECT_FILE_FIELD, DETECT_PATH, OVERVIEW_PATH,
};
use mushroom_scout_common::{
    decode_response, ApiFailure, ApiOutcome, ClassCount, DetectionResult, IntoOutcome, PageQuery,
    PageResult, StatsOverview,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, File, FormData};

/// 1リクエストあたりの期限（ミリ秒）
const REQUEST_TIMEOUT_MS: u32 = (DEFAULT_TIMEOUT_SECS * 1000) as u32;

/// 同一オリジン
const BASE_URL: &str = "";

fn map_net_error(error: gloo::net::Error) -> ApiFailure {
    match error {
        gloo::net::Error::JsError(js) if js.name == "AbortError" => ApiFailure::Aborted,
        other => ApiFailure::Transport(other.to_string()),
    }
}

fn map_js_error(value: JsValue) -> ApiFailure {
    ApiFailure::Transport(format!("{:?}", value))
}

/// 期限内に完了すれば `Some`、期限切れなら `None`
async fn within_deadline<F>(future: F, millis: u32) -> Option<F::Output>
where
    F: Future + Unpin,
{
    match select(future, TimeoutFuture::new(millis)).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}

/// 送信してボディをエンベロープとして解釈
///
/// エラーステータスでもボディに `success:false` が入っているので先にボディを読む
async fn fetch<R>(
    request: Result<Request, gloo::net::Error>,
    controller: &AbortController,
) -> ApiOutcome<R::Payload>
where
    R: DeserializeOwned + IntoOutcome,
{
    let request = request.map_err(map_net_error)?;
    let exchange = Box::pin(async move {
        let response = request.send().await.map_err(map_net_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_net_error)?;
        Ok::<_, ApiFailure>((status, body))
    });

    let (status, body) = match within_deadline(exchange, REQUEST_TIMEOUT_MS).await {
        Some(result) => result?,
        None => {
            controller.abort();
            return Err(ApiFailure::Timeout);
        }
    };

    let outcome = decode_response::<R>(&body);
    if let Err(ApiFailure::Decode(detail)) = &outcome {
        if !(200..300).contains(&status) {
            return Err(ApiFailure::Transport(format!("HTTP {}", status)));
        }
        gloo::console::warn!(format!("レスポンスの解析に失敗: {}", detail));
    }
    outcome
}

/// 画像を1枚送信して識別
pub async fn detect(file: &File, controller: &AbortController) -> ApiOutcome<DetectionResult> {
    let form = FormData::new().map_err(map_js_error)?;
    form.append_with_blob_and_filename(DETECT_FILE_FIELD, file, &file.name())
        .map_err(map_js_error)?;
    let request = Request::post(&format!("{}{}", BASE_URL, DETECT_PATH))
        .abort_signal(Some(&controller.signal()))
        .body(form);
    fetch::<DetectResponse>(request, controller).await
}

pub async fn history(query: &PageQuery, controller: &AbortController) -> ApiOutcome<PageResult> {
    let request = Request::get(&history_url(BASE_URL, query))
        .abort_signal(Some(&controller.signal()))
        .build();
    fetch::<HistoryResponse>(request, controller).await
}

pub async fn overview(controller: &AbortController) -> ApiOutcome<StatsOverview> {
    let request = Request::get(&format!("{}{}", BASE_URL, OVERVIEW_PATH))
        .abort_signal(Some(&controller.signal()))
        .build();
    fetch::<OverviewResponse>(request, controller).await
}

pub async fn classes(controller: &AbortController) -> ApiOutcome<Vec<ClassCount>> {
    let request = Request::get(&format!("{}{}", BASE_URL, CLASSES_PATH))
        .abort_signal(Some(&controller.signal()))
        .build();
    fetch::<ClassesResponse>(request, controller).await
}
