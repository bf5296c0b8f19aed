//! アップロード & 識別コントローラ
//!
//! 画像: ローカルプレビュー → 識別リクエスト → 結果カード → 統計更新
//! 動画: ローカルプレビューのみ
//! その他: 拒否メッセージ

use crate::api::ApiOutcome;
use crate::format::{cache_busted, format_confidence};
use crate::media::MediaKind;
use crate::sequence::{RequestSeq, Ticket};
use crate::types::DetectionResult;

/// 識別失敗時の汎用メッセージ
pub const DETECT_FAILED_TEXT: &str = "识别失败";
/// 標注画像の読み込み失敗時に画像の代わりに表示するラベル
pub const IMAGE_LOAD_FAILED_TEXT: &str = "标注图片加载失败";

/// ローカルプレビュー（通信不要）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    #[default]
    None,
    Image { file_name: String },
    Video { file_name: String },
}

/// `submit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// 識別リクエストを発行する
    Detect { ticket: Ticket },
    /// プレビューのみ
    PreviewOnly,
    Rejected { message: String },
}

/// 結果カード
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub mushroom_type: String,
    pub confidence: String,
    pub danger_tip: String,
    pub detect_time: String,
    /// キャッシュ回避トークン付きURL
    pub image_url: Option<String>,
    pub image_failed: bool,
}

impl ResultCard {
    fn from_result(result: DetectionResult, cache_token: u64) -> Self {
        Self {
            confidence: format_confidence(result.confidence),
            image_url: result
                .result_image
                .as_deref()
                .map(|url| cache_busted(url, cache_token)),
            mushroom_type: result.mushroom_type,
            danger_tip: result.danger_tip,
            detect_time: result.detect_time,
            image_failed: false,
        }
    }

    /// 表示する画像URL（読み込み失敗後はNone）
    pub fn visible_image(&self) -> Option<&str> {
        if self.image_failed {
            None
        } else {
            self.image_url.as_deref()
        }
    }

    /// 画像の代わりに表示するラベル
    pub fn image_label(&self) -> Option<&'static str> {
        (self.image_failed || self.image_url.is_none()).then_some(IMAGE_LOAD_FAILED_TEXT)
    }
}

/// 結果表示領域の状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Detecting,
    Showing(ResultCard),
    Failed(String),
    Rejected(String),
}

/// 識別応答を適用した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectEffect {
    /// 古い応答なので捨てた
    Discarded,
    /// 結果カードを表示した（統計を更新する）
    ShowResult,
    /// エラーメッセージを表示する（他の状態は変えない）
    ShowMessage(String),
}

impl DetectEffect {
    pub fn refreshes_stats(&self) -> bool {
        matches!(self, DetectEffect::ShowResult)
    }
}

#[derive(Debug, Default)]
pub struct UploadController {
    seq: RequestSeq,
    preview: Preview,
    state: UploadState,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn result_card(&self) -> Option<&ResultCard> {
        match &self.state {
            UploadState::Showing(card) => Some(card),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.seq.pending()
    }

    /// ファイルを受け付ける
    ///
    /// # Arguments
    /// * `file_name` - 表示用ファイル名
    /// * `mime_type` - 申告されたMIMEタイプ
    ///
    /// # Returns
    /// 画像なら識別用チケット、動画ならプレビューのみ、それ以外は拒否
    pub fn submit(&mut self, file_name: &str, mime_type: &str) -> Submission {
        match MediaKind::from_mime(mime_type) {
            MediaKind::Image => {
                self.preview = Preview::Image { file_name: file_name.to_string() };
                self.state = UploadState::Detecting;
                Submission::Detect { ticket: self.seq.issue() }
            }
            MediaKind::Video => {
                self.preview = Preview::Video { file_name: file_name.to_string() };
                Submission::PreviewOnly
            }
            MediaKind::Unsupported => {
                let shown = if mime_type.is_empty() { "unknown" } else { mime_type };
                let message = format!("不支持的文件类型：{}（{}）", file_name, shown);
                self.state = UploadState::Rejected(message.clone());
                Submission::Rejected { message }
            }
        }
    }

    /// プレビューを消す（プレビュー画像クリック時）
    pub fn clear_preview(&mut self) {
        self.preview = Preview::None;
    }

    /// 識別応答を適用
    ///
    /// # Arguments
    /// * `cache_token` - 結果画像URLに付与するトークン（通常は現在時刻ミリ秒）
    pub fn apply(
        &mut self,
        ticket: Ticket,
        outcome: ApiOutcome<DetectionResult>,
        cache_token: u64,
    ) -> DetectEffect {
        if !self.seq.settle(ticket) {
            return DetectEffect::Discarded;
        }
        match outcome {
            Ok(result) => {
                self.state = UploadState::Showing(ResultCard::from_result(result, cache_token));
                DetectEffect::ShowResult
            }
            Err(failure) => {
                let message = failure.user_message(DETECT_FAILED_TEXT);
                self.state = UploadState::Failed(message.clone());
                DetectEffect::ShowMessage(message)
            }
        }
    }

    /// 中断（アンマウント時など）
    pub fn cancel(&mut self) -> Option<Ticket> {
        let cancelled = self.seq.cancel();
        if cancelled.is_some() && self.state == UploadState::Detecting {
            self.state = UploadState::Idle;
        }
        cancelled
    }

    /// 結果画像の読み込み失敗を記録
    pub fn mark_image_failed(&mut self) {
        if let UploadState::Showing(card) = &mut self.state {
            card.image_failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;

    fn sample_result() -> DetectionResult {
        DetectionResult {
            mushroom_type: "松茸".to_string(),
            confidence: Some(0.9234),
            danger_tip: String::new(),
            detect_time: "2024-01-01 10:00".to_string(),
            result_image: Some("/r/1.png".to_string()),
        }
    }

    fn detect_ticket(submission: Submission) -> Ticket {
        match submission {
            Submission::Detect { ticket } => ticket,
            other => panic!("識別チケットが発行されない: {:?}", other),
        }
    }

    #[test]
    fn test_image_success_shows_card() {
        let mut controller = UploadController::new();
        let ticket = detect_ticket(controller.submit("a.jpg", "image/jpeg"));
        assert_eq!(controller.preview(), &Preview::Image { file_name: "a.jpg".into() });
        assert_eq!(controller.state(), &UploadState::Detecting);

        let effect = controller.apply(ticket, Ok(sample_result()), 1_704_074_400_000);
        assert!(effect.refreshes_stats());

        let card = controller.result_card().expect("結果カードがない");
        assert_eq!(card.mushroom_type, "松茸");
        assert_eq!(card.confidence, "92.34%");
        assert_eq!(card.detect_time, "2024-01-01 10:00");
        assert_eq!(card.visible_image(), Some("/r/1.png?t=1704074400000"));
        assert_eq!(card.image_label(), None);
    }

    #[test]
    fn test_application_failure_shows_message() {
        let mut controller = UploadController::new();
        let ticket = detect_ticket(controller.submit("a.jpg", "image/png"));

        let failure = ApiFailure::Application(Some("no mushroom detected".into()));
        let effect = controller.apply(ticket, Err(failure), 1);
        assert_eq!(effect, DetectEffect::ShowMessage("no mushroom detected".into()));
        assert!(!effect.refreshes_stats());
        assert!(controller.result_card().is_none());
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let mut controller = UploadController::new();
        let ticket = detect_ticket(controller.submit("a.jpg", "image/png"));
        let effect = controller.apply(ticket, Err(ApiFailure::Application(None)), 1);
        assert_eq!(effect, DetectEffect::ShowMessage(DETECT_FAILED_TEXT.into()));
    }

    #[test]
    fn test_video_preview_only() {
        let mut controller = UploadController::new();
        assert_eq!(controller.submit("clip.mp4", "video/mp4"), Submission::PreviewOnly);
        assert_eq!(controller.preview(), &Preview::Video { file_name: "clip.mp4".into() });
        assert_eq!(controller.pending(), None);
        assert_eq!(controller.state(), &UploadState::Idle);
    }

    #[test]
    fn test_unsupported_rejected() {
        let mut controller = UploadController::new();
        let submission = controller.submit("doc.pdf", "application/pdf");
        assert!(matches!(submission, Submission::Rejected { ref message } if message.contains("doc.pdf")));
        assert_eq!(controller.preview(), &Preview::None);
        assert_eq!(controller.pending(), None);
    }

    #[test]
    fn test_superseded_detect_discarded() {
        let mut controller = UploadController::new();
        let first = detect_ticket(controller.submit("a.jpg", "image/jpeg"));
        let second = detect_ticket(controller.submit("b.jpg", "image/jpeg"));

        assert_eq!(controller.apply(first, Ok(sample_result()), 1), DetectEffect::Discarded);
        assert_eq!(controller.state(), &UploadState::Detecting);

        let mut newer = sample_result();
        newer.mushroom_type = "松露".into();
        assert_eq!(controller.apply(second, Ok(newer), 2), DetectEffect::ShowResult);
        assert_eq!(controller.result_card().map(|c| c.mushroom_type.as_str()), Some("松露"));
    }

    #[test]
    fn test_image_failure_replaced_by_label() {
        let mut controller = UploadController::new();
        let ticket = detect_ticket(controller.submit("a.jpg", "image/jpeg"));
        controller.apply(ticket, Ok(sample_result()), 5);
        controller.mark_image_failed();

        let card = controller.result_card().expect("結果カードがない");
        assert_eq!(card.visible_image(), None);
        assert_eq!(card.image_label(), Some(IMAGE_LOAD_FAILED_TEXT));
    }

    #[test]
    fn test_cancel_resets_detecting() {
        let mut controller = UploadController::new();
        let ticket = detect_ticket(controller.submit("a.jpg", "image/jpeg"));
        assert_eq!(controller.cancel(), Some(ticket));
        assert_eq!(controller.state(), &UploadState::Idle);
        assert_eq!(controller.apply(ticket, Ok(sample_result()), 1), DetectEffect::Discarded);
    }
}
