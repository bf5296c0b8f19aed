//! 詳細ビューア
//!
//! オーバーレイは常に1つだけ。開いている間に別のレコードを開くと内容を置き換える。

use crate::format::format_confidence;
use crate::types::DetectionRecord;

pub const ORIGINAL_IMAGE_LABEL: &str = "原始图片";
pub const RESULT_IMAGE_LABEL: &str = "分析结果";

/// オーバーレイの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub original_image: String,
    pub result_image: String,
    pub mushroom_type: String,
    pub confidence: String,
    pub danger_tip: String,
    pub detect_time: String,
}

impl From<&DetectionRecord> for DetailView {
    fn from(record: &DetectionRecord) -> Self {
        Self {
            original_image: record.file_path.clone().unwrap_or_default(),
            result_image: record.result_path.clone().unwrap_or_default(),
            mushroom_type: record.mushroom_type.clone(),
            confidence: format_confidence(record.confidence),
            danger_tip: record.danger_tip.clone().unwrap_or_default(),
            detect_time: record.detect_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailViewer {
    current: Option<DetailView>,
}

impl DetailViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, record: &DetectionRecord) -> &DetailView {
        self.current.insert(DetailView::from(record))
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// オーバーレイ外側のクリック
    ///
    /// `inside_content` がfalseなら閉じる
    pub fn click(&mut self, inside_content: bool) {
        if !inside_content {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&DetailView> {
        self.current.as_ref()
    }
}
