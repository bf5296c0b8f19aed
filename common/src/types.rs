//! 識別結果・統計の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DetectionRecord: 履歴1件分の識別結果（サーバ所有・クライアントでは不変）
//! - DetectionResult: `/api/detect` の成功ペイロード
//! - PageResult: `/api/history` 1回分の結果
//! - StatsOverview / ClassCount: 統計ダッシュボード用

use serde::{Deserialize, Deserializer, Serialize};

/// 既知の菌類12種（チャートのデフォルト軸順）
pub const MUSHROOM_CLASSES: [&str; 12] = [
    "奶浆菌", "干巴菌", "松茸", "松露", "牛肝菌", "珊瑚菌",
    "竹荪", "羊肚菌", "见手青", "青头菌", "鸡枞菌", "鸡油菌",
];

/// `null` を空文字列として読む
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 履歴レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(deserialize_with = "null_as_empty")]
    pub detect_time: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub mushroom_type: String,

    pub location: Option<String>,

    /// 0.0〜1.0の確率。欠損時はNone
    pub confidence: Option<f64>,

    pub danger_tip: Option<String>,

    /// 元画像のURL
    pub file_path: Option<String>,

    /// 標注画像のURL
    pub result_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// 識別API成功時のペイロード
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionResult {
    pub mushroom_type: String,
    pub confidence: Option<f64>,
    pub danger_tip: String,
    pub detect_time: String,
    pub result_image: Option<String>,
}

/// 履歴クエリ1回分の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub records: Vec<DetectionRecord>,
    pub total_pages: u32,
    pub total: Option<u64>,
}

/// 統計概要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOverview {
    pub today_count: u64,
    pub total_count: u64,
    pub latest_time: Option<String>,
}

/// 菌類ごとの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCount {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

impl ClassCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self { name: name.into(), count }
    }
}

/// 分布が取得できなかった場合の代替データ（12種すべて0件）
pub fn default_distribution() -> Vec<ClassCount> {
    MUSHROOM_CLASSES
        .iter()
        .map(|name| ClassCount::new(*name, 0))
        .collect()
}
