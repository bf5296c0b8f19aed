use thiserror::Error;

#[derive(Error, Debug)]
pub enum MushroomScoutError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}")]
    UnsupportedMedia(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("ログ初期化エラー: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, MushroomScoutError>;
