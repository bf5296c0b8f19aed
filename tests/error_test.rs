//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use mushroom_scout::client::Upload;
use mushroom_scout::error::MushroomScoutError;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルをアップロードしようとした場合
#[test]
fn test_upload_nonexistent_file() {
    let result = Upload::from_path(Path::new("/nonexistent/path/12345.jpg"));
    assert!(matches!(result, Err(MushroomScoutError::FileNotFound(_))));
}

/// ディレクトリを指定した場合
#[test]
fn test_upload_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = Upload::from_path(dir.path());
    assert!(matches!(result, Err(MushroomScoutError::FileNotFound(_))));
}

/// 拡張子からMIMEタイプを推定
#[test]
fn test_upload_mime_from_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = dir.path().join("松茸.JPG");
    let text = dir.path().join("memo.txt");
    std::fs::write(&image, b"\xFF\xD8\xFF").unwrap();
    std::fs::write(&text, "hello").unwrap();

    let upload = Upload::from_path(&image).expect("読み込み失敗");
    assert_eq!(upload.file_name, "松茸.JPG");
    assert_eq!(upload.mime_type, "image/jpeg");
    assert_eq!(upload.bytes, b"\xFF\xD8\xFF");

    let upload = Upload::from_path(&text).expect("読み込み失敗");
    assert_eq!(upload.mime_type, "application/octet-stream");
}

/// MushroomScoutErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MushroomScoutError::Config("テスト設定エラー".to_string()),
        MushroomScoutError::FileNotFound("test.jpg".to_string()),
        MushroomScoutError::UnsupportedMedia("doc.pdf".to_string()),
        MushroomScoutError::ApiCall("no mushroom detected".to_string()),
        MushroomScoutError::Logging("already set".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// ApiCallは受け取ったメッセージをそのまま含む
#[test]
fn test_api_call_message_preserved() {
    let err = MushroomScoutError::ApiCall("no mushroom detected".to_string());
    assert!(format!("{}", err).contains("no mushroom detected"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MushroomScoutError = io_err.into();

    assert!(matches!(err, MushroomScoutError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MushroomScoutError = json_err.into();

    assert!(matches!(err, MushroomScoutError::JsonParse(_)));
}
