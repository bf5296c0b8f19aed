//! 選択ファイルのメディア種別判定

use std::path::Path;

/// アップロード対象の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// 画像: プレビュー + 識別リクエスト
    Image,
    /// 動画: プレビューのみ（解析は未実装）
    Video,
    Unsupported,
}

impl MediaKind {
    /// MIMEタイプから判定
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Unsupported
        }
    }
}

/// 拡張子からMIMEタイプを推定（ブラウザがMIMEを教えてくれないCLI用）
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(MediaKind::from_mime("image/jpeg"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("IMAGE/PNG"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Unsupported);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Unsupported);
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("a/松茸.JPG")), Some("image/jpeg"));
        assert_eq!(guess_mime(Path::new("clip.webm")), Some("video/webm"));
        assert_eq!(guess_mime(Path::new("notes.txt")), None);
        assert_eq!(guess_mime(Path::new("no_extension")), None);
    }
}
