//! 表示用フォーマット

/// 信頼度をパーセント表示（小数2桁）
///
/// 欠損時は空文字列（"0.00%" にはしない）。
/// ちょうど中間の値は0から遠い方へ丸める（0.125% → "0.13%"）。
///
/// # Examples
/// ```
/// use mushroom_scout_common::format_confidence;
///
/// assert_eq!(format_confidence(Some(0.8675)), "86.75%");
/// assert_eq!(format_confidence(None), "");
/// ```
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) if value.is_finite() => {
            // `{:.2}` は偶数丸めなので先に小数2桁へ丸めておく
            let percent = (value * 100.0 * 100.0).round() / 100.0;
            format!("{:.2}%", percent)
        }
        _ => String::new(),
    }
}

/// 画像URLにキャッシュ回避トークンを付与
///
/// 同じファイル名で再識別したときに古い標注画像が表示されないようにする。
/// トークン0は無効なので1に切り上げる。
pub fn cache_busted(url: &str, token: u64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, token.max(1))
}
