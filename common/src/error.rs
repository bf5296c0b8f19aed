//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid query value: {0}")]
    InvalidQuery(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_query() {
        let error = Error::InvalidQuery("days=14".to_string());
        assert_eq!(format!("{}", error), "Invalid query value: days=14");
    }
}
