//! 履歴クエリ（フィルタ + ページ）
//!
//! [`PageQuery`] は不変の値。フィルタ変更やページ移動のたびに新しい値を作り直す。

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// 1ページあたりの件数（サーバのデフォルトと同じ）
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// 期間フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaysFilter {
    Today,
    #[default]
    Week,
    Month,
    All,
}

impl DaysFilter {
    pub const ALL: [DaysFilter; 4] = [
        DaysFilter::Today,
        DaysFilter::Week,
        DaysFilter::Month,
        DaysFilter::All,
    ];

    /// クエリパラメータ `days` の値
    pub fn as_param(&self) -> &'static str {
        match self {
            DaysFilter::Today => "1",
            DaysFilter::Week => "7",
            DaysFilter::Month => "30",
            DaysFilter::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DaysFilter::Today => "今天",
            DaysFilter::Week => "近7天",
            DaysFilter::Month => "近30天",
            DaysFilter::All => "全部",
        }
    }
}

impl FromStr for DaysFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "today" => Ok(DaysFilter::Today),
            "7" | "week" => Ok(DaysFilter::Week),
            "30" | "month" => Ok(DaysFilter::Month),
            "all" => Ok(DaysFilter::All),
            _ => Err(Error::InvalidQuery(format!("days={}", s))),
        }
    }
}

impl fmt::Display for DaysFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// 菌類フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Songrong,
    Jizong,
    Niugan,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 4] = [
        TypeFilter::All,
        TypeFilter::Songrong,
        TypeFilter::Jizong,
        TypeFilter::Niugan,
    ];

    /// クエリパラメータ `type` の値
    pub fn as_param(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Songrong => "songrong",
            TypeFilter::Jizong => "jizong",
            TypeFilter::Niugan => "niugan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "全部类型",
            TypeFilter::Songrong => "松茸",
            TypeFilter::Jizong => "鸡枞",
            TypeFilter::Niugan => "牛肝菌",
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "all" | "全部类型" => Ok(TypeFilter::All),
            "songrong" | "松茸" => Ok(TypeFilter::Songrong),
            "jizong" | "鸡枞" => Ok(TypeFilter::Jizong),
            "niugan" | "牛肝菌" => Ok(TypeFilter::Niugan),
            _ => Err(Error::InvalidQuery(format!("type={}", s))),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// 履歴クエリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    days: DaysFilter,
    type_filter: TypeFilter,
    page: u32,
    page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            days: DaysFilter::default(),
            type_filter: TypeFilter::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    pub fn new(days: DaysFilter, type_filter: TypeFilter) -> Self {
        Self {
            days,
            type_filter,
            ..Self::default()
        }
    }

    pub fn days(&self) -> DaysFilter {
        self.days
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 期間フィルタを変更（ページは1に戻る）
    pub fn with_days(self, days: DaysFilter) -> Self {
        Self { days, page: 1, ..self }
    }

    /// 菌類フィルタを変更（ページは1に戻る）
    pub fn with_type(self, type_filter: TypeFilter) -> Self {
        Self { type_filter, page: 1, ..self }
    }

    /// ページを指定（1未満は1にする）
    pub fn with_page(self, page: u32) -> Self {
        Self { page: page.max(1), ..self }
    }

    pub fn with_page_size(self, page_size: u32) -> Self {
        Self { page_size: page_size.max(1), ..self }
    }

    /// クエリパラメータ一覧
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("days", self.days.as_param().to_string()),
            ("type", self.type_filter.as_param().to_string()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }

    /// `days=7&type=all&page=1&page_size=8` 形式
    ///
    /// 値はすべてASCIIの英数字なのでエンコード不要
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = PageQuery::default();
        assert_eq!(query.days(), DaysFilter::Week);
        assert_eq!(query.type_filter(), TypeFilter::All);
        assert_eq!(query.page(), 1);
        assert_eq!(query.to_query_string(), "days=7&type=all&page=1&page_size=8");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let query = PageQuery::default().with_page(4);
        assert_eq!(query.with_days(DaysFilter::All).page(), 1);
        assert_eq!(query.with_type(TypeFilter::Niugan).page(), 1);
        // 元の値は変わらない
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn test_with_page_lower_bound() {
        assert_eq!(PageQuery::default().with_page(0).page(), 1);
    }

    #[test]
    fn test_days_filter_parse() {
        assert_eq!("all".parse::<DaysFilter>().unwrap(), DaysFilter::All);
        assert_eq!("30".parse::<DaysFilter>().unwrap(), DaysFilter::Month);
        assert!("14".parse::<DaysFilter>().is_err());
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!("songrong".parse::<TypeFilter>().unwrap(), TypeFilter::Songrong);
        assert_eq!("牛肝菌".parse::<TypeFilter>().unwrap(), TypeFilter::Niugan);
        assert!("mystery".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_query_string_with_filters() {
        let query = PageQuery::new(DaysFilter::Month, TypeFilter::Jizong).with_page(3);
        assert_eq!(query.to_query_string(), "days=30&type=jizong&page=3&page_size=8");
    }
}
