//! リクエスト順序トークン
//!
//! コントローラはリクエストを発行するたびに単調増加の [`Ticket`] を受け取る。
//! 応答は最新のチケットと一致する場合のみ適用し、それ以外（遅れて届いた古い応答）は捨てる。

use std::fmt;

/// 発行済みリクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 発行されたリクエスト（チケット + リクエスト内容）
#[derive(Debug, Clone, PartialEq)]
pub struct Issued<T> {
    pub ticket: Ticket,
    pub request: T,
}

/// リクエスト種別ごとのシーケンス
#[derive(Debug, Clone, Default)]
pub struct RequestSeq {
    last: u64,
    pending: Option<Ticket>,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいチケットを発行し、以前の未完了チケットを無効化する
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        let ticket = Ticket(self.last);
        self.pending = Some(ticket);
        ticket
    }

    /// 応答を受け付けるか判定し、受け付けた場合は完了にする
    ///
    /// 同じチケットを2回渡しても2回目はfalse
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// 未完了のチケットを破棄（中断用）
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let mut seq = RequestSeq::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert_eq!(seq.pending(), Some(second));
    }

    #[test]
    fn test_settle_only_latest() {
        let mut seq = RequestSeq::new();
        let old = seq.issue();
        let new = seq.issue();

        assert!(!seq.settle(old));
        assert!(seq.settle(new));
        assert!(!seq.is_pending());
    }

    #[test]
    fn test_settle_twice_rejected() {
        let mut seq = RequestSeq::new();
        let ticket = seq.issue();
        assert!(seq.settle(ticket));
        assert!(!seq.settle(ticket));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut seq = RequestSeq::new();
        let ticket = seq.issue();
        assert_eq!(seq.cancel(), Some(ticket));
        assert!(!seq.settle(ticket));
        assert_eq!(seq.cancel(), None);
    }

    #[test]
    fn test_ticket_display() {
        let mut seq = RequestSeq::new();
        assert_eq!(seq.pending(), None);
        assert_eq!(seq.issue().to_string(), "#1");
    }
}
