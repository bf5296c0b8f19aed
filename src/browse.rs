//! 対話式の履歴閲覧
//!
//! 無効な操作（1ページ目での「上一页」など）はメニューに出さない。

use crate::client::MushroomApi;
use crate::error::Result;
use crate::render::{render_detail, render_history};
use crate::session::Session;
use dialoguer::Select;
use mushroom_scout_common::{DaysFilter, HistoryView, TypeFilter};

/// 対話アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    NextPage,
    PrevPage,
    ChangeDays,
    ChangeType,
    /// 行を選んで詳細を開く
    Detail,
    Reload,
    Quit,
}

impl BrowseAction {
    pub fn label(&self) -> &'static str {
        match self {
            BrowseAction::NextPage => "下一页",
            BrowseAction::PrevPage => "上一页",
            BrowseAction::ChangeDays => "切换时间范围",
            BrowseAction::ChangeType => "切换菌类",
            BrowseAction::Detail => "查看详情",
            BrowseAction::Reload => "刷新",
            BrowseAction::Quit => "退出",
        }
    }
}

/// 現在の表示で選べる操作
pub fn available_actions(view: &HistoryView) -> Vec<BrowseAction> {
    let mut actions = Vec::new();
    if view.next_enabled {
        actions.push(BrowseAction::NextPage);
    }
    if view.prev_enabled {
        actions.push(BrowseAction::PrevPage);
    }
    actions.push(BrowseAction::ChangeDays);
    actions.push(BrowseAction::ChangeType);
    if !view.rows.is_empty() {
        actions.push(BrowseAction::Detail);
    }
    actions.push(BrowseAction::Reload);
    actions.push(BrowseAction::Quit);
    actions
}

fn print_history<A: MushroomApi>(session: &Session<A>) {
    println!("\n{}\n", render_history(&session.history().view()));
}

pub async fn run_browse<A: MushroomApi>(session: &mut Session<A>) -> Result<()> {
    session.load_history().await;
    print_history(session);

    loop {
        let view = session.history().view();
        let actions = available_actions(&view);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            BrowseAction::NextPage => {
                session.next_page().await;
            }
            BrowseAction::PrevPage => {
                session.prev_page().await;
            }
            BrowseAction::ChangeDays => {
                let labels: Vec<&str> = DaysFilter::ALL.iter().map(|d| d.label()).collect();
                let current = DaysFilter::ALL.iter().position(|d| *d == view.days).unwrap_or(0);
                let index = Select::new()
                    .with_prompt("时间范围")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                session.set_days(DaysFilter::ALL[index]).await;
            }
            BrowseAction::ChangeType => {
                let labels: Vec<&str> = TypeFilter::ALL.iter().map(|t| t.label()).collect();
                let current = TypeFilter::ALL.iter().position(|t| *t == view.type_filter).unwrap_or(0);
                let index = Select::new()
                    .with_prompt("菌类")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                session.set_type(TypeFilter::ALL[index]).await;
            }
            BrowseAction::Detail => {
                let rows: Vec<String> = view
                    .rows
                    .iter()
                    .map(|r| format!("{}  {}  {}", r.detect_time, r.mushroom_type, r.confidence))
                    .collect();
                let index = Select::new()
                    .with_prompt("选择记录")
                    .items(&rows)
                    .default(0)
                    .interact()?;
                if let Some(detail) = session.open_detail(index) {
                    println!("\n{}\n", render_detail(detail));
                }
                Select::new().items(&["关闭"]).default(0).interact()?;
                session.close_detail();
                continue;
            }
            BrowseAction::Reload => {
                session.reload_history().await;
            }
            BrowseAction::Quit => break,
        }
        print_history(session);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushroom_scout_common::{DetectionRecord, HistoryController, PageResult};

    fn view_after(records: usize, total_pages: u32, next_clicks: u32) -> HistoryView {
        let mut controller = HistoryController::default();
        let issued = controller.mount();
        let page = || PageResult {
            records: vec![DetectionRecord::default(); records],
            total_pages,
            total: None,
        };
        controller.apply(issued.ticket, Ok(page()));
        for _ in 0..next_clicks {
            let issued = controller.next_page().expect("次ページがない");
            controller.apply(issued.ticket, Ok(page()));
        }
        controller.view()
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let actions = available_actions(&view_after(3, 3, 0));
        assert!(actions.contains(&BrowseAction::NextPage));
        assert!(!actions.contains(&BrowseAction::PrevPage));
        assert!(actions.contains(&BrowseAction::Detail));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let actions = available_actions(&view_after(3, 2, 1));
        assert!(!actions.contains(&BrowseAction::NextPage));
        assert!(actions.contains(&BrowseAction::PrevPage));
    }

    #[test]
    fn test_empty_page_has_no_detail() {
        let actions = available_actions(&view_after(0, 0, 0));
        assert!(!actions.contains(&BrowseAction::Detail));
        assert_eq!(actions.last(), Some(&BrowseAction::Quit));
    }
}
