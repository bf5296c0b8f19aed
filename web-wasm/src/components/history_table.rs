//! 履歴テーブル（フィルタ・ページング）

use crate::app::AppState;
use leptos::prelude::*;
use mushroom_scout_common::{DaysFilter, HistoryPhase, TypeFilter};

#[component]
pub fn HistoryTable(state: AppState) -> impl IntoView {
    let history = Memo::new(move |_| state.history.with(|h| h.view()));

    let on_days_change = move |ev: web_sys::Event| match event_target_value(&ev).parse::<DaysFilter>() {
        Ok(days) => state.set_days(days),
        Err(e) => gloo::console::warn!(e.to_string()),
    };

    let on_type_change = move |ev: web_sys::Event| match event_target_value(&ev).parse::<TypeFilter>() {
        Ok(type_filter) => state.set_type(type_filter),
        Err(e) => gloo::console::warn!(e.to_string()),
    };

    let days_options = DaysFilter::ALL
        .into_iter()
        .map(|days| {
            view! {
                <option
                    value=days.as_param()
                    selected=move || history.with(|v| v.days == days)
                >
                    {days.label()}
                </option>
            }
        })
        .collect_view();

    let type_options = TypeFilter::ALL
        .into_iter()
        .map(|type_filter| {
            view! {
                <option
                    value=type_filter.as_param()
                    selected=move || history.with(|v| v.type_filter == type_filter)
                >
                    {type_filter.label()}
                </option>
            }
        })
        .collect_view();

    let body = move || {
        history.with(|v| {
            let colspan = v.colspan.to_string();
            if let Some(text) = v.placeholder {
                return view! { <tr><td colspan=colspan>{text}</td></tr> }.into_any();
            }
            if v.rows.is_empty() && v.phase == HistoryPhase::Loading {
                return view! { <tr><td colspan=colspan>"加载中..."</td></tr> }.into_any();
            }
            v.rows
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, row)| {
                    view! {
                        <tr>
                            <td>{row.detect_time}</td>
                            <td>{row.mushroom_type}</td>
                            <td>{row.location}</td>
                            <td>{row.confidence}</td>
                            <td>{row.danger_tip}</td>
                            <td>
                                <button
                                    class="btn btn-primary btn-detail"
                                    on:click=move |_| state.open_detail(index)
                                >
                                    "详情"
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <section class="history-section">
            <h2>"识别历史"</h2>

            <div class="filters">
                <select id="dateFilter" on:change=on_days_change>
                    {days_options}
                </select>
                <select id="typeFilter" on:change=on_type_change>
                    {type_options}
                </select>
                <button class="btn" on:click=move |_| state.mount_history()>"刷新"</button>
            </div>

            <table class="history-table">
                <thead>
                    <tr>
                        <th>"识别时间"</th>
                        <th>"菌类"</th>
                        <th>"地点"</th>
                        <th>"置信度"</th>
                        <th>"危险提示"</th>
                        <th>"操作"</th>
                    </tr>
                </thead>
                <tbody id="historyTableBody">{body}</tbody>
            </table>

            {move || history.with(|v| v.error.clone()).map(|message| view! {
                <p class="history-error">{message}</p>
            })}

            <div class="pagination">
                <button
                    id="prevPage"
                    class="btn"
                    disabled=move || !history.with(|v| v.prev_enabled)
                    on:click=move |_| state.prev_page()
                >
                    "上一页"
                </button>
                <span id="pageInfo">
                    {move || history.with(|v| match v.total {
                        Some(total) => format!("{}（共 {} 条）", v.page_label, total),
                        None => v.page_label.clone(),
                    })}
                </span>
                <button
                    id="nextPage"
                    class="btn"
                    disabled=move || !history.with(|v| v.next_enabled)
                    on:click=move |_| state.next_page()
                >
                    "下一页"
                </button>
            </div>
        </section>
    }
}
