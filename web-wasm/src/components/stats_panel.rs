//! 統計パネル（概要カウンタ + 分布チャート）

use crate::app::{AppState, CHART_ELEMENT_ID};
use gloo::events::EventListener;
use leptos::prelude::*;

#[component]
pub fn StatsPanel(state: AppState) -> impl IntoView {
    let overview = Memo::new(move |_| state.stats.with(|s| s.overview_view()));

    // ウィンドウサイズ変更でチャートを再レイアウト（コンポーネント破棄時に解除）
    if let Some(window) = web_sys::window() {
        let listener = EventListener::new(&window, "resize", move |_| state.resize_chart());
        StoredValue::new_local(listener);
    }

    view! {
        <section class="stats-section">
            <div class="stat-cards">
                <div class="stat-card">
                    <div class="stat-label">"今日识别"</div>
                    <div id="todayCount" class="stat-value">
                        {move || overview.with(|o| o.today_count.clone())}
                    </div>
                </div>
                <div class="stat-card">
                    <div class="stat-label">"累计识别"</div>
                    <div id="totalCount" class="stat-value">
                        {move || overview.with(|o| o.total_count.clone())}
                    </div>
                </div>
            </div>
            {move || overview.with(|o| o.latest_time.clone()).map(|time| view! {
                <p class="latest-time">"最近识别：" {time}</p>
            })}
            <div id=CHART_ELEMENT_ID class="chart-container"></div>
        </section>
    }
}
