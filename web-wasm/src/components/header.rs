//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"野生菌智能识别"</h1>
            <p class="subtitle">"上传图片识别菌类，查看历史记录与统计"</p>
        </header>
    }
}
