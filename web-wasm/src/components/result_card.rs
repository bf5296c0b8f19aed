//! 識別結果カード

use crate::app::AppState;
use leptos::prelude::*;
use mushroom_scout_common::UploadState;

#[component]
pub fn ResultCardView(state: AppState) -> impl IntoView {
    let content = move || {
        state.upload.with(|u| match u.state() {
            UploadState::Showing(card) => {
                let image = match card.visible_image() {
                    Some(src) => {
                        let src = src.to_string();
                        view! {
                            <img
                                class="result-img"
                                src=src
                                alt="识别结果"
                                on:error=move |_| state.mark_image_failed()
                            />
                        }
                        .into_any()
                    }
                    None => {
                        let label = card.image_label().unwrap_or_default();
                        view! { <p class="image-failed">{label}</p> }.into_any()
                    }
                };
                let card = card.clone();
                Some(
                    view! {
                        <div class="result-card">
                            <div class="result-mushroom">"菌类：" {card.mushroom_type}</div>
                            <div class="result-confidence">"置信度：" {card.confidence}</div>
                            <div class="danger-tip">{card.danger_tip}</div>
                            <div class="result-time">"识别时间：" {card.detect_time}</div>
                            {image}
                        </div>
                    }
                    .into_any(),
                )
            }
            UploadState::Failed(message) => {
                let message = message.clone();
                Some(view! { <div class="result-error">{message}</div> }.into_any())
            }
            _ => None,
        })
    };

    view! { <div id="resultArea">{content}</div> }
}
