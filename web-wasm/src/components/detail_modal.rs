//! 詳細モーダル
//!
//! 閉じるボタンかコンテンツ外側のクリックで閉じる

use crate::app::AppState;
use leptos::prelude::*;
use mushroom_scout_common::detail::{ORIGINAL_IMAGE_LABEL, RESULT_IMAGE_LABEL};
use web_sys::MouseEvent;

#[component]
pub fn DetailModal(state: AppState) -> impl IntoView {
    move || {
        state.detail.with(|d| d.current().cloned()).map(|detail| {
            view! {
                <div id="detailModal" class="modal" on:click=move |_| state.click_overlay(false)>
                    <div
                        class="modal-content"
                        on:click=move |ev: MouseEvent| {
                            ev.stop_propagation();
                            state.click_overlay(true);
                        }
                    >
                        <span class="close-btn" on:click=move |_| state.close_detail()>"×"</span>
                        <div id="detailContent">
                            <div class="detail-images">
                                <figure>
                                    <figcaption>{ORIGINAL_IMAGE_LABEL}</figcaption>
                                    <img
                                        class="result-img"
                                        src=detail.original_image
                                        alt=ORIGINAL_IMAGE_LABEL
                                    />
                                </figure>
                                <figure>
                                    <figcaption>{RESULT_IMAGE_LABEL}</figcaption>
                                    <img
                                        class="result-img"
                                        src=detail.result_image
                                        alt=RESULT_IMAGE_LABEL
                                    />
                                </figure>
                            </div>
                            <div class="result-mushroom">{detail.mushroom_type}</div>
                            <div class="result-confidence">"置信度：" {detail.confidence}</div>
                            <div class="danger-tip">{detail.danger_tip}</div>
                            <div class="result-time">"识别时间：" {detail.detect_time}</div>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
