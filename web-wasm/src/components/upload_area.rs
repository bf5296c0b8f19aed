//! アップロードエリアコンポーネント
//!
//! 画像はプレビューして識別、動画はプレビューのみ、それ以外は拒否メッセージを表示

use crate::app::AppState;
use leptos::prelude::*;
use mushroom_scout_common::{Preview, UploadState};
use web_sys::{DragEvent, FileList, HtmlInputElement, MouseEvent};

#[component]
pub fn UploadArea(state: AppState) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let handle_files = move |files: FileList| {
        for i in 0..files.length() {
            if let Some(file) = files.get(i) {
                state.submit_file(file);
            }
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_: MouseEvent| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // 同じファイルを再選択できるようにする
        input.set_value("");
    };

    let preview = move || {
        let url = state.preview_url.get().unwrap_or_default();
        match state.upload.with(|u| u.preview().clone()) {
            Preview::Image { file_name } => view! {
                <img
                    class="preview-item"
                    src=url
                    alt="原始图片"
                    title=file_name
                    on:click=move |ev: MouseEvent| {
                        ev.stop_propagation();
                        state.clear_preview();
                    }
                />
            }
            .into_any(),
            Preview::Video { file_name } => view! {
                <video
                    class="preview-item"
                    src=url
                    title=file_name
                    controls=true
                    on:click=move |ev: MouseEvent| ev.stop_propagation()
                />
                <p class="text-muted">"视频仅支持预览"</p>
            }
            .into_any(),
            Preview::None => view! {
                <div class="upload-hint">
                    <div class="upload-icon">"🍄"</div>
                    <p>"拖拽图片或视频到此处，或点击选择文件"</p>
                    <p class="text-muted">"支持格式: JPEG, PNG, GIF, BMP, WebP / MP4, WebM"</p>
                </div>
            }
            .into_any(),
        }
    };

    let status = move || {
        state.upload.with(|u| match u.state() {
            UploadState::Detecting => Some(view! { <p class="upload-status">"识别中..."</p> }.into_any()),
            UploadState::Rejected(message) => {
                let message = message.clone();
                Some(view! { <p class="upload-error">{message}</p> }.into_any())
            }
            _ => None,
        })
    };

    view! {
        <div
            id="dropZone"
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                node_ref=file_input
                type="file"
                accept="image/*,video/*"
                style="display: none"
                on:change=on_change
            />
            <div id="previewArea">{preview}</div>
        </div>
        {status}
    }
}
