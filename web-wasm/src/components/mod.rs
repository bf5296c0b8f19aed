//! UIコンポーネント

pub mod detail_modal;
pub mod header;
pub mod history_table;
pub mod result_card;
pub mod stats_panel;
pub mod upload_area;
