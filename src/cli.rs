use clap::{Parser, Subcommand};
use mushroom_scout_common::{DaysFilter, TypeFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mushroom-scout")]
#[command(about = "野生菌识别客户端（识别・历史记录・统计）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して識別
    Detect {
        /// 画像ファイル（動画はプレビューのみで送信しない）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 識別履歴を1ページ表示
    History {
        /// 期間 (1/7/30/all)
        #[arg(short, long, default_value = "7")]
        days: DaysFilter,

        /// 菌類 (all/songrong/jizong/niugan)
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,

        /// ページ番号
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// 履歴を対話的に閲覧（ページ移動・フィルタ・詳細）
    Browse {
        /// 期間 (1/7/30/all)
        #[arg(short, long, default_value = "7")]
        days: DaysFilter,

        /// 菌類 (all/songrong/jizong/niugan)
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,
    },

    /// 統計（今日・累計・菌類分布）を表示
    Stats,

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
