use clap::Parser;
use indicatif::ProgressBar;
use mushroom_scout::{browse, cli, config, error, logging, render, session};
use cli::{Cli, Commands};
use config::Config;
use error::{MushroomScoutError, Result};
use mushroom_scout::client::{HttpClient, Upload};
use mushroom_scout_common::{DetectEffect, PageQuery};
use session::{Session, SubmitReport};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let mut config = Config::load()?;

    let command = match cli.command {
        Commands::Config { set_base_url, set_timeout, show } => {
            return run_config(&mut config, set_base_url, set_timeout, show);
        }
        other => other,
    };

    let base_url = config.resolve_base_url(cli.base_url.as_deref())?;
    let client = HttpClient::new(&base_url, Duration::from_secs(config.timeout_seconds))?;
    tracing::info!(%base_url, "APIクライアント初期化");
    let default_query = PageQuery::default().with_page_size(config.page_size);

    match command {
        Commands::Detect { file } => {
            let upload = Upload::from_path(&file)?;
            let mut session = Session::new(client, default_query);

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("识别中... {}", upload.file_name));
            spinner.enable_steady_tick(Duration::from_millis(100));
            let report = session.submit(upload).await;
            spinner.finish_and_clear();

            match report {
                SubmitReport::Detected(DetectEffect::ShowResult) => {
                    if let Some(card) = session.upload().result_card() {
                        println!("{}\n", render::render_result_card(card));
                    }
                    println!("{}", render::render_overview(&session.stats().overview_view()));
                    println!("\n{}", session.chart().output());
                }
                SubmitReport::Detected(DetectEffect::ShowMessage(message)) => {
                    return Err(MushroomScoutError::ApiCall(message));
                }
                SubmitReport::Detected(DetectEffect::Discarded) => {}
                SubmitReport::PreviewOnly => {
                    println!("视频仅支持预览，暂不支持视频分析: {}", file.display());
                }
                SubmitReport::Rejected(message) => {
                    return Err(MushroomScoutError::UnsupportedMedia(message));
                }
            }
        }

        Commands::History { days, type_filter, page } => {
            let query = default_query.with_days(days).with_type(type_filter).with_page(page);
            let mut session = Session::new(client, query);
            session.load_history().await;
            println!("{}", render::render_history(&session.history().view()));
            if let Some(message) = session.history().view().error {
                tracing::warn!(%message, "履歴の取得に失敗");
            }
        }

        Commands::Browse { days, type_filter } => {
            let query = default_query.with_days(days).with_type(type_filter);
            let mut session = Session::new(client, query);
            browse::run_browse(&mut session).await?;
        }

        Commands::Stats => {
            let mut session = Session::new(client, default_query);
            session.refresh_stats().await;
            println!("{}", render::render_overview(&session.stats().overview_view()));
            println!("\n{}", session.chart().output());
            if session.stats().is_fallback() {
                println!("（分布数据获取失败，显示默认分类）");
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn run_config(
    config: &mut Config,
    set_base_url: Option<String>,
    set_timeout: Option<u64>,
    show: bool,
) -> Result<()> {
    let changed = set_base_url.is_some() || set_timeout.is_some();

    if let Some(url) = set_base_url {
        config.set_base_url(url)?;
        println!("✔ ベースURLを設定しました: {}", config.base_url);
    }
    if let Some(seconds) = set_timeout {
        config.set_timeout(seconds)?;
        println!("✔ タイムアウトを設定しました: {}秒", config.timeout_seconds);
    }
    if changed {
        config.save()?;
    }

    if show || !changed {
        println!("設定:");
        println!("  ベースURL: {}", config.base_url);
        println!("  タイムアウト: {}秒", config.timeout_seconds);
        println!("  1ページの件数: {}", config.page_size);
        println!("  設定ファイル: {}", Config::config_path()?.display());
    }
    Ok(())
}
