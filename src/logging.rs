//! ログ初期化
//!
//! `RUST_LOG` があればそれを優先し、なければ `--verbose` でdebug、通常はwarn。
//! 出力はstderrなので表やチャートの標準出力とは混ざらない。

use crate::error::{MushroomScoutError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = Registry::default().with(env_filter).with(
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MushroomScoutError::Logging(e.to_string()))?;
    Ok(())
}
