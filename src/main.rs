// SPDX-License-Identifier: MPL-2.0
use model_lens::app::{self, Flags};
use std::path::PathBuf;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("model_lens=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        config_dir: args
            .opt_value_from_str::<_, PathBuf>("--config-dir")
            .unwrap_or(None),
        models_dir: args
            .finish()
            .into_iter()
            .next()
            .map(PathBuf::from),
    };

    app::run(flags)
}
