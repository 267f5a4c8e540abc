use serde_json::Value;
use std::io::Read;
use tracing::info;

use pagefeed::config::Config;
use pagefeed::normalize::{NormalizeOptions, normalize};
use pagefeed::paging::{HttpTransport, LogWidget, PageOutcome, PagingController, TemplateRenderer};

use crate::cli::{FetchArgs, NormalizeArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn run_normalize(args: NormalizeArgs) -> Result<(), AnyError> {
    let raw = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let payload: Option<Value> = if raw.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&raw)?)
    };

    let options = NormalizeOptions {
        data_path: (!args.paths.is_empty()).then(|| args.paths.into()),
        is_debug: args.debug,
    };

    let output = normalize(payload.as_ref(), &options);
    println!("{}", serde_json::to_string_pretty(&output.to_json())?);
    Ok(())
}

pub async fn run_fetch(args: FetchArgs) -> Result<(), AnyError> {
    let config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let renderer = TemplateRenderer::new(config.render.template.clone());
    let mut controller =
        PagingController::new(&config, HttpTransport::new(), LogWidget::new(), renderer);

    let mut outcome = controller.start().await?;
    for _ in 1..args.pages {
        if controller.state().no_more_data || outcome == PageOutcome::Empty {
            break;
        }
        outcome = controller.pull_up().await?;
    }

    let snapshot = controller.metrics().snapshot();
    info!(
        pages = snapshot.pages_loaded,
        items = snapshot.items_rendered,
        "Fetch finished"
    );
    println!("{}", controller.renderer().output());
    Ok(())
}
