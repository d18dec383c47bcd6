//! Build command: fetch a spreadsheet and print its configuration.

use sheetline_feed::{FeedSource, make_config};
use tracing::info;

use super::{build_source, render_json};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Fetches the spreadsheet at `url` and prints the configuration JSON.
pub async fn run(url: &str, config: &ClientConfig, pretty: bool) -> ClientResult<()> {
    let source = build_source(config)?;
    let json = build_json(source.as_ref(), url, pretty).await?;
    println!("{}", json);
    Ok(())
}

/// Builds the configuration for `url` through `source` and renders it.
pub async fn build_json(source: &dyn FeedSource, url: &str, pretty: bool) -> ClientResult<String> {
    let mut built = None;
    make_config(source, url, |timeline| built = Some(timeline)).await?;

    let timeline = built.unwrap_or_default();
    info!(
        source = source.name(),
        events = timeline.events.len(),
        "built timeline configuration"
    );
    render_json(&timeline, pretty)
}
