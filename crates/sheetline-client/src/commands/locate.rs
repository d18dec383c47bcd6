//! Locate command: show how a URL resolves to a spreadsheet feed.

use sheetline_core::SpreadsheetLocator;
use sheetline_feed::{ConfigError, FeedSource};

use super::build_source;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Prints the key, worksheet and feed URL for `url`.
pub fn run(url: &str, config: &ClientConfig) -> ClientResult<()> {
    let source = build_source(config)?;
    println!("{}", describe(source.as_ref(), url)?);
    Ok(())
}

/// Describes the locator parsed from `url`.
pub fn describe(source: &dyn FeedSource, url: &str) -> ClientResult<String> {
    let locator =
        SpreadsheetLocator::parse(url).ok_or_else(|| ConfigError::unrecognized_identifier(url))?;
    Ok(format!(
        "key: {}\nworksheet: {}\nfeed: {}",
        locator.key,
        locator.worksheet,
        source.feed_url(&locator)
    ))
}

#[cfg(test)]
mod tests {
    use sheetline_feed::StaticSource;

    use super::*;
    use crate::error::ClientError;

    #[test]
    fn describes_spreadsheet_url() {
        let text = describe(
            &StaticSource::new(),
            "https://docs.google.com/spreadsheets/d/XYZ/edit?gid=7",
        )
        .unwrap();
        assert_eq!(
            text,
            "key: XYZ\nworksheet: 7\nfeed: https://spreadsheets.google.com/feeds/list/XYZ/1/public/values?alt=json"
        );
    }

    #[test]
    fn rejects_unrecognized_url() {
        let err = describe(&StaticSource::new(), "http://example.com/foo").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Build(ConfigError::UnrecognizedIdentifier { .. })
        ));
    }
}
