//! Convert command: build a configuration from a saved list feed.

use std::path::Path;

use sheetline_feed::feed_json_to_config;
use tokio::io::AsyncReadExt;

use super::render_json;
use crate::error::ClientResult;

/// Reads a feed document from `input` (`-` for stdin) and prints the
/// configuration JSON.
pub async fn run(input: &str, pretty: bool) -> ClientResult<()> {
    let json = read_input(input).await?;
    println!("{}", convert_json(&json, pretty)?);
    Ok(())
}

/// Converts feed JSON text into rendered configuration JSON.
pub fn convert_json(json: &str, pretty: bool) -> ClientResult<String> {
    let timeline = feed_json_to_config(json)?;
    render_json(&timeline, pretty)
}

async fn read_input(input: &str) -> ClientResult<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    } else {
        Ok(tokio::fs::read_to_string(Path::new(input)).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sheetline_feed::ConfigError;

    use super::*;
    use crate::error::ClientError;

    const FEED: &str = r#"{"feed": {"entry": [
        {"gsx$startdate": {"$t": "2001-09-11"}, "gsx$headline": {"$t": "Attack"}, "gsx$tag": {"$t": "news"}}
    ]}}"#;

    #[test]
    fn converts_v1_feed() {
        let json = convert_json(FEED, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["events"][0]["group"], "news");
        assert_eq!(value["events"][0]["start_date"]["day"], 11);
    }

    #[test]
    fn empty_feed_is_error() {
        let err = convert_json(r#"{"feed": {}}"#, false).unwrap_err();
        assert!(matches!(err, ClientError::Build(ConfigError::EmptyFeed)));
    }

    #[tokio::test]
    async fn reads_feed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();

        let text = read_input(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(text, FEED);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_input(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
