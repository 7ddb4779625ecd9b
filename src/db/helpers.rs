use std::sync::LazyLock;

use regex::Regex;

pub const URL_SCHEME  : &str = "sqlite:";
pub const MEMORY_PATH : &str = ":memory:";

// `sqlite:<path>` followed by any number of `;KEY=VALUE` options
static URL_RE : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sqlite:(?P<path>[^;]*)(?P<opts>(?:;[^;]*)*)$").unwrap()
});

static OPTION_RE : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<key>[A-Za-z_]+)\s*=\s*(?P<value>\S+)\s*$").unwrap()
});

/// options carried by a connection string
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionOptions {
    /// compatibility mode; sqlite only has its own dialect
    pub mode: Option<String>,
    pub auto_reconnect: bool,
    pub foreign_keys: bool,
    pub busy_timeout_ms: Option<u64>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            mode: None,
            auto_reconnect: false,
            foreign_keys: true,
            busy_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionTarget {
    pub path: String,
    pub options: ConnectionOptions,
}

impl ConnectionTarget {
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// split a connection string into database path and options;
/// the error is a human readable reason
pub fn parse_url(url : &str) -> Result<ConnectionTarget, String>
{
    let caps = URL_RE
        .captures(url.trim())
        .ok_or_else(|| format!("expected '{}<path>[;KEY=VALUE]...'", URL_SCHEME))?;

    let path = caps["path"].trim().to_string();
    if path.is_empty() {
        return Err("no database path given".to_string());
    }

    let mut options = ConnectionOptions::default();

    for pair in caps["opts"].split(';').filter(|p| !p.trim().is_empty())
    {
        let opt = OPTION_RE
            .captures(pair)
            .ok_or_else(|| format!("malformed option '{}'", pair))?;
        let value = &opt["value"];

        match opt["key"].to_ascii_uppercase().as_str() {
            "MODE" => options.mode = Some(value.to_string()),
            "AUTO_RECONNECT" => options.auto_reconnect = parse_bool(value)?,
            "FOREIGN_KEYS" => options.foreign_keys = parse_bool(value)?,
            "BUSY_TIMEOUT" => {
                let ms = value
                    .parse()
                    .map_err(|_| format!("BUSY_TIMEOUT expects milliseconds, got '{}'", value))?;
                options.busy_timeout_ms = Some(ms);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
    }

    Ok(ConnectionTarget { path, options })
}

fn parse_bool(value : &str) -> Result<bool, String>
{
    match value.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(format!("expected TRUE or FALSE, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_url_parses()
    {
        let target = parse_url(&crate::config::default_url()).unwrap();

        assert_eq!(target.path, "./activities.db");
        assert_eq!(target.options.mode.as_deref(), Some("MySQL"));
        assert!(target.options.auto_reconnect);
        assert!(target.options.foreign_keys);
        assert_eq!(target.options.busy_timeout_ms, None);
    }

    #[test]
    fn bare_path_uses_defaults()
    {
        let target = parse_url("sqlite:data/app.db").unwrap();

        assert_eq!(target.path, "data/app.db");
        assert_eq!(target.options, ConnectionOptions::default());
        assert!(!target.is_memory());
    }

    #[test]
    fn keys_are_case_insensitive()
    {
        let target =
            parse_url("sqlite::memory:;foreign_keys=false;Busy_Timeout=250;").unwrap();

        assert!(target.is_memory());
        assert!(!target.options.foreign_keys);
        assert_eq!(target.options.busy_timeout_ms, Some(250));
    }

    #[test]
    fn bad_urls_are_rejected()
    {
        assert!(parse_url("jdbc:h2:./app").is_err());
        assert!(parse_url("sqlite:").is_err());
        assert!(parse_url("sqlite:app.db;CACHE=TRUE").is_err());
        assert!(parse_url("sqlite:app.db;MODE").is_err());
        assert!(parse_url("sqlite:app.db;AUTO_RECONNECT=sometimes").is_err());
        assert!(parse_url("sqlite:app.db;BUSY_TIMEOUT=-1").is_err());
    }
}
