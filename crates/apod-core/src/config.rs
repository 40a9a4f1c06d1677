use std::{env, fmt, fs, path::Path};

use crate::{errors::Error, Result};

pub const NASA_API_KEY: &str = "NASA_API_KEY";
pub const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
pub const SLACK_CHANNEL_ID: &str = "SLACK_CHANNEL_ID";

/// Typed configuration, resolved once at startup.
///
/// Only the NASA key is required to start a run. The Slack values are checked when
/// the publisher is built, so a missing chat credential fails the publish step only.
#[derive(Clone)]
pub struct Config {
    pub nasa_api_key: String,
    pub slack_bot_token: Option<String>,
    pub slack_channel_id: Option<String>,
}

impl Config {
    /// Load from the process environment (plus `.env`, if present).
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve every variable through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let nasa_api_key = get(NASA_API_KEY).ok_or_else(|| {
            Error::Config(format!("{NASA_API_KEY} environment variable is required"))
        })?;

        Ok(Self {
            nasa_api_key,
            slack_bot_token: get(SLACK_BOT_TOKEN),
            slack_channel_id: get(SLACK_CHANNEL_ID),
        })
    }

    /// Slack bot token and channel id, or a config error naming what is missing.
    pub fn slack(&self) -> Result<(&str, &str)> {
        match (&self.slack_bot_token, &self.slack_channel_id) {
            (Some(token), Some(channel)) => Ok((token.as_str(), channel.as_str())),
            (token, channel) => {
                let missing = [
                    (SLACK_BOT_TOKEN, token.is_none()),
                    (SLACK_CHANNEL_ID, channel.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(key, _)| key)
                .collect::<Vec<_>>();

                Err(Error::Config(format!(
                    "missing required environment variable(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("nasa_api_key", &"<redacted>")
            .field("slack_bot_token", &"<redacted>")
            .field("slack_channel_id", &self.slack_channel_id)
            .finish()
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_all_three_variables() {
        let cfg = Config::from_lookup(lookup(&[
            (NASA_API_KEY, "nasa-key"),
            (SLACK_BOT_TOKEN, "xoxb-1"),
            (SLACK_CHANNEL_ID, "C123"),
        ]))
        .unwrap();
        assert_eq!(cfg.nasa_api_key, "nasa-key");
        assert_eq!(cfg.slack().unwrap(), ("xoxb-1", "C123"));
    }

    #[test]
    fn missing_nasa_key_is_config_error() {
        let err = Config::from_lookup(lookup(&[
            (SLACK_BOT_TOKEN, "xoxb-1"),
            (SLACK_CHANNEL_ID, "C123"),
        ]))
        .unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains(NASA_API_KEY)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nasa_key_alone_is_enough_to_load() {
        let cfg = Config::from_lookup(lookup(&[(NASA_API_KEY, "nasa-key")])).unwrap();
        assert_eq!(cfg.nasa_api_key, "nasa-key");
        match cfg.slack() {
            Err(Error::Config(msg)) => {
                assert!(msg.contains(SLACK_BOT_TOKEN));
                assert!(msg.contains(SLACK_CHANNEL_ID));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn blank_slack_values_count_as_missing() {
        let cfg = Config::from_lookup(lookup(&[
            (NASA_API_KEY, "nasa-key"),
            (SLACK_BOT_TOKEN, "   "),
            (SLACK_CHANNEL_ID, "C123"),
        ]))
        .unwrap();
        match cfg.slack() {
            Err(Error::Config(msg)) => {
                assert!(msg.contains(SLACK_BOT_TOKEN));
                assert!(!msg.contains(SLACK_CHANNEL_ID));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn debug_redacts_credentials() {
        let cfg = Config::from_lookup(lookup(&[
            (NASA_API_KEY, "nasa-secret"),
            (SLACK_BOT_TOKEN, "xoxb-secret"),
            (SLACK_CHANNEL_ID, "C123"),
        ]))
        .unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("nasa-secret"));
        assert!(!dbg.contains("xoxb-secret"));
        assert!(dbg.contains("C123"));
    }

    #[test]
    fn parses_dotenv_lines() {
        let parsed = parse_dotenv(
            "# comment\n\nNASA_API_KEY=\"abc\"\nexport SLACK_CHANNEL_ID='C9'\nnot a pair\n=x\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("NASA_API_KEY".to_string(), "abc".to_string()),
                ("SLACK_CHANNEL_ID".to_string(), "C9".to_string()),
            ]
        );
    }
}
