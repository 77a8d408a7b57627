//! Configuration schema — the declarative description of bots and links.
//!
//! JSON on disk uses the established wire keys: snake_case fields plus the
//! historical `"unix-socket"` flag. One HTTP route is registered per link;
//! everything else about the process is derived from this file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Default listen port for the webhook surface.
pub const DEFAULT_PORT: u16 = 9282;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded once at startup, immutable thereafter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Chat bots, keyed by unique name.
    #[serde(default)]
    pub bots: Vec<BotConfig>,
    /// (bot, channel, url) bindings, one HTTP route each.
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    /// Optional URL pinged periodically by the healthbeat task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<String>,
    /// Serve on a Unix domain socket instead of TCP.
    #[serde(rename = "unix-socket", default)]
    pub unix_socket: bool,
    /// TCP listen address.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bots: Vec::new(),
            links: Vec::new(),
            healthcheck: None,
            unix_socket: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Prefix every link url with `/` where the config author left it off.
    pub fn normalize(&mut self) {
        for link in &mut self.links {
            if !link.url.starts_with('/') {
                link.url.insert(0, '/');
            }
        }
    }

    /// Structural validation: unique bot names, known bot references, and
    /// no reserved or duplicate link paths.
    ///
    /// Expects `normalize()` to have run first, so paths compare in their
    /// canonical leading-slash form.
    pub fn validate(&self) -> Result<(), StartupError> {
        let mut names = HashSet::new();
        for bot in &self.bots {
            if !names.insert(bot.name.as_str()) {
                return Err(StartupError::DuplicateBot(bot.name.clone()));
            }
        }

        let mut paths = HashSet::new();
        for link in &self.links {
            if !names.contains(link.bot.as_str()) {
                return Err(StartupError::UnknownBot {
                    url: link.url.clone(),
                    bot: link.bot.clone(),
                });
            }
            if link.url == "/" {
                return Err(StartupError::ReservedPath {
                    bot: link.bot.clone(),
                });
            }
            if !paths.insert(link.url.as_str()) {
                return Err(StartupError::DuplicateLink(link.url.clone()));
            }
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────
// Bots and links
// ─────────────────────────────────────────────

/// Supported chat backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    /// Matrix client-server API.
    Matrix,
    /// Rocket.Chat — still accepted by the parser for old config files,
    /// rejected when the bot registry is built.
    Rocket,
}

impl BotKind {
    /// The config-file tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Matrix => "matrix",
            BotKind::Rocket => "rocket",
        }
    }
}

/// One configured chat bot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotConfig {
    /// Unique bot name, referenced by links.
    pub name: String,
    /// Backend selector.
    #[serde(rename = "type")]
    pub kind: BotKind,
    /// Fully-qualified user id (e.g. `@alerts:example.org`).
    pub user_id: String,
    /// Access token obtained out of band.
    pub token: String,
    /// Homeserver base URL, including the scheme.
    pub server: String,
}

/// One (bot, channel, url) binding, producing one HTTP route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Name of the bot that posts into the channel.
    pub bot: String,
    /// URL path of the webhook route.
    pub url: String,
    /// Provider-specific room identifier (e.g. `#ops:example.org`).
    pub channel: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn bot(name: &str) -> BotConfig {
        BotConfig {
            name: name.into(),
            kind: BotKind::Matrix,
            user_id: format!("@{name}:example.org"),
            token: "secret".into(),
            server: "https://matrix.example.org".into(),
        }
    }

    fn link(bot: &str, url: &str) -> LinkConfig {
        LinkConfig {
            bot: bot.into(),
            url: url.into(),
            channel: "#ops:example.org".into(),
        }
    }

    #[test]
    fn test_parse_full_config() {
        let json = r##"{
            "bots": [{
                "name": "main",
                "type": "matrix",
                "user_id": "@alerts:example.org",
                "token": "syt_secret",
                "server": "https://matrix.example.org"
            }],
            "links": [{"bot": "main", "url": "/hooks/a", "channel": "#ops:example.org"}],
            "healthcheck": "https://hc.example.org/ping",
            "unix-socket": true
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.bots.len(), 1);
        assert_eq!(config.bots[0].kind, BotKind::Matrix);
        assert_eq!(config.bots[0].user_id, "@alerts:example.org");
        assert_eq!(config.links[0].channel, "#ops:example.org");
        assert_eq!(
            config.healthcheck.as_deref(),
            Some("https://hc.example.org/ping")
        );
        assert!(config.unix_socket);
    }

    #[test]
    fn test_parse_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.bots.is_empty());
        assert!(config.links.is_empty());
        assert!(config.healthcheck.is_none());
        assert!(!config.unix_socket);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9282);
    }

    #[test]
    fn test_parse_rocket_kind() {
        let json = r#"{"name": "old", "type": "rocket", "user_id": "u",
                       "token": "t", "server": "https://rocket.example.org"}"#;
        let bot: BotConfig = serde_json::from_str(json).unwrap();
        assert_eq!(bot.kind, BotKind::Rocket);
        assert_eq!(bot.kind.as_str(), "rocket");
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        let json = r#"{"name": "x", "type": "irc", "user_id": "u",
                       "token": "t", "server": "s"}"#;
        assert!(serde_json::from_str::<BotConfig>(json).is_err());
    }

    #[test]
    fn test_normalize_adds_leading_slash() {
        let mut config = Config {
            bots: vec![bot("main")],
            links: vec![link("main", "hooks/a"), link("main", "/hooks/b")],
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.links[0].url, "/hooks/a");
        assert_eq!(config.links[1].url, "/hooks/b");
    }

    #[test]
    fn test_validate_ok() {
        let config = Config {
            bots: vec![bot("main"), bot("backup")],
            links: vec![link("main", "/hooks/a"), link("backup", "/hooks/b")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_bot() {
        let config = Config {
            bots: vec![bot("main"), bot("main")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StartupError::DuplicateBot(name)) if name == "main"
        ));
    }

    #[test]
    fn test_validate_unknown_bot() {
        let config = Config {
            bots: vec![bot("main")],
            links: vec![link("ghost", "/hooks/a")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StartupError::UnknownBot { bot, .. }) if bot == "ghost"
        ));
    }

    #[test]
    fn test_validate_reserved_root_path() {
        let config = Config {
            bots: vec![bot("main")],
            links: vec![link("main", "/")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StartupError::ReservedPath { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_link_path() {
        let config = Config {
            bots: vec![bot("main")],
            links: vec![link("main", "/hooks/a"), link("main", "/hooks/a")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StartupError::DuplicateLink(url)) if url == "/hooks/a"
        ));
    }

    #[test]
    fn test_two_links_same_channel_different_paths_ok() {
        // The same bot/channel pair may be exposed on several URLs.
        let config = Config {
            bots: vec![bot("main")],
            links: vec![link("main", "/hooks/a"), link("main", "/hooks/b")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = Config {
            bots: vec![bot("main")],
            links: vec![link("main", "/hooks/a")],
            unix_socket: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        // Wire keys are preserved exactly.
        assert!(json.get("unix-socket").is_some());
        assert_eq!(json["bots"][0]["type"], "matrix");
        assert!(json["bots"][0].get("user_id").is_some());

        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.bots[0].name, "main");
        assert!(back.unix_socket);
    }
}
