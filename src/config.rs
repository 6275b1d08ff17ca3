use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::schema::{SchemaDefaults, DEFAULT_AUTHOR};
use crate::text_utils::{POST_URL_PREFIX, WORDS_PER_MINUTE};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub words_per_minute: u32,
    pub url_prefix: String,
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            author: DEFAULT_AUTHOR.to_string(),
            words_per_minute: WORDS_PER_MINUTE,
            url_prefix: POST_URL_PREFIX.to_string(),
            page_size: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    pub log: Option<Log>,
}

impl Config {
    pub fn from_toml_str(cfg_content: &str) -> io::Result<Config> {
        let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
            Ok(cfg) => cfg,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
        };

        if let Some(ref mut log) = cfg.log {
            log.location = log.location.take().map(parse_path);
        }

        Ok(cfg)
    }

    pub fn schema_defaults(&self) -> SchemaDefaults {
        SchemaDefaults {
            author: self.defaults.author.clone(),
        }
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    Config::from_toml_str(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.defaults.author, "Anonymous");
        assert_eq!(cfg.defaults.words_per_minute, 200);
        assert_eq!(cfg.defaults.url_prefix, "/blog");
        assert_eq!(cfg.defaults.page_size, 10);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[defaults]
author = "The Team"
words_per_minute = 250
url_prefix = "/posts"

[log]
level = "Debug"
log_to_console = true
location = "/var/log/quill/quill.log"
"##;
        let cfg = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.defaults.author, "The Team");
        assert_eq!(cfg.defaults.words_per_minute, 250);
        assert_eq!(cfg.defaults.url_prefix, "/posts");
        assert_eq!(cfg.defaults.page_size, 10);
        assert_eq!(cfg.schema_defaults().author, "The Team");

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.log_to_console);
        assert_eq!(log.location, Some(PathBuf::from("/var/log/quill/quill.log")));
    }

    #[test]
    fn test_exe_dir_location() {
        let cfg = Config::from_toml_str("[log]\nlevel = \"Info\"\nlocation = \"${exe_dir}/log/quill.log\"\n").unwrap();
        let location = cfg.log.unwrap().location.unwrap();
        assert!(!location.starts_with("${exe_dir}"));
        assert!(location.ends_with("log/quill.log"));
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("[defaults]\npage_size = \"ten\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("/definitely/not/here/quill.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
