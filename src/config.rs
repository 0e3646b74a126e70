use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::util::toml_date::TomlDate;

pub const DEFAULT_INDEX_BASE_NAME: &str = "index.md";

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub index_base_name: Option<String>,
    pub page_size: u32,
    /// Posts dated after this day are not listed. Today when absent.
    pub as_of: Option<TomlDate>,
}

impl Defaults {
    pub fn index_base_name(&self) -> &str {
        self.index_base_name.as_deref().unwrap_or(DEFAULT_INDEX_BASE_NAME)
    }

    pub fn as_of(&self) -> NaiveDate {
        match self.as_of {
            Some(TomlDate(date)) => date,
            None => Utc::now().date_naive(),
        }
    }
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf, exe_dir: &Path) -> PathBuf {
    match path.strip_prefix("${exe_dir}") {
        Ok(rest) => exe_dir.join(rest),
        Err(_) => path,
    }
}

pub fn parse_config(cfg_content: &str, exe_dir: &Path) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir, exe_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    parse_config(&cfg_content, exe_dir)
}
