use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const PIN: &str = "1234";
pub const PREFERENCES_NAME: &str = "PREF_DIARY";
pub const KEY_DIARY_TEXT: &str = "KEY_DIARY_TEXT";
pub const LOG_FILE_NAME: &str = "secret_diary.log";

/// PIN-protected terminal diary
#[derive(Parser, Debug)]
#[command(name = "secret-diary", version)]
pub struct Args {
    /// Directory holding the diary preferences and the log file
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Log filter (e.g. info, debug); falls back to RUST_LOG, then info
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = match args.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Config {
            data_dir,
            log_level: args.log_level,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("org", "hyperskill", "SecretDiary")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| eyre!("could not determine a home directory; pass --data-dir"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let args = Args::parse_from([
            "secret-diary",
            "--data-dir",
            "/tmp/diary",
            "--log-level",
            "debug",
        ]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/diary"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/diary/secret_diary.log"));
    }

    #[test]
    fn args_are_optional() {
        let args = Args::parse_from(["secret-diary"]);
        assert!(args.data_dir.is_none());
        assert!(args.log_level.is_none());
    }
}
