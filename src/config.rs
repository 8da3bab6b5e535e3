use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use super::error::FatalError;
use super::resources::Resources;

/// Overrides the directory holding the banner files.
pub const RESOURCES_ENV: &str = "MINESWEEPER_RESOURCES";

#[derive(Debug, Clone)]
pub struct Config {
    pub seed_path: PathBuf,
    pub resources: Resources
}

impl Config {
    pub fn from_env() -> Result<Config, FatalError> {
        Config::from_parts(env::args_os().skip(1), env::var_os(RESOURCES_ENV))
    }

    /// `args` excludes the program name. Only the first argument is used.
    pub fn from_parts(
        mut args: impl Iterator<Item = OsString>,
        resources_dir: Option<OsString>,
    ) -> Result<Config, FatalError> {
        let seed_path = args.next().map(PathBuf::from).ok_or(FatalError::Usage)?;
        let resources = match resources_dir {
            Some(dir) if !dir.is_empty() => Resources::new(dir),
            _ => Resources::default()
        };
        Ok(Config{seed_path, resources})
    }
}
