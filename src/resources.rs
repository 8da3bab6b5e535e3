//! Banner texts shown at the start and end of a game.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::error::FatalError;

pub const WELCOME: &str = "welcome.txt";
pub const GAME_WON: &str = "gamewon.txt";
pub const GAME_OVER: &str = "gameover.txt";

/// 1-based line of the win banner that the score is appended to.
pub const SCORE_LINE: usize = 19;

#[derive(Debug, Clone)]
pub struct Resources {
    dir: PathBuf
}

impl Resources {
    pub fn new(dir: impl Into<PathBuf>) -> Resources {
        Resources{dir: dir.into()}
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn welcome(&self) -> Result<Vec<String>, FatalError> {
        self.lines(WELCOME)
    }

    pub fn game_over(&self) -> Result<Vec<String>, FatalError> {
        self.lines(GAME_OVER)
    }

    /// The win banner with the score spliced in. A banner too short to hold
    /// the score line gets it as an extra line at the end.
    pub fn game_won(&self, score: f64) -> Result<Vec<String>, FatalError> {
        let mut lines = self.lines(GAME_WON)?;
        // ties round up, not to even
        let score = format!(" {:.2}", (score * 100.0).round() / 100.0);
        match lines.get_mut(SCORE_LINE - 1) {
            Some(line) => line.push_str(&score),
            None => lines.push(score)
        }
        Ok(lines)
    }

    /// Reads a banner. Trailing blank lines are dropped.
    fn lines(&self, name: &str) -> Result<Vec<String>, FatalError> {
        let path = self.dir.join(name);
        let text = fs::read_to_string(&path)
            .map_err(|source| FatalError::ResourceMissing{path: path.clone(), source})?;
        let mut lines: Vec<String> = text.lines().map(String::from).collect();
        while lines.last().map_or(false, |line| line.trim().is_empty()) {
            lines.pop();
        }
        trace!(lines = lines.len(), "loaded {}", path.display());
        Ok(lines)
    }
}

impl Default for Resources {
    fn default() -> Resources {
        Resources::new("resources")
    }
}
