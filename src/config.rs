use crate::error::{ErrorKind, Result};

/// Default limit for nested descriptions, merges and embeds
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configuration for rendering limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth, counting nested descriptions and embedded sources
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Tracks nesting depth across one render, embedded sources included
#[derive(Debug)]
pub struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    pub fn new(config: Config) -> Self {
        Self {
            current: 0,
            max: config.max_depth,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        if self.current >= self.max {
            return Err(ErrorKind::MaxDepthExceeded { max: self.max }.into());
        }
        self.current += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }
}
