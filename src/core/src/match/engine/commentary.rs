use crate::is_commentary_logging;
use log::{debug, info};
use std::collections::VecDeque;

const HISTORY_CAPACITY: usize = 32;

/// Latest line for the scoreboard plus a short rolling history.
#[derive(Debug, Clone, Default)]
pub struct Commentary {
    latest: String,
    history: VecDeque<String>,
}

impl Commentary {
    pub fn new() -> Self {
        Commentary::default()
    }

    pub fn say(&mut self, line: impl Into<String>) {
        let line = line.into();

        if is_commentary_logging() {
            info!("{}", line);
        } else {
            debug!("commentary: {}", line);
        }

        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }

        self.history.push_back(line.clone());
        self.latest = line;
    }

    pub fn latest(&self) -> &str {
        &self.latest
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}
