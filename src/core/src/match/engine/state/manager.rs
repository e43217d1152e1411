use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchState {
    Betting,
    Playing,
    Finished,
}

pub struct StateManager {
    current_state: MatchState,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        StateManager {
            current_state: MatchState::Betting,
        }
    }

    pub fn current(&self) -> MatchState {
        self.current_state
    }

    pub fn is(&self, state: MatchState) -> bool {
        self.current_state == state
    }

    pub fn next(&mut self) -> MatchState {
        self.current_state = Self::get_next_state(self.current_state);
        self.current_state
    }

    fn get_next_state(current_state: MatchState) -> MatchState {
        match current_state {
            MatchState::Betting => MatchState::Playing,
            MatchState::Playing => MatchState::Finished,
            MatchState::Finished => MatchState::Betting,
        }
    }
}
