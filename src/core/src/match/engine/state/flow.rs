use crate::r#match::{TeamSide, centre_spot};
use log::debug;
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameFlowState {
    Kickoff,
    ThrowIn,
    Corner,
    Goalie,
    Play,
}

impl GameFlowState {
    /// Live flows run physics and the full decision policy.
    pub fn is_live(&self) -> bool {
        matches!(self, GameFlowState::Play | GameFlowState::Goalie)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartKind {
    Kickoff,
    ThrowIn,
    Corner,
}

impl RestartKind {
    pub fn flow_state(&self) -> GameFlowState {
        match self {
            RestartKind::Kickoff => GameFlowState::Kickoff,
            RestartKind::ThrowIn => GameFlowState::ThrowIn,
            RestartKind::Corner => GameFlowState::Corner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetPiece {
    pub team: TeamSide,
    pub position: Vector2<f32>,
}

impl SetPiece {
    pub fn new(team: TeamSide, position: Vector2<f32>) -> Self {
        SetPiece { team, position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestartToken(u64);

#[derive(Debug, Clone, Copy)]
pub struct ScheduledRestart {
    pub token: RestartToken,
    pub kind: RestartKind,
    pub set_piece: SetPiece,
    remaining: f32,
}

/// Flow sub-state of a running match plus the single pending restart, if any.
#[derive(Debug, Clone)]
pub struct RestartFlow {
    state: GameFlowState,
    set_piece: SetPiece,
    pending: Option<ScheduledRestart>,
    next_token: u64,
}

impl Default for RestartFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RestartFlow {
    pub fn new() -> Self {
        RestartFlow {
            state: GameFlowState::Play,
            set_piece: SetPiece::new(TeamSide::Home, centre_spot()),
            pending: None,
            next_token: 0,
        }
    }

    pub fn state(&self) -> GameFlowState {
        self.state
    }

    pub fn set_state(&mut self, state: GameFlowState) {
        if self.state != state {
            debug!("flow: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    pub fn set_piece(&self) -> SetPiece {
        self.set_piece
    }

    /// Arms a restart `delay` frames from now, superseding any pending one.
    pub fn schedule(&mut self, kind: RestartKind, set_piece: SetPiece, delay: f32) -> RestartToken {
        if let Some(superseded) = self.pending.take() {
            debug!("restart {:?} superseded by {:?}", superseded.kind, kind);
        }

        let token = RestartToken(self.next_token);
        self.next_token += 1;

        self.set_state(kind.flow_state());
        self.set_piece = set_piece;
        self.pending = Some(ScheduledRestart {
            token,
            kind,
            set_piece,
            remaining: delay,
        });

        token
    }

    pub fn cancel(&mut self, token: RestartToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Counts the pending restart down; hands it back once it is due.
    pub fn advance(&mut self, delta_time: f32) -> Option<ScheduledRestart> {
        let pending = self.pending.as_mut()?;

        pending.remaining -= delta_time;

        if pending.remaining <= 0.0 {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> SetPiece {
        SetPiece::new(TeamSide::Away, Vector2::new(10.0, 10.0))
    }

    #[test]
    fn test_restart_fires_after_delay() {
        let mut flow = RestartFlow::new();
        let token = flow.schedule(RestartKind::Corner, corner(), 6.0);

        assert_eq!(flow.state(), GameFlowState::Corner);
        assert!(flow.advance(5.0).is_none());

        let fired = flow.advance(1.0).unwrap();
        assert_eq!(fired.token, token);
        assert_eq!(fired.kind, RestartKind::Corner);
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_rescheduling_cancels_previous() {
        let mut flow = RestartFlow::new();
        let first = flow.schedule(RestartKind::Corner, corner(), 6.0);
        let second = flow.schedule(
            RestartKind::Kickoff,
            SetPiece::new(TeamSide::Home, centre_spot()),
            6.0,
        );

        assert!(!flow.cancel(first));
        assert_eq!(flow.state(), GameFlowState::Kickoff);
        assert_eq!(flow.advance(6.0).map(|r| r.token), Some(second));
    }

    #[test]
    fn test_cancel_pending() {
        let mut flow = RestartFlow::new();
        let token = flow.schedule(RestartKind::ThrowIn, corner(), 6.0);

        assert!(flow.cancel(token));
        assert!(flow.advance(10.0).is_none());
    }

    #[test]
    fn test_live_states() {
        assert!(GameFlowState::Play.is_live());
        assert!(GameFlowState::Goalie.is_live());
        assert!(!GameFlowState::ThrowIn.is_live());
    }
}
