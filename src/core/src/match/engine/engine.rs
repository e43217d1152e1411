use crate::config::SimulationConfig;
use crate::r#match::ball::events::BallEventDispatcher;
use crate::r#match::{
    BEATEN_DEFENDER_STUN, CarrierAction, FAILED_DRIBBLE_STUN, GameFlowState, KICK_COOLDOWN,
    KickRequest, MatchContext, MatchField, MatchRng, PRESSURE_DISTANCE, PossessionEvent,
    PossessionResolver, RESTART_TAKER_COOLDOWN, RestartKind, ScheduledRestart, SetPieceAction,
    StateProcessingContext, TakeOnResult, decide_set_piece, decide_with_ball,
    decide_without_ball, kick_velocity, opponent_within, select_restart_taker,
};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    FullTime,
}

/// One match: the field, the running match aggregate and its random source.
pub struct FootballEngine {
    pub field: MatchField,
    pub context: MatchContext,
    rng: MatchRng,
}

impl FootballEngine {
    pub fn new(config: &SimulationConfig, mut rng: MatchRng) -> Self {
        let field = MatchField::new(&mut rng);
        let context = MatchContext::new(config);

        FootballEngine {
            field,
            context,
            rng,
        }
    }

    /// Fresh formation and skills, score and clock back to zero. Commentary history is kept.
    pub fn reset(&mut self, config: &SimulationConfig) {
        let commentary = std::mem::take(&mut self.context.commentary);

        self.field = MatchField::new(&mut self.rng);
        self.context = MatchContext::new(config);
        self.context.commentary = commentary;
    }

    pub fn kick_off(&mut self) {
        self.context.flow.set_state(GameFlowState::Play);
        self.context.commentary.say("Kick off!");
    }

    pub fn game_tick(&mut self, delta_time: f32) -> TickOutcome {
        if delta_time.is_nan() || delta_time <= 0.0 {
            return TickOutcome::Continue;
        }

        if self.context.tick_clock(&mut self.rng) {
            // No restart survives the final whistle
            self.context.cancel_restart();
            return TickOutcome::FullTime;
        }

        // Everyone stays frozen until a scheduled restart fires
        if self.context.flow.is_pending() {
            if let Some(restart) = self.context.flow.advance(delta_time) {
                Self::fire_restart(&mut self.field, &mut self.context, restart);
            }

            return TickOutcome::Continue;
        }

        if self.context.flow.state().is_live() {
            Self::play_live(&mut self.field, &mut self.context, &mut self.rng, delta_time);
        } else {
            Self::play_set_piece(&mut self.field, &mut self.context, &mut self.rng, delta_time);
        }

        TickOutcome::Continue
    }

    fn play_live(
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
        delta_time: f32,
    ) {
        for player in field.players.iter_mut() {
            player.tackle_attempt = false;
            player.tick_cooldown();
        }

        if let Some(owner_id) = field.ball.current_owner
            && let Some(keeper) = field.player_mut(owner_id)
            && keeper.role.is_goalkeeper()
        {
            keeper.handling_delay = keeper.handling_delay.saturating_sub(1);
        }

        field.pin_ball_to_owner();

        // A ball over the goal line is dead before anyone can reach it
        let ball_event = field
            .ball
            .update(delta_time)
            .or_else(|| field.ball.check_goal_line());

        if let Some(event) = ball_event {
            BallEventDispatcher::dispatch(event, field, context, rng);
            return;
        }

        Self::play_players(field, context, rng, delta_time);

        for event in PossessionResolver::resolve(field, rng) {
            Self::handle_possession_event(field, context, event);
        }

        field.clamp_players();
        field.pin_ball_to_owner();
    }

    /// Each player decides from the current field and the action lands before the next one decides.
    fn play_players(
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
        delta_time: f32,
    ) {
        for index in 0..field.players.len() {
            let player = &field.players[index];
            let player_id = player.id;
            let ctx = StateProcessingContext::new(player, field, context, delta_time);

            if ctx.has_ball() {
                let candidate = decide_with_ball(&ctx, rng);
                Self::apply_carrier_action(field, context, rng, player_id, candidate.action);
            } else {
                let decision = decide_without_ball(&ctx, rng);

                let player = &mut field.players[index];
                player.position = decision.position;
                player.tackle_attempt = decision.tackle_attempt;
            }
        }
    }

    fn apply_carrier_action(
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
        player_id: u32,
        action: CarrierAction,
    ) {
        match action {
            CarrierAction::Kick(request) => Self::execute_kick(field, context, rng, player_id, request),
            CarrierAction::TakeOn(TakeOnResult::Beaten {
                defender_id,
                position,
            }) => {
                let Some(defender) = field.player_mut(defender_id) else {
                    return;
                };
                defender.cooldown = BEATEN_DEFENDER_STUN;
                let defender_role = defender.role;

                if let Some(carrier) = field.player_mut(player_id) {
                    carrier.position = position;
                    context.commentary.say(format!(
                        "{} Player {} successfully dribbles past {}!",
                        carrier.team, carrier.id, defender_role
                    ));
                }
            }
            CarrierAction::TakeOn(TakeOnResult::Lost { defender_id, nudge }) => {
                if let Some(defender) = field.player_mut(defender_id) {
                    defender.cooldown = BEATEN_DEFENDER_STUN;
                }

                let Some(carrier) = field.player_mut(player_id) else {
                    return;
                };
                carrier.cooldown = FAILED_DRIBBLE_STUN;
                let team = carrier.team;

                context.commentary.say(format!(
                    "{} Player {} fails the dribble and loses control!",
                    team, player_id
                ));

                field.ball.release(nudge, team);
            }
            CarrierAction::Move(position) => {
                if let Some(carrier) = field.player_mut(player_id) {
                    carrier.position = position;
                }
            }
            CarrierAction::Hold => {}
        }
    }

    fn execute_kick(
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
        player_id: u32,
        request: KickRequest,
    ) {
        let Some(kicker) = field.player(player_id) else {
            return;
        };

        let pressured = opponent_within(field, kicker.team, &kicker.position, PRESSURE_DISTANCE);
        let velocity = kick_velocity(kicker, &request, pressured, rng);
        let line = request.kind.commentary(kicker);
        let team = kicker.team;

        if let Some(kicker) = field.player_mut(player_id) {
            kicker.cooldown = KICK_COOLDOWN;
            kicker.handling_delay = 0;
        }

        field.ball.release(velocity, team);

        debug!("player {} kicks: {:?}", player_id, request);

        context.commentary.say(line);

        // Any kick ends a set piece or the keeper's spell on the ball
        context.flow.set_state(GameFlowState::Play);
    }

    fn handle_possession_event(
        field: &MatchField,
        context: &mut MatchContext,
        event: PossessionEvent,
    ) {
        match event {
            PossessionEvent::Picked { player_id } => {
                let Some(player) = field.player(player_id) else {
                    return;
                };

                if player.role.is_goalkeeper() {
                    context.flow.set_state(GameFlowState::Goalie);
                    context
                        .commentary
                        .say(format!("{} GK claims the ball.", player.team));
                } else {
                    context.flow.set_state(GameFlowState::Play);
                }
            }
            PossessionEvent::Tackled { winner, .. } => {
                if let Some(player) = field.player(winner) {
                    context.commentary.say(format!(
                        "{} Player {} executes a decisive TACKLE!",
                        player.team, player.id
                    ));
                }

                context.flow.set_state(GameFlowState::Play);
            }
            PossessionEvent::MissedTackle { player_id } => {
                if let Some(player) = field.player(player_id) {
                    context.commentary.say(format!(
                        "{} Player {} missed the tackle badly!",
                        player.team, player.id
                    ));
                }
            }
        }
    }

    fn play_set_piece(
        field: &mut MatchField,
        context: &mut MatchContext,
        rng: &mut MatchRng,
        delta_time: f32,
    ) {
        let flow = context.flow.state();
        let set_piece = context.flow.set_piece();

        // Nobody to take it: resume play
        let Some(taker) = field.owner() else {
            context.flow.set_state(GameFlowState::Play);
            return;
        };

        if taker.team != set_piece.team {
            return;
        }

        let taker_id = taker.id;
        let ctx = StateProcessingContext::new(taker, field, context, delta_time);

        match decide_set_piece(&ctx, flow, &set_piece, rng) {
            Some(SetPieceAction::Approach(position)) => {
                if let Some(taker) = field.player_mut(taker_id) {
                    taker.position = position;
                }
            }
            Some(SetPieceAction::Kick(request)) => {
                field.pin_ball_to_owner();
                Self::execute_kick(field, context, rng, taker_id, request);
            }
            None => context.flow.set_state(GameFlowState::Play),
        }

        field.pin_ball_to_owner();
    }

    fn fire_restart(field: &mut MatchField, context: &mut MatchContext, restart: ScheduledRestart) {
        let team = restart.set_piece.team;

        let line = match restart.kind {
            RestartKind::Kickoff => format!("Kick off! {} to start.", team),
            RestartKind::ThrowIn => format!("{} Throw-in!", team),
            RestartKind::Corner => format!("{} Corner Kick!", team),
        };
        context.commentary.say(line);

        match select_restart_taker(field, restart.kind, &restart.set_piece) {
            Some(taker_id) => {
                if let Some(taker) = field.player_mut(taker_id) {
                    taker.cooldown = RESTART_TAKER_COOLDOWN;
                }

                if let Some(taker) = field.players.get(taker_id as usize) {
                    field.ball.claim(taker);
                }

                debug!("restart {:?}: player {} takes it", restart.kind, taker_id);
            }
            None => context.flow.set_state(GameFlowState::Play),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::{KICK_COOLDOWN, PITCH_HEIGHT, PITCH_WIDTH, PLAYER_MARGIN, TeamSide};
    use nalgebra::Vector2;
    use rand::SeedableRng;

    fn engine(seed: u64) -> FootballEngine {
        let config = SimulationConfig {
            minute_tick_probability: 0.0,
            ..SimulationConfig::default()
        };

        let mut engine = FootballEngine::new(&config, MatchRng::seed_from_u64(seed));
        engine.kick_off();
        engine
    }

    fn positions(engine: &FootballEngine) -> Vec<Vector2<f32>> {
        engine.field.positions()
    }

    #[test]
    fn test_zero_delta_is_a_paused_frame() {
        let mut engine = engine(1);
        for _ in 0..100 {
            engine.game_tick(1.0);
        }

        let before = positions(&engine);
        let ball = engine.field.ball.position;
        let score = engine.context.score;

        assert_eq!(engine.game_tick(0.0), TickOutcome::Continue);
        engine.game_tick(-1.0);

        assert_eq!(positions(&engine), before);
        assert_eq!(engine.field.ball.position, ball);
        assert_eq!(engine.context.score, score);
    }

    #[test]
    fn test_positions_and_owner_stay_valid_over_a_long_run() {
        let mut engine = engine(42);
        let mut last_score = engine.context.score;

        for _ in 0..20_000 {
            engine.game_tick(1.0);

            if let Some(owner) = engine.field.ball.current_owner {
                assert!((owner as usize) < engine.field.players.len());
            }

            for player in &engine.field.players {
                assert!(player.position.x >= PLAYER_MARGIN && player.position.x <= PITCH_WIDTH - PLAYER_MARGIN);
                assert!(player.position.y >= PLAYER_MARGIN && player.position.y <= PITCH_HEIGHT - PLAYER_MARGIN);
                assert!(player.skills.is_within_bounds());
            }

            let score = engine.context.score;
            assert!(score.home >= last_score.home && score.away >= last_score.away);
            last_score = score;
        }
    }

    #[test]
    fn test_top_exit_gives_throw_in() {
        let mut engine = engine(3);
        engine.field.ball.place(Vector2::new(399.0, 6.0));
        engine.field.ball.velocity = Vector2::new(1.0, -3.0);

        engine.game_tick(1.0);

        let set_piece = engine.context.flow.set_piece();
        assert_eq!(engine.context.flow.state(), GameFlowState::ThrowIn);
        assert_eq!(set_piece.team, TeamSide::Away);
        assert!((set_piece.position - Vector2::new(400.0, 10.0)).norm() < 1e-4);
    }

    #[test]
    fn test_goal_leads_to_kickoff_lay_off() {
        let mut engine = engine(5);
        engine.field.ball.place(Vector2::new(795.0, 250.0));
        engine.field.ball.velocity = Vector2::new(10.0, 0.0);

        engine.game_tick(1.0);

        assert_eq!(engine.context.score.home, 1);
        assert_eq!(engine.context.flow.state(), GameFlowState::Kickoff);

        // frozen while the restart is pending
        let frozen = positions(&engine);
        for _ in 0..5 {
            engine.game_tick(1.0);
            assert_eq!(positions(&engine), frozen);
        }

        engine.game_tick(1.0);
        assert_eq!(engine.field.ball.current_owner, Some(17));
        assert_eq!(engine.context.commentary.latest(), "Kick off! AWAY to start.");

        for _ in 0..50 {
            if engine.context.flow.state() == GameFlowState::Play {
                break;
            }
            engine.game_tick(1.0);
        }

        assert_eq!(engine.context.flow.state(), GameFlowState::Play);
        assert!(engine.context.commentary.history().any(|line| line == "AWAY starts the play."));
    }

    #[test]
    fn test_keeper_kick_ends_goalie_flow() {
        let mut engine = engine(8);
        engine.field.ball.claim(&engine.field.players[0]);
        engine.context.flow.set_state(GameFlowState::Goalie);

        engine.game_tick(1.0);

        assert_eq!(engine.context.flow.state(), GameFlowState::Play);
        assert!(engine.field.ball.current_owner.is_none());
        assert_eq!(engine.field.players[0].cooldown, KICK_COOLDOWN);
    }

    #[test]
    fn test_goal_counts_even_with_a_player_next_to_the_ball() {
        let mut engine = engine(11);
        engine.field.players[9].position = Vector2::new(790.0, 250.0);
        engine.field.ball.place(Vector2::new(802.0, 250.0));
        engine.field.ball.velocity = Vector2::new(1.0, 0.0);

        engine.game_tick(1.0);

        assert_eq!(engine.context.score.home, 1);
        assert_eq!(engine.context.flow.state(), GameFlowState::Kickoff);
        assert!(engine.field.ball.current_owner.is_none());
    }

    #[test]
    fn test_wide_exit_gives_corner_before_pickup() {
        let mut engine = engine(12);
        engine.field.players[9].position = Vector2::new(790.0, 50.0);
        engine.field.ball.place(Vector2::new(802.0, 50.0));
        engine.field.ball.velocity = Vector2::new(1.0, 0.0);

        engine.game_tick(1.0);

        let set_piece = engine.context.flow.set_piece();
        assert_eq!(engine.context.flow.state(), GameFlowState::Corner);
        assert_eq!(set_piece.team, TeamSide::Away);
        assert_eq!(engine.context.score, crate::r#match::Score::new());
    }

    #[test]
    fn test_lost_take_on_stuns_both_and_frees_the_ball() {
        let mut engine = engine(13);
        engine.field.players[9].position = Vector2::new(500.0, 250.0);
        engine.field.players[13].position = Vector2::new(515.0, 250.0);
        engine.field.ball.claim(&engine.field.players[9]);

        let nudge = Vector2::new(1.5, -0.5);
        let action = CarrierAction::TakeOn(TakeOnResult::Lost {
            defender_id: 13,
            nudge,
        });

        FootballEngine::apply_carrier_action(
            &mut engine.field,
            &mut engine.context,
            &mut engine.rng,
            9,
            action,
        );

        assert_eq!(engine.field.players[13].cooldown, BEATEN_DEFENDER_STUN);
        assert_eq!(engine.field.players[9].cooldown, FAILED_DRIBBLE_STUN);
        assert!(engine.field.ball.current_owner.is_none());
        assert_eq!(engine.field.ball.velocity, nudge);
        assert_eq!(
            engine.context.commentary.latest(),
            "HOME Player 9 fails the dribble and loses control!"
        );
    }

    #[test]
    fn test_beaten_defender_is_stunned_and_carrier_keeps_the_ball() {
        let mut engine = engine(14);
        engine.field.players[9].position = Vector2::new(500.0, 250.0);
        engine.field.players[13].position = Vector2::new(515.0, 250.0);
        engine.field.ball.claim(&engine.field.players[9]);

        let past = Vector2::new(530.0, 265.0);
        let action = CarrierAction::TakeOn(TakeOnResult::Beaten {
            defender_id: 13,
            position: past,
        });

        FootballEngine::apply_carrier_action(
            &mut engine.field,
            &mut engine.context,
            &mut engine.rng,
            9,
            action,
        );

        assert_eq!(engine.field.players[13].cooldown, BEATEN_DEFENDER_STUN);
        assert_eq!(engine.field.players[9].cooldown, 0);
        assert_eq!(engine.field.players[9].position, past);
        assert_eq!(engine.field.ball.current_owner, Some(9));
        assert!(engine.context.commentary.latest().contains("dribbles past"));
    }

    #[test]
    fn test_full_time_cancels_pending_restart() {
        let config = SimulationConfig {
            minute_tick_probability: 1.0,
            ..SimulationConfig::default()
        };

        let mut engine = FootballEngine::new(&config, MatchRng::seed_from_u64(15));
        engine.kick_off();
        engine.context.time.minute = 88;

        engine.field.ball.place(Vector2::new(795.0, 250.0));
        engine.field.ball.velocity = Vector2::new(10.0, 0.0);

        assert_eq!(engine.game_tick(1.0), TickOutcome::Continue);
        assert!(engine.context.flow.is_pending());

        assert_eq!(engine.game_tick(1.0), TickOutcome::FullTime);
        assert!(!engine.context.flow.is_pending());

        for _ in 0..10 {
            assert_eq!(engine.game_tick(1.0), TickOutcome::FullTime);
        }

        assert!(engine.field.ball.current_owner.is_none());
        assert_eq!(engine.context.score.home, 1);
    }
}
