use sim::layout;
use sim::{
    ActionKind, Button, Direction, EntityId, Game, Host, LadderDirection, Mode, Pos, RosterEntry,
    ScriptedHost, SimConfig, SimError, SimEvent, TickOutcome, Turn, World,
};

const THREE_WALLED_GOBLINS: &str = "\
###########
#@.#g#g#g.#
###########";

const GOBLIN_DOWN_THE_HALL: &str = "\
########
#@....g#
########";

const PLAYER_BESIDE_GOBLIN: &str = "\
#####
#@g.#
#####";

const DOOR_THEN_GOBLIN: &str = "\
########
#@+...g#
########";

const LADDER_ROOM: &str = "\
#######
#@>..g#
#######";

fn game_from(text: &str) -> Game {
    Game::new(SimConfig::default(), layout::parse(text).expect("layout")).expect("game")
}

fn npcs(game: &Game) -> Vec<EntityId> {
    game.world().entities().filter(|id| game.world().npcs.contains_key(*id)).collect()
}

/// Ticks until control is back with the player, returning every outcome on the way.
fn finish_npc_phase(game: &mut Game, host: &mut ScriptedHost) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..200 {
        let outcome = game.tick(host).expect("tick");
        outcomes.push(outcome);
        if outcome == TickOutcome::PlayerTurnResumed {
            return outcomes;
        }
    }
    panic!("npc phase never ended: {outcomes:?}");
}

#[test]
fn roster_snapshots_every_npc_with_the_player_cost() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let mut host = ScriptedHost::new([Button::Direction(Direction::Right)]);

    assert_eq!(game.tick(&mut host).expect("tick"), TickOutcome::PlayerActed);

    let speed = game.world().player_speed().expect("speed");
    let expected: Vec<RosterEntry> =
        npcs(&game).into_iter().map(|entity| RosterEntry { entity, budget: speed }).collect();
    assert_eq!(game.roster(), expected.as_slice());
    assert_eq!(game.roster().len(), 3);
    assert_eq!(game.turn(), Turn::Npc { index: 0, moved: 0 });
}

#[test]
fn zero_progress_pass_returns_to_player_after_exactly_one_pass() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let mut host = ScriptedHost::new([Button::Direction(Direction::Right)]);
    game.tick(&mut host).expect("player");

    for index in 0..3 {
        let outcome = game.tick(&mut host).expect("npc");
        assert!(matches!(outcome, TickOutcome::NpcStepped { progressed: false, .. }));
        assert_eq!(game.turn(), Turn::Npc { index: index + 1, moved: 0 });
    }
    assert_eq!(game.tick(&mut host).expect("end of pass"), TickOutcome::PlayerTurnResumed);
    assert_eq!(game.turn(), Turn::Player);
}

#[test]
fn npc_faster_than_player_gets_extra_passes() {
    let mut world = layout::parse(GOBLIN_DOWN_THE_HALL).expect("layout");
    let goblin = world.entities().find(|id| world.npcs.contains_key(*id)).expect("goblin");
    world.speeds.insert(goblin, 5);
    let mut game = Game::new(SimConfig::default(), world).expect("game");
    // Bumping the west wall still spends the player's turn.
    let mut host = ScriptedHost::new([Button::Direction(Direction::Left)]);
    game.tick(&mut host).expect("player");

    let outcomes = finish_npc_phase(&mut game, &mut host);
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::NpcStepped { entity: goblin, progressed: true },
            TickOutcome::RoundRestarted,
            TickOutcome::NpcStepped { entity: goblin, progressed: true },
            TickOutcome::RoundRestarted,
            TickOutcome::NpcStepped { entity: goblin, progressed: false },
            TickOutcome::PlayerTurnResumed,
        ]
    );
    assert_eq!(game.world().position(goblin), Some(Pos { y: 1, x: 4 }));
    assert_eq!(game.roster()[0].budget, 0);
}

#[test]
fn npc_hit_is_recorded_as_attacking() {
    let mut game = game_from(PLAYER_BESIDE_GOBLIN);
    let goblin = npcs(&game)[0];
    let player = game.world().player;
    let mut host = ScriptedHost::new([Button::Direction(Direction::Up)]);
    game.tick(&mut host).expect("player");

    let before = game.world().healths[player].current;
    assert_eq!(
        game.tick(&mut host).expect("npc"),
        TickOutcome::NpcStepped { entity: goblin, progressed: true }
    );
    assert_eq!(game.attacking(), Some(goblin));
    assert!(game.world().healths[player].current < before);
    assert!(host.events.iter().any(|event| matches!(
        event,
        SimEvent::EntityHit { attacker, target, .. } if *attacker == goblin && *target == player
    )));
}

#[test]
fn animations_pause_the_scheduler_mid_phase() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let mut host = ScriptedHost::new([Button::Direction(Direction::Right)]);
    game.tick(&mut host).expect("player");
    game.tick(&mut host).expect("first npc");
    let turn = game.turn();
    let tick = game.current_tick();

    host.animating = true;
    assert_eq!(game.tick(&mut host).expect("paused"), TickOutcome::Animating);
    assert_eq!(game.turn(), turn);
    assert_eq!(game.current_tick(), tick);

    host.animating = false;
    assert!(matches!(game.tick(&mut host).expect("resumed"), TickOutcome::NpcStepped { .. }));
    assert_eq!(game.turn(), Turn::Npc { index: 2, moved: 0 });
}

#[test]
fn cancel_opens_menu_and_stops_the_tick() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let start = game.world().player_pos().expect("pos");
    let mut host = ScriptedHost::new([Button::Cancel, Button::Direction(Direction::Right)]);

    assert_eq!(game.tick(&mut host).expect("cancel"), TickOutcome::ModeChanged);
    assert_eq!(game.mode(), Mode::Menu);
    assert_eq!(game.turn(), Turn::Player);
    assert!(game.roster().is_empty());

    assert_eq!(game.tick(&mut host).expect("menu"), TickOutcome::Suspended);
    assert_eq!(host.buttons.len(), 1, "menu owns input while open");

    game.set_mode(Mode::Explore);
    assert_eq!(game.tick(&mut host).expect("move"), TickOutcome::PlayerActed);
    assert_eq!(game.world().player_pos().expect("pos"), start.step(Direction::Right));
}

#[test]
fn no_input_is_idle() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let mut host = ScriptedHost::default();
    assert_eq!(game.tick(&mut host).expect("tick"), TickOutcome::Idle);
    assert_eq!(game.turn(), Turn::Player);
}

struct BrokenInput;

impl sim::EventSink for BrokenInput {
    fn send_event(&mut self, _event: SimEvent) -> Result<(), SimError> {
        Ok(())
    }
}

impl Host for BrokenInput {
    fn poll_button(&mut self) -> Result<Option<Button>, SimError> {
        Err(SimError::Input("controller disconnected".to_string()))
    }

    fn change_level(
        &mut self,
        _world: &mut World,
        _ladder: EntityId,
        _direction: LadderDirection,
    ) -> Result<(), SimError> {
        Ok(())
    }
}

#[test]
fn input_errors_abort_the_tick() {
    let mut game = game_from(THREE_WALLED_GOBLINS);
    let err = game.tick(&mut BrokenInput).unwrap_err();
    assert!(matches!(err, SimError::Input(message) if message == "controller disconnected"));
    assert_eq!(game.turn(), Turn::Player);
    assert_eq!(game.current_tick(), 0);
}

#[test]
fn confirm_on_ladder_changes_level() {
    let mut game = game_from(LADDER_ROOM);
    let ladder = game
        .world()
        .entities()
        .find(|id| game.world().ladders.contains_key(*id))
        .expect("ladder");
    let mut host = ScriptedHost::new([Button::Direction(Direction::Right)]);
    game.tick(&mut host).expect("step onto ladder");
    assert_eq!(game.focus(), Some(ladder));
    assert_eq!(game.quick_action().kind, ActionKind::MoveToLevel(ladder));

    finish_npc_phase(&mut game, &mut host);
    host.push(Button::Confirm);
    assert_eq!(game.tick(&mut host).expect("descend"), TickOutcome::PlayerActed);

    assert_eq!(host.level_changes, vec![(ladder, LadderDirection::Down)]);
    assert_eq!(game.world().depth, 2);
}

#[test]
fn focus_is_only_refreshed_after_the_player_acts() {
    let mut game = game_from(DOOR_THEN_GOBLIN);
    let (door, _) = game.world().door_at(Pos { y: 1, x: 2 }).expect("door");
    assert_eq!(game.focus(), Some(door));
    let mut host = ScriptedHost::new([Button::Direction(Direction::Up)]);
    assert_eq!(game.tick(&mut host).expect("bump"), TickOutcome::PlayerActed);
    let quick_action = game.quick_action();
    assert_eq!(quick_action.kind, ActionKind::Open(door));

    // Opening it behind the scheduler's back would make the quick action Close.
    game.world_mut().doors[door].open = true;
    let mut npc_ticks = 0;
    loop {
        let outcome = game.tick(&mut host).expect("npc phase");
        assert_eq!(game.focus(), Some(door));
        assert_eq!(game.quick_action(), quick_action);
        match outcome {
            TickOutcome::NpcStepped { .. } => npc_ticks += 1,
            TickOutcome::PlayerTurnResumed => break,
            TickOutcome::RoundRestarted => {}
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert!(npc_ticks > 0);

    host.push(Button::Direction(Direction::Up));
    assert_eq!(game.tick(&mut host).expect("bump"), TickOutcome::PlayerActed);
    assert_eq!(game.focus(), Some(door));
    assert_eq!(game.quick_action().kind, ActionKind::Close(door));
}
