#[cfg(test)]
mod test {
    use Direction::*;
    use crate::config::EngineSettings;
    use crate::core::*;
    use crate::engine::{EngineState, GameEngine, MoveStats, NullRenderer};
    use crate::level::{BuiltinLevelSource, LevelDescriptor, LevelSource};
    use crate::test::test_util::GameTestState;

    #[test]
    fn corridor_is_solved_in_three_moves() {
        let settings = EngineSettings::default();
        let mut engine = GameEngine::load("+++\n5x1\n0,0\nggcg*\n---", &settings).unwrap();

        let outcome = engine.attempt_move(Right);
        assert!(matches!(outcome, MoveOutcome::PlayerMoved(_)));
        assert_eq!(Vec2::new(0, 1), engine.player().position);
        engine.settle(&mut NullRenderer).unwrap();

        let outcome = engine.attempt_move(Right);
        assert!(matches!(outcome, MoveOutcome::CratePushed(_)));
        assert_eq!(Vec2::new(0, 2), engine.player().position);
        assert_eq!(Ok(Tile::Crate), engine.grid().tile_at(Vec2::new(0, 3)));
        engine.settle(&mut NullRenderer).unwrap();

        let outcome = engine.attempt_move(Right);
        assert!(matches!(outcome, MoveOutcome::VictoryReached(_)));
        assert_eq!(Vec2::new(0, 3), engine.player().position);
        assert_eq!(Ok(Tile::CrateOnGoal), engine.grid().tile_at(Vec2::new(0, 4)));
        assert_eq!(EngineState::Won, engine.state());

        let report = engine.settle(&mut NullRenderer).unwrap();
        assert!(report.victory);
        assert_eq!(MoveOutcome::Rejected(RejectReason::Won), engine.attempt_move(Left));
        assert_eq!(MoveStats { moves: 3, pushes: 2 }, engine.stats());
        assert_eq!(vec!["ggggC".to_string()], engine.to_descriptor().unwrap().map_rows());
    }

    #[test]
    fn two_crate_room_is_solved() {
        let level = r#"
#######
#@$ . #
# $ . #
#######
"#;
        let mut game = GameTestState::new(level);
        game.assert_moves(&[Right, Right, Left, Left, Down, Right]);
        assert!(!game.engine.is_victory());
        assert_eq!(1, count_crates_on_goals(game.engine.grid()));

        let outcome = game.assert_move(Right);
        assert!(matches!(outcome, MoveOutcome::VictoryReached(_)));

        let expected_level = r#"
#######
#   * #
#  @* #
#######
"#;
        game.assert_matches(expected_level);
        assert_eq!(MoveStats { moves: 7, pushes: 4 }, game.engine.stats());
        assert_eq!(EngineState::Won, game.engine.state());
    }

    #[test]
    fn builtin_level_loads_unsolved() {
        let levels = BuiltinLevelSource.load().unwrap();
        assert_eq!(1, levels.len());

        let engine = GameEngine::new(&levels[0], &EngineSettings::default());
        assert_eq!(EngineState::Idle, engine.state());
        assert!(engine.accepts_input());
        assert!(engine.grid().goal_count() > 0);
        assert_eq!(engine.grid().crate_count(), engine.grid().goal_count());
    }

    #[test]
    fn restart_rebuilds_the_initial_grid() {
        let level = LevelDescriptor::parse("+++\n5x1\n0,0\nggcg*\n---").unwrap();
        let settings = EngineSettings::default();
        let mut engine = GameEngine::new(&level, &settings);
        engine.attempt_move(Right);
        engine.settle(&mut NullRenderer).unwrap();

        let restarted = GameEngine::new(&level, &settings);
        assert_eq!(Vec2::new(0, 0), restarted.player().position);
        assert_eq!(MoveStats::default(), restarted.stats());
        assert_eq!(level, restarted.to_descriptor().unwrap());
    }
}
