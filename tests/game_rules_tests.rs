//! Game rules: tick clock, action queue, scoring and the loss edge.

use pocket_tetris::core::{GameState, Randomizer, SimpleRng, Tetromino};
use pocket_tetris::types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn staged(kind: PieceKind, x: i8, y: i8) -> GameState {
    let mut game = GameState::new(7);
    game.set_current_piece(Tetromino { kind, rotation: Rotation::North, x, y });
    game.set_next_piece(Tetromino::new(PieceKind::O, 0));
    game
}

#[test]
fn test_random_play_keeps_board_consistent() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::Drop,
    ];

    for seed in 1..=20u32 {
        let mut game = GameState::new(seed);
        let mut rng = SimpleRng::new(seed.wrapping_mul(7919));
        let mut last_score = 0;

        for _ in 0..2_000 {
            let action = match rng.next_range(6) as usize {
                i if i < actions.len() => Some(actions[i]),
                _ => None,
            };
            game.tick(rng.next_range(120), action);

            assert!(game.score() >= last_score);
            assert!(game.visual_score() <= game.score());
            last_score = game.score();

            for y in 0..BOARD_HEIGHT as usize {
                assert!(!game.board().is_row_full(y), "seed {} left row {} full", seed, y);
            }

            if game.playing() {
                let piece = game.current();
                assert!(piece.is_valid(game.board()), "seed {}: {:?} overlaps", seed, piece);
                for (x, y) in piece.blocks() {
                    assert!((0..BOARD_WIDTH as i8).contains(&x));
                    assert!((0..BOARD_HEIGHT as i8).contains(&y));
                }
            } else {
                game.reset();
                last_score = 0;
            }
        }
    }
}

#[test]
fn test_queued_actions_apply_one_per_tick_in_order() {
    let mut game = staged(PieceKind::T, 5, 0);
    game.enqueue(GameAction::MoveLeft);
    game.enqueue(GameAction::Rotate);
    game.enqueue(GameAction::MoveRight);

    game.tick(0, None);
    assert_eq!((game.current().x, game.current().rotation), (4, Rotation::North));
    game.tick(0, None);
    assert_eq!((game.current().x, game.current().rotation), (4, Rotation::East));
    game.tick(0, None);
    assert_eq!((game.current().x, game.current().rotation), (5, Rotation::East));
    assert_eq!(game.pending_actions(), 0);
}

#[test]
fn test_tick_action_is_queued_behind_pending_ones() {
    let mut game = staged(PieceKind::T, 5, 0);
    game.enqueue(GameAction::Rotate);

    game.tick(0, Some(GameAction::MoveLeft));
    assert_eq!(game.current().rotation, Rotation::East);
    assert_eq!(game.current().x, 5);

    game.tick(0, None);
    assert_eq!(game.current().x, 4);
}

#[test]
fn test_actions_from_another_thread() {
    let mut game = staged(PieceKind::T, 5, 0);
    let sender = game.action_sender();

    std::thread::spawn(move || {
        assert!(sender.send(GameAction::MoveRight));
    })
    .join()
    .unwrap();

    game.tick(0, None);
    assert_eq!(game.current().x, 6);
}

#[test]
fn test_auto_drop_requires_strictly_more_than_interval() {
    let mut game = staged(PieceKind::T, 5, 0);

    game.tick(500, None);
    assert_eq!(game.current().y, 0);

    assert!(game.tick(1, None));
    assert_eq!(game.current().y, 1);
    assert_eq!(game.elapsed_ms(), 1);
}

#[test]
fn test_long_tick_drops_several_rows() {
    let mut game = staged(PieceKind::T, 5, 0);
    game.tick(1_500, None);
    // 1500 -> 1000 -> 500; the loop stops once the remainder is not above 500.
    assert_eq!(game.current().y, 2);
    assert_eq!(game.elapsed_ms(), 500);
}

#[test]
fn test_single_row_clear_scores_lock_plus_hundred() {
    let mut game = staged(PieceKind::I, 0, 13);
    for x in 4..BOARD_WIDTH as i8 {
        game.board_mut().set(x, 14, Some(PieceKind::Z));
    }

    game.tick(0, Some(GameAction::Drop));

    assert_eq!(game.score(), 110);
    assert_eq!(game.rows(), 1);
    assert_eq!(game.board().filled_count(), 0);
    let ev = game.take_last_event().expect("lock event");
    assert_eq!(ev.kind, PieceKind::I);
    assert_eq!(ev.lines_cleared, 1);
    assert_eq!(ev.line_clear_score, 100);
    assert!(!ev.lost);
}

#[test]
fn test_four_row_clear_then_visual_score_catches_up() {
    let mut game = GameState::new(7);
    game.set_current_piece(Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::East,
        x: 0,
        y: 11,
    });
    game.set_next_piece(Tetromino::new(PieceKind::O, 0));
    for y in 11..BOARD_HEIGHT as i8 {
        game.board_mut().fill_row(y, PieceKind::S, Some(2));
    }

    game.tick(0, Some(GameAction::Drop));
    assert_eq!(game.score(), 810);
    assert_eq!(game.rows(), 4);
    assert_eq!(game.visual_score(), 0);

    for _ in 0..50 {
        game.tick(0, None);
    }
    assert_eq!(game.visual_score(), 50);
    assert!(game.playing());
}

#[test]
fn test_blocked_spawn_loses_exactly_once() {
    let mut game = staged(PieceKind::O, 6, 0);
    // The next O spawns at x=0 and needs (1,1) free.
    game.board_mut().set(1, 1, Some(PieceKind::L));

    let mut ticks = 0;
    while game.playing() {
        game.tick(0, Some(GameAction::Drop));
        ticks += 1;
        assert!(ticks < 100, "piece never locked");
    }

    let ev = game.take_last_event().expect("lock event");
    assert!(ev.lost);
    assert_eq!(game.score(), 10);
    assert!(game.take_just_lost());
    assert!(!game.take_just_lost());

    // A lost game ignores further ticks.
    let visual = game.visual_score();
    game.tick(10_000, Some(GameAction::MoveLeft));
    assert_eq!(game.visual_score(), visual);
    assert!(!game.take_just_lost());
}

#[test]
fn test_forfeit_and_reset() {
    let mut game = GameState::new(3);
    game.tick(0, Some(GameAction::Drop));
    game.forfeit();
    assert!(!game.playing());
    assert!(game.just_lost());

    game.forfeit();
    assert!(game.take_just_lost());
    assert!(!game.take_just_lost());

    game.board_mut().fill_row(14, PieceKind::T, Some(0));
    game.reset();
    assert!(game.playing());
    assert!(!game.just_lost());
    assert_eq!(game.score(), 0);
    assert_eq!(game.visual_score(), 0);
    assert_eq!(game.rows(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.current().y, 0);
}

#[test]
fn test_piece_kinds_follow_bag_weights() {
    let mut randomizer = Randomizer::new(2024);
    let mut counts = [0u32; 7];
    let draws = 28_000;
    for _ in 0..draws {
        counts[randomizer.next_kind().index()] += 1;
    }

    let expected = draws / 7;
    for (i, &n) in counts.iter().enumerate() {
        assert!(
            n.abs_diff(expected) <= expected / 10,
            "{:?} drawn {} times, expected about {}",
            PieceKind::ALL[i],
            n,
            expected
        );
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    for i in 0..500u32 {
        let action = (i % 3 == 0).then_some(GameAction::Drop);
        a.tick(16, action);
        b.tick(16, action);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
