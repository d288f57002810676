use std::cell::RefCell;
use std::rc::Rc;

use minesweeper_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn new_game(difficulty: Difficulty, seed: u64) -> Game<ManualClock, MemoryStore> {
    Game::with_seed(difficulty, ManualClock::new(), MemoryStore::new(), seed)
}

#[test]
fn easy_first_click_starts_round() {
    let mut game = new_game(Difficulty::Easy, 11);

    game.first_click((5, 5));

    assert_eq!(game.status(), GameStatus::Playing);
    let cell = game.board().get_cell((5, 5)).unwrap();
    assert!(!cell.is_mine());
    assert!(cell.is_revealed());
    assert!(game.clock().is_running());
    assert_eq!(game.board().mine_coords().count(), 10);
}

#[test]
fn densest_board_has_a_unique_safe_cell() {
    let config = GameConfig::new(5, 5, 24).unwrap();
    let mut board = Board::new(config).unwrap();

    board
        .place_mines((4, 0), &mut SmallRng::seed_from_u64(99))
        .unwrap();

    let safe: Vec<Coord2> = board
        .cells()
        .filter(|cell| !cell.is_mine())
        .map(Cell::coords)
        .collect();
    assert_eq!(safe, vec![(4, 0)]);
    assert_eq!(board.reveal_region((4, 0)).len(), 1);
    assert!(board.check_victory());
}

#[test]
fn clicking_a_mine_loses_the_round() {
    let mut game = new_game(Difficulty::Normal, 5);
    game.first_click((7, 8));
    game.tick();
    let mine = game.board().mine_coords().next().unwrap();

    game.click_cell(mine);

    assert_eq!(game.status(), GameStatus::Lost);
    assert!(!game.clock().is_running());
    let mines: Vec<Coord2> = game.board().mine_coords().collect();
    assert!(
        mines
            .iter()
            .all(|&pos| game.board().get_cell(pos).unwrap().is_revealed())
    );
    game.tick();
    assert_eq!(game.elapsed_secs(), 1);
}

#[test]
fn flagging_all_easy_mines_wins_without_revealing() {
    let mut game = new_game(Difficulty::Easy, 23);
    game.first_click((0, 0));
    let revealed_before = game.board().revealed_count();

    let mines: Vec<Coord2> = game.board().mine_coords().collect();
    for pos in mines {
        game.toggle_flag(pos);
    }

    assert!(game.board().check_victory());
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.board().revealed_count(), revealed_before);
}

#[test]
fn change_difficulty_from_any_state() {
    let mut game = new_game(Difficulty::Easy, 8);
    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = events.clone();
        game.subscribe(move |event: &GameEvent| events.borrow_mut().push(*event));
    }

    for _ in 0..2 {
        game.first_click((1, 1));
        game.tick();
        game.change_difficulty(Difficulty::Hard);

        assert_eq!(game.board().size(), (18, 22));
        assert_eq!(game.board().mine_count(), 70);
        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(game.elapsed_secs(), 0);
    }

    assert!(events.borrow().ends_with(&[
        GameEvent::TimerTick(0),
        GameEvent::StatusChanged(GameStatus::Idle),
        GameEvent::BoardUpdated,
    ]));
}

#[test]
fn best_times_survive_a_new_session() {
    let path = std::env::temp_dir()
        .join(format!("minesweeper-core-scenario-{}", std::process::id()))
        .join("records.json");

    let mut game = Game::with_seed(
        Difficulty::Easy,
        ManualClock::new(),
        JsonFileStore::new(&path),
        4,
    );
    game.first_click((5, 5));
    for _ in 0..12 {
        game.tick();
    }
    let mines: Vec<Coord2> = game.board().mine_coords().collect();
    for pos in mines {
        game.toggle_flag(pos);
    }
    assert_eq!(game.status(), GameStatus::Won);

    let next = Game::new(
        Difficulty::Easy,
        InstantClock::new(),
        JsonFileStore::new(&path),
    );
    assert_eq!(next.current_record(), 12);
    assert_eq!(next.records().get(Difficulty::Hard), UNSET_BEST_TIME);

    std::fs::remove_file(path).unwrap();
}
