use rand::rngs::SmallRng;
use rand::SeedableRng;
use salvo::{
    Board, BoardError, Cell, Coord, Orientation, Shot, ShipType, Symbol, Viewer,
    PLACEMENT_ATTEMPTS, SHIPS,
};

const DESTROYER: ShipType = ShipType::new("Destroyer", 2);
const CRUISER: ShipType = ShipType::new("Cruiser", 3);

#[test]
fn test_manual_place_and_attack() {
    let mut board = Board::new(5);
    let id = board
        .place(DESTROYER, Coord::new(2, 1), Orientation::Horizontal)
        .unwrap();
    assert_eq!(board.cell(Coord::new(2, 1)).unwrap(), Cell::Occupied(id));
    assert_eq!(board.cell(Coord::new(2, 2)).unwrap(), Cell::Occupied(id));
    assert!(board.is_untouched());

    assert_eq!(board.attack(Coord::new(2, 1)).unwrap(), Shot::Hit(id));
    assert_eq!(board.attack(Coord::new(0, 0)).unwrap(), Shot::Miss);
    assert!(!board.is_untouched());

    // repeated attacks leave the cells as they were
    assert_eq!(board.attack(Coord::new(2, 1)).unwrap(), Shot::AlreadyAttacked);
    assert_eq!(board.attack(Coord::new(0, 0)).unwrap(), Shot::AlreadyAttacked);
    assert_eq!(board.cell(Coord::new(2, 1)).unwrap(), Cell::Hit(id));
    assert_eq!(board.cell(Coord::new(0, 0)).unwrap(), Cell::Miss);
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_attack_out_of_bounds() {
    let mut board = Board::new(5);
    assert_eq!(
        board.attack(Coord::new(5, 0)).unwrap_err(),
        BoardError::OutOfBounds(Coord::new(5, 0))
    );
    assert_eq!(
        board.cell(Coord::new(0, 7)).unwrap_err(),
        BoardError::OutOfBounds(Coord::new(0, 7))
    );
}

#[test]
fn test_place_failures_do_not_mutate() {
    let mut board = Board::new(5);
    assert_eq!(
        board.place(ShipType::new("Carrier", 5), Coord::new(0, 1), Orientation::Horizontal),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(CRUISER, Coord::new(3, 0), Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(DESTROYER, Coord::new(0, usize::MAX), Orientation::Horizontal),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(DESTROYER, Coord::new(usize::MAX, 0), Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(DESTROYER, Coord::new(7, 0), Orientation::Horizontal),
        Err(BoardError::ShipOutOfBounds)
    );
    board
        .place(CRUISER, Coord::new(1, 1), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        board.place(DESTROYER, Coord::new(0, 2), Orientation::Vertical),
        Err(BoardError::ShipOverlaps)
    );

    assert_eq!(board.ships().len(), 1);
    assert_eq!(board.occupied_count(), 3);
    assert_eq!(board.cell(Coord::new(0, 2)).unwrap(), Cell::Empty);
}

#[test]
fn test_snapshot_hides_ships_from_opponent() {
    let mut board = Board::new(5);
    board
        .place(DESTROYER, Coord::new(2, 1), Orientation::Horizontal)
        .unwrap();
    board.attack(Coord::new(2, 1)).unwrap();
    board.attack(Coord::new(4, 4)).unwrap();

    let theirs = board.snapshot_for(Viewer::Opponent);
    assert_eq!(theirs.get(Coord::new(2, 1)), Some(Symbol::Hit));
    assert_eq!(theirs.get(Coord::new(2, 2)), Some(Symbol::Water));
    assert_eq!(theirs.get(Coord::new(4, 4)), Some(Symbol::Miss));
    assert_eq!(theirs.count(Symbol::Ship), 0);

    let mine = board.snapshot_for(Viewer::Owner);
    assert_eq!(mine.get(Coord::new(2, 2)), Some(Symbol::Ship));
    assert_eq!(mine.count(Symbol::Water), 22);

    let rendered = theirs.to_string();
    assert_eq!(rendered.lines().count(), 6);
    assert!(rendered.contains('X'));
    assert!(!rendered.contains('S'));
}

#[test]
fn test_place_random_all_ships_no_overlap() {
    let mut board = Board::new(10);
    let mut rng = SmallRng::seed_from_u64(42);
    board
        .place_fleet(&mut rng, &SHIPS, PLACEMENT_ATTEMPTS)
        .unwrap();

    let expected: usize = SHIPS.iter().map(|s| s.length()).sum();
    assert_eq!(board.ships().len(), SHIPS.len());
    assert_eq!(
        board.occupied_count(),
        expected,
        "all ships should be placed without overlap"
    );
}

#[test]
fn test_placement_fails_when_ship_cannot_fit() {
    let board = Board::new(4);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        board.random_placement(&mut rng, SHIPS[0], PLACEMENT_ATTEMPTS),
        Err(BoardError::UnableToPlaceShip {
            name: "Carrier",
            attempts: PLACEMENT_ATTEMPTS
        })
    );

    // four cruisers cannot share a 3x3 board
    let mut crowded = Board::new(3);
    let fleet = [CRUISER; 4];
    let err = crowded
        .place_fleet(&mut rng, &fleet, PLACEMENT_ATTEMPTS)
        .unwrap_err();
    assert!(matches!(err, BoardError::UnableToPlaceShip { name: "Cruiser", .. }));
}

#[test]
fn test_reproducible_placement() {
    let mut rng1 = SmallRng::seed_from_u64(7);
    let mut rng2 = SmallRng::seed_from_u64(7);
    let mut board1 = Board::new(10);
    let mut board2 = Board::new(10);
    board1.place_fleet(&mut rng1, &SHIPS, PLACEMENT_ATTEMPTS).unwrap();
    board2.place_fleet(&mut rng2, &SHIPS, PLACEMENT_ATTEMPTS).unwrap();
    assert_eq!(board1.ships(), board2.ships());
}
