//! Integration tests for the board coordinate transform
//!
//! Exercises the public mapping between algebraic squares, discrete board
//! coordinates and continuous 3D positions across the whole board.

use board3d_chess::board::{
    all_squares, coordinate_to_square, is_dark_square, is_light_square, is_valid_square,
    position_to_square, square_to_coordinate, square_to_position, Position3D, Square,
};
use board3d_chess::core::GameError;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn test_square_coordinate_round_trip() {
    //! Every square survives square -> coordinate -> square
    for square in all_squares() {
        let coordinate = square_to_coordinate(&square.to_string()).unwrap();
        assert_eq!(coordinate_to_square(coordinate.file, coordinate.rank), square);
    }
}

#[test]
fn test_coordinate_position_round_trip() {
    //! Every coordinate survives coordinate -> position -> square
    for file in 0..8 {
        for rank in 0..8 {
            let square = coordinate_to_square(file, rank);
            assert_eq!(position_to_square(square_to_position(square)), Some(square));
        }
    }
}

#[test]
fn test_positions_are_centered_on_the_origin() {
    assert_eq!(square_to_position(sq("a1")), Position3D::new(-3.5, 0.0, -3.5));
    assert_eq!(square_to_position(sq("h8")), Position3D::new(3.5, 0.0, 3.5));
    assert!(all_squares()
        .into_iter()
        .all(|square| square_to_position(square).y == 0.0));
}

// ============================================================================
// Inverse Mapping Tests
// ============================================================================

#[test]
fn test_off_board_positions_have_no_square() {
    assert_eq!(position_to_square(Position3D::new(10.0, 0.0, 10.0)), None);
    assert_eq!(position_to_square(Position3D::new(-4.1, 0.0, 0.0)), None);
    assert_eq!(position_to_square(Position3D::new(0.0, 0.0, 4.1)), None);
    assert_eq!(position_to_square(Position3D::new(f32::NAN, 0.0, 0.0)), None);
}

#[test]
fn test_nearby_positions_round_to_the_square() {
    //! Anything within half a square of the center maps to that square
    let center = square_to_position(sq("d5"));
    for (dx, dz) in [(0.4, 0.0), (-0.4, 0.0), (0.0, 0.4), (0.0, -0.4), (0.3, -0.3)] {
        let pointer = Position3D::new(center.x + dx, 0.0, center.z + dz);
        assert_eq!(position_to_square(pointer), Some(sq("d5")));
    }
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_light_and_dark_partition_the_board() {
    let light = all_squares().into_iter().filter(|s| is_light_square(*s)).count();
    let dark = all_squares().into_iter().filter(|s| is_dark_square(*s)).count();
    assert_eq!(light, 32);
    assert_eq!(dark, 32);
    assert!(all_squares()
        .into_iter()
        .all(|s| is_light_square(s) != is_dark_square(s)));

    assert!(is_light_square(sq("a1")));
    assert!(is_light_square(sq("h8")));
    assert!(!is_light_square(sq("a8")));
    assert!(!is_light_square(sq("h1")));
}

#[test]
fn test_square_validation() {
    for raw in ["a1", "h8", "e4"] {
        assert!(is_valid_square(raw));
    }
    for raw in ["", "a", "a0", "a9", "i1", "A1", "e4 ", "e44"] {
        assert!(!is_valid_square(raw), "{raw:?} should be rejected");
    }
    assert!(matches!(
        square_to_coordinate("j9"),
        Err(GameError::InvalidSquare(_))
    ));
}

#[test]
fn test_all_squares_order() {
    let squares: Vec<String> = all_squares().iter().map(Square::to_string).collect();
    assert_eq!(squares.len(), 64);
    assert_eq!(&squares[..3], ["a1", "b1", "c1"]);
    assert_eq!(squares[8], "a2");
    assert_eq!(squares[63], "h8");
}
