use checkers::checkers::classify::{classify, MarkerSet};
use checkers::checkers::core::Occupant;
use checkers::checkers::{Board, BoardError};
use pretty_assertions::assert_eq;

fn check(notation: &str) {
    let board = Board::try_from(notation)
        .unwrap_or_else(|e| panic!("we are checking valid boards: {notation}: {e}"));
    assert_eq!(board.to_string(), notation.trim().trim_start_matches("board "));
}

#[test]
fn valid_boards() {
    check("1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/a1a1a1a1/1a1a1a1a/a1a1a1a1");
    check("8/8/8/8/8/8/8/8");
    check("8/8/3a4/4b3/8/8/8/8");
    check("B7/8/8/3?4/8/8/8/7A");
    check("  board 8/8/8/8/8/2A5/8/8\n");
    check("abababab/BABABABA/????????/8/8/8/8/8");
}

#[test]
fn invalid_boards() {
    for notation in [
        "",
        "board",
        "8/8/8/8/8/8/8",
        "8/8/8/8/8/8/8/8/8",
        "8/8/8/8/8/8/8/7",
        "8/8/8/8/8/8/8/9",
        "8/8/8/8/8/8/8/a8",
        "8/8/8/8/8/8/8/08",
        "8/8/8/8/8/8/8/7k",
        "8/8/8/8/8/8/8/44a",
        "8/8/8/8/8/8/8/8 extra",
    ] {
        assert!(Board::try_from(notation).is_err(), "{notation}");
    }
}

#[test]
fn starting_board() {
    let board = Board::starting();
    assert_eq!(
        board.to_string(),
        "1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/a1a1a1a1/1a1a1a1a/a1a1a1a1"
    );
    for (square, occupant) in board.iter() {
        let expected = match (square.is_dark(), square.row()) {
            (true, 0..=2) => Occupant::Opponent,
            (true, 5..=7) => Occupant::Active,
            _ => Occupant::Empty,
        };
        assert_eq!(occupant, expected, "{square}");
    }
}

#[test]
fn classification() {
    let markers = MarkerSet::new("orange", "blue", "king").unwrap();
    assert_eq!(markers.classify("blueking_piece.png"), Occupant::OpponentKing);
    assert_eq!(markers.classify("orange.gif"), Occupant::Active);
    assert_eq!(markers.classify("empty.png"), Occupant::Empty);
    assert_eq!(markers.classify("ORANGE_KING.png"), Occupant::ActiveKing);
    assert_eq!(markers.classify(""), Occupant::Empty);

    assert_eq!(classify("you1.gif"), Occupant::Active);
    assert_eq!(classify("me1.gif"), Occupant::Opponent);
    assert_eq!(classify("you1king.gif"), Occupant::ActiveKing);
    assert_eq!(classify("me1king.gif"), Occupant::OpponentKing);
    assert_eq!(classify("gray.gif"), Occupant::Empty);

    assert!(MarkerSet::new("", "blue", "king").is_err());
}

#[test]
fn rendered_markers() {
    let markers = MarkerSet::default();
    let mut rendered = vec!["gray.gif"; 64];
    rendered[19] = "you1.gif";
    rendered[28] = "me1.gif";
    rendered[63] = "me1king.gif";
    let board = Board::from_markers(&rendered, &markers).unwrap();
    assert_eq!(board.to_string(), "8/8/3a4/4b3/8/8/8/7B");

    assert_eq!(
        Board::from_markers(&rendered[..40], &markers),
        Err(BoardError::Malformed { squares: 40 })
    );
    rendered.push("gray.gif");
    assert_eq!(
        Board::from_markers(&rendered, &markers),
        Err(BoardError::Malformed { squares: 65 })
    );
}
