use crate::board::{Board, GameOutcome, Player};
use crate::error::{Error, Result};
use crate::random::RandomGenerator;
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The content of a single cell.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is represented by a 9-element array in row-major order.
/// A move is represented by a `u8` from 0 to 8.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct TicTacToeBoard {
    field: [Cell; BOARD_SIZE],
}

impl TicTacToeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from raw cells. The position is not validated; see [`Board::validate`].
    pub fn from_cells(field: [Cell; BOARD_SIZE]) -> Self {
        Self { field }
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.field
    }

    /// Returns the cell at `index`, or `None` when the index is off the board.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.field.get(index).copied()
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        let cell = Cell::from(player);
        self.field.iter().filter(|&&x| x == cell).count()
    }

    pub fn is_full(&self) -> bool {
        self.field.iter().all(|x| !x.is_empty())
    }

    /// Indices of the cells that hold a mark, in ascending order.
    pub fn occupied(&self) -> Vec<u8> {
        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| !x.is_empty())
            .map(|(i, _)| i as u8)
            .collect()
    }

    /// Plays up to `plies` random legal moves from the empty board, X first.
    ///
    /// Stops early when the game ends. Returns the board together with the player to move.
    pub fn random_position<K: RandomGenerator>(rng: &mut K, plies: usize) -> (Self, Player) {
        let mut board = Self::new();
        let mut player = Player::X;
        for _ in 0..plies {
            if board.evaluate().is_terminal() {
                break;
            }
            let moves = board.legal_moves();
            let Some(&b_move) = rng.get_random_from_vec(&moves) else {
                break;
            };
            board.field[b_move as usize] = Cell::from(player);
            player = player.opponent();
        }
        (board, player)
    }

    fn has_line(&self, player: Player) -> bool {
        let cell = Cell::from(player);
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.field[i] == cell))
    }

    fn check_index(index: usize) -> Result<()> {
        if index >= BOARD_SIZE {
            return Err(Error::CellOutOfRange {
                index,
                size: BOARD_SIZE,
            });
        }
        Ok(())
    }
}

impl Board for TicTacToeBoard {
    type Move = u8;

    fn legal_moves(&self) -> Vec<Self::Move> {
        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_empty())
            .map(|(i, _)| i as u8)
            .collect()
    }

    fn apply_move(&mut self, b_move: Self::Move, player: Player) -> Result<()> {
        let index = b_move as usize;
        Self::check_index(index)?;
        if let Some(occupant) = self.field[index].player() {
            return Err(Error::CellOccupied { index, occupant });
        }
        self.field[index] = Cell::from(player);
        Ok(())
    }

    fn undo_move(&mut self, b_move: Self::Move) -> Result<Player> {
        let index = b_move as usize;
        Self::check_index(index)?;
        let player = self.field[index]
            .player()
            .ok_or(Error::CellEmpty { index })?;
        self.field[index] = Cell::Empty;
        Ok(player)
    }

    fn evaluate(&self) -> GameOutcome {
        for line in WINNING_LINES {
            let first = self.field[line[0]];
            if let Some(player) = first.player() {
                if first == self.field[line[1]] && first == self.field[line[2]] {
                    return GameOutcome::from_winner(player);
                }
            }
        }

        if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    fn remaining_moves(&self) -> usize {
        self.field.iter().filter(|x| x.is_empty()).count()
    }

    fn validate(&self) -> Result<Player> {
        let x_count = self.count(Player::X);
        let o_count = self.count(Player::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }

        let last_mover = if x_count == o_count {
            Player::O
        } else {
            Player::X
        };
        match (self.has_line(Player::X), self.has_line(Player::O)) {
            (true, true) => return Err(Error::BothPlayersWin),
            (true, false) if last_mover != Player::X => {
                return Err(Error::WinnerMismatch {
                    winner: Player::X,
                    last_mover,
                });
            }
            (false, true) if last_mover != Player::O => {
                return Err(Error::WinnerMismatch {
                    winner: Player::O,
                    last_mover,
                });
            }
            _ => {}
        }

        Ok(last_mover.opponent())
    }

    fn get_hash(&self) -> u128 {
        let mut hash = 0;
        for (i, &cell) in self.field.iter().enumerate() {
            let cell_value = match cell {
                Cell::Empty => 0,
                Cell::X => 1,
                Cell::O => 2,
            };
            hash += cell_value * 3u128.pow(i as u32);
        }
        hash
    }
}

impl fmt::Display for TicTacToeBoard {
    /// Renders three rows such as `X|-|O`, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.field.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}|{}|{}",
                cells[0].symbol(),
                cells[1].symbol(),
                cells[2].symbol()
            )?;
        }
        Ok(())
    }
}

impl FromStr for TicTacToeBoard {
    type Err = Error;

    /// Parses nine cell characters (`X`, `O`, and `-`, `.` or `_` for empty).
    /// Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut field = [Cell::Empty; BOARD_SIZE];
        let mut got = 0;
        for (position, character) in s.chars().enumerate() {
            let cell = match character {
                'X' | 'x' => Cell::X,
                'O' | 'o' => Cell::O,
                '-' | '.' | '_' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                _ => {
                    return Err(Error::InvalidCellCharacter {
                        character,
                        position,
                        context: s.to_string(),
                    });
                }
            };
            if got < BOARD_SIZE {
                field[got] = cell;
            }
            got += 1;
        }

        if got != BOARD_SIZE {
            return Err(Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got,
                context: s.to_string(),
            });
        }
        Ok(Self { field })
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, GameOutcome, Player};
    use crate::boards::tic_tac_toe::{Cell, TicTacToeBoard};
    use crate::error::Error;
    use crate::random::CustomNumberGenerator;

    fn board(s: &str) -> TicTacToeBoard {
        s.parse().unwrap()
    }

    #[test]
    fn empty_board_offers_every_cell() {
        let board = TicTacToeBoard::new();
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<u8>>());
        assert_eq!(board.evaluate(), GameOutcome::Ongoing);
        assert_eq!(board.remaining_moves(), 9);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        for s in ["XOXXOOOXX", "XOXOOXXXO", "XXOOOXXOX"] {
            let board = board(s);
            assert_eq!(board.evaluate(), GameOutcome::Draw, "{s}");
            assert!(board.legal_moves().is_empty());
        }
    }

    #[test]
    fn every_line_is_a_win() {
        let lines = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];
        for line in lines {
            for (player, expected) in [
                (Player::X, GameOutcome::XWins),
                (Player::O, GameOutcome::OWins),
            ] {
                let mut field = [Cell::Empty; 9];
                for i in line {
                    field[i] = Cell::from(player);
                }
                let board = TicTacToeBoard::from_cells(field);
                assert_eq!(board.evaluate(), expected, "{line:?}");
                assert_eq!(board.evaluate().winner(), Some(player));
                assert_eq!(board.cells(), &field);
            }
        }
    }

    #[test]
    fn win_on_full_board_beats_draw() {
        assert_eq!(board("XOXOXOOXX").evaluate(), GameOutcome::XWins);
    }

    #[test]
    fn apply_rejects_occupied_and_out_of_range() {
        // arrange
        let mut board = board("----X----");

        // act & assert
        assert_eq!(board.cell(4), Some(Cell::X));
        assert_eq!(board.cell(9), None);
        assert_eq!(
            board.apply_move(4, Player::O),
            Err(Error::CellOccupied {
                index: 4,
                occupant: Player::X
            })
        );
        assert_eq!(
            board.apply_move(9, Player::O),
            Err(Error::CellOutOfRange { index: 9, size: 9 })
        );
        assert_eq!(board.count(Player::O), 0);
    }

    #[test]
    fn undo_rejects_empty_cell() {
        let mut board = TicTacToeBoard::new();
        assert_eq!(board.undo_move(3), Err(Error::CellEmpty { index: 3 }));
    }

    #[test]
    fn apply_then_undo_restores_board() {
        let mut rng = CustomNumberGenerator::new(7);
        for plies in 0..9 {
            // arrange
            let (mut board, player) = TicTacToeBoard::random_position(&mut rng, plies);
            let before = board;

            for b_move in board.legal_moves() {
                // act
                board.apply_move(b_move, player).unwrap();
                let removed = board.undo_move(b_move).unwrap();

                // assert
                assert_eq!(removed, player);
                assert_eq!(board, before);
                assert_eq!(board.get_hash(), before.get_hash());
            }
        }
    }

    #[test]
    fn legal_and_occupied_cover_the_board() {
        let mut rng = CustomNumberGenerator::default();
        for plies in 0..=9 {
            let (board, _) = TicTacToeBoard::random_position(&mut rng, plies);
            let mut all = board.legal_moves();
            all.extend(board.occupied());
            all.sort_unstable();
            assert_eq!(all, (0..9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn random_positions_are_valid() {
        let mut rng = CustomNumberGenerator::new(42);
        for plies in 0..=9 {
            let (board, player) = TicTacToeBoard::random_position(&mut rng, plies);
            assert_eq!(board.validate(), Ok(player), "{board}");
        }
    }

    #[test]
    fn validate_reports_player_to_move() {
        assert_eq!(TicTacToeBoard::new().validate(), Ok(Player::X));
        assert_eq!(board("X--------").validate(), Ok(Player::O));
        assert_eq!(board("XXXOO----").validate(), Ok(Player::O));
    }

    #[test]
    fn validate_rejects_unreachable_positions() {
        assert_eq!(
            board("XX-------").validate(),
            Err(Error::InvalidPieceCounts {
                x_count: 2,
                o_count: 0
            })
        );
        assert_eq!(
            board("O--------").validate(),
            Err(Error::InvalidPieceCounts {
                x_count: 0,
                o_count: 1
            })
        );
        assert_eq!(board("XXXOOO---").validate(), Err(Error::BothPlayersWin));
        assert_eq!(
            board("XXX-OO-O-").validate(),
            Err(Error::WinnerMismatch {
                winner: Player::X,
                last_mover: Player::O
            })
        );
        assert_eq!(
            board("OOOXX-XX-").validate(),
            Err(Error::WinnerMismatch {
                winner: Player::O,
                last_mover: Player::X
            })
        );
    }

    #[test]
    fn display_output_parses_back() {
        // arrange
        let board = board("X-O|-X-|O--");

        // act
        let rendered = board.to_string();

        // assert
        assert_eq!(rendered, "X|-|O\n-|X|-\nO|-|-");
        assert_eq!(rendered.parse::<TicTacToeBoard>(), Ok(board));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "XO-".parse::<TicTacToeBoard>(),
            Err(Error::InvalidBoardLength {
                expected: 9,
                got: 3,
                context: "XO-".to_string()
            })
        );
        assert_eq!(
            "XO-?-----".parse::<TicTacToeBoard>(),
            Err(Error::InvalidCellCharacter {
                character: '?',
                position: 3,
                context: "XO-?-----".to_string()
            })
        );
    }

    #[test]
    fn hash_distinguishes_positions() {
        assert_eq!(TicTacToeBoard::new().get_hash(), 0);
        assert_eq!(board("X--------").get_hash(), 1);
        assert_eq!(board("O--------").get_hash(), 2);
        assert_eq!(board("-X-------").get_hash(), 3);
    }
}
