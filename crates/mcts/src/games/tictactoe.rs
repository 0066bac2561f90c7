//! Tic-tac-toe implementation of the `GameState` contract.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a draw:
//! - A strong searcher should never lose against any opponent
//! - Two strong searchers should always draw
//! - Center and corner openings are the strong first moves

use std::fmt;
use std::str::FromStr;
use treesearch_core::{GameState, Result, TreeSearchError};

/// Tic-tac-toe player. X always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Reward this player earns by winning.
    pub fn win_reward(self) -> f64 {
        match self {
            Player::X => 1.0,
            Player::O => -1.0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

impl FromStr for Player {
    type Err = TreeSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            other => Err(TreeSearchError::InvalidInput(format!(
                "unknown player '{}' (expected 'x' or 'o')",
                other
            ))),
        }
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Current player to move.
    current: Player,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
            winner: None,
        }
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Number of pieces on the board.
    pub fn moves_played(&self) -> usize {
        self.board.iter().filter(|c| c.is_some()).count()
    }

    fn check_winner(&self) -> Option<Player> {
        for line in LINES {
            if let Some(player) = self.board[line[0]] {
                if self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.board[row * 3 + col] {
                    Some(Player::X) => write!(f, " X ")?,
                    Some(Player::O) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for TicTacToeState {
    type Err = TreeSearchError;

    /// Parse nine cells of `X`, `O` or `.` in row-major order.
    ///
    /// Whitespace and `/` separators are ignored. The player to move is
    /// inferred from the piece counts.
    fn from_str(s: &str) -> Result<Self> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if cells.len() != 9 {
            return Err(TreeSearchError::InvalidBoard(format!(
                "expected 9 cells, got {} in '{}'",
                cells.len(),
                s
            )));
        }

        let mut board = [None; 9];
        for (i, c) in cells.iter().enumerate() {
            board[i] = match c {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '-' | '_' => None,
                other => {
                    return Err(TreeSearchError::InvalidBoard(format!(
                        "invalid character '{}' at cell {}",
                        other, i
                    )))
                }
            };
        }

        let x_count = board.iter().filter(|c| **c == Some(Player::X)).count();
        let o_count = board.iter().filter(|c| **c == Some(Player::O)).count();
        let current = if x_count == o_count {
            Player::X
        } else if x_count == o_count + 1 {
            Player::O
        } else {
            return Err(TreeSearchError::InvalidBoard(format!(
                "invalid piece counts: X={}, O={}",
                x_count, o_count
            )));
        };

        let mut state = Self {
            board,
            current,
            winner: None,
        };
        state.winner = state.check_winner();
        Ok(state)
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl TicTacToeAction {
    /// Build an action from a row and column (each 0-2).
    ///
    /// # Errors
    /// Returns `TreeSearchError::InvalidInput` if either coordinate is out of range.
    pub fn from_row_col(row: usize, col: usize) -> Result<Self> {
        if row > 2 || col > 2 {
            return Err(TreeSearchError::InvalidInput(format!(
                "row and column must be 0-2, got ({}, {})",
                row, col
            )));
        }
        Ok(Self((row * 3 + col) as u8))
    }

    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Cell index (0-8).
    pub fn cell(self) -> usize {
        self.0 as usize
    }

    /// True for the four corner cells.
    pub fn is_corner(self) -> bool {
        matches!(self.0, 0 | 2 | 6 | 8)
    }

    /// True for the middle cell.
    pub fn is_center(self) -> bool {
        self.0 == 4
    }
}

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl FromStr for TicTacToeAction {
    type Err = TreeSearchError;

    /// Parse `row col`, two whitespace-separated integers in 0-2.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(TreeSearchError::InvalidInput(format!(
                "expected 'row col', got '{}'",
                s.trim()
            )));
        }

        let parse = |part: &str| {
            part.parse::<usize>().map_err(|_| {
                TreeSearchError::InvalidInput(format!("'{}' is not a number", part))
            })
        };
        Self::from_row_col(parse(parts[0])?, parse(parts[1])?)
    }
}

impl GameState for TicTacToeState {
    type Action = TicTacToeAction;

    fn possible_actions(&self) -> Vec<Self::Action> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeAction(i as u8))
            .collect()
    }

    fn apply(&self, action: Self::Action) -> Self {
        let mut new_state = self.clone();
        new_state.board[action.cell()] = Some(self.current);
        new_state.current = self.current.opposite();
        new_state.winner = new_state.check_winner();
        new_state
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn reward(&self) -> f64 {
        self.winner.map_or(0.0, Player::win_reward)
    }

    fn reward_sign(&self) -> f64 {
        self.current.win_reward()
    }

    fn is_legal(&self, action: Self::Action) -> bool {
        action.cell() < 9 && self.get(action.cell()).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(cells: &[u8]) -> TicTacToeState {
        cells.iter().fold(TicTacToeState::new(), |state, &cell| {
            state.apply(TicTacToeAction(cell))
        })
    }

    #[test]
    fn test_initial_state() {
        let state = TicTacToeState::new();

        assert_eq!(state.current_player(), Player::X);
        assert!(state.winner().is_none());
        assert!(!state.is_terminal());
        assert_eq!(state.reward(), 0.0);
        assert_eq!(state.reward_sign(), 1.0);
    }

    #[test]
    fn test_legal_moves_empty_board_row_major() {
        let actions = TicTacToeState::new().possible_actions();
        let cells: Vec<u8> = actions.iter().map(|a| a.0).collect();
        assert_eq!(cells, (0..9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_legal_moves_partial_board() {
        let state = play(&[4]);
        let actions = state.possible_actions();

        assert_eq!(actions.len(), 8);
        assert!(!actions.contains(&TicTacToeAction(4)));
    }

    #[test]
    fn test_apply_is_immutable() {
        let state = TicTacToeState::new();
        let new_state = state.apply(TicTacToeAction(0));

        assert_eq!(new_state.get(0), Some(Player::X));
        assert_eq!(new_state.current_player(), Player::O);
        assert_eq!(new_state.reward_sign(), -1.0);
        // Receiver unchanged
        assert_eq!(state, TicTacToeState::new());
    }

    #[test]
    fn test_x_wins_top_row() {
        // X plays 0, 1, 2 (top row); O plays 3, 4
        let state = play(&[0, 3, 1, 4, 2]);

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::X));
        assert_eq!(state.reward(), 1.0);
        assert!(state.possible_actions().len() == 4);
    }

    #[test]
    fn test_o_wins_diagonal() {
        // O plays 2, 4, 6 (anti-diagonal); X plays 0, 1, 3
        let state = play(&[0, 2, 1, 4, 3, 6]);

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::O));
        assert_eq!(state.reward(), -1.0);
    }

    #[test]
    fn test_draw() {
        // X X O
        // O O X
        // X O X
        let state = play(&[0, 2, 1, 3, 5, 4, 6, 7, 8]);

        assert!(state.is_terminal());
        assert!(state.winner().is_none());
        assert_eq!(state.reward(), 0.0);
        assert!(state.possible_actions().is_empty());
    }

    #[test]
    fn test_try_apply_rejects_occupied_and_finished() {
        let state = play(&[4]);
        assert!(matches!(
            state.try_apply(TicTacToeAction(4)),
            Err(TreeSearchError::IllegalAction(_))
        ));
        assert!(matches!(
            state.try_apply(TicTacToeAction(9)),
            Err(TreeSearchError::IllegalAction(_))
        ));
        assert!(state.try_apply(TicTacToeAction(0)).is_ok());

        let finished = play(&[0, 3, 1, 4, 2]);
        assert_eq!(
            finished.try_apply(TicTacToeAction(8)),
            Err(TreeSearchError::GameOver)
        );
    }

    #[test]
    fn test_action_from_row_col() {
        let action = TicTacToeAction::from_row_col(1, 2).unwrap();
        assert_eq!(action, TicTacToeAction(5));
        assert_eq!((action.row(), action.col()), (1, 2));
        assert!(TicTacToeAction::from_row_col(3, 0).is_err());
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("0 2".parse::<TicTacToeAction>().unwrap(), TicTacToeAction(2));
        assert_eq!("  2   1 \n".parse::<TicTacToeAction>().unwrap(), TicTacToeAction(7));
        assert!("1".parse::<TicTacToeAction>().is_err());
        assert!("1 2 3".parse::<TicTacToeAction>().is_err());
        assert!("a b".parse::<TicTacToeAction>().is_err());
        assert!("-1 0".parse::<TicTacToeAction>().is_err());
        assert!("1 3".parse::<TicTacToeAction>().is_err());
    }

    #[test]
    fn test_corner_and_center() {
        let corners: Vec<u8> = (0..9).filter(|&c| TicTacToeAction(c).is_corner()).collect();
        assert_eq!(corners, vec![0, 2, 6, 8]);
        assert!(TicTacToeAction(4).is_center());
        assert!(!TicTacToeAction(1).is_center());
    }

    #[test]
    fn test_board_parse() {
        let state: TicTacToeState = "X../.O./...".parse().unwrap();
        assert_eq!(state, play(&[0, 4]));
        assert_eq!(state.current_player(), Player::X);

        let o_to_move: TicTacToeState = "X O X . . . . . .".parse().unwrap();
        assert_eq!(o_to_move.current_player(), Player::O);
        assert_eq!(o_to_move.moves_played(), 3);

        let won: TicTacToeState = "XXX/OO./...".parse().unwrap();
        assert_eq!(won.winner(), Some(Player::X));
        assert!(won.is_terminal());
    }

    #[test]
    fn test_board_parse_errors() {
        assert!(matches!(
            "XO".parse::<TicTacToeState>(),
            Err(TreeSearchError::InvalidBoard(_))
        ));
        assert!(matches!(
            "XQ.......".parse::<TicTacToeState>(),
            Err(TreeSearchError::InvalidBoard(_))
        ));
        assert!(matches!(
            "XX.......".parse::<TicTacToeState>(),
            Err(TreeSearchError::InvalidBoard(_))
        ));
        assert!(matches!(
            "O........".parse::<TicTacToeState>(),
            Err(TreeSearchError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_player_parse() {
        assert_eq!("x".parse::<Player>().unwrap(), Player::X);
        assert_eq!("O".parse::<Player>().unwrap(), Player::O);
        assert!("z".parse::<Player>().is_err());
    }

    #[test]
    fn test_display() {
        let state = play(&[0, 4]);
        let display = format!("{}", state);
        assert!(display.contains('X'));
        assert!(display.contains('O'));
        assert_eq!(display.lines().count(), 5);
    }
}
