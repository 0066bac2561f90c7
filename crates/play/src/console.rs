//! Interactive console game: engine against a human.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};
use treesearch_core::GameState;
use treesearch_mcts::{
    games::{Player, TicTacToeAction, TicTacToeState},
    Evaluator, Mcts,
};

/// Closing line for a finished game.
pub fn announcement(state: &TicTacToeState) -> String {
    match state.winner() {
        Some(player) => format!("Player {} wins!", player),
        None => "It's a draw!".to_string(),
    }
}

/// Play one game from the empty board, the human moving as `human`.
///
/// Reads `row col` lines from `input` and writes the board, prompts and
/// result to `output`. Returns the final position.
pub fn play_game<E, R, W>(
    engine: &Mcts<TicTacToeState, E>,
    human: Player,
    input: &mut R,
    output: &mut W,
) -> Result<TicTacToeState>
where
    E: Evaluator<TicTacToeState>,
    R: BufRead,
    W: Write,
{
    let mut state = TicTacToeState::new();
    info!(human = %human, "game started");

    while !state.is_terminal() {
        writeln!(output, "{}", state)?;

        state = if state.current_player() == human {
            read_human_move(&state, input, output)?
        } else {
            let tree = engine.run(state.clone());
            let action = tree
                .best_action()
                .context("Engine found no move in a running game")?;
            info!(action = %action, visits = tree.root_node().visits(), "engine move");
            writeln!(output, "Computer plays {}", action)?;
            state.apply(action)
        };
    }

    writeln!(output, "{}", state)?;
    writeln!(output, "{}", announcement(&state))?;
    output.flush()?;
    info!(outcome = %announcement(&state), "game finished");

    Ok(state)
}

/// Prompt until the human enters a legal move.
fn read_human_move<R: BufRead, W: Write>(
    state: &TicTacToeState,
    input: &mut R,
    output: &mut W,
) -> Result<TicTacToeState> {
    loop {
        writeln!(output, "Enter your move (row col):")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read move")?;
        if read == 0 {
            bail!("Input closed before the game finished");
        }

        match line
            .parse::<TicTacToeAction>()
            .and_then(|action| state.try_apply(action))
        {
            Ok(next) => return Ok(next),
            Err(e) => {
                warn!(input = line.trim(), error = %e, "rejected move");
                writeln!(output, "Invalid input. Please try again.")?;
            }
        }
    }
}
