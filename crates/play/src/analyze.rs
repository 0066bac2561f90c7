//! Single-position analysis report.

use crate::engine::EngineArgs;
use anyhow::{Context, Result};
use std::io::Write;
use treesearch_mcts::{games::TicTacToeState, summarize};

/// Search `state` once and write the root statistics to `output`.
pub fn report<W: Write>(args: &EngineArgs, state: &TicTacToeState, output: &mut W) -> Result<()> {
    let mcts = args.build::<TicTacToeState>(args.seed)?;
    let tree = mcts.run(state.clone());
    let result = summarize(&tree);

    writeln!(output, "{}", state)?;
    writeln!(
        output,
        "To move: {}  iterations: {}  perspective: {}",
        state.current_player(),
        result.root_visits,
        args.perspective
    )?;
    writeln!(output, "{:<8} {:>8} {:>10} {:>8}", "move", "visits", "reward", "mean")?;
    for child in &result.children {
        writeln!(
            output,
            "{:<8} {:>8} {:>10.1} {:>8.3}",
            child.action.to_string(),
            child.visits,
            child.total_reward,
            child.mean_reward()
        )?;
    }

    match result.best_action {
        Some(best) => {
            let line: Vec<String> = tree
                .principal_variation()
                .iter()
                .map(|action| action.to_string())
                .collect();
            writeln!(output, "Best move: {}", best)?;
            writeln!(output, "Principal variation: {}", line.join(" "))?;
        }
        None => writeln!(output, "No moves: the game is over")?,
    }

    output.flush().context("Failed to write report")
}
