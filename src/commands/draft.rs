//! Live draft command

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::{
    draft::{DraftBoard, DraftSession, Prompter},
    storage::{read_picks, read_projections, read_teams},
    FflError, Result,
};

use super::resolve_charts_dir;

/// Inputs for a draft session
#[derive(Debug, Clone)]
pub struct DraftParams {
    pub projections: PathBuf,
    pub teams: Option<PathBuf>,
    pub picks: Option<PathBuf>,
    pub slow: bool,
    pub top_n: usize,
    pub save: Option<PathBuf>,
    pub charts: bool,
    pub out_dir: Option<PathBuf>,
}

/// Run the draft on the terminal.
pub fn handle_draft(params: DraftParams) -> Result<()> {
    // tarpaulin::skip - terminal I/O
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_draft(&params, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Load the files named in `params`, replay any recorded picks, then hand
/// over to the menu. Returns the board as it stood when the loop ended.
pub fn run_draft<R: BufRead, W: Write>(params: &DraftParams, input: R, output: W) -> Result<DraftBoard> {
    let players = read_projections(&params.projections)?;
    if players.is_empty() {
        return Err(FflError::NoData);
    }
    info!("loaded {} players from {}", players.len(), params.projections.display());

    let teams = match &params.teams {
        Some(path) => read_teams(path)?,
        None => Vec::new(),
    };

    let mut session = DraftSession::new(DraftBoard::new(players), teams, Prompter::new(input, output))
        .with_top_n(params.top_n);
    if params.charts {
        session = session.with_charts(resolve_charts_dir(params.out_dir.clone())?);
    }
    if let Some(path) = &params.save {
        session = session.with_save_path(path.clone());
    }

    if let Some(path) = &params.picks {
        let picks = read_picks(path)?;
        info!("replaying {} picks from {}", picks.len(), path.display());
        session.simulate(&picks, params.slow)?;
    }

    session.show_best_available()?;
    session.run()?;

    let (board, mut output) = session.into_parts();
    output.flush()?;
    Ok(board)
}
