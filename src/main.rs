//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffl_draft::{
    cli::{Commands, Ffl},
    commands::{
        draft::{handle_draft, DraftParams},
        fetch_league::{handle_fetch_league, FetchLeagueParams},
        fetch_projections::handle_fetch_projections,
        league_stats::{handle_league_stats, LeagueStatsParams},
    },
    logging::init_logging,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Ffl::parse();
    init_logging(app.verbose);

    match app.command {
        Commands::FetchProjections { league, out } => {
            handle_fetch_projections(league.league_id, league.refresh, out).await?
        }

        Commands::Draft {
            projections,
            teams,
            picks,
            slow,
            top_n,
            save,
            charts,
        } => {
            // The draft loop blocks on stdin.
            tokio::task::block_in_place(|| {
                handle_draft(DraftParams {
                    projections,
                    teams,
                    picks,
                    slow,
                    top_n,
                    save,
                    charts: charts.charts,
                    out_dir: charts.out_dir,
                })
            })?
        }

        Commands::FetchLeague {
            league,
            teams,
            out,
            skip_boxscores,
            weeks,
            rounds,
        } => {
            handle_fetch_league(FetchLeagueParams {
                league_id: league.league_id,
                season: league.season,
                refresh: league.refresh,
                teams,
                out,
                skip_boxscores,
                weeks,
                rounds,
            })
            .await?
        }

        Commands::LeagueStats {
            input,
            json,
            team,
            charts,
        } => handle_league_stats(LeagueStatsParams {
            input,
            json,
            team,
            charts: charts.charts,
            out_dir: charts.out_dir,
        })?,
    }

    Ok(())
}
