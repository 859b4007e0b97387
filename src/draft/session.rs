//! The interactive draft loop.
//!
//! All prompting goes through [`Prompter`], which wraps any `BufRead` and
//! `Write` pair, so the loop runs the same against a terminal or a script.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{
    report::{best_available_report, draft_state_report, position_report},
    state_of_draft, DraftBoard, DEFAULT_TOP_N,
};
use crate::{
    charts,
    cli::types::{Owner, Position, Slot, DRAFT_SLOTS},
    storage::{write_projections, DraftPick, LeagueTeam},
    Result,
};

pub const MENU: &str =
    "[n]ew pick  [u]ndo pick  [b]est available  [s]tate of draft  [p]osition  [w]rite csv  [q]uit";

/// Line oriented questions and answers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line; `None` once input ends.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer is a whole number; `None` once input ends.
    pub fn ask_number(&mut self, prompt: &str) -> Result<Option<u32>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.say("\tPlease enter a number")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// A live draft: the board, the league's teams, and where output goes.
pub struct DraftSession<R, W> {
    board: DraftBoard,
    teams: Vec<LeagueTeam>,
    prompter: Prompter<R, W>,
    slots: Vec<Slot>,
    top_n: usize,
    charts_dir: Option<PathBuf>,
    save_path: Option<PathBuf>,
}

impl<R: BufRead, W: Write> DraftSession<R, W> {
    pub fn new(board: DraftBoard, teams: Vec<LeagueTeam>, prompter: Prompter<R, W>) -> Self {
        Self {
            board,
            teams,
            prompter,
            slots: DRAFT_SLOTS.to_vec(),
            top_n: DEFAULT_TOP_N,
            charts_dir: None,
            save_path: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Also render charts into `dir` after every update.
    pub fn with_charts(mut self, dir: PathBuf) -> Self {
        self.charts_dir = Some(dir);
        self
    }

    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    pub fn board(&self) -> &DraftBoard {
        &self.board
    }

    pub fn into_parts(self) -> (DraftBoard, W) {
        (self.board, self.prompter.into_output())
    }

    /// Run the menu until `q` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say(MENU)?;
            let Some(choice) = self.prompter.ask("> ")? else {
                break;
            };

            match choice.to_lowercase().as_str() {
                "n" => self.new_pick()?,
                "u" => self.undo_pick()?,
                "b" => self.show_best_available()?,
                "s" => self.show_state_of_draft()?,
                "p" => self.show_state_of_position()?,
                "w" => self.save()?,
                "q" => break,
                "" => {}
                other => self.prompter.say(&format!("\tUnknown choice '{}'", other))?,
            }
        }
        Ok(())
    }

    /// Ask for initials and pick a rank among the matches. Drafted players
    /// are offered only when `include_drafted` is set.
    pub fn prompt_player(&mut self, include_drafted: bool) -> Result<Option<u32>> {
        let Some(first) = self.prompter.ask("First Name Initial?\t")? else {
            return Ok(None);
        };
        let Some(last) = self.prompter.ask("Last Name Initial? \t")? else {
            return Ok(None);
        };

        self.prompter.say("")?;
        let mut valid: Vec<u32> = Vec::new();
        let listings: Vec<String> = self
            .board
            .find_by_initials(&first, &last, include_drafted)
            .into_iter()
            .map(|p| {
                if !valid.contains(&p.rank) {
                    valid.push(p.rank);
                }
                p.listing()
            })
            .collect();
        for line in &listings {
            self.prompter.say(line)?;
        }

        loop {
            let Some(rank) = self
                .prompter
                .ask_number("\nwhich rank is correct? (0 for none of the above)\t")?
            else {
                return Ok(None);
            };
            if rank == 0 {
                return Ok(None);
            }
            if valid.contains(&rank) {
                return Ok(Some(rank));
            }
            self.prompter.say("\tThis is not a valid rank!")?;
            self.prompter
                .say(&format!("\tPlease choose from {:?}", valid))?;
        }
    }

    /// Choose the drafting team by id, or type it when no teams are known.
    pub fn prompt_team(&mut self) -> Result<Option<Owner>> {
        if self.teams.is_empty() {
            let answer = self
                .prompter
                .ask("Which Team Drafted Him? (abbreviation, blank to break)\t")?;
            return Ok(answer.filter(|a| !a.is_empty()).map(Owner::team));
        }

        self.prompter.say("")?;
        let listings: Vec<String> = self.teams.iter().map(LeagueTeam::listing).collect();
        for line in &listings {
            self.prompter.say(line)?;
        }

        loop {
            let Some(id) = self
                .prompter
                .ask_number("\nWhich Team Drafted Him? (0 to break)\t")?
            else {
                return Ok(None);
            };
            if id == 0 {
                return Ok(None);
            }
            if let Some(team) = self.teams.iter().find(|t| t.team_id.as_u32() == id) {
                return Ok(Some(team.as_owner()));
            }
            let valid: Vec<u32> = self.teams.iter().map(|t| t.team_id.as_u32()).collect();
            self.prompter.say("\tThis is not a valid team id!")?;
            self.prompter
                .say(&format!("\tPlease choose from {:?}", valid))?;
        }
    }

    pub fn new_pick(&mut self) -> Result<()> {
        let Some(rank) = self.prompt_player(false)? else {
            return Ok(());
        };
        let Some(owner) = self.prompt_team()? else {
            return Ok(());
        };
        self.record(rank, &owner)
    }

    /// Return a drafted player to the free agent pool.
    pub fn undo_pick(&mut self) -> Result<()> {
        let Some(rank) = self.prompt_player(true)? else {
            return Ok(());
        };
        self.record(rank, &Owner::FreeAgent)
    }

    fn record(&mut self, rank: u32, owner: &Owner) -> Result<()> {
        let updated = self.board.record_pick(rank, owner);
        debug!("pick of rank {} updated {} rows", rank, updated);
        self.show_best_available()?;
        self.show_state_of_draft()
    }

    pub fn show_best_available(&mut self) -> Result<()> {
        let best = self.board.best_replacement_available(self.top_n);
        self.prompter.say(&best_available_report(&best))?;

        if let Some(dir) = &self.charts_dir {
            let path = dir.join("best_available.png");
            charts::draft::best_available(&best, &path)?;
            info!("wrote {}", path.display());
        }
        Ok(())
    }

    pub fn show_state_of_draft(&mut self) -> Result<()> {
        let state = state_of_draft(&self.board, &self.slots);
        if state.teams.is_empty() {
            return self.prompter.say("Nobody has drafted yet.");
        }
        self.prompter.say(&draft_state_report(&state))?;

        if let Some(dir) = &self.charts_dir {
            let path = dir.join("state_of_draft.png");
            charts::draft::state_of_draft(&state, &path)?;
            info!("wrote {}", path.display());
        }
        Ok(())
    }

    pub fn show_state_of_position(&mut self) -> Result<()> {
        let Some(answer) = self.prompter.ask("Position?\t")? else {
            return Ok(());
        };
        let position: Position = match answer.parse() {
            Ok(p) => p,
            Err(e) => return self.prompter.say(&format!("\t{}", e)),
        };

        let entries = self.board.state_of_position(position, self.top_n);
        self.prompter.say(&position_report(position, &entries))?;

        if let Some(dir) = &self.charts_dir {
            if !entries.is_empty() {
                let path = dir.join(format!("state_of_{}.png", position.label().replace('/', "")));
                charts::draft::state_of_position(position, &entries, &path)?;
                info!("wrote {}", path.display());
            }
        }
        Ok(())
    }

    /// Write the board, with owners, back to a projections file.
    pub fn save(&mut self) -> Result<()> {
        let path = match &self.save_path {
            Some(path) => path.clone(),
            None => match self.prompter.ask("File name?\t")? {
                Some(name) if !name.is_empty() => PathBuf::from(name),
                _ => return Ok(()),
            },
        };
        write_projections(&path, self.board.players())?;
        self.prompter.say(&format!("Saved to {}", path.display()))
    }

    /// Replay a recorded draft. Players and teams that cannot be matched by
    /// name fall back to the prompts; with `slow` each pick waits for Enter.
    pub fn simulate(&mut self, picks: &[DraftPick], slow: bool) -> Result<()> {
        for pick in picks {
            self.prompter
                .say(&format!("\n{} drafted by {}\n", pick.playerpos, pick.team))?;

            let (first, last) = pick.player_name();
            let found = self.board.find_by_name(&first, &last).first().map(|p| p.rank);
            let rank = match found {
                Some(rank) => Some(rank),
                None => {
                    warn!("no player named '{} {}' on the board", first, last);
                    self.prompt_player(false)?
                }
            };

            let known = self
                .teams
                .iter()
                .find(|t| t.is_called(&pick.team))
                .map(LeagueTeam::as_owner);
            let owner = match known {
                Some(owner) => Some(owner),
                None if self.teams.is_empty() => Some(Owner::team(pick.team.trim())),
                None => {
                    warn!("unknown team '{}'", pick.team);
                    self.prompt_team()?
                }
            };

            if let (Some(rank), Some(owner)) = (rank, owner) {
                self.record(rank, &owner)?;
            }

            if slow && self.prompter.ask("")?.is_none() {
                break;
            }
        }
        Ok(())
    }
}
