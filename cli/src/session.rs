use std::io::{BufRead, Write};

use anyhow::Context;
use minesweep_core as game;

const INVALID_DIMENSION: &str = "You need to enter a valid number, greater than zero!";
const GRID_TOO_LARGE: &str = "The grid is too large, enter smaller dimensions!";
const INVALID_COORDS: &str = "Invalid input. Please enter two integers separated by a space.";
const REVEAL_OUT_OF_RANGE: &str = "You cannot reveal an item out of range!";
const FLAG_OUT_OF_RANGE: &str = "You cannot put a flag in an item out of range!";
const GAME_OVER: &str = "GAME OVER!";

/// Values given up front on the command line, the rest is asked for.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Preset {
    pub rows: Option<game::Coord>,
    pub columns: Option<game::Coord>,
    pub mines: Option<game::CellCount>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SessionOutcome {
    Lost,
    InputClosed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Action {
    Reveal,
    Flag,
}

impl Action {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<i64>().ok()? {
            1 => Some(Self::Reveal),
            2 => Some(Self::Flag),
            _ => None,
        }
    }
}

fn parse_coords(line: &str) -> Option<game::SignedCoord2> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, column))
}

/// Console read-eval loop around a [`game::Grid`].
pub(crate) struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// Asks for the board, arms it with `generator` and plays until a mine goes off or the input ends.
    pub fn run(
        &mut self,
        preset: Preset,
        generator: impl game::MinefieldGenerator,
    ) -> anyhow::Result<SessionOutcome> {
        let Some(config) = self.ask_config(preset)? else {
            return Ok(SessionOutcome::InputClosed);
        };
        log::info!(
            "new game: {}x{} with {} mines",
            config.rows,
            config.columns,
            config.mines
        );

        let mut grid = game::Grid::new(config);
        grid.place_mines(generator)?;
        self.play(&mut grid)
    }

    pub fn play(&mut self, grid: &mut game::Grid) -> anyhow::Result<SessionOutcome> {
        loop {
            write!(self.output, "{grid}")?;
            let Some(line) = self.prompt("Enter row and column: ")? else {
                return Ok(SessionOutcome::InputClosed);
            };
            let Some(coords) = parse_coords(&line) else {
                log::debug!("rejected coordinates {:?}", line.trim());
                writeln!(self.output, "{INVALID_COORDS}")?;
                continue;
            };
            let Some(action) = self.ask_action()? else {
                return Ok(SessionOutcome::InputClosed);
            };
            log::debug!("{:?} at {:?}", action, coords);

            match action {
                Action::Reveal => match grid.reveal(coords) {
                    Err(game::GameError::OutOfRange { .. }) => {
                        writeln!(self.output, "{REVEAL_OUT_OF_RANGE}")?;
                    }
                    Err(err) => return Err(err.into()),
                    Ok(game::RevealOutcome::HitMine) => {
                        write!(self.output, "{grid}")?;
                        writeln!(self.output, "{GAME_OVER}")?;
                        writeln!(self.output)?;
                        self.output.flush()?;
                        return Ok(SessionOutcome::Lost);
                    }
                    Ok(_) => {
                        let count = grid.count_adjacent_mines(coords)?;
                        log::trace!("{} mines around {:?}", count, coords);
                    }
                },
                Action::Flag => match grid.toggle_flag(coords) {
                    Err(game::GameError::OutOfRange { .. }) => {
                        writeln!(self.output, "{FLAG_OUT_OF_RANGE}")?;
                    }
                    Err(err) => return Err(err.into()),
                    Ok(outcome) => log::trace!("flag {:?} at {:?}", outcome, coords),
                },
            }

            writeln!(self.output)?;
        }
    }

    fn ask_config(&mut self, preset: Preset) -> anyhow::Result<Option<game::GameConfig>> {
        let (rows, columns) = loop {
            let rows = match preset.rows {
                Some(rows) => rows,
                None => match self.ask_dimension("Enter row count: ")? {
                    Some(rows) => rows,
                    None => return Ok(None),
                },
            };
            let columns = match preset.columns {
                Some(columns) => columns,
                None => match self.ask_dimension("Enter column count: ")? {
                    Some(columns) => columns,
                    None => return Ok(None),
                },
            };

            match game::GameConfig::new(rows, columns, 0) {
                Ok(_) => break (rows, columns),
                Err(err) if preset.rows.is_none() || preset.columns.is_none() => {
                    log::debug!("rejected {}x{} grid: {}", rows, columns, err);
                    writeln!(self.output, "{GRID_TOO_LARGE}")?;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("cannot play a {rows}x{columns} grid"));
                }
            }
        };
        let mines = match preset.mines {
            Some(mines) => mines,
            None => match self.ask_mines(game::mult(rows, columns))? {
                Some(mines) => mines,
                None => return Ok(None),
            },
        };

        game::GameConfig::new(rows, columns, mines)
            .map(Some)
            .with_context(|| format!("cannot play {rows}x{columns} with {mines} mines"))
    }

    fn ask_dimension(&mut self, prompt: &str) -> anyhow::Result<Option<game::Coord>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<game::Coord>() {
                Ok(value) if value > 0 => return Ok(Some(value)),
                _ => writeln!(self.output, "{INVALID_DIMENSION}")?,
            }
        }
    }

    /// Negative or unparsable answers are asked again along with the ones above `total_cells`.
    fn ask_mines(&mut self, total_cells: game::CellCount) -> anyhow::Result<Option<game::CellCount>> {
        let prompt = format!("Enter the mine count [not greater than {total_cells}]: ");
        loop {
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<game::CellCount>() {
                Ok(mines) if mines <= total_cells => return Ok(Some(mines)),
                _ => log::debug!("rejected mine count {:?}", line.trim()),
            }
        }
    }

    fn ask_action(&mut self) -> anyhow::Result<Option<Action>> {
        loop {
            let Some(line) =
                self.prompt("Enter 1 for revealing, enter 2 for putting/removing a flag: ")?
            else {
                return Ok(None);
            };
            if let Some(action) = Action::parse(&line) {
                return Ok(Some(action));
            }
        }
    }

    /// Writes `text` and reads one line, `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush().context("could not flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("could not read input")?;
        Ok((read > 0).then_some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play_script(grid: &mut game::Grid, script: &str) -> (SessionOutcome, String) {
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        let outcome = session.play(grid).unwrap();
        (outcome, String::from_utf8(session.into_output()).unwrap())
    }

    fn run_script(preset: Preset, seed: u64, script: &str) -> (SessionOutcome, String) {
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        let outcome = session
            .run(preset, game::RandomMinefieldGenerator::new(seed))
            .unwrap();
        (outcome, String::from_utf8(session.into_output()).unwrap())
    }

    #[test]
    fn parse_coords_needs_exactly_two_integers() {
        assert_eq!(parse_coords("1 2\n"), Some((1, 2)));
        assert_eq!(parse_coords("  -1\t0 "), Some((-1, 0)));
        assert_eq!(parse_coords("1"), None);
        assert_eq!(parse_coords("1 2 3"), None);
        assert_eq!(parse_coords("a b"), None);
        assert_eq!(parse_coords(""), None);
    }

    #[test]
    fn action_accepts_only_one_or_two() {
        assert_eq!(Action::parse("1\n"), Some(Action::Reveal));
        assert_eq!(Action::parse(" 2 "), Some(Action::Flag));
        assert_eq!(Action::parse("3"), None);
        assert_eq!(Action::parse("0"), None);
        assert_eq!(Action::parse("flag"), None);
    }

    #[test]
    fn revealing_a_mine_ends_the_game() {
        let mut grid = game::Grid::from_mine_coords(3, 3, &[(1, 1)]).unwrap();

        let (outcome, output) = play_script(&mut grid, "0 0\n1\n1 1\n1\nnever read\n");

        assert_eq!(outcome, SessionOutcome::Lost);
        assert!(output.contains("1 X X\nX X X\nX X X\n"));
        assert!(output.ends_with("1 X X\nX M X\nX X X\nGAME OVER!\n\n"));
    }

    #[test]
    fn flags_toggle_and_out_of_range_is_reported() {
        let mut grid = game::Grid::from_mine_coords(2, 2, &[(0, 0)]).unwrap();

        let (outcome, output) = play_script(&mut grid, "1 1\n2\n5 5\n2\n-1 0\n1\n");

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert!(output.contains("X X\nX F\n"));
        assert!(output.contains(FLAG_OUT_OF_RANGE));
        assert!(output.contains(REVEAL_OUT_OF_RANGE));
        assert!(grid.cell_at((1, 1)).unwrap().has_flag());
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn bad_coordinates_are_asked_again() {
        let mut grid = game::Grid::from_mine_coords(1, 2, &[]).unwrap();

        let (outcome, output) = play_script(&mut grid, "zero one\n0\n0 1\n7\n1\n");

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert_eq!(output.matches(INVALID_COORDS).count(), 2);
        assert!(output.contains("X 0\n"));
    }

    #[test]
    fn invalid_action_is_asked_again() {
        let mut grid = game::Grid::from_mine_coords(1, 1, &[]).unwrap();

        let (_, output) = play_script(&mut grid, "0 0\n9\nx\n1\n");

        assert_eq!(
            output
                .matches("Enter 1 for revealing, enter 2 for putting/removing a flag: ")
                .count(),
            3
        );
        assert!(output.contains("\n0\n"));
    }

    #[test]
    fn run_asks_for_dimensions_and_mines() {
        let script = "0\nabc\n2\n-3\n2\n5\n-1\n0\n0 0\n1\n";

        let (outcome, output) = run_script(Preset::default(), 1, script);

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert_eq!(output.matches(INVALID_DIMENSION).count(), 3);
        assert_eq!(
            output
                .matches("Enter the mine count [not greater than 4]: ")
                .count(),
            3
        );
        assert!(output.contains("0 X\nX X\n"));
    }

    #[test]
    fn oversized_grid_is_asked_again() {
        let script = "8589934592\n8589934592\n2\n3\n0\n0 2\n1\n";

        let (outcome, output) = run_script(Preset::default(), 5, script);

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert_eq!(output.matches(GRID_TOO_LARGE).count(), 1);
        assert_eq!(output.matches("Enter row count: ").count(), 2);
        assert!(output.contains("Enter the mine count [not greater than 6]: "));
        assert!(output.contains("X X 0\nX X X\n"));
    }

    #[test]
    fn oversized_preset_is_an_error() {
        let preset = Preset {
            rows: Some(usize::MAX),
            columns: Some(usize::MAX),
            mines: None,
        };
        let mut session = Session::new(Cursor::new(String::new()), Vec::new());

        let err = session
            .run(preset, game::RandomMinefieldGenerator::new(0))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<game::GameError>(),
            Some(&game::GameError::InvalidDimensions)
        );
    }

    #[test]
    fn full_board_loses_on_first_reveal() {
        let preset = Preset {
            rows: Some(2),
            columns: Some(2),
            mines: Some(4),
        };

        let (outcome, output) = run_script(preset, 99, "1 0\n1\n");

        assert_eq!(outcome, SessionOutcome::Lost);
        assert!(!output.contains("Enter row count"));
        assert!(output.ends_with("X X\nM X\nGAME OVER!\n\n"));
    }

    #[test]
    fn preset_with_too_many_mines_is_an_error() {
        let preset = Preset {
            rows: Some(2),
            columns: Some(2),
            mines: Some(5),
        };
        let mut session = Session::new(Cursor::new(String::new()), Vec::new());

        let err = session
            .run(preset, game::RandomMinefieldGenerator::new(0))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<game::GameError>(),
            Some(&game::GameError::TooManyMines)
        );
    }

    #[test]
    fn closed_input_before_setup_ends_quietly() {
        let (outcome, output) = run_script(Preset::default(), 0, "3\n");

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert!(output.ends_with("Enter column count: "));
    }
}
