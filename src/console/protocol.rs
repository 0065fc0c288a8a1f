use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::chess::{
    parse_square, square_name, Chess, ChessColor, ChessSettings, ChessView, CoordinateMove,
    GameState,
};

/// Collects game events until the console prints them
#[derive(Default)]
pub struct ConsoleView {
    messages: RefCell<Vec<String>>,
}

impl ConsoleView {
    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl ChessView for ConsoleView {
    fn on_check(&self, color: ChessColor) {
        self.messages.borrow_mut().push(format!("{color} is in check"));
    }

    fn on_checkmate(&self, winner: ChessColor) {
        self.messages
            .borrow_mut()
            .push(format!("checkmate, {winner} wins"));
    }
}

pub struct Console {
    game: Chess,
    view: Rc<ConsoleView>,
}

impl Console {
    pub fn new(settings: ChessSettings) -> Self {
        let view = Rc::new(ConsoleView::default());
        let mut game = Chess::with_settings(settings);
        game.set_view(view.clone());
        Console { game, view }
    }

    pub fn game(&self) -> &Chess {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Chess {
        &mut self.game
    }

    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Serve commands from `input` until `quit` or end of input
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        if !self.game.is_started() {
            self.cmd_new(output)?;
        }
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let keep_going = self.handle_line(line, output)?;
            output.flush()?;
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command. Returns `false` once the console should stop.
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = parts.first() else {
            return Ok(true);
        };
        match first {
            "quit" | "exit" => return Ok(false),
            "d" | "display" => self.cmd_display(output)?,
            "new" => self.cmd_new(output)?,
            "undo" => self.cmd_undo(output)?,
            "moves" => self.cmd_moves(&parts, output)?,
            _ => self.cmd_play(first, output)?,
        }
        for message in self.view.take_messages() {
            writeln!(output, "{message}")?;
        }
        Ok(true)
    }

    fn cmd_new<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        match self.game.start_game() {
            Ok(()) => writeln!(output, "new game, {} to move", self.game.turn()),
            Err(err) => writeln!(output, "error: {err}"),
        }
    }

    fn cmd_display<W: Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "{}", self.game)?;
        match self.game.state() {
            GameState::NotStarted => writeln!(output, "no game in progress"),
            GameState::InProgress => writeln!(output, "{} to move", self.game.turn()),
            GameState::Finished { winner } => writeln!(output, "game over, {winner} won"),
        }
    }

    fn cmd_undo<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        match self.game.undo() {
            Ok(()) => writeln!(output, "undone, {} to move", self.game.turn()),
            Err(err) => writeln!(output, "error: {err}"),
        }
    }

    fn cmd_moves<W: Write>(&mut self, parts: &[&str], output: &mut W) -> io::Result<()> {
        let Some(square) = parts.get(1) else {
            return writeln!(output, "usage: moves <square>");
        };
        let from = match parse_square(square) {
            Ok(from) => from,
            Err(err) => return writeln!(output, "error: {err}"),
        };
        match self.game.legal_moves(from) {
            Ok(destinations) => {
                let names: Vec<String> = destinations
                    .into_iter()
                    .filter_map(square_name)
                    .collect();
                writeln!(output, "{}", names.join(" "))
            }
            Err(err) => writeln!(output, "error: {err}"),
        }
    }

    fn cmd_play<W: Write>(&mut self, text: &str, output: &mut W) -> io::Result<()> {
        let mv: CoordinateMove = match text.parse() {
            Ok(mv) => mv,
            Err(err) => return writeln!(output, "error: {err}"),
        };
        match self.game.play_coordinates(&mv) {
            Ok(true) => writeln!(output, "played {mv}"),
            Ok(false) => writeln!(output, "illegal move {mv}"),
            Err(err) => writeln!(output, "error: {err}"),
        }
    }
}
