//! The chess game
//!
//! `Chess` owns an 8x8 [`Board`], the shared move book and the turn. Every
//! piece-level legality test speculatively plays the move and rejects it if
//! the mover's own king ends up attacked; checkmate is "in check and no legal
//! move left".

use std::fmt;
use std::num::NonZeroU16;
use std::rc::Rc;

use log::{debug, error, trace, warn};

use super::book::MoveBook;
use super::color::ChessColor;
use super::config::ChessSettings;
use super::error::SetupError;
use super::notation::{square_name, CoordinateMove};
use super::piece::{ChessPiece, PieceKind};
use super::rules::{ChessBoard, MoveChessPiece};
use super::view::{ChessView, ViewListener};
use crate::board::{
    Board, BoardError, BoardGame, BoardResult, GameCondition, Move, Piece, PieceId, Vector,
};

pub const SIZE: i32 = 8;
const DIMENSION: NonZeroU16 = match NonZeroU16::new(SIZE as u16) {
    Some(size) => size,
    None => NonZeroU16::MIN,
};

const PAWN_ROW: i32 = 1;
const BACK_ROW: i32 = 0;
/// Pieces set up from both side edges, with their column from that edge
const PAIRED_COLUMNS: [(PieceKind, i32); 3] = [
    (PieceKind::Rook, 0),
    (PieceKind::Knight, 1),
    (PieceKind::Bishop, 2),
];
const QUEEN_COLUMN: i32 = 3;
const KING_COLUMN: i32 = 4;

/// A piece to put on the board when starting from a custom position
pub type Placement = (PieceKind, ChessColor, Vector);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Finished { winner: ChessColor },
}

pub struct Chess {
    board: Board<Chess>,
    book: MoveBook<Chess>,
    turn: ChessColor,
    state: GameState,
    settings: ChessSettings,
    /// Set while a move is being tried out; the view is never asked anything then
    prompts_suppressed: bool,
    /// Promotion requested along with the move being played
    requested_promotion: Option<PieceKind>,
    view: Option<Rc<dyn ChessView>>,
}

/// Suppresses prompts for its lifetime and, once `committed`, reverts the
/// speculative move when dropped, whatever way the evaluation exits.
struct Speculation<'a> {
    game: &'a mut Chess,
    suppressed: bool,
    committed: bool,
}

impl<'a> Speculation<'a> {
    fn begin(game: &'a mut Chess) -> Self {
        let suppressed = std::mem::replace(&mut game.prompts_suppressed, true);
        Speculation {
            game,
            suppressed,
            committed: false,
        }
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if self.committed {
            if let Err(err) = self.game.revert_last_move() {
                error!("speculative move could not be reverted: {err}");
            }
        }
        self.game.prompts_suppressed = self.suppressed;
    }
}

impl Chess {
    pub fn new() -> Self {
        Self::with_settings(ChessSettings::default())
    }

    pub fn with_settings(settings: ChessSettings) -> Self {
        if !settings.default_promotion.is_promotion() {
            warn!(
                "{} is not a promotion piece, promoting to {} instead",
                settings.default_promotion,
                PieceKind::Queen
            );
        }
        let board = Board::with_size(DIMENSION, DIMENSION);
        let book = MoveBook::new(board.length(), board.height());
        Chess {
            board,
            book,
            turn: settings.first_color,
            state: GameState::NotStarted,
            settings,
            prompts_suppressed: false,
            requested_promotion: None,
            view: None,
        }
    }

    /// Install the presentation layer. Board events are forwarded from now on.
    pub fn set_view(&mut self, view: Rc<dyn ChessView>) {
        self.board
            .set_listener(Some(Rc::new(ViewListener::new(Rc::clone(&view)))));
        self.view = Some(view);
    }

    /// Reset everything and set up the standard position.
    pub fn start_game(&mut self) -> Result<(), SetupError> {
        let mut placements = Vec::with_capacity(4 * SIZE as usize);
        for color in ChessColor::ALL {
            let forward = color.direction();
            let [first_edge, _] = forward.adjacent();
            let back_row = forward.starting_edge_offset(SIZE, BACK_ROW);
            let pawn_row = forward.starting_edge_offset(SIZE, PAWN_ROW);

            for column in 0..SIZE {
                let i = first_edge.starting_edge_offset(SIZE, column);
                placements.push((PieceKind::Pawn, color, Vector::new(i, pawn_row)));
            }
            for (kind, column) in [(PieceKind::Queen, QUEEN_COLUMN), (PieceKind::King, KING_COLUMN)] {
                let i = first_edge.starting_edge_offset(SIZE, column);
                placements.push((kind, color, Vector::new(i, back_row)));
            }
            for edge in forward.adjacent() {
                for (kind, column) in PAIRED_COLUMNS {
                    let i = edge.starting_edge_offset(SIZE, column);
                    placements.push((kind, color, Vector::new(i, back_row)));
                }
            }
        }
        self.setup(&placements, self.settings.first_color)
    }

    /// Reset everything and start from `placements` with `first` to move.
    ///
    /// Each color needs exactly one king. Nothing changes if the position is
    /// rejected.
    pub fn start_from_position(
        &mut self,
        placements: &[Placement],
        first: ChessColor,
    ) -> Result<(), SetupError> {
        for color in ChessColor::ALL {
            let count = placements
                .iter()
                .filter(|(kind, c, _)| *kind == PieceKind::King && *c == color)
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }
        self.setup(placements, first)
    }

    fn setup(&mut self, placements: &[Placement], first: ChessColor) -> Result<(), SetupError> {
        for (index, (_, _, position)) in placements.iter().enumerate() {
            if !self.board.contains(*position) {
                return Err(BoardError::OutOfBounds(*position).into());
            }
            if placements[..index].iter().any(|(_, _, other)| other == position) {
                return Err(SetupError::DuplicateSquare(*position));
            }
        }

        self.board.reset();
        self.prompts_suppressed = false;
        for &(kind, color, position) in placements {
            self.place_piece(kind, color, position)?;
        }
        self.turn = first;
        self.state = GameState::InProgress;
        debug!("game started with {} pieces, {first} to move", placements.len());
        Ok(())
    }

    fn place_piece(&mut self, kind: PieceKind, color: ChessColor, position: Vector) -> BoardResult<PieceId> {
        let id = self.board.register(self.book.piece(kind, color));
        self.board.set_piece_at_position(id, position)
    }

    /// Play `from` -> `to` for the side to move.
    ///
    /// `Ok(false)` when the move is refused: game not running, empty square,
    /// wrong color or illegal move. Out-of-range coordinates are errors.
    pub fn play(&mut self, from: Vector, to: Vector) -> BoardResult<bool> {
        if !self.board.contains(to) {
            return Err(BoardError::OutOfBounds(to));
        }
        if self.state != GameState::InProgress {
            return Ok(false);
        }
        let Some(id) = self.board.piece_at_position(from)? else {
            return Ok(false);
        };
        let mover = self.board.piece(id)?;
        let (kind, color) = (mover.kind(), mover.color());
        if color != self.turn || !self.make_move(from, to)? {
            return Ok(false);
        }

        debug!("{color} {kind} {}", CoordinateMove { from, to, promotion: None });
        self.turn = self.turn.next();
        if self.check(self.turn) {
            if let Some(view) = &self.view {
                view.on_check(self.turn);
            }
            if self.checkmate(self.turn) {
                self.end_game(color);
            }
        }
        Ok(true)
    }

    /// Play a move written in coordinate notation. A promotion letter takes
    /// precedence over asking the view.
    pub fn play_coordinates(&mut self, mv: &CoordinateMove) -> BoardResult<bool> {
        self.requested_promotion = mv.promotion;
        let played = self.play(mv.from, mv.to);
        self.requested_promotion = None;
        played
    }

    fn end_game(&mut self, winner: ChessColor) {
        debug!("checkmate, {winner} wins");
        self.state = GameState::Finished { winner };
        if let Some(view) = &self.view {
            view.on_checkmate(winner);
        }
    }

    /// Take back the last committed move and give the turn back to its
    /// player. A finished game is running again afterwards.
    pub fn undo(&mut self) -> BoardResult<()> {
        if self.state == GameState::NotStarted {
            return Err(BoardError::EmptyHistory);
        }
        self.revert_last_move()?;
        self.turn = self.turn.next();
        self.state = GameState::InProgress;
        debug!("move taken back, {} to move", self.turn);
        Ok(())
    }

    #[inline]
    pub fn turn(&self) -> ChessColor {
        self.turn
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn winner(&self) -> Option<ChessColor> {
        match self.state {
            GameState::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.state == GameState::InProgress
    }

    pub fn piece(&self, position: Vector) -> BoardResult<Option<(PieceKind, ChessColor)>> {
        let Some(id) = self.board.piece_at_position(position)? else {
            return Ok(None);
        };
        let piece = self.board.piece(id)?;
        Ok(Some((piece.kind(), piece.color())))
    }

    /// Squares holding a piece of `color`, row by row
    pub fn search_pieces_of(&self, color: ChessColor) -> Vec<Vector> {
        self.board
            .occupied()
            .filter(|(_, _, piece)| piece.color() == color)
            .map(|(position, _, _)| position)
            .collect()
    }

    /// Legal destinations of the piece on `from`, each listed once
    pub fn legal_moves(&mut self, from: Vector) -> BoardResult<Vec<Vector>> {
        let mut destinations = self.possible_moves(from)?;
        let mut seen = Vec::with_capacity(destinations.len());
        destinations.retain(|destination| {
            let fresh = !seen.contains(destination);
            seen.push(*destination);
            fresh
        });
        Ok(destinations)
    }

    /// Every legal move of the side to move, piece by piece
    pub fn all_legal_moves(&mut self) -> BoardResult<Vec<CoordinateMove>> {
        let mut moves = Vec::new();
        for from in self.search_pieces_of(self.turn) {
            for to in self.legal_moves(from)? {
                moves.push(CoordinateMove { from, to, promotion: None });
            }
        }
        Ok(moves)
    }

    /// Whether a king of `color` is attacked
    pub fn check(&self, color: ChessColor) -> bool {
        let king = self.book.piece(PieceKind::King, color);
        self.board
            .search_pieces(&king)
            .into_iter()
            .any(|position| self.is_attacked(color, position))
    }

    /// In check with no legal move left
    pub fn checkmate(&mut self, color: ChessColor) -> bool {
        if !self.check(color) {
            return false;
        }
        !self
            .search_pieces_of(color)
            .into_iter()
            .any(|position| self.has_legal_move(position))
    }

    fn has_legal_move(&mut self, start: Vector) -> bool {
        let Some((id, piece)) = self.board.occupant(start) else {
            return false;
        };
        let moves = Rc::clone(piece.moves());
        let coordinates = self.board.coordinates();
        moves.iter().any(|mv| {
            coordinates
                .iter()
                .any(|&destination| self.can_move_with(id, start, destination, mv))
        })
    }

    /// Whether playing `mv` leaves the mover's own king attacked. The move is
    /// committed, evaluated and reverted; prompts stay suppressed meanwhile.
    pub fn does_move_check(
        &mut self,
        piece: PieceId,
        start: Vector,
        destination: Vector,
        mv: &Rc<Move<Chess>>,
    ) -> bool {
        let Ok(mover) = self.board.piece(piece).map(ChessPiece::color) else {
            return true;
        };
        let mut speculation = Speculation::begin(self);
        if let Err(err) = speculation.game.do_move_with(piece, start, destination, mv) {
            trace!("{} {start} -> {destination} could not be tried: {err}", mv.name());
            return true;
        }
        speculation.committed = true;
        trace!("trying {} {start} -> {destination}", mv.name());
        speculation.game.check(mover)
    }
}

impl Default for Chess {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGame for Chess {
    type Piece = ChessPiece<Chess>;

    fn board(&self) -> &Board<Self> {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board<Self> {
        &mut self.board
    }

    fn can_move_with(
        &mut self,
        piece: PieceId,
        start: Vector,
        destination: Vector,
        mv: &Rc<Move<Self>>,
    ) -> bool {
        MoveChessPiece.check_condition(start, destination, self)
            && mv.can_move(start, destination, self)
            && !self.does_move_check(piece, start, destination, mv)
    }
}

impl ChessBoard for Chess {
    fn turn(&self) -> ChessColor {
        self.turn
    }

    /// Pseudo-legal: a pinned piece still attacks.
    fn is_attacked(&self, defending: ChessColor, position: Vector) -> bool {
        self.board
            .occupied()
            .filter(|(_, _, piece)| piece.color() != defending)
            .any(|(start, _, piece)| {
                MoveChessPiece.check_condition(start, position, self)
                    && piece.moves().iter().any(|mv| mv.can_move(start, position, self))
            })
    }

    fn promoted_piece(&mut self, color: ChessColor) -> PieceId {
        let default = Some(self.settings.default_promotion)
            .filter(PieceKind::is_promotion)
            .unwrap_or(PieceKind::Queen);
        let requested = self.requested_promotion.filter(PieceKind::is_promotion);
        let kind = match (&self.view, requested) {
            _ if self.prompts_suppressed => default,
            (_, Some(requested)) => requested,
            (Some(view), None) => Some(view.choose_promotion(color, &PieceKind::PROMOTIONS))
                .filter(PieceKind::is_promotion)
                .unwrap_or(default),
            _ => default,
        };
        self.board.register(self.book.piece(kind, color))
    }

    fn is_pawn_double_advance(&self, mv: &Move<Self>) -> bool {
        self.book.is_pawn_double_advance(mv)
    }
}

/// Rows from the top, uppercase for white, `.` for empty squares
impl fmt::Display for Chess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = &self.board;
        for j in (0..board.height()).rev() {
            write!(f, "{:>2} ", j + 1)?;
            for i in 0..board.length() {
                let c = board
                    .occupant(Vector::new(i, j))
                    .map_or('.', |(_, piece)| piece.to_char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for i in 0..board.length() {
            let file = square_name(Vector::new(i, 0))
                .and_then(|name| name.chars().next())
                .unwrap_or('?');
            write!(f, " {file}")?;
        }
        writeln!(f)
    }
}
