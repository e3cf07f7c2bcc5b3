// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use once_cell::sync::Lazy;

use super::material::{Color, Piece, Role};
use super::square::{Offset, Square};
use super::Board;

impl Piece {
    /// Relative moves this piece may make, with forward as positive for
    /// pawns. See `Piece::direction`.
    pub fn move_table(&self) -> &'static [Offset] {
        match self.role() {
            Role::Pawn => PAWN_MOVES.as_slice(),
            Role::Knight => KNIGHT_MOVES.as_slice(),
            Role::Bishop => BISHOP_MOVES.as_slice(),
            Role::Rook => ROOK_MOVES.as_slice(),
            Role::Queen => QUEEN_MOVES.as_slice(),
            Role::King => KING_MOVES.as_slice(),
        }
    }

    /// Relative moves along which this piece attacks. Same as the move
    /// table except for pawns, which only attack diagonally.
    pub fn attack_table(&self) -> &'static [Offset] {
        match self.role() {
            Role::Pawn => PAWN_ATTACKS.as_slice(),
            _ => self.move_table(),
        }
    }

    /// Whether moving from `from` to `to` is in the piece's move table.
    pub fn allowed_move(&self, from: Square, to: Square) -> bool {
        let offset = (to - from).oriented(self.direction());
        self.move_table().contains(&offset)
    }

    fn allowed_attack(&self, from: Square, to: Square) -> bool {
        let offset = (to - from).oriented(self.direction());
        self.attack_table().contains(&offset)
    }
}

impl Board {
    /// Whether the piece on `from` may travel to `to` without passing over
    /// another piece. Knights jump.
    pub fn can_go_through(&self, from: Square, to: Square) -> bool {
        match self[from] {
            Some(Piece::Knight { .. }) => true,
            _ => from.between(to).all(|square| self.is_vacant(square)),
        }
    }

    /// Whether the piece on `from` attacks `to`. Castling rights, en passant
    /// and the safety of the attacker's own king are not considered.
    pub fn attacks(&self, from: Square, to: Square) -> bool {
        match self[from] {
            Some(piece) => piece.allowed_attack(from, to) && self.can_go_through(from, to),
            None => false,
        }
    }

    /// Full legality of a single piece move by `color`, including the rule
    /// that a move may not leave the mover's king in check.
    pub fn can_move(&self, color: Color, from: Square, to: Square) -> bool {
        let Some(piece) = self[from] else {
            return false;
        };
        if piece.color() != color || !piece.allowed_move(from, to) {
            return false;
        }
        if let Some(target) = self[to] {
            if target.color() == color {
                return false;
            }
        }
        if !self.can_go_through(from, to) {
            return false;
        }
        if piece.is_pawn() && !self.pawn_may_move(piece, from, to) {
            return false;
        }
        // most expensive check last
        !self.leaves_in_check(color, from, to)
    }

    fn pawn_may_move(&self, pawn: Piece, from: Square, to: Square) -> bool {
        let offset = (to - from).oriented(pawn.direction());
        if offset.x == 0 {
            // straight ahead only onto an empty square, double step only
            // from the starting square
            return self.is_vacant(to) && (offset.y == 1 || !pawn.has_moved());
        }
        if self.is_occupied(to) {
            return true;
        }
        self.en_passant_victim(pawn, from, to).is_some()
    }

    /// The pawn that would be taken en passant by moving the pawn `pawn`
    /// diagonally from `from` onto the empty square `to`.
    pub(crate) fn en_passant_victim(&self, pawn: Piece, from: Square, to: Square) -> Option<Square> {
        let beside = Square::new(to.file(), from.rank());
        match self[beside] {
            Some(victim) if victim.in_passing() && victim.color() != pawn.color() => Some(beside),
            _ => None,
        }
    }

    fn leaves_in_check(&self, color: Color, from: Square, to: Square) -> bool {
        let mut hypothetical = self.clone();
        hypothetical.simulate(from, to);
        hypothetical.is_in_check(color)
    }

    /// Moves the piece on `from` to `to` without any legality check,
    /// updating its flags and removing a pawn taken en passant. Returns the
    /// captured piece, if any.
    pub fn simulate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.squares[from].take()?;
        let offset = to - from;
        let mut captured = self.squares[to].take();
        if piece.is_pawn() && offset.x != 0 && captured.is_none() {
            if let Some(beside) = self.en_passant_victim(piece, from, to) {
                captured = self.squares[beside].take();
            }
        }
        piece.mark_moved(offset.y);
        self.squares[to] = Some(piece);
        captured
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        let king = self.king(color);
        self.pieces(!color).any(|(from, _)| self.attacks(from, king))
    }

    /// Whether the piece on `from` has at least one legal move.
    pub fn piece_can_move(&self, from: Square) -> bool {
        let Some(piece) = self[from] else {
            return false;
        };
        candidate_destinations(&piece, from).any(|to| self.can_move(piece.color(), from, to))
    }

    /// Whether `color` has any legal move anywhere on the board. Castling
    /// is never the only legal move, because a legal castle implies a legal
    /// single king step.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces(color).any(|(from, _)| self.piece_can_move(from))
    }
}

static PAWN_MOVES: Lazy<Vec<Offset>> = Lazy::new(|| {
    vec![
        Offset::new(0, 1),
        Offset::new(0, 2),
        Offset::new(-1, 1),
        Offset::new(1, 1),
    ]
});

static PAWN_ATTACKS: Lazy<Vec<Offset>> =
    Lazy::new(|| vec![Offset::new(-1, 1), Offset::new(1, 1)]);

static KNIGHT_MOVES: Lazy<Vec<Offset>> = Lazy::new(|| {
    vec![
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ]
});

static KING_MOVES: Lazy<Vec<Offset>> =
    Lazy::new(|| DIAGONALS.iter().chain(HORIZONTALS.iter()).copied().collect());

static BISHOP_MOVES: Lazy<Vec<Offset>> = Lazy::new(|| rays(&DIAGONALS));

static ROOK_MOVES: Lazy<Vec<Offset>> = Lazy::new(|| rays(&HORIZONTALS));

static QUEEN_MOVES: Lazy<Vec<Offset>> = Lazy::new(|| {
    let mut moves = rays(&DIAGONALS);
    moves.extend(rays(&HORIZONTALS));
    moves
});

const DIAGONALS: [Offset; 4] = [
    Offset::new(-1, -1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(1, 1),
];

const HORIZONTALS: [Offset; 4] = [
    Offset::new(0, -1),
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(0, 1),
];

// Every multiple of each unit step that fits on the board
fn rays(units: &[Offset]) -> Vec<Offset> {
    units
        .iter()
        .flat_map(|unit| (1..8).map(move |distance| *unit * distance))
        .collect()
}

/// Squares reachable by the piece on `from` according to its table alone,
/// ignoring every other rule. Used to enumerate candidate destinations.
pub fn candidate_destinations(piece: &Piece, from: Square) -> impl Iterator<Item = Square> {
    let direction = piece.direction();
    piece
        .move_table()
        .iter()
        .filter_map(move |offset| from + offset.oriented(direction))
}

#[cfg(test)]
mod tests {
    use crate::*;
    use strum::IntoEnumIterator;
    use Square::*;

    fn destinations(board: &Board, from: Square) -> Vec<Square> {
        let color = board[from].expect("no piece on square").color();
        Square::iter()
            .filter(|&to| board.can_move(color, from, to))
            .collect()
    }

    #[test]
    fn test_white_pawn_advance() {
        let board = Board::new();
        let destinations = destinations(&board, E2);
        assert_eq!(destinations, vec![E4, E3]);
    }
    #[test]
    fn test_black_pawn_advance() {
        let board = Board::new();
        let destinations = destinations(&board, E7);
        assert_eq!(destinations, vec![E6, E5]);
    }
    #[test]
    fn test_white_pawn_advance_blocked() {
        let board = Board::new().set_contents(E3, Some(Piece::BB));
        let destinations = destinations(&board, E2);
        assert!(!destinations.contains(&E3));
        assert!(!destinations.contains(&E4));
    }
    #[test]
    fn test_black_pawn_advance_blocked() {
        let board = Board::new().set_contents(E6, Some(Piece::WB));
        let destinations = destinations(&board, E7);
        assert!(!destinations.contains(&E6));
        assert!(!destinations.contains(&E5));
    }
    #[test]
    fn test_white_pawn_double_advance_blocked() {
        let board = Board::new().set_contents(E4, Some(Piece::BB));
        let destinations = destinations(&board, E2);
        assert!(destinations.contains(&E3));
        assert!(!destinations.contains(&E4));
    }
    #[test]
    fn test_double_advance_only_once() {
        let mut board = Board::new();
        board.simulate(E2, E3);
        let destinations = destinations(&board, E3);
        assert_eq!(destinations, vec![E4]);
    }
    #[test]
    fn test_pawn_cannot_move_backward() {
        let board = Board::new().set_contents(E4, Some(Piece::WP)).set_contents(E2, None);
        assert!(!board.can_move(Color::White, E4, E3));
        assert!(board.can_move(Color::White, E4, E5));
    }
    #[test]
    fn test_white_pawn_capture() {
        let mut board = Board::new()
            .set_contents(D3, Some(Piece::BB))
            .set_contents(F3, Some(Piece::WN));
        let from_e2 = destinations(&board, E2);
        assert!(from_e2.contains(&D3));
        assert!(!from_e2.contains(&F3));
        let from_c2 = destinations(&board, C2);
        assert!(from_c2.contains(&D3));
        assert!(!from_c2.contains(&B3));
        let captured = board.simulate(E2, D3);
        assert_eq!(captured, Some(Piece::BB));
        assert_eq!(board[D3].map(|piece| piece.role()), Some(Role::Pawn));
        assert_eq!(board[E2], None);
    }
    #[test]
    fn test_black_pawn_capture() {
        let board = Board::new()
            .set_contents(D6, Some(Piece::WB))
            .set_contents(F6, Some(Piece::BN));
        let destinations = destinations(&board, E7);
        assert!(destinations.contains(&D6));
        assert!(!destinations.contains(&F6));
    }
    #[test]
    fn test_double_advance_enables_en_passant() {
        let mut board = Board::new().set_contents(D4, Some(Piece::BP));
        board.simulate(E2, E4);
        assert!(board[E4].unwrap().in_passing());
        assert!(board.can_move(Color::Black, D4, E3));
    }
    #[test]
    fn test_single_advance_does_not_enable_en_passant() {
        let mut board = Board::new().set_contents(D3, Some(Piece::BP));
        board.simulate(E2, E3);
        assert!(!board[E3].unwrap().in_passing());
        assert!(!board.can_move(Color::Black, D3, E2));
    }
    #[test]
    fn test_en_passant_removes_adjacent_pawn() {
        let mut board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E8, Some(Piece::BK))
            .set_contents(E5, Some(Piece::WP))
            .set_contents(D7, Some(Piece::BP));
        board.simulate(D7, D5);
        assert!(board.can_move(Color::White, E5, D6));
        let captured = board.simulate(E5, D6);
        assert_eq!(captured.map(|piece| piece.role()), Some(Role::Pawn));
        assert_eq!(board[D5], None);
        assert_eq!(board[E5], None);
        assert_eq!(board[D6].map(|piece| piece.color()), Some(Color::White));
    }
    #[test]
    fn test_diagonal_to_empty_square_without_en_passant() {
        let board = Board::new().set_contents(D3, None);
        assert!(!board.can_move(Color::White, E2, D3));
    }
    #[test]
    fn test_king_moves_one_square() {
        let mut board = Board::new().set_contents(E2, None);
        let destinations = destinations(&board, E1);
        assert_eq!(destinations, vec![E2]);
        board.simulate(E1, E2);
        assert!(!board[E2].unwrap().can_castle());
    }
    #[test]
    fn test_king_blocked() {
        let board = Board::new();
        assert!(destinations(&board, E1).is_empty());
    }
    #[test]
    fn test_queen_destinations() {
        let board = Board::new()
            .set_contents(C1, None)
            .set_contents(C2, None)
            .set_contents(D2, None);
        let destinations = destinations(&board, D1);
        assert_eq!(destinations.len(), 10);
        assert!(destinations.contains(&C1));
        assert!(!destinations.contains(&B1));
        assert!(destinations.contains(&B3));
        assert!(destinations.contains(&D6));
        assert!(destinations.contains(&D7));
        assert!(!destinations.contains(&D8));
        assert!(!destinations.contains(&E2));
    }
    #[test]
    fn test_knight_destinations() {
        let board = Board::new();
        let destinations = destinations(&board, G1);
        assert_eq!(destinations, vec![F3, H3]);
    }
    #[test]
    fn test_knight_blocked() {
        let board = Board::new()
            .set_contents(F3, Some(Piece::WP))
            .set_contents(H3, Some(Piece::WP));
        assert!(destinations(&board, G1).is_empty());
    }
    #[test]
    fn test_rook_destinations() {
        let board = Board::new().set_contents(A2, None).set_contents(B1, None);
        let destinations = destinations(&board, A1);
        assert_eq!(destinations.len(), 7);
        assert!(destinations.contains(&B1));
        assert!(!destinations.contains(&B2));
        assert!(destinations.contains(&A3));
        assert!(destinations.contains(&A7));
        assert!(!destinations.contains(&A8));
    }
    #[test]
    fn test_bishop_destinations() {
        let board = Board::new().set_contents(C2, None).set_contents(D2, None);
        let destinations = destinations(&board, C1);
        assert_eq!(destinations.len(), 5);
        assert!(!destinations.contains(&B2));
        assert!(destinations.contains(&D2));
        assert!(destinations.contains(&E3));
        assert!(destinations.contains(&H6));
    }
    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E2, Some(Piece::WN))
            .set_contents(E8, Some(Piece::BR))
            .set_contents(A8, Some(Piece::BK));
        assert!(destinations(&board, E2).is_empty());
    }
    #[test]
    fn test_king_cannot_step_into_check() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(D8, Some(Piece::BR))
            .set_contents(A8, Some(Piece::BK));
        let destinations = destinations(&board, E1);
        assert!(!destinations.contains(&D1));
        assert!(!destinations.contains(&D2));
        assert!(destinations.contains(&E2));
        assert!(destinations.contains(&F1));
    }
    #[test]
    fn test_check_by_sliding_piece() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(H4, Some(Piece::BQ))
            .set_contents(A8, Some(Piece::BK));
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
        let board = board.set_contents(F2, Some(Piece::WP));
        assert!(!board.is_in_check(Color::White));
    }
    #[test]
    fn test_pawn_attacks_diagonally_only() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(E5, Some(Piece::BK))
            .set_contents(E4, Some(Piece::WP));
        assert!(!board.is_in_check(Color::Black));
        let board = board.set_contents(D4, Some(Piece::WP));
        assert!(board.is_in_check(Color::Black));
    }
    #[test]
    fn test_knight_checks_over_pieces() {
        let board = Board::new().set_contents(D3, Some(Piece::BN));
        assert!(board.is_in_check(Color::White));
    }
    #[test]
    fn test_accepted_moves_never_expose_own_king() {
        let board = Board::empty()
            .set_contents(E1, Some(Piece::WK))
            .set_contents(D2, Some(Piece::WB))
            .set_contents(C3, Some(Piece::WN))
            .set_contents(B4, Some(Piece::BB))
            .set_contents(E7, Some(Piece::BR))
            .set_contents(E2, Some(Piece::WQ))
            .set_contents(H8, Some(Piece::BK));
        for from in Square::iter() {
            let Some(piece) = board[from] else { continue };
            if piece.color() != Color::White {
                continue;
            }
            for to in Square::iter() {
                if board.can_move(Color::White, from, to) {
                    let mut after = board.clone();
                    after.simulate(from, to);
                    assert!(!after.is_in_check(Color::White), "{from}-{to}");
                }
            }
        }
    }
    #[test]
    fn test_starting_position_has_moves() {
        let board = Board::new();
        assert!(board.has_legal_move(Color::White));
        assert!(board.has_legal_move(Color::Black));
    }
    #[test]
    fn test_candidate_destinations_stay_on_board() {
        assert_eq!(candidate_destinations(&Piece::WN, A1).count(), 2);
        assert_eq!(candidate_destinations(&Piece::WP, E2).count(), 4);
        assert_eq!(candidate_destinations(&Piece::BP, A7).count(), 3);
    }
}
