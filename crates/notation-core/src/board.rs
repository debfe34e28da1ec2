//! Dense 8x8 container holding one value per square.

use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::square::Square;

/// One value for every square. Always fully populated; cloning copies every
/// value, so two boards never alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board<T> {
    /// Indexed as `cells[file][rank]`.
    cells: [[T; 8]; 8],
}

impl<T: Clone> Board<T> {
    pub fn filled(value: T) -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| value.clone())),
        }
    }
}

impl<T: Clone + Default> Default for Board<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Board<T> {
    /// Squares and values in canonical scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> + '_ {
        Square::all().map(move |sq| (sq, &self[sq]))
    }

    /// Number of squares whose value satisfies `pred`.
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.iter().filter(|(_, v)| pred(*v)).count()
    }
}

impl<T> Index<Square> for Board<T> {
    type Output = T;

    fn index(&self, sq: Square) -> &T {
        &self.cells[sq.file() as usize][sq.rank() as usize]
    }
}

impl<T> IndexMut<Square> for Board<T> {
    fn index_mut(&mut self, sq: Square) -> &mut T {
        &mut self.cells[sq.file() as usize][sq.rank() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_does_not_alias() {
        let mut a: Board<Vec<u8>> = Board::default();
        let b = a.clone();
        a[Square::at(2, 5)].push(1);
        assert_eq!(a[Square::at(2, 5)], vec![1]);
        assert!(b[Square::at(2, 5)].is_empty());
    }

    #[test]
    fn test_count() {
        let mut board = Board::filled(false);
        board[Square::at(0, 0)] = true;
        board[Square::at(7, 7)] = true;
        assert_eq!(board.count(|v| *v), 2);
        assert_eq!(board.iter().count(), 64);
    }
}
