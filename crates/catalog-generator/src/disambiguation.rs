//! Groups start-square arrangements by the SAN qualifier they force.
//!
//! A lone piece needs no qualifier. A second piece of the same kind that can
//! reach the end square forces a file qualifier, or a rank qualifier when the
//! two share a file. A third piece sharing the file of the mover while the
//! second shares its rank forces the full square.

use notation_core::square::{file_char, rank_char};
use notation_core::Square;

use crate::enumerate::Candidate;

/// Origin qualifier written between the piece letter and the target.
///
/// The derived order is the catalog output order: plain, files a-h,
/// ranks 1-8, then squares in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Plain,
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Qualifier {
    /// Every qualifier, in output order.
    pub fn all() -> impl Iterator<Item = Qualifier> {
        std::iter::once(Qualifier::Plain)
            .chain((0..8).map(Qualifier::File))
            .chain((0..8).map(Qualifier::Rank))
            .chain(Square::all().map(Qualifier::Square))
    }

    pub fn text(self) -> String {
        match self {
            Qualifier::Plain => String::new(),
            Qualifier::File(file) => file_char(file).to_string(),
            Qualifier::Rank(rank) => rank_char(rank).to_string(),
            Qualifier::Square(square) => square.to_string(),
        }
    }
}

/// The moving piece plus the companions that make `qualifier` necessary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    pub qualifier: Qualifier,
    pub primary: Square,
    pub companions: Vec<Square>,
}

/// Enumerate every arrangement for one end square.
///
/// Order: single pieces, then ordered pairs, then ordered triples, each in
/// candidate order. Companions on the mover's ray are skipped since one would
/// block the other.
pub fn classify(candidates: &[Candidate]) -> Vec<Arrangement> {
    let mut arrangements = Vec::new();

    for c in candidates {
        arrangements.push(Arrangement {
            qualifier: Qualifier::Plain,
            primary: c.square,
            companions: Vec::new(),
        });
    }

    for (i, p) in candidates.iter().enumerate() {
        for (j, c) in candidates.iter().enumerate() {
            if i == j || p.ray == c.ray {
                continue;
            }
            let qualifier = if p.square.file() == c.square.file() {
                Qualifier::Rank(p.square.rank())
            } else {
                Qualifier::File(p.square.file())
            };
            arrangements.push(Arrangement {
                qualifier,
                primary: p.square,
                companions: vec![c.square],
            });
        }
    }

    for (i, p) in candidates.iter().enumerate() {
        for (j, c1) in candidates.iter().enumerate() {
            if i == j || p.square.file() != c1.square.file() {
                continue;
            }
            for (k, c2) in candidates.iter().enumerate() {
                if k == i || k == j || p.square.rank() != c2.square.rank() {
                    continue;
                }
                if p.ray == c1.ray || p.ray == c2.ray || c1.ray == c2.ray {
                    continue;
                }
                arrangements.push(Arrangement {
                    qualifier: Qualifier::Square(p.square),
                    primary: p.square,
                    companions: vec![c1.square, c2.square],
                });
            }
        }
    }

    arrangements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::start_candidates;
    use notation_core::PieceKind;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_qualifier_order_and_text() {
        let mut qualifiers = vec![
            Qualifier::Square(sq("a2")),
            Qualifier::Rank(0),
            Qualifier::File(7),
            Qualifier::Plain,
            Qualifier::File(0),
            Qualifier::Square(sq("a1")),
        ];
        qualifiers.sort();
        let texts: Vec<String> = qualifiers.into_iter().map(Qualifier::text).collect();
        assert_eq!(texts, ["", "a", "h", "1", "a1", "a2"]);
    }

    #[test]
    fn test_all_is_sorted() {
        let all: Vec<Qualifier> = Qualifier::all().collect();
        assert_eq!(all.len(), 1 + 8 + 8 + 64);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rook_pairs() {
        let candidates = start_candidates(PieceKind::Rook, sq("d4"));
        let arrangements = classify(&candidates);

        // d1 with a4 companion is file qualified, d1 with d8 is rank qualified
        let file_pair = Arrangement {
            qualifier: Qualifier::File(3),
            primary: sq("d1"),
            companions: vec![sq("a4")],
        };
        let rank_pair = Arrangement {
            qualifier: Qualifier::Rank(0),
            primary: sq("d1"),
            companions: vec![sq("d8")],
        };
        assert!(arrangements.contains(&file_pair));
        assert!(arrangements.contains(&rank_pair));

        // same-ray pairs never appear
        assert!(!arrangements
            .iter()
            .any(|a| a.primary == sq("d1") && a.companions == vec![sq("d2")]));
    }

    #[test]
    fn test_rooks_never_need_square_qualifier() {
        let candidates = start_candidates(PieceKind::Rook, sq("d4"));
        assert!(!classify(&candidates)
            .iter()
            .any(|a| matches!(a.qualifier, Qualifier::Square(_))));
    }

    #[test]
    fn test_queen_square_qualifier() {
        let candidates = start_candidates(PieceKind::Queen, sq("d4"));
        let arrangements = classify(&candidates);
        let triple = arrangements
            .iter()
            .find(|a| a.qualifier == Qualifier::Square(sq("b2")))
            .unwrap();
        assert_eq!(triple.companions.len(), 2);
        assert_eq!(triple.companions[0].file(), 1);
        assert_eq!(triple.companions[1].rank(), 1);
    }

    #[test]
    fn test_plain_first() {
        let candidates = start_candidates(PieceKind::Knight, sq("a1"));
        let arrangements = classify(&candidates);
        assert_eq!(arrangements.len(), 2 + 2);
        assert_eq!(arrangements[0].qualifier, Qualifier::Plain);
        assert_eq!(arrangements[1].qualifier, Qualifier::Plain);
        // b3 and c2 differ in file
        assert_eq!(arrangements[2].qualifier, Qualifier::File(1));
        assert_eq!(arrangements[3].qualifier, Qualifier::File(2));
    }
}
