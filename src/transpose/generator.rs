use crate::chess::Line;
use crate::chess::Oracle;
use itertools::EitherOrBoth;
use itertools::Itertools;

/// enumerates the legal move-order transpositions of a main line:
/// each side's plies are permuted among themselves, interleaved in
/// original turn order, and replayed through the legality oracle.
/// candidates die at their first illegal ply. survivors must land on
/// the main line's final position and are kept in canonical SAN,
/// deduplicated, and never include the main line itself. a search
/// that never ran (over the cap, or a main line that does not
/// replay) is None, as opposed to one that ran and found nothing.
pub struct Generator {
    /// ceiling on |W|! x |B|! interleavings per opening; the search
    /// is factorial and long decisive lines blow up fast
    cap: usize,
}

impl Generator {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    pub fn enumerate(&self, main: &Line) -> Option<Vec<Line>> {
        // with one ply per side there is nothing to reorder
        if main.length() <= 2 {
            return Some(vec![]);
        }
        let (white, black) = main.halves();
        let interleavings = factorial(white.len()).saturating_mul(factorial(black.len()));
        if interleavings > self.cap {
            log::warn!(
                "not enumerating {} interleavings (cap {})",
                interleavings,
                self.cap
            );
            return None;
        }
        let mut oracle = Oracle::new();
        let (canonical, target) = match oracle.replay(main) {
            Some(line) => (line, oracle.key()),
            None => {
                log::warn!("main line does not replay: {}", main);
                return None;
            }
        };
        let mut found = Vec::new();
        for ws in white.iter().copied().permutations(white.len()) {
            for bs in black.iter().copied().permutations(black.len()) {
                let candidate = match self.replay(&mut oracle, &ws, &bs) {
                    Some(line) => line,
                    None => continue,
                };
                if oracle.key() != target {
                    continue;
                }
                if candidate == canonical || found.contains(&candidate) {
                    continue;
                }
                found.push(candidate);
            }
        }
        Some(found)
    }

    /// interleave one permutation per side in turn order and replay
    /// it, bailing at the first illegal ply
    fn replay(&self, oracle: &mut Oracle, white: &[&str], black: &[&str]) -> Option<Line> {
        oracle.reset();
        white
            .iter()
            .zip_longest(black.iter())
            .flat_map(|plies| match plies {
                EitherOrBoth::Both(w, b) => vec![*w, *b],
                EitherOrBoth::Left(w) => vec![*w],
                EitherOrBoth::Right(b) => vec![*b],
            })
            .map(|token| oracle.try_move(token))
            .collect()
    }
}

fn factorial(n: usize) -> usize {
    (1..=n).fold(1usize, |acc, i| acc.saturating_mul(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_have_no_transpositions() {
        let generator = Generator::new(10_000);
        assert!(generator.enumerate(&Line::parse("1. e4 e5")).unwrap().is_empty());
        assert!(generator.enumerate(&Line::parse("1. e4")).unwrap().is_empty());
    }

    #[test]
    fn finds_all_legal_reorderings() {
        let generator = Generator::new(10_000);
        let found = generator.enumerate(&Line::parse("1. Nf3 Nf6 2. g3 g6")).unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.contains(&Line::parse("1. g3 g6 2. Nf3 Nf6")));
        assert!(found.contains(&Line::parse("1. Nf3 g6 2. g3 Nf6")));
        assert!(found.contains(&Line::parse("1. g3 Nf6 2. Nf3 g6")));
        // never the main line, never a duplicate
        assert!(!found.contains(&Line::parse("1. Nf3 Nf6 2. g3 g6")));
        assert_eq!(found.iter().collect::<std::collections::HashSet<_>>().len(), 3);
    }

    #[test]
    fn illegal_orders_are_abandoned() {
        // the capture sequence only works in one order
        let generator = Generator::new(10_000);
        let found = generator.enumerate(&Line::parse("1. e4 d5 2. exd5 Qxd5")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn developing_moves_depend_on_pawns() {
        // Bc4/Bc5 are blocked until the e-pawns move
        let generator = Generator::new(10_000);
        let found = generator.enumerate(&Line::parse("1. e4 e5 2. Bc4 Bc5")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn cap_short_circuits_enumeration() {
        let generator = Generator::new(3);
        assert!(generator.enumerate(&Line::parse("1. Nf3 Nf6 2. g3 g6")).is_none());
    }

    #[test]
    fn unreplayable_main_line_is_not_a_search() {
        let generator = Generator::new(10_000);
        assert!(generator.enumerate(&Line::parse("1. e4 e5 2. e5 Nf6")).is_none());
    }

    #[test]
    fn candidates_replay_to_the_main_position() {
        let generator = Generator::new(10_000);
        let main = Line::parse("1. Nf3 Nf6 2. g3 g6");
        let mut oracle = Oracle::new();
        oracle.replay(&main).unwrap();
        let target = oracle.key();
        for candidate in generator.enumerate(&main).unwrap() {
            oracle.replay(&candidate).unwrap();
            assert_eq!(oracle.key(), target);
        }
    }
}
