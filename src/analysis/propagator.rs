use super::DecisionTree;
use super::Policy;
use super::Query;
use crate::Probability;
use crate::stats::Trie;
use petgraph::graph::NodeIndex;
use shakmaty::Color;
use std::collections::HashMap;

/// the continuation chosen at a branching node by a Best aggregation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestTry {
    pub child: NodeIndex,
    pub score: Probability,
}

/// result of one propagation pass: the probability at the root plus
/// the best-try choices, keyed by the branching node that made them
#[derive(Debug)]
pub struct Outcome {
    pub probability: Probability,
    pub best: HashMap<NodeIndex, BestTry>,
}

/// recursive probability propagation over a decision tree. driven
/// top-down, aggregated bottom-up, with the mover color threaded
/// explicitly through each call rather than inferred from depth.
pub struct Propagator<'a> {
    tree: &'a DecisionTree,
    stats: &'a Trie,
    perspective: Color,
    query: Query,
}

impl<'a> Propagator<'a> {
    pub fn new(tree: &'a DecisionTree, stats: &'a Trie, perspective: Color, query: Query) -> Self {
        Self {
            tree,
            stats,
            perspective,
            query,
        }
    }

    /// the root is a synthetic non-move node owned by Black, so the
    /// first real ply flips to White.
    pub fn run(self) -> Outcome {
        let mut best = HashMap::new();
        let probability = self.walk(self.tree.root(), self.stats, Color::Black, &mut best);
        Outcome { probability, best }
    }

    /// `mover` is the color that played the ply into `node`. a ply
    /// missing from the stats trie is sparse data, not an error: its
    /// subtree reads as unattainable.
    fn walk(
        &self,
        node: NodeIndex,
        stats: &Trie,
        mover: Color,
        best: &mut HashMap<NodeIndex, BestTry>,
    ) -> Probability {
        let children = self.tree.children(node);
        let mut value = 1.;
        match children.as_slice() {
            [] => {}
            [child] => match stats.child(self.tree.token(*child)) {
                Some(next) => value = self.walk(*child, next, mover.other(), best),
                None => {
                    log::debug!("no stats for {}", self.tree.token(*child));
                    return 0.;
                }
            },
            _ => {
                let scored = children
                    .iter()
                    .filter_map(|&child| match stats.child(self.tree.token(child)) {
                        Some(next) => {
                            Some((child, next, self.walk(child, next, mover.other(), best)))
                        }
                        None => {
                            log::debug!("no stats for {}", self.tree.token(child));
                            None
                        }
                    })
                    .collect::<Vec<(NodeIndex, &Trie, Probability)>>();
                value = match Policy::select(mover == self.perspective, self.query) {
                    Policy::Sum => scored.iter().map(|(_, _, p)| p).sum(),
                    Policy::Weighted => {
                        let denom = scored
                            .iter()
                            .map(|(_, next, _)| next.probability())
                            .sum::<Probability>();
                        match denom {
                            d if d == 0. => 0.,
                            d => scored
                                .iter()
                                .map(|(_, next, p)| p * next.probability() / d)
                                .sum(),
                        }
                    }
                    Policy::Best => {
                        let mut winner: Option<BestTry> = None;
                        for (child, _, score) in scored {
                            // strictly greater keeps the first discovered
                            if score > winner.map_or(0., |w| w.score) {
                                winner = Some(BestTry { child, score });
                            }
                        }
                        match winner {
                            Some(choice) => {
                                best.insert(node, choice);
                                choice.score
                            }
                            None => {
                                log::debug!("no viable continuation");
                                return 0.;
                            }
                        }
                    }
                };
            }
        }
        // the opponent must actually choose to play this node's ply
        if mover != self.perspective && node != self.tree.root() {
            value *= stats.probability();
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Line;
    use serde_json::json;

    /// single path e4 e5 Nf3 Nc6 with move rates 1.0 / 0.8 / 0.75 / 0.5
    fn chain() -> Trie {
        serde_json::from_value(json!({
            "stats": { "total": 100, "white": 50, "black": 30, "draw": 20 },
            "e4": { "stats": { "total": 100, "white": 50, "black": 30, "draw": 20, "move_rate": 1.0 },
            "e5": { "stats": { "total": 80, "white": 40, "black": 24, "draw": 16, "move_rate": 0.8 },
            "Nf3": { "stats": { "total": 60, "white": 30, "black": 18, "draw": 12, "move_rate": 0.75 },
            "Nc6": { "stats": { "total": 30, "white": 15, "black": 9, "draw": 6, "move_rate": 0.5 }
            }}}}
        }))
        .unwrap()
    }

    /// two first-move orders for White: Nf3 (rate 0.6) and g3 (rate 0.2)
    fn forked() -> Trie {
        serde_json::from_value(json!({
            "stats": { "total": 100, "white": 50, "black": 30, "draw": 20 },
            "Nf3": { "stats": { "total": 60, "white": 30, "black": 18, "draw": 12, "move_rate": 0.6 },
            "Nf6": { "stats": { "total": 30, "white": 15, "black": 9, "draw": 6, "move_rate": 0.5 },
            "g3": { "stats": { "total": 9, "white": 5, "black": 3, "draw": 1, "move_rate": 0.3 },
            "g6": { "stats": { "total": 4, "white": 2, "black": 1, "draw": 1, "move_rate": 0.4 }
            }}}},
            "g3": { "stats": { "total": 20, "white": 10, "black": 6, "draw": 4, "move_rate": 0.2 },
            "g6": { "stats": { "total": 10, "white": 5, "black": 3, "draw": 2, "move_rate": 0.5 },
            "Nf3": { "stats": { "total": 7, "white": 4, "black": 2, "draw": 1, "move_rate": 0.7 },
            "Nf6": { "stats": { "total": 6, "white": 3, "black": 2, "draw": 1, "move_rate": 0.8 }
            }}}}
        }))
        .unwrap()
    }

    fn forked_tree() -> DecisionTree {
        DecisionTree::new(
            &Line::parse("1. Nf3 Nf6 2. g3 g6"),
            &[Line::parse("1. g3 g6 2. Nf3 Nf6")],
        )
    }

    fn close(a: Probability, b: Probability) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn chain_multiplies_opponent_moves_only() {
        let stats = chain();
        let tree = DecisionTree::new(&Line::parse("1. e4 e5 2. Nf3 Nc6"), &[]);
        let white = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        assert!(close(white.probability, 0.8 * 0.5));
        // single-child nodes never branch, so no best try is recorded
        assert!(white.best.is_empty());
        let black = Propagator::new(&tree, &stats, Color::Black, Query::Attainability).run();
        assert!(close(black.probability, 1.0 * 0.75));
    }

    #[test]
    fn missing_ply_zeroes_the_branch() {
        let stats = chain();
        let tree = DecisionTree::new(&Line::parse("1. d4 d5"), &[]);
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        assert_eq!(outcome.probability, 0.);
    }

    #[test]
    fn attainability_maximizes_own_choices() {
        let stats = forked();
        let tree = forked_tree();
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        // Nf3 order scores 0.5 * 0.4, g3 order scores 0.5 * 0.8
        assert!(close(outcome.probability, 0.4));
        let choice = outcome.best.get(&tree.root()).unwrap();
        assert_eq!(tree.token(choice.child), "g3");
        assert!(close(choice.score, 0.4));
    }

    #[test]
    fn opponent_replies_sum() {
        let stats = forked();
        let tree = forked_tree();
        // for Black the fork is the opponent's choice of move orders
        let outcome = Propagator::new(&tree, &stats, Color::Black, Query::Prevalence).run();
        // 0.6 * 0.3 + 0.2 * 0.7
        assert!(close(outcome.probability, 0.32));
        assert!(outcome.best.is_empty());
    }

    #[test]
    fn prevalence_weights_own_choices() {
        let stats = forked();
        let tree = forked_tree();
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Prevalence).run();
        // weights 0.6 and 0.2 normalize to 0.75 and 0.25
        assert!(close(outcome.probability, 0.2 * 0.75 + 0.4 * 0.25));
        assert!(outcome.best.is_empty());
    }

    #[test]
    fn combinators_are_genuinely_distinct() {
        let stats = forked();
        let tree = forked_tree();
        let max = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        let wtd = Propagator::new(&tree, &stats, Color::White, Query::Prevalence).run();
        let sum = Propagator::new(&tree, &stats, Color::Black, Query::Prevalence).run();
        assert!(close(max.probability, 0.4));
        assert!(close(wtd.probability, 0.25));
        assert!(close(sum.probability, 0.32));
    }

    #[test]
    fn equal_scores_keep_the_first_discovered() {
        // both orders score 0.5 * 0.4; the main line was inserted
        // first, so the tie stays with Nf3
        let stats: Trie = serde_json::from_value(json!({
            "stats": { "total": 100, "white": 50, "black": 30, "draw": 20 },
            "Nf3": { "stats": { "total": 60, "white": 30, "black": 18, "draw": 12, "move_rate": 0.6 },
            "Nf6": { "stats": { "total": 30, "white": 15, "black": 9, "draw": 6, "move_rate": 0.5 },
            "g3": { "stats": { "total": 9, "white": 5, "black": 3, "draw": 1, "move_rate": 0.3 },
            "g6": { "stats": { "total": 4, "white": 2, "black": 1, "draw": 1, "move_rate": 0.4 }
            }}}},
            "g3": { "stats": { "total": 20, "white": 10, "black": 6, "draw": 4, "move_rate": 0.2 },
            "g6": { "stats": { "total": 10, "white": 5, "black": 3, "draw": 2, "move_rate": 0.5 },
            "Nf3": { "stats": { "total": 7, "white": 4, "black": 2, "draw": 1, "move_rate": 0.7 },
            "Nf6": { "stats": { "total": 3, "white": 2, "black": 1, "draw": 0, "move_rate": 0.4 }
            }}}}
        }))
        .unwrap();
        let tree = forked_tree();
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        assert!(close(outcome.probability, 0.2));
        let choice = outcome.best.get(&tree.root()).unwrap();
        assert_eq!(tree.token(choice.child), "Nf3");
        assert!(close(choice.score, 0.2));
    }

    #[test]
    fn branch_without_any_stats_has_no_best_try() {
        let stats: Trie = serde_json::from_value(json!({
            "stats": { "total": 100, "white": 50, "black": 30, "draw": 20 }
        }))
        .unwrap();
        let tree = forked_tree();
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Attainability).run();
        assert_eq!(outcome.probability, 0.);
        assert!(outcome.best.is_empty());
    }

    #[test]
    fn weighted_normalizes_over_present_children_only() {
        // g3 branch absent from stats: weight for Nf3 becomes 1
        let stats: Trie = serde_json::from_value(json!({
            "stats": { "total": 100, "white": 50, "black": 30, "draw": 20 },
            "Nf3": { "stats": { "total": 60, "white": 30, "black": 18, "draw": 12, "move_rate": 0.6 },
            "Nf6": { "stats": { "total": 30, "white": 15, "black": 9, "draw": 6, "move_rate": 0.5 },
            "g3": { "stats": { "total": 9, "white": 5, "black": 3, "draw": 1, "move_rate": 0.3 },
            "g6": { "stats": { "total": 4, "white": 2, "black": 1, "draw": 1, "move_rate": 0.4 }
            }}}}
        }))
        .unwrap();
        let tree = forked_tree();
        let outcome = Propagator::new(&tree, &stats, Color::White, Query::Prevalence).run();
        assert!(close(outcome.probability, 0.5 * 0.4));
    }
}
