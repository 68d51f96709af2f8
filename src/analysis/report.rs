use super::DecisionTree;
use super::Propagator;
use super::Query;
use super::Renderer;
use crate::Count;
use crate::Probability;
use crate::catalog::Catalog;
use crate::catalog::Opening;
use crate::catalog::Stats;
use crate::catalog::Summary;
use crate::chess::Line;
use crate::round3;
use crate::stats::Tally;
use crate::stats::Trie;
use shakmaty::Color;
use std::collections::BTreeMap;

/// the sentinel a best-try render degenerates to when the tree
/// produced no moves
pub const NO_BEST_TRY: &str = "*";

/// win/draw rates aggregated over a set of lines
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    pub total: Count,
    pub white: Probability,
    pub black: Probability,
    pub draw: Probability,
}

/// the tallies recorded at the end of a single line, None when any
/// of its plies is unseen
pub fn line_tally<'a>(stats: &'a Trie, line: &Line) -> Option<&'a Tally> {
    stats.descend(line).map(|node| &node.stats)
}

/// win rates across the main line and every transposition, each
/// weighted by its observed game count. the draw rate is derived as
/// the remainder so the three still sum to one after the per-line
/// rounding already baked into the trie.
pub fn aggregate_rates(stats: &Trie, opening: &Opening) -> Option<Rates> {
    let tallies = opening
        .lines()
        .iter()
        .filter_map(|line| line_tally(stats, line))
        .cloned()
        .collect::<Vec<Tally>>();
    let total = tallies.iter().map(|tally| tally.total).sum::<Count>();
    if total == 0 {
        return None;
    }
    let weight = |count: Count| count as Probability / total as Probability;
    let white = tallies
        .iter()
        .map(|tally| tally.white_rate * weight(tally.total))
        .sum::<Probability>();
    let black = tallies
        .iter()
        .map(|tally| tally.black_rate * weight(tally.total))
        .sum::<Probability>();
    Some(Rates {
        total,
        white,
        black,
        draw: 1. - white - black,
    })
}

/// attainability of one line for one color, ignoring transpositions:
/// the product of the opposite color's observed move frequencies
pub fn line_attainability(stats: &Trie, line: &Line, perspective: Color) -> Probability {
    let mut node = stats;
    let mut mover = Color::White;
    let mut probability = 1.;
    for token in line.tokens() {
        node = match node.child(token) {
            Some(next) => next,
            None => {
                log::debug!("no stats for {}", token);
                return 0.;
            }
        };
        if mover != perspective {
            probability *= node.probability();
        }
        mover = mover.other();
    }
    probability
}

/// full-tree probability for a perspective. attainability queries
/// (perspective matches the opening color) also render the best-try
/// line; prevalence queries leave no annotations to render.
pub fn evaluate(stats: &Trie, opening: &Opening, perspective: Color) -> (Probability, Option<String>) {
    let query = Query::of(perspective, opening.color());
    let tree = DecisionTree::new(&opening.line(), &opening.transposed());
    let outcome = Propagator::new(&tree, stats, perspective, query).run();
    match query {
        Query::Prevalence => (outcome.probability, None),
        Query::Attainability => {
            let line = Renderer::render(&tree, outcome.best, opening.color());
            (outcome.probability, Some(line))
        }
    }
}

/// expected games until a probability-p event; never is zero, not
/// infinity
pub fn expected_games(p: Probability) -> Count {
    if p == 0. { 0 } else { (1. / p).round() as Count }
}

/// aggregated summary over main line + transpositions
pub fn summarize(stats: &Trie, opening: &Opening) -> Option<Summary> {
    let rates = aggregate_rates(stats, opening)?;
    let color = opening.color();
    let (prevalence, _) = evaluate(stats, opening, color.other());
    let (attainability, best_try) = evaluate(stats, opening, color);
    Some(Summary {
        total: rates.total,
        white_rate: round3(rates.white),
        black_rate: round3(rates.black),
        draw_rate: round3(rates.draw),
        prevalence: round3(prevalence),
        prevalence_games: expected_games(prevalence),
        attainability: round3(attainability),
        attainability_games: expected_games(attainability),
        best_try,
    })
}

/// main-line-only summary; rates come straight off the trie node
pub fn summarize_main(stats: &Trie, opening: &Opening) -> Option<Summary> {
    let line = opening.line();
    let tally = line_tally(stats, &line)?.clone();
    let color = opening.color();
    let prevalence = line_attainability(stats, &line, color.other());
    let attainability = line_attainability(stats, &line, color);
    Some(Summary {
        total: tally.total,
        white_rate: round3(tally.white_rate),
        black_rate: round3(tally.black_rate),
        draw_rate: round3(tally.draw_rate),
        prevalence: round3(prevalence),
        prevalence_games: expected_games(prevalence),
        attainability: round3(attainability),
        attainability_games: expected_games(attainability),
        best_try: None,
    })
}

/// recompute aggregated summaries for every opening at one rating.
/// per-opening data gaps degrade to skips; only the count of
/// refreshed entries is reported back.
pub fn update_catalog(catalog: &mut Catalog, stats: &Trie, rating: u32) -> usize {
    let mut updated = 0;
    for (name, opening) in catalog.iter_mut() {
        if opening.is_system() {
            log::warn!("skipping system entry {}", name);
            continue;
        }
        // an empty transposition list means aggregated stats are the
        // main-line stats by definition
        if matches!(&opening.transpositions, Some(lines) if lines.is_empty()) {
            opening.stats = Some(Stats::use_main());
            updated += 1;
            continue;
        }
        match summarize(stats, opening) {
            None => log::warn!("skipping {}: no stats for any line", name),
            Some(summary) => {
                if summary.best_try.as_deref() == Some(NO_BEST_TRY) {
                    log::warn!("no best-try line for {}", name);
                }
                let mut rated = match opening.stats.take() {
                    Some(Stats::Rated(map)) => map,
                    _ => BTreeMap::new(),
                };
                rated.insert(rating.to_string(), summary);
                opening.stats = Some(Stats::Rated(rated));
                updated += 1;
            }
        }
    }
    updated
}

/// recompute main-line-only summaries for every opening at one rating
pub fn update_catalog_main(catalog: &mut Catalog, stats: &Trie, rating: u32) -> usize {
    let mut updated = 0;
    for (name, opening) in catalog.iter_mut() {
        if opening.is_system() {
            log::warn!("skipping system entry {}", name);
            continue;
        }
        match summarize_main(stats, opening) {
            None => log::warn!("skipping {}: main line has no stats", name),
            Some(summary) => {
                let mut rated = opening.stats_main.take().unwrap_or_default();
                rated.insert(rating.to_string(), summary);
                opening.stats_main = Some(rated);
                updated += 1;
            }
        }
    }
    updated
}
