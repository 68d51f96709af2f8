use super::BestTry;
use super::DecisionTree;
use crate::round3;
use petgraph::graph::NodeIndex;
use shakmaty::Color;
use std::collections::HashMap;

/// renders the annotated decision tree as one movetext game with
/// variations: at the opening color's branching points it follows
/// the marked best try (commenting its score and the alternatives),
/// at the opponent's it branches into every observed reply. the
/// best-try map is drained as it is read, so a pass leaves nothing
/// behind. a game with no renderable moves is the bare `*` sentinel.
pub struct Renderer<'a> {
    tree: &'a DecisionTree,
    best: HashMap<NodeIndex, BestTry>,
    color: Color,
}

impl<'a> Renderer<'a> {
    pub fn render(
        tree: &'a DecisionTree,
        best: HashMap<NodeIndex, BestTry>,
        color: Color,
    ) -> String {
        let mut this = Self { tree, best, color };
        let mut out = Vec::new();
        this.emit(tree.root(), 0, true, &mut out);
        out.push("*".to_string());
        out.join(" ")
    }

    /// `numbered` forces a move-number prefix on a Black ply, as at
    /// the start of a variation or after an interruption
    fn emit(&mut self, node: NodeIndex, ply: usize, numbered: bool, out: &mut Vec<String>) {
        let children = self.tree.children(node);
        match children.as_slice() {
            [] => {}
            [child] => {
                self.push(*child, ply, numbered, out);
                self.emit(*child, ply + 1, false, out);
            }
            _ if self.to_move(ply) == self.color => match self.best.remove(&node) {
                None => out.push("{ No stats. }".to_string()),
                Some(choice) => {
                    self.push(choice.child, ply, numbered, out);
                    let others = children
                        .iter()
                        .filter(|&&child| child != choice.child)
                        .map(|&child| self.tree.token(child))
                        .collect::<Vec<&str>>();
                    out.push(format!(
                        "{{ Att. = {}, over {} }}",
                        round3(choice.score),
                        others.join(", ")
                    ));
                    self.emit(choice.child, ply + 1, true, out);
                }
            },
            _ => {
                let main = children[0];
                self.push(main, ply, numbered, out);
                for &variation in &children[1..] {
                    out.push("(".to_string());
                    self.push(variation, ply, true, out);
                    self.emit(variation, ply + 1, false, out);
                    out.push(")".to_string());
                }
                // variations interrupt the numbering
                self.emit(main, ply + 1, true, out);
            }
        }
    }

    fn push(&self, node: NodeIndex, ply: usize, numbered: bool, out: &mut Vec<String>) {
        let token = self.tree.token(node);
        if ply % 2 == 0 {
            out.push(format!("{}. {}", ply / 2 + 1, token));
        } else if numbered {
            out.push(format!("{}... {}", ply / 2 + 1, token));
        } else {
            out.push(token.to_string());
        }
    }

    fn to_move(&self, ply: usize) -> Color {
        if ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
