use crate::chess::Line;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;

/// the decision tree for one opening: its main line merged with
/// every curated transposition, keyed by SAN token per ply. the root
/// is a synthetic non-move node. the tree carries no frequency data
/// and is never mutated after construction; best-try annotations
/// live in a side map produced by propagation.
#[derive(Debug)]
pub struct DecisionTree {
    graph: DiGraph<String, ()>,
    root: NodeIndex,
}

impl DecisionTree {
    pub fn new(main: &Line, transpositions: &[Line]) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(String::new());
        let mut this = Self { graph, root };
        this.insert(main);
        for line in transpositions {
            this.insert(line);
        }
        this
    }

    /// insert one line ply-by-ply, reusing shared-prefix nodes
    fn insert(&mut self, line: &Line) {
        let mut head = self.root;
        for token in line.tokens() {
            head = match self.child(head, token) {
                Some(next) => next,
                None => {
                    let next = self.graph.add_node(token.clone());
                    self.graph.add_edge(head, next, ());
                    next
                }
            };
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn token(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    pub fn child(&self, node: NodeIndex, token: &str) -> Option<NodeIndex> {
        self.children(node)
            .into_iter()
            .find(|&child| self.graph[child] == token)
    }

    /// children in first-insertion order, so the main line's token
    /// always comes first and ties break by discovery order.
    /// petgraph iterates outgoing edges newest first.
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect::<Vec<NodeIndex>>();
        children.reverse();
        children
    }

    pub fn count(&self) -> usize {
        self.graph.node_count()
    }
}
