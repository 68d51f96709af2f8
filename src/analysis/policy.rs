use shakmaty::Color;

/// which probability question is being asked of the tree:
/// attainability when the perspective is the opening's own color,
/// prevalence when it is the opposite color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Attainability,
    Prevalence,
}

impl Query {
    pub fn of(perspective: Color, opening: Color) -> Self {
        if perspective == opening {
            Self::Attainability
        } else {
            Self::Prevalence
        }
    }
}

/// how a branching node combines its scored continuations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// total reachability across continuations
    Sum,
    /// frequency-weighted average, normalized over scored children
    Weighted,
    /// strict maximum, remembering the winning child as the best try
    Best,
}

impl Policy {
    /// the four-case table, keyed by whether the perspective played
    /// the ply into this node and by the query type. continuations
    /// after the perspective's own ply belong to the opponent, who
    /// may pick any reply: those always sum. the perspective's own
    /// continuations average by observed frequency when measuring
    /// prevalence and maximize when measuring attainability.
    pub fn select(own: bool, query: Query) -> Self {
        match (own, query) {
            (true, Query::Attainability) => Self::Sum,
            (true, Query::Prevalence) => Self::Sum,
            (false, Query::Prevalence) => Self::Weighted,
            (false, Query::Attainability) => Self::Best,
        }
    }
}
