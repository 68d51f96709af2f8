pub mod policy;
pub mod propagator;
pub mod renderer;
pub mod report;
pub mod tree;

pub use policy::Policy;
pub use policy::Query;
pub use propagator::BestTry;
pub use propagator::Outcome;
pub use propagator::Propagator;
pub use renderer::Renderer;
pub use tree::DecisionTree;
