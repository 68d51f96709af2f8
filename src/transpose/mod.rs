pub mod curate;
pub mod generator;

pub use curate::curate;
pub use generator::Generator;
