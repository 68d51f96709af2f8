pub mod catalog;
pub mod opening;

pub use catalog::Catalog;
pub use opening::Opening;
pub use opening::Stats;
pub use opening::Summary;
