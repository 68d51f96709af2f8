pub mod line;
pub mod oracle;

pub use line::Line;
pub use oracle::Oracle;
