pub mod trie;

pub use trie::Tally;
pub use trie::Trie;
