pub mod analysis;
pub mod catalog;
pub mod chess;
pub mod config;
pub mod console;
pub mod stats;
pub mod transpose;

pub type Probability = f32;
pub type Count = u32;

/// probabilities are reported to three decimal places
pub fn round3(p: Probability) -> Probability {
    (p * 1e3).round() / 1e3
}
