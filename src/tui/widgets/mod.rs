mod card;

pub use card::{element_card, no_results_lines, part_card};
