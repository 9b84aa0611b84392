mod cut;
pub mod marks;

pub use cut::{Cut, CutOutcome, CutResult};
