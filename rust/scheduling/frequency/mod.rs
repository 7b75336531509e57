mod frequency;
mod names;

pub use crate::scheduling::frequency::frequency::{step, Frequency, Scheduling};
