mod code;
mod policy;
mod state;

pub use crate::scheduling::repeat::{
    code::{decode, encode, EncodedRepeat, INFINITE_OCCURRENCES, REPEATS_BASE},
    policy::ExecutionPolicy,
    state::{next_occurrence, previous_occurrence, Count, RepeatState},
};
