use crate::json::JSON;
use crate::scheduling::{
    AdvanceResult, Cal, EncodedRepeat, ExecutionPolicy, Frequency, RepeatState, ScheduleRecord,
};

impl JSON for Cal {}
impl JSON for Frequency {}
impl JSON for ExecutionPolicy {}
impl JSON for RepeatState {}
impl JSON for EncodedRepeat {}
impl JSON for ScheduleRecord {}
impl JSON for AdvanceResult {}
