mod frequency;
mod repeat;
mod schedule;

pub(crate) use schedule::advance_schedule_py;
