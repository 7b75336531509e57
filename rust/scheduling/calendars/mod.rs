mod cal;
mod calendar;
mod dateroll;

pub use crate::scheduling::calendars::{
    cal::Cal,
    calendar::{add_days, add_months, format_iso, get_eom, ndt, parse_iso, snap_eom, IsoShape},
    dateroll::DateRoll,
};
