use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::RepeatError;
use crate::scheduling::Frequency;

// Lower-cased display names and variant names, mapped to their variant.
static FREQUENCY_NAMES: LazyLock<HashMap<String, Frequency>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for f in Frequency::ALL {
        m.insert(f.name().to_lowercase(), f);
        m.insert(format!("{f:?}").to_lowercase(), f);
    }
    m
});

impl Frequency {
    /// The user-facing name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Fortnightly",
            Frequency::Monthly => "Monthly",
            Frequency::BiMonthly => "Every 2 Months",
            Frequency::Quarterly => "Quarterly",
            Frequency::HalfYearly => "Half-Yearly",
            Frequency::Yearly => "Yearly",
            Frequency::FourMonthly => "Four Months",
            Frequency::FourWeekly => "Four Weeks",
            Frequency::Daily => "Daily",
            Frequency::InNDays => "In (x) Days",
            Frequency::InNMonths => "In (x) Months",
            Frequency::EveryNDays => "Every (x) Days",
            Frequency::EveryNMonths => "Every (x) Months",
            Frequency::MonthlyLastDay => "Monthly (last day)",
            Frequency::MonthlyLastBusinessDay => "Monthly (last business day)",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Frequency {
    type Err = RepeatError;

    /// Parse either a user-facing name or a variant name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FREQUENCY_NAMES
            .get(&s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| RepeatError::UnknownFrequency(s.to_string()))
    }
}
