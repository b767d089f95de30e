use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// Day of the week a slot recurs on. Weeks start on Sunday.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum WeekdaySymbol {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl WeekdaySymbol {
    pub const ALL: [WeekdaySymbol; 7] = [
        WeekdaySymbol::Sun,
        WeekdaySymbol::Mon,
        WeekdaySymbol::Tue,
        WeekdaySymbol::Wed,
        WeekdaySymbol::Thu,
        WeekdaySymbol::Fri,
        WeekdaySymbol::Sat,
    ];

    /// Offset from the week anchor, Sunday = 0.
    pub fn order_index(self) -> u8 {
        match self {
            WeekdaySymbol::Sun => 0,
            WeekdaySymbol::Mon => 1,
            WeekdaySymbol::Tue => 2,
            WeekdaySymbol::Wed => 3,
            WeekdaySymbol::Thu => 4,
            WeekdaySymbol::Fri => 5,
            WeekdaySymbol::Sat => 6,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            WeekdaySymbol::Sun => "su",
            WeekdaySymbol::Mon => "mo",
            WeekdaySymbol::Tue => "tu",
            WeekdaySymbol::Wed => "we",
            WeekdaySymbol::Thu => "th",
            WeekdaySymbol::Fri => "fr",
            WeekdaySymbol::Sat => "sa",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            WeekdaySymbol::Sun => "Sunday",
            WeekdaySymbol::Mon => "Monday",
            WeekdaySymbol::Tue => "Tuesday",
            WeekdaySymbol::Wed => "Wednesday",
            WeekdaySymbol::Thu => "Thursday",
            WeekdaySymbol::Fri => "Friday",
            WeekdaySymbol::Sat => "Saturday",
        }
    }
}

impl fmt::Display for WeekdaySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

impl FromStr for WeekdaySymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "su" | "sun" | "sunday" => Ok(WeekdaySymbol::Sun),
            "mo" | "mon" | "monday" => Ok(WeekdaySymbol::Mon),
            "tu" | "tue" | "tuesday" => Ok(WeekdaySymbol::Tue),
            "we" | "wed" | "wednesday" => Ok(WeekdaySymbol::Wed),
            "th" | "thu" | "thursday" => Ok(WeekdaySymbol::Thu),
            "fr" | "fri" | "friday" => Ok(WeekdaySymbol::Fri),
            "sa" | "sat" | "saturday" => Ok(WeekdaySymbol::Sat),
            _ => Err(anyhow!("Invalid weekday: {}", s)),
        }
    }
}
