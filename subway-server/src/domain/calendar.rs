//! Service calendar classification.

use chrono::Weekday;

/// Which timetable variant applies on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCalendar {
    Weekday,
    Saturday,
    Sunday,
}

impl ServiceCalendar {
    /// Calendar class for a local day of the week.
    pub fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat => ServiceCalendar::Saturday,
            Weekday::Sun => ServiceCalendar::Sunday,
            _ => ServiceCalendar::Weekday,
        }
    }

    /// Classify a static timetable `service_id`.
    ///
    /// Archives either use the bare class names (`Weekday`) or embed a
    /// short code in a longer id (`ASP24GEN-1037-Weekday-00`, `..._WKD`).
    /// The id is split into runs of letters and a run must equal a class
    /// name or code exactly, so `Sunset` names nothing. Returns `None` for
    /// ids that name no calendar class.
    pub fn classify(service_id: &str) -> Option<Self> {
        service_id
            .split(|c: char| !c.is_ascii_alphabetic())
            .find_map(|token| match token.to_ascii_lowercase().as_str() {
                "weekday" | "wkd" => Some(ServiceCalendar::Weekday),
                "saturday" | "sat" => Some(ServiceCalendar::Saturday),
                "sunday" | "sun" => Some(ServiceCalendar::Sunday),
                _ => None,
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCalendar::Weekday => "Weekday",
            ServiceCalendar::Saturday => "Saturday",
            ServiceCalendar::Sunday => "Sunday",
        }
    }
}
