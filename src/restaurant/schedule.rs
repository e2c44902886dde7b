use std::fmt;

use chrono::{Datelike, FixedOffset, NaiveDateTime, NaiveTime, Offset, Utc, Weekday};

/// Opening hours for a single day of the week.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DayHours {
    Closed,
    Open { open: NaiveTime, close: NaiveTime },
}

impl DayHours {
    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn open(open: (u32, u32), close: (u32, u32)) -> Self {
        Self::Open {
            open: Self::hm(open.0, open.1),
            close: Self::hm(close.0, close.1),
        }
    }
}

fn format_time(time: &NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DayHours::Closed => write!(f, "Descansamos 🚫"),
            DayHours::Open { open, close } => {
                write!(f, "{} - {}", format_time(open), format_time(close))
            }
        }
    }
}

/// Spanish name of a weekday, the way customers write it.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Current wall-clock time at the restaurant.
pub fn local_now(utc_offset_hours: i32) -> NaiveDateTime {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or(Utc.fix());
    Utc::now().with_timezone(&offset).naive_local()
}

#[derive(Clone, Debug, PartialEq)]
pub struct OpenStatus {
    pub is_open: bool,
    pub message: String,
}

/// Opening hours for each day of the week, Monday first.
#[derive(Clone, Debug)]
pub struct WeeklySchedule {
    days: [DayHours; 7],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        let weekday = DayHours::open((18, 0), (22, 0));
        let weekend = DayHours::open((16, 0), (22, 0));
        Self {
            days: [
                DayHours::Closed,
                weekday,
                weekday,
                weekday,
                weekday,
                weekend,
                weekend,
            ],
        }
    }
}

impl WeeklySchedule {
    pub fn new(days: [DayHours; 7]) -> Self {
        Self { days }
    }

    pub fn hours_for(&self, day: Weekday) -> DayHours {
        self.days[day.num_days_from_monday() as usize]
    }

    /// Iterates over `(day name, hours)` starting on Monday.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, DayHours)> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(|day| (day_name(day), self.hours_for(day)))
    }

    pub fn status_at(&self, now: NaiveDateTime) -> OpenStatus {
        let day = now.weekday();
        let name = day_name(day);
        let hours = self.hours_for(day);
        match hours {
            DayHours::Closed => OpenStatus {
                is_open: false,
                message: format!("Hoy {} descansamos 🚫", name),
            },
            DayHours::Open { open, close } if open <= now.time() && now.time() <= close => {
                OpenStatus {
                    is_open: true,
                    message: format!("Estamos abiertos hasta las {}", format_time(&close)),
                }
            }
            DayHours::Open { .. } => OpenStatus {
                is_open: false,
                message: format!("Hoy {} nuestro horario es {}", name, hours),
            },
        }
    }
}
