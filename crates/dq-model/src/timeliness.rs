use chrono::NaiveTime;

/// Reporting frequency used to derive the recency window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Length of one frequency unit in days.
    pub fn unit_days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Quarterly => 90,
            Self::Yearly => 365,
        }
    }
}

/// How far back (or how late in the day) a value may be and still count
/// as timely.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Cutoff {
    /// Number of frequency units making up the recency window.
    Units(u32),
    /// Latest acceptable time of day; the window stays at one unit and
    /// the time gate applies when a time column is configured.
    TimeOfDay(NaiveTime),
}

/// Parameters for one timeliness assessment. Built per request and
/// discarded with the result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelinessConfig {
    pub date_columns: Vec<String>,
    pub time_column: Option<String>,
    pub frequency: Frequency,
    pub cutoff: Option<Cutoff>,
}

impl TimelinessConfig {
    pub fn new(date_columns: Vec<String>, frequency: Frequency) -> Self {
        Self {
            date_columns,
            time_column: None,
            frequency,
            cutoff: None,
        }
    }

    pub fn with_time_column(mut self, column: impl Into<String>) -> Self {
        self.time_column = Some(column.into());
        self
    }

    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Effective recency window in days: `units × unit_days` when the
    /// cutoff is a unit count, otherwise a single unit.
    pub fn window_days(&self) -> i64 {
        match self.cutoff {
            Some(Cutoff::Units(units)) => i64::from(units) * self.frequency.unit_days(),
            Some(Cutoff::TimeOfDay(_)) | None => self.frequency.unit_days(),
        }
    }

    /// The time-of-day gate, active only when both a time column and a
    /// time-of-day cutoff are configured.
    pub fn time_gate(&self) -> Option<(&str, NaiveTime)> {
        match (&self.time_column, self.cutoff) {
            (Some(column), Some(Cutoff::TimeOfDay(time))) => Some((column.as_str(), time)),
            _ => None,
        }
    }
}
