/// The Telisaran calendar: a view of the days around "today".
///
/// ```text
/// Syfdag kindle fate's first light
/// Mimdag have a secret might
/// Wodag have the strength to fight
/// Thordag curse the wrong, avenge the right
/// Freydag love fair beauty's sight
/// ```
use super::datetime::DateTime;
use super::error::ReckoningError;
use super::units::{DateUnit, Day, Span};

/// Shown in place of yesterday on the first day of time.
pub const YESTERDAY_BEFORE_TIME: &str = "Mortals cannot go back before the beginning of time.";

/// Width the season header is centred in: five two-digit columns.
const GRID_WIDTH: usize = 14;

#[derive(Debug, Clone)]
pub struct Calendar {
    today: DateTime,
}

impl Calendar {
    pub fn new(today: DateTime) -> Self {
        Self { today }
    }

    pub fn today(&self) -> &DateTime {
        &self.today
    }

    /// The day before today. Fails on the first day of time.
    pub fn yesterday(&self) -> Result<DateTime, ReckoningError> {
        self.today.checked_sub(Day::LENGTH_IN_SECONDS)
    }

    pub fn tomorrow(&self) -> Result<DateTime, ReckoningError> {
        self.today.checked_add(Day::LENGTH_IN_SECONDS)
    }

    /// Yesterday's short form, or the fallback message at the start of time.
    pub fn describe_yesterday(&self) -> String {
        match self.yesterday() {
            Ok(yesterday) => yesterday.short(),
            Err(_) => YESTERDAY_BEFORE_TIME.to_string(),
        }
    }

    /// The season containing today, one span per row.
    ///
    /// ```text
    ///      BEAR
    /// Sy Mi Wo Th Fr
    /// 01 02 03 04 05
    /// 06 07 08 09 10
    /// ...
    /// ```
    pub fn season_grid(&self) -> String {
        let season = self.today.season();
        let days = season.days();

        let mut lines = vec![format!(
            "{:^width$}",
            season.name().to_uppercase(),
            width = GRID_WIDTH
        )];
        lines.push(
            days.iter()
                .take(Span::LENGTH_IN_DAYS as usize)
                .map(|day| day.name().chars().take(2).collect::<String>())
                .collect::<Vec<_>>()
                .join(" "),
        );
        for span in days.chunks(Span::LENGTH_IN_DAYS as usize) {
            lines.push(
                span.iter()
                    .map(|day| format!("{:02}", day.number()))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        lines.join("\n")
    }
}
