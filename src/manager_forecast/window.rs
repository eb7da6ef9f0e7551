use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

const LAST_SECOND_OF_DAY: i64 = 86_399;

/// Where the calendar day boundaries of a page are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimezoneSource {
    /// The UTC offset of the forecast city
    #[default]
    City,
    /// A fixed UTC offset in seconds east of UTC
    Fixed(i32),
    /// Local midnight of the evaluating machine, shifted once more by the machine's
    /// UTC offset. Kept for compatibility with the dashboard's windowing.
    LegacyLocal,
}

/// Timestamp range of one calendar day, both ends inclusive (unix, UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ts_utc: i64,
    pub end_ts_utc: i64,
}

impl DayWindow {
    /// Returns the window for the given page according to the timezone source
    ///
    /// # Arguments
    ///
    /// * 'page' - 1 based page number, 1 is today, 2 tomorrow etc.
    /// * 'now' - the point in time that defines today
    /// * 'source' - where to take day boundaries from
    /// * 'city_offset' - UTC offset in seconds of the forecast city
    pub fn resolve(page: u32, now: DateTime<Utc>, source: TimezoneSource, city_offset: i64) -> Option<DayWindow> {
        match source {
            TimezoneSource::City => {
                let offset = FixedOffset::east_opt(i32::try_from(city_offset).ok()?)?;
                DayWindow::for_page(page, now, offset)
            },
            TimezoneSource::Fixed(secs) => DayWindow::for_page(page, now, FixedOffset::east_opt(secs)?),
            TimezoneSource::LegacyLocal => DayWindow::legacy(page, now, &Local),
        }
    }

    /// Returns the window from midnight to midnight of the page's day in the given offset
    ///
    /// # Arguments
    ///
    /// * 'page' - 1 based page number
    /// * 'now' - the point in time that defines today
    /// * 'offset' - the UTC offset the calendar day is observed in
    pub fn for_page(page: u32, now: DateTime<Utc>, offset: FixedOffset) -> Option<DayWindow> {
        let day = page_date(page, now.with_timezone(&offset).date_naive())?;
        let start = start_of_day(day)?.and_utc().timestamp() - offset.local_minus_utc() as i64;

        Some(DayWindow { start_ts_utc: start, end_ts_utc: start + LAST_SECOND_OF_DAY })
    }

    /// Returns the window the way the dashboard computed it: start and end of the day in the
    /// timezone `tz` as unix time, then shifted by the current offset of `tz` once more.
    ///
    /// # Arguments
    ///
    /// * 'page' - 1 based page number
    /// * 'now' - the point in time that defines today
    /// * 'tz' - timezone of the evaluating machine
    pub fn legacy<Tz: TimeZone>(page: u32, now: DateTime<Utc>, tz: &Tz) -> Option<DayWindow> {
        let local_now = now.with_timezone(tz);
        let day = page_date(page, local_now.date_naive())?;

        let start = start_of_day(day)?.and_local_timezone(tz.clone()).earliest()?.timestamp();
        let end = day.and_hms_opt(23, 59, 59)?.and_local_timezone(tz.clone()).latest()?.timestamp();

        // offset behind UTC in seconds, as a browser reports it
        let tz_offset = -(local_now.offset().fix().local_minus_utc() as i64);

        Some(DayWindow { start_ts_utc: start + tz_offset, end_ts_utc: end + tz_offset })
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start_ts_utc && ts <= self.end_ts_utc
    }
}

fn page_date(page: u32, today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_signed(TimeDelta::days(page as i64 - 1))
}

fn start_of_day(day: NaiveDate) -> Option<NaiveDateTime> {
    day.and_hms_opt(0, 0, 0)
}
