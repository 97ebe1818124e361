use crate::utils::error::{Result, SyncError};
use chrono::{Datelike, NaiveDate};

/// `year`/`month` 的第一天與最後一天
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || SyncError::ProcessingError {
        message: format!("Invalid month {}/{}", month, year),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// `today` 所在月份的日期區間
pub fn current_month_range(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    month_range(today.year(), today.month())
}
