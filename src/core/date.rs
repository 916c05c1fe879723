use crate::domain::model::PointInTime;
use crate::utils::error::{AdminError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("separator pattern is valid"));

const FIELD_NAMES: [&str; 7] = [
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "millisecond",
];

/// 把 `2021-05-10T13:45:30.500Z` 這類字串解析成 UTC 時間點。
///
/// 任何連續的非數字字元都視為分隔符，依序取出年、月(1 起算)、日、時、分、秒、毫秒。
/// 時區標記會被當成分隔符丟掉，結果一律是 UTC。
pub fn parse_point_in_time(input: &str) -> Result<PointInTime> {
    let tokens: Vec<&str> = SEPARATOR
        .split(input)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() < FIELD_NAMES.len() {
        return Err(malformed(
            input,
            format!(
                "expected {} numeric fields, found {}",
                FIELD_NAMES.len(),
                tokens.len()
            ),
        ));
    }

    let mut fields = [0u32; 7];
    for (slot, (token, name)) in fields.iter_mut().zip(tokens.iter().zip(FIELD_NAMES)) {
        *slot = token
            .parse::<u32>()
            .map_err(|e| malformed(input, format!("{} '{}' is not a number: {}", name, token, e)))?;
    }
    let [year, month, day, hour, minute, second, millisecond] = fields;

    // 月份在外部是 1 起算，chrono 的 month0 是 0 起算
    let month0 = month
        .checked_sub(1)
        .ok_or_else(|| malformed(input, "month must be between 1 and 12".to_string()))?;

    let year = i32::try_from(year)
        .map_err(|_| malformed(input, format!("year {} is out of range", year)))?;

    if millisecond >= 1000 {
        return Err(malformed(
            input,
            format!("millisecond {} must be below 1000", millisecond),
        ));
    }

    let date = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|first| first.with_month0(month0))
        .and_then(|first| first.with_day(day))
        .ok_or_else(|| {
            malformed(
                input,
                format!("{}-{}-{} is not a calendar date", year, month, day),
            )
        })?;
    let naive = date
        .and_hms_milli_opt(hour, minute, second, millisecond)
        .ok_or_else(|| {
            malformed(
                input,
                format!("{}:{}:{} is not a valid time of day", hour, minute, second),
            )
        })?;

    Ok(PointInTime::from_datetime(Utc.from_utc_datetime(&naive)))
}

fn malformed(input: &str, reason: String) -> AdminError {
    AdminError::MalformedDateInput {
        input: input.to_string(),
        reason,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// `Monday May, 10, 2021 at 1:45PM`
    Full,
    /// `Mon 05, 10, 2021 1:45PM`
    #[default]
    Medium,
}

impl DisplayFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

impl FromStr for DisplayFormat {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(DisplayFormat::Full),
            "medium" => Ok(DisplayFormat::Medium),
            other => Err(AdminError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Expected 'full' or 'medium'".to_string(),
            }),
        }
    }
}

impl PointInTime {
    pub fn format(&self, format: DisplayFormat) -> String {
        self.as_datetime().format(format.pattern()).to_string()
    }
}

/// 後端存放演出時間的格式，沒有毫秒
const STORED_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 解析並格式化，給樣板顯示日期用。
/// 七欄位解析失敗時，再試一次後端的 `%Y-%m-%d %H:%M:%S` 格式。
pub fn format_date_string(input: &str, format: DisplayFormat) -> Result<String> {
    let point = match parse_point_in_time(input) {
        Ok(point) => point,
        Err(err) => {
            let naive = NaiveDateTime::parse_from_str(input.trim(), STORED_DATETIME_FORMAT)
                .map_err(|_| err)?;
            PointInTime::from_datetime(Utc.from_utc_datetime(&naive))
        }
    };
    tracing::debug!("Parsed '{}' as {}", input, point);
    Ok(point.format(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_string() {
        let point = parse_point_in_time("2021-05-10T13:45:30.500Z").unwrap();
        assert_eq!(point.year(), 2021);
        assert_eq!(point.month0(), 4);
        assert_eq!(point.day(), 10);
        assert_eq!(point.hour(), 13);
        assert_eq!(point.minute(), 45);
        assert_eq!(point.second(), 30);
        assert_eq!(point.millisecond(), 500);
    }

    #[test]
    fn test_separator_invariance() {
        let dashed = parse_point_in_time("2021-05-10T13:45:30.500Z").unwrap();
        let spaced = parse_point_in_time("2021/05/10 13:45:30 500").unwrap();
        assert_eq!(dashed, spaced);
    }

    #[test]
    fn test_too_few_fields_is_error() {
        let err = parse_point_in_time("2021-05-10T13:45:30Z").unwrap_err();
        assert!(matches!(err, AdminError::MalformedDateInput { .. }));
        assert!(parse_point_in_time("").is_err());
        assert!(parse_point_in_time("not a date").is_err());
    }

    #[test]
    fn test_out_of_range_fields_are_errors() {
        assert!(parse_point_in_time("2021-00-10 13:45:30.500").is_err());
        assert!(parse_point_in_time("2021-13-10 13:45:30.500").is_err());
        assert!(parse_point_in_time("2021-04-31 13:45:30.500").is_err());
        assert!(parse_point_in_time("2021-05-10 24:00:00.000").is_err());
        assert!(parse_point_in_time("2021-05-10 13:60:00.000").is_err());
        assert!(parse_point_in_time("2021-05-10 13:45:30.1000").is_err());
        assert!(parse_point_in_time("99999999999-05-10 13:45:30.500").is_err());
    }

    #[test]
    fn test_leading_separator_and_extra_fields() {
        let point = parse_point_in_time("  2020-02-29T23:59:59.999+08:00").unwrap();
        assert_eq!(point.year(), 2020);
        assert_eq!(point.month(), 2);
        assert_eq!(point.day(), 29);
        assert_eq!(point.millisecond(), 999);
    }

    #[test]
    fn test_display_formats() {
        let point = parse_point_in_time("2021-05-10T13:45:30.500Z").unwrap();
        assert_eq!(point.format(DisplayFormat::Full), "Monday May, 10, 2021 at 1:45PM");
        assert_eq!(point.format(DisplayFormat::Medium), "Mon 05, 10, 2021 1:45PM");
        assert_eq!(
            format_date_string("2019-06-15 21:00:00 000", DisplayFormat::Medium).unwrap(),
            "Sat 06, 15, 2019 9:00PM"
        );
    }

    #[test]
    fn test_format_accepts_stored_show_time() {
        assert_eq!(
            format_date_string("2019-05-21 21:30:00", DisplayFormat::Full).unwrap(),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(
            format_date_string("2019-05-21 21:30:00", DisplayFormat::Medium).unwrap(),
            "Tue 05, 21, 2019 9:30PM"
        );
        // 解析本身仍然要求七個欄位
        assert!(parse_point_in_time("2019-05-21 21:30:00").is_err());
        let err = format_date_string("2019-05-21", DisplayFormat::Medium).unwrap_err();
        assert!(matches!(err, AdminError::MalformedDateInput { .. }));
    }

    #[test]
    fn test_display_format_from_str() {
        assert_eq!("FULL".parse::<DisplayFormat>().unwrap(), DisplayFormat::Full);
        assert!("short".parse::<DisplayFormat>().is_err());
    }
}
