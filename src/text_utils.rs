use std::ops::Index;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the publish date of a post. Only the day matters, so a trailing
/// time part (`2022-04-02 12:05:00.000` or `2022-04-02T12:05:00`) is accepted
/// and dropped.
pub fn parse_publish_date(buf: &str) -> Result<NaiveDate, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T]\d{1,2}:\d{1,2}(?::\d{1,2}(?:\.\d{0,9})?)?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    let y: i32 = to_int(caps.index(1), buf)?;
    let m: u32 = to_int(caps.index(2), buf)?;
    let d: u32 = to_int(caps.index(3), buf)?;

    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => Ok(date),
        None => Err(format!("Date out of range {}", buf)),
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Tags come as a comma and/or space separated list.
pub fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
