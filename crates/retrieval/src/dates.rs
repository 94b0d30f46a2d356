//! Stale-date detection for retrieved passages.
//!
//! A line is stale when the first date it mentions is before `today`. Only
//! the first date counts, so "Starts 2025-09-08, ends 2026-06-23" is judged
//! by its start.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;

static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("iso date pattern is valid"));

static US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("us date pattern is valid"));

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|\
    jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec|\
    enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|setiembre|octubre|noviembre|diciembre";

static MONTH_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTHS})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"))
        .expect("month-first date pattern is valid")
});

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})\s+(?:de\s+)?({MONTHS})\.?,?\s+(?:de\s+)?(\d{{4}})\b"))
        .expect("day-first date pattern is valid")
});

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" | "enero" => 1,
        "february" | "feb" | "febrero" => 2,
        "march" | "mar" | "marzo" => 3,
        "april" | "apr" | "abril" => 4,
        "may" | "mayo" => 5,
        "june" | "jun" | "junio" => 6,
        "july" | "jul" | "julio" => 7,
        "august" | "aug" | "agosto" => 8,
        "september" | "sep" | "sept" | "septiembre" | "setiembre" => 9,
        "october" | "oct" | "octubre" => 10,
        "november" | "nov" | "noviembre" => 11,
        "december" | "dec" | "diciembre" => 12,
        _ => return None,
    };
    Some(month)
}

fn num(s: &str) -> Option<u32> {
    s.parse().ok()
}

fn ymd(y: &str, m: u32, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y.parse().ok()?, m, num(d)?)
}

/// Every valid date in `line` with its byte offset.
fn dates_in(line: &str) -> Vec<(usize, NaiveDate)> {
    let mut found = Vec::new();

    for caps in ISO.captures_iter(line) {
        if let Some(date) = num(&caps[2]).and_then(|m| ymd(&caps[1], m, &caps[3])) {
            found.push((caps.get(0).map_or(0, |m| m.start()), date));
        }
    }
    for caps in US.captures_iter(line) {
        if let Some(date) = num(&caps[1]).and_then(|m| ymd(&caps[3], m, &caps[2])) {
            found.push((caps.get(0).map_or(0, |m| m.start()), date));
        }
    }
    for caps in MONTH_FIRST.captures_iter(line) {
        if let Some(date) = month_number(&caps[1]).and_then(|m| ymd(&caps[3], m, &caps[2])) {
            found.push((caps.get(0).map_or(0, |m| m.start()), date));
        }
    }
    for caps in DAY_FIRST.captures_iter(line) {
        if let Some(date) = month_number(&caps[2]).and_then(|m| ymd(&caps[3], m, &caps[1])) {
            found.push((caps.get(0).map_or(0, |m| m.start()), date));
        }
    }
    found
}

/// The earliest-positioned recognizable date in `line`.
pub fn first_date(line: &str) -> Option<NaiveDate> {
    dates_in(line)
        .into_iter()
        .min_by_key(|(offset, _)| *offset)
        .map(|(_, date)| date)
}

pub fn is_stale(line: &str, today: NaiveDate) -> bool {
    first_date(line).is_some_and(|date| date < today)
}

/// Drop stale lines, returning the kept text and the number removed.
pub fn strip_stale_lines(text: &str, today: NaiveDate) -> (String, usize) {
    let mut removed = 0;
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let stale = is_stale(line, today);
            removed += usize::from(stale);
            !stale
        })
        .collect();
    (kept.join("\n"), removed)
}
