use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const WORDS_PER_MINUTE: u32 = 200;
pub const POST_URL_PREFIX: &str = "/blog";

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses a date-only (`2024-03-15`) or ISO-8601 date time
/// (`2024-03-15T10:30:00Z`, `2024-03-15 10:30:00.000`, `2024-03-15T10:30:00+02:00`).
///
/// Values carrying an offset are converted to UTC; values without one are
/// taken as UTC already. A date without time is midnight.
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_TIME_REGEX: Regex = Regex::new(
            r"^(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})(?:[Tt ](?P<h>\d{2}):(?P<mn>\d{2})(?::(?P<s>\d{2})(?:\.(?P<frac>\d{1,9}))?)?\s*(?P<tz>[Zz]|[+-]\d{2}:?\d{2})?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    let Some(caps) = DATE_TIME_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_u32 = |caps: &Captures, name: &str| -> Result<u32, String> {
        match caps.name(name) {
            Some(m) => to_int::<u32>(m.as_str(), buf),
            None => Ok(0),
        }
    };

    let y: i32 = to_int::<i32>(&caps["y"], buf)?;
    let m: u32 = to_u32(&caps, "m")?;
    let d: u32 = to_u32(&caps, "d")?;
    let h: u32 = to_u32(&caps, "h")?;
    let mn: u32 = to_u32(&caps, "mn")?;
    let s: u32 = to_u32(&caps, "s")?;
    let nano: u32 = match caps.name("frac") {
        // Right-pad so ".5" means 500ms
        Some(frac) => to_int::<u32>(&format!("{:0<9}", frac.as_str()), buf)?,
        None => 0,
    };

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Invalid calendar date {}", buf))?;
    // 24:00:00 is midnight at the end of the day
    let date_time = if (h, mn, s, nano) == (24, 0, 0, 0) {
        date.succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .ok_or_else(|| format!("Invalid calendar date {}", buf))?
    } else {
        let time = NaiveTime::from_hms_nano_opt(h, mn, s, nano)
            .ok_or_else(|| format!("Invalid time of day {}", buf))?;
        NaiveDateTime::new(date, time)
    };

    match caps.name("tz").map(|tz| tz.as_str()) {
        None | Some("Z") | Some("z") => Ok(date_time),
        Some(tz) => {
            let offset = parse_offset(tz).ok_or_else(|| format!("Invalid UTC offset {}", buf))?;
            offset.from_local_datetime(&date_time)
                .single()
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| format!("Unable to apply offset to {}", buf))
        }
    }
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let digits: String = tz[1..].chars().filter(|c| *c != ':').collect();
    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// `Mar 15, 2024`
pub fn format_date_short(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `March 15, 2024`
pub fn format_date_long(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn post_url(id: &str) -> String {
    post_url_with_prefix(POST_URL_PREFIX, id)
}

/// The id is appended as is: no escaping, no normalization.
pub fn post_url_with_prefix(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), id)
}

pub fn reading_time_minutes(text: &str) -> u32 {
    reading_time_with_rate(text, WORDS_PER_MINUTE)
}

/// Minutes needed to read `text`, rounded up and never below 1.
pub fn reading_time_with_rate(text: &str, words_per_minute: u32) -> u32 {
    let words_per_minute = match words_per_minute {
        0 => WORDS_PER_MINUTE,
        x => x,
    };

    // Empty and blank text have zero words but still take a minute
    let words = text.split_whitespace().count();
    if words == 0 {
        return 1;
    }

    let minutes = words.div_ceil(words_per_minute as usize);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Lowercases, drops everything but ASCII word characters, whitespace and
/// hyphens, then joins the remaining words with single hyphens.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
        static ref SLUG_SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
        static ref EDGE_HYPHENS: Regex = Regex::new(r"^-+|-+$").unwrap();
    }

    let lower = text.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lower.trim(), "");
    let joined = SLUG_SEPARATORS.replace_all(&stripped, "-");
    EDGE_HYPHENS.replace_all(&joined, "").into_owned()
}

/// Same as [`slugify`], but accented and non-latin letters are transliterated
/// to ASCII first instead of being dropped.
pub fn slugify_unicode(text: &str) -> String {
    slugify(&unidecode::unidecode(text))
}
