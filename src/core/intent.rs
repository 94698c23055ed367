//! Natural-language task intake.
//!
//! Parses strings like "позвонить маме завтра 15:00 #семья важно" into
//! structured task data: clean title, deadline, priority, tags.

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Timelike, Weekday,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Priority levels for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority ("низкий приоритет").
    Low,
    /// Normal priority (the default when nothing is recognized).
    #[default]
    Normal,
    /// High priority ("важно", "срочно", "!").
    High,
}

impl Priority {
    /// Sort weight for focus ordering (higher sorts earlier).
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Normal => 2,
            Self::Low => 1,
        }
    }

    /// Integer representation used by the database.
    #[must_use]
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
        }
    }

    /// Convert from the database representation. Unknown values fall back
    /// to `Normal`.
    #[must_use]
    pub const fn from_int(value: i32) -> Self {
        match value {
            0 => Self::Low,
            2 => Self::High,
            _ => Self::Normal,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        })
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "l" => Ok(Self::Low),
            "normal" | "n" => Ok(Self::Normal),
            "high" | "h" => Ok(Self::High),
            other => Err(format!(
                "unknown priority '{other}' (expected low, normal, or high)"
            )),
        }
    }
}

/// Result of parsing a natural language task string.
///
/// `deadline` is an absolute timestamp in milliseconds since the epoch.
/// `tags` is `None` (not empty) when no `#tag` tokens were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// Input text with all recognized fragments removed and whitespace
    /// collapsed. May be empty; callers decide what to do about that.
    pub clean_title: String,
    /// Deadline in ms since the epoch, if a temporal expression matched.
    pub deadline: Option<i64>,
    /// Priority, if a priority marker matched.
    pub priority: Option<Priority>,
    /// Tags in order of appearance, `#` markers stripped.
    pub tags: Option<Vec<String>>,
}

// Compiled patterns. Hour is 1-2 digits, minute exactly 2, separated by a
// colon or whitespace ("15:30" and "15 30" both match).
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})[:\s](\d{2})").unwrap_or_else(|e| panic!("invalid clock regex: {e}"))
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([а-яА-Яa-zA-Z0-9_]+)").unwrap_or_else(|e| panic!("invalid tag regex: {e}"))
});

// Unit stems are tried left to right, so "дн" wins over "день"/"дня" and a
// case-variant suffix can survive in the title. That residue is accepted.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)через\s+(\d+)\s*(дн|день|дня|часов?|час|минут|мин)")
        .unwrap_or_else(|e| panic!("invalid duration regex: {e}"))
});

struct PriorityRule {
    phrase: &'static str,
    removal: Regex,
    priority: Priority,
}

// Scanned in order; the first phrase contained in the input wins and the
// scan stops. The order is part of the contract: "!" before "!!" means a
// double bang matches as "!", and "срочно" before "не срочно" means the
// negated phrase still reads as high.
static PRIORITY_RULES: Lazy<Vec<PriorityRule>> = Lazy::new(|| {
    [
        ("важно", Priority::High),
        ("срочно", Priority::High),
        ("высокий приоритет", Priority::High),
        ("!", Priority::High),
        ("!!", Priority::High),
        ("низкий приоритет", Priority::Low),
        ("не срочно", Priority::Low),
    ]
    .into_iter()
    .map(|(phrase, priority)| PriorityRule {
        phrase,
        removal: case_insensitive_literal(phrase),
        priority,
    })
    .collect()
});

#[derive(Debug, Clone, Copy)]
enum DayRule {
    /// The current instant.
    Now,
    /// Today at a fixed time.
    TodayAt(u32, u32),
    /// N days ahead at 09:00.
    OffsetDays(i64),
    /// 09:00 today, or tomorrow when the local hour is already >= 12.
    NextMorning,
    /// Next future occurrence of the weekday at 09:00. Always advances a
    /// full week when today already is that weekday.
    NextWeekday(Weekday),
}

struct NamedRule {
    phrase: &'static str,
    removal: Regex,
    rule: DayRule,
}

// Scanned in order, first containment match wins. "завтра" precedes
// "послезавтра", so the latter is reached via its "завтра" substring and
// resolves to tomorrow.
static NAMED_RULES: Lazy<Vec<NamedRule>> = Lazy::new(|| {
    [
        ("сейчас", DayRule::Now),
        ("сегодня", DayRule::TodayAt(18, 0)),
        ("завтра", DayRule::OffsetDays(1)),
        ("послезавтра", DayRule::OffsetDays(2)),
        ("вечером", DayRule::TodayAt(19, 0)),
        ("утром", DayRule::NextMorning),
        ("в понедельник", DayRule::NextWeekday(Weekday::Mon)),
        ("во вторник", DayRule::NextWeekday(Weekday::Tue)),
        ("в среду", DayRule::NextWeekday(Weekday::Wed)),
        ("в четверг", DayRule::NextWeekday(Weekday::Thu)),
        ("в пятницу", DayRule::NextWeekday(Weekday::Fri)),
        ("в субботу", DayRule::NextWeekday(Weekday::Sat)),
        ("в воскресенье", DayRule::NextWeekday(Weekday::Sun)),
    ]
    .into_iter()
    .map(|(phrase, rule)| NamedRule {
        phrase,
        removal: case_insensitive_literal(phrase),
        rule,
    })
    .collect()
});

fn case_insensitive_literal(phrase: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(phrase)))
        .unwrap_or_else(|e| panic!("invalid literal pattern {phrase:?}: {e}"))
}

/// Parse a natural language task string into a structured intent.
///
/// Never fails: unrecognized fragments are left in the clean title. The
/// current local time is read exactly once, at entry.
///
/// # Examples
///
/// ```
/// use focusflow::core::parse_intent;
///
/// let intent = parse_intent("Buy milk #home #errands");
/// assert_eq!(intent.clean_title, "Buy milk");
/// assert_eq!(intent.tags.as_deref(), Some(&["home".to_string(), "errands".to_string()][..]));
/// assert!(intent.deadline.is_none());
/// ```
#[must_use]
pub fn parse_intent(input: &str) -> ParsedIntent {
    parse_intent_at(input, Local::now())
}

/// Parse with an explicit "now", for deterministic date math.
///
/// Stages run in a fixed order and each deletes its matched text before the
/// next runs: clock time, tags, priority, relative duration, named day
/// keyword, bare clock time, whitespace cleanup.
#[must_use]
pub fn parse_intent_at(input: &str, now: DateTime<Local>) -> ParsedIntent {
    let mut text = input.trim().to_string();

    let clock = extract_clock(&mut text);
    let tags = extract_tags(&mut text);
    let priority = extract_priority(&mut text);

    let mut deadline = extract_duration(&mut text, now, clock);
    if deadline.is_none() {
        deadline = extract_named_day(&mut text, now, clock);
    }
    if deadline.is_none() {
        if let Some((hour, minute)) = clock {
            deadline = upcoming_clock(now, hour, minute);
        }
    }

    ParsedIntent {
        clean_title: collapse_whitespace(&text),
        deadline,
        priority,
        tags,
    }
}

/// Extract an explicit `H:MM` / `H MM` pair. Pairs outside 0-23/0-59 are
/// discarded and the text is left untouched.
fn extract_clock(text: &mut String) -> Option<(u32, u32)> {
    let caps = CLOCK_RE.captures(text)?;
    let full = caps.get(0)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;

    if hour > 23 || minute > 59 {
        return None;
    }

    let range = full.range();
    text.replace_range(range, "");
    Some((hour, minute))
}

/// Extract every `#tag` token, in order, multiplicity preserved.
fn extract_tags(text: &mut String) -> Option<Vec<String>> {
    let tags: Vec<String> = TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    if tags.is_empty() {
        return None;
    }

    *text = TAG_RE.replace_all(text, "").into_owned();
    Some(tags)
}

/// Find the first priority phrase contained in the text. All occurrences of
/// that one phrase are removed; the remaining table entries are not tried.
fn extract_priority(text: &mut String) -> Option<Priority> {
    let lowered = text.to_lowercase();
    let rule = PRIORITY_RULES
        .iter()
        .find(|rule| lowered.contains(rule.phrase))?;

    *text = rule.removal.replace_all(text, "").into_owned();
    Some(rule.priority)
}

/// Extract a "через N <unit>" phrase and compute the deadline relative to
/// `now`. Days honor the captured clock time (default 09:00), hours honor
/// captured minutes (default :00), minutes ignore the clock entirely.
fn extract_duration(
    text: &mut String,
    now: DateTime<Local>,
    clock: Option<(u32, u32)>,
) -> Option<i64> {
    let caps = DURATION_RE.captures(text)?;
    let full = caps.get(0)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_lowercase();

    let deadline = if unit.starts_with("дн") || unit.starts_with("день") {
        let date = now
            .date_naive()
            .checked_add_signed(Duration::try_days(amount)?)?;
        let (hour, minute) = clock.unwrap_or((9, 0));
        local_timestamp_ms(date.and_hms_opt(hour, minute, 0)?)?
    } else if unit.starts_with("час") {
        let shifted = now.checked_add_signed(Duration::try_hours(amount)?)?;
        let minute = clock.map_or(0, |(_, m)| m);
        let naive = shifted.naive_local();
        local_timestamp_ms(naive.date().and_hms_opt(naive.hour(), minute, 0)?)?
    } else {
        now.checked_add_signed(Duration::try_minutes(amount)?)?
            .timestamp_millis()
    };

    let range = full.range();
    text.replace_range(range, "");
    Some(deadline)
}

/// Find the first named day keyword contained in the text and compute its
/// date. A captured clock time overrides the keyword's default time.
fn extract_named_day(
    text: &mut String,
    now: DateTime<Local>,
    clock: Option<(u32, u32)>,
) -> Option<i64> {
    let lowered = text.to_lowercase();
    let rule = NAMED_RULES
        .iter()
        .find(|rule| lowered.contains(rule.phrase))?;

    let base = now.naive_local();
    let target = match rule.rule {
        DayRule::Now => base,
        DayRule::TodayAt(hour, minute) => at_clock(base, hour, minute),
        DayRule::OffsetDays(days) => at_clock(base + Duration::days(days), 9, 0),
        DayRule::NextMorning => {
            let day = if base.hour() >= 12 {
                base + Duration::days(1)
            } else {
                base
            };
            at_clock(day, 9, 0)
        }
        DayRule::NextWeekday(weekday) => at_clock(next_weekday(base, weekday), 9, 0),
    };
    let target = match clock {
        Some((hour, minute)) => at_clock(target, hour, minute),
        None => target,
    };

    *text = rule.removal.replace_all(text, "").into_owned();
    local_timestamp_ms(target)
}

/// Today at the captured clock time, rolled to tomorrow when that instant
/// has already passed relative to `now`.
fn upcoming_clock(now: DateTime<Local>, hour: u32, minute: u32) -> Option<i64> {
    let today = at_clock(now.naive_local(), hour, minute);
    let ts = local_timestamp_ms(today)?;

    if ts < now.timestamp_millis() {
        local_timestamp_ms(today + Duration::days(1))
    } else {
        Some(ts)
    }
}

fn at_clock(ndt: NaiveDateTime, hour: u32, minute: u32) -> NaiveDateTime {
    ndt.date().and_hms_opt(hour, minute, 0).unwrap_or(ndt)
}

fn next_weekday(base: NaiveDateTime, target: Weekday) -> NaiveDateTime {
    let current = i64::from(base.weekday().num_days_from_sunday());
    let wanted = i64::from(target.num_days_from_sunday());

    let mut days_until = wanted - current;
    if days_until <= 0 {
        days_until += 7;
    }

    base + Duration::days(days_until)
}

fn local_timestamp_ms(naive: NaiveDateTime) -> Option<i64> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp_millis()),
        // DST gap: the wall-clock time does not exist, shift forward an hour.
        LocalResult::None => naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| Local.from_local_datetime(&shifted).earliest())
            .map(|dt| dt.timestamp_millis()),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
