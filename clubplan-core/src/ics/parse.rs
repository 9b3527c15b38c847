//! ICS parsing using the icalendar crate's parser.

use crate::event::{CalendarEvent, EventStatus};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

/// Options for one parse run.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Team assigned to events whose summary does not encode one
    pub default_team: Option<String>,
}

/// Parse ICS content into a sequence of match events, in file order.
///
/// Every VEVENT block is parsed independently, so one malformed block never
/// poisons the rest of the file. Blocks without a parseable start date are
/// skipped. Content without any event blocks yields an empty vec; whether
/// zero events is a user-facing failure is the caller's decision.
pub fn parse_events(content: &str, options: &ParseOptions) -> Vec<CalendarEvent> {
    let unfolded = unfold(content);
    event_blocks(&unfolded)
        .iter()
        .filter_map(|block| parse_block(block, options))
        .collect()
}

/// Split unfolded ICS text into its `BEGIN:VEVENT`..`END:VEVENT` blocks.
/// Stray `END:VEVENT` lines and unterminated blocks are dropped.
fn event_blocks(unfolded: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in unfolded.lines() {
        let trimmed = line.trim_end_matches('\r');
        match trimmed.trim() {
            "BEGIN:VEVENT" => current = Some(vec![trimmed]),
            "END:VEVENT" => {
                if let Some(mut lines) = current.take() {
                    lines.push(trimmed);
                    blocks.push(lines.join("\n"));
                }
            }
            _ => {
                if let Some(lines) = current.as_mut() {
                    lines.push(trimmed);
                }
            }
        }
    }

    blocks
}

/// Parse a single VEVENT block. Returns `None` for anything the block is
/// missing or garbling; the caller just moves on to the next block.
fn parse_block(block: &str, options: &ParseOptions) -> Option<CalendarEvent> {
    let wrapped = format!("BEGIN:VCALENDAR\nVERSION:2.0\n{block}\nEND:VCALENDAR\n");
    let calendar = read_calendar(&wrapped).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    // Mandatory: a start date. All-day events carry no clock time.
    let (date, time) = match DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()? {
        DatePerhapsTime::Date(d) => (d, None),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Utc(dt) => (dt.date_naive(), Some(dt.format("%H:%M").to_string())),
            CalendarDateTime::Floating(naive) => {
                (naive.date(), Some(naive.format("%H:%M").to_string()))
            }
            // Wall-clock time is what a schedule shows
            CalendarDateTime::WithTimezone { date_time, .. } => {
                (date_time.date(), Some(date_time.format("%H:%M").to_string()))
            }
        },
    };

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let (team, opponent) = split_summary(&summary);
    let team = team.or_else(|| options.default_team.clone());

    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());
    let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());

    let ics_uid = vevent
        .find_prop("UID")
        .map(|p| p.val.as_ref().trim().to_string())
        .filter(|uid| !uid.is_empty());

    let status = vevent
        .find_prop("STATUS")
        .map(|p| match p.val.as_ref() {
            "CANCELLED" => EventStatus::Canceled,
            _ => EventStatus::Scheduled,
        })
        .unwrap_or(EventStatus::Scheduled);

    Some(CalendarEvent {
        team,
        opponent,
        date,
        time,
        location,
        description,
        status,
        ics_uid,
    })
}

/// Derive team and opponent from an event summary.
///
/// League exports title fixtures as `"Herren I vs TTC Musterstadt"`; split on
/// the first `vs`/`vs.` separator. Anything else is treated as the opponent
/// alone and the team comes from `ParseOptions::default_team` (or stays
/// unknown).
fn split_summary(summary: &str) -> (Option<String>, String) {
    // ASCII lowercasing keeps byte offsets valid for slicing the original
    let lower = summary.to_ascii_lowercase();
    for sep in [" vs. ", " vs "] {
        if let Some(idx) = lower.find(sep) {
            let team = summary[..idx].trim();
            let opponent = summary[idx + sep.len()..].trim();
            if !team.is_empty() && !opponent.is_empty() {
                return (Some(team.to_string()), opponent.to_string());
            }
        }
    }
    (None, summary.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TWO_EVENTS: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Herren I vs TTC Musterstadt\r\n\
DTSTART;VALUE=DATE:20241130\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:evt-42\r\n\
SUMMARY:Damen I vs SV Beispiel\r\n\
DTSTART:20241201T140000\r\n\
LOCATION:Sporthalle Nord\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_two_fixtures() {
        let events = parse_events(TWO_EVENTS, &ParseOptions::default());
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].team.as_deref(), Some("Herren I"));
        assert_eq!(events[0].opponent, "TTC Musterstadt");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
        assert_eq!(events[0].time, None, "all-day event has no clock time");
        assert_eq!(events[0].ics_uid, None);

        assert_eq!(events[1].team.as_deref(), Some("Damen I"));
        assert_eq!(events[1].opponent, "SV Beispiel");
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(events[1].time.as_deref(), Some("14:00"));
        assert_eq!(events[1].location.as_deref(), Some("Sporthalle Nord"));
        assert_eq!(events[1].ics_uid.as_deref(), Some("evt-42"));
    }

    #[test]
    fn test_summary_without_separator_uses_default_team() {
        let ics = "BEGIN:VEVENT\n\
SUMMARY:TTC Musterstadt\n\
DTSTART;VALUE=DATE:20241130\n\
END:VEVENT\n";

        let no_default = parse_events(ics, &ParseOptions::default());
        assert_eq!(no_default[0].team, None);
        assert_eq!(no_default[0].opponent, "TTC Musterstadt");

        let options = ParseOptions {
            default_team: Some("Jugend U18".to_string()),
        };
        let with_default = parse_events(ics, &options);
        assert_eq!(with_default[0].team.as_deref(), Some("Jugend U18"));
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        // Middle event has no DTSTART at all; the others must survive.
        let ics = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:Herren I vs TTC A\n\
DTSTART;VALUE=DATE:20241130\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
SUMMARY:broken\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
SUMMARY:Herren I vs TTC B\n\
DTSTART;VALUE=DATE:20241207\n\
END:VEVENT\n\
END:VCALENDAR\n";

        let events = parse_events(ics, &ParseOptions::default());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].opponent, "TTC A");
        assert_eq!(events[1].opponent, "TTC B");
    }

    #[test]
    fn test_unterminated_block_is_dropped() {
        let ics = "BEGIN:VEVENT\n\
SUMMARY:Herren I vs TTC A\n\
DTSTART;VALUE=DATE:20241130\n";
        assert!(parse_events(ics, &ParseOptions::default()).is_empty());
    }

    #[test]
    fn test_no_events_is_empty_not_an_error() {
        assert!(parse_events("", &ParseOptions::default()).is_empty());
        assert!(
            parse_events(
                "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n",
                &ParseOptions::default()
            )
            .is_empty()
        );
        assert!(parse_events("this is not a calendar", &ParseOptions::default()).is_empty());
    }

    #[test]
    fn test_folded_summary_is_unfolded_before_extraction() {
        let ics = "BEGIN:VEVENT\r\n\
UID:fold-1\r\n\
SUMMARY:Herren II vs \r\n TTC Langenaltheim\r\n\
DTSTART;VALUE=DATE:20250118\r\n\
END:VEVENT\r\n";

        let events = parse_events(ics, &ParseOptions::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].team.as_deref(), Some("Herren II"));
        assert_eq!(events[0].opponent, "TTC Langenaltheim");
    }

    #[test]
    fn test_cancelled_status() {
        let ics = "BEGIN:VEVENT\n\
SUMMARY:Herren I vs TTC A\n\
DTSTART;VALUE=DATE:20241130\n\
STATUS:CANCELLED\n\
END:VEVENT\n";

        let events = parse_events(ics, &ParseOptions::default());
        assert_eq!(events[0].status, EventStatus::Canceled);
    }

    #[test]
    fn test_vs_dot_separator() {
        let ics = "BEGIN:VEVENT\n\
SUMMARY:Damen I vs. SV Beispiel\n\
DTSTART;VALUE=DATE:20241201\n\
END:VEVENT\n";

        let events = parse_events(ics, &ParseOptions::default());
        assert_eq!(events[0].team.as_deref(), Some("Damen I"));
        assert_eq!(events[0].opponent, "SV Beispiel");
    }
}
