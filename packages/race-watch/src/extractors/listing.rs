//! HTML parsing for the race calendar index page.
//!
//! Every race is a `div.index_listing__inner` block holding one child div per
//! field. Field text is taken as the visible text of the child, trimmed.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::types::race::{RaceId, RaceRecord};

static LISTING: LazyLock<Selector> = LazyLock::new(|| selector("div.index_listing__inner"));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector(".index_listing__date"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector(".index_listing__time"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".index_listing__title"));
static STATUS: LazyLock<Selector> = LazyLock::new(|| selector(".index_listing__status"));
static LOCATION: LazyLock<Selector> = LazyLock::new(|| selector(".index_listing__location"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css}: {e}"))
}

/// Result of parsing one calendar page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCalendar {
    /// Races in page order, one per distinct title.
    pub races: Vec<RaceRecord>,
    /// Listing blocks dropped because a field was missing.
    pub skipped: usize,
    /// Listing blocks dropped because an earlier block had the same title.
    pub duplicates: usize,
}

/// Parse the calendar HTML into race records.
///
/// A block missing any of the five fields is skipped with a warning; the
/// rest of the page is still used. When two blocks share a title the first
/// one is kept. A page without listing blocks yields an empty calendar.
pub fn parse_calendar(html: &str) -> ParsedCalendar {
    let document = Html::parse_document(html);
    let mut parsed = ParsedCalendar::default();
    let mut seen: HashSet<RaceId> = HashSet::new();

    for (index, block) in document.select(&LISTING).enumerate() {
        let race = match parse_listing(&block) {
            Ok(race) => race,
            Err(field) => {
                warn!(block = index, field, "Listing block missing field, skipping");
                parsed.skipped += 1;
                continue;
            }
        };

        if !seen.insert(race.race_id.clone()) {
            warn!(block = index, title = %race.title, "Duplicate race title, keeping first");
            parsed.duplicates += 1;
            continue;
        }

        parsed.races.push(race);
    }

    debug!(
        races = parsed.races.len(),
        skipped = parsed.skipped,
        duplicates = parsed.duplicates,
        "Parsed calendar page"
    );
    parsed
}

/// Read one listing block. On failure returns the name of the missing field.
fn parse_listing(block: &ElementRef<'_>) -> Result<RaceRecord, &'static str> {
    let date = field_text(block, &DATE).ok_or("date")?;
    let time = field_text(block, &TIME).ok_or("time")?;
    let title = field_text(block, &TITLE).ok_or("title")?;
    let status = field_text(block, &STATUS).ok_or("status")?;
    let location = field_text(block, &LOCATION).ok_or("location")?;

    Ok(RaceRecord::new(title, date, time, location, status))
}

fn field_text(block: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(date: &str, time: &str, title: &str, status: &str, location: &str) -> String {
        format!(
            r#"<div class="index_listing__inner">
                 <div class="index_listing__date">{date}</div>
                 <div class="index_listing__time">{time}</div>
                 <div class="index_listing__title"><a href="/race">{title}</a></div>
                 <div class="index_listing__status">{status}</div>
                 <div class="index_listing__location">{location}</div>
               </div>"#
        )
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body><main>{}</main></body></html>", blocks.join("\n"))
    }

    #[test]
    fn parses_fields_in_page_order() {
        let html = page(&[
            listing("Jan 6", "8:00 am", "Joe Kleinerman 10K", "Sold Out", "Central Park"),
            listing("Feb 3", "7:30 am", "Manhattan 10K", "Registration Open", "Central Park"),
        ]);

        let parsed = parse_calendar(&html);

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.races.len(), 2);
        let first = &parsed.races[0];
        assert_eq!(first.title, "Joe Kleinerman 10K");
        assert_eq!(first.date, "Jan 6");
        assert_eq!(first.time, "8:00 am");
        assert_eq!(first.status, "Sold Out");
        assert_eq!(first.location, "Central Park");
        assert_eq!(first.race_id, RaceId::from_title("Joe Kleinerman 10K"));
        assert_eq!(parsed.races[1].title, "Manhattan 10K");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let html = page(&[listing("  Jan 6\n ", "\t8am ", "\n 5K \n", " Open ", " Park ")]);
        let race = &parse_calendar(&html).races[0];
        assert_eq!(race.date, "Jan 6");
        assert_eq!(race.time, "8am");
        assert_eq!(race.title, "5K");
        assert_eq!(race.status, "Open");
        assert_eq!(race.location, "Park");
    }

    #[test]
    fn block_missing_a_field_is_skipped() {
        let broken = r#"<div class="index_listing__inner">
                          <div class="index_listing__date">Jan 6</div>
                          <div class="index_listing__title">Broken Race</div>
                        </div>"#
            .to_string();
        let html = page(&[broken, listing("Feb 3", "8am", "5K", "Open", "Park")]);

        let parsed = parse_calendar(&html);

        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.races.len(), 1);
        assert_eq!(parsed.races[0].title, "5K");
    }

    #[test]
    fn empty_field_is_kept_as_empty_string() {
        let html = page(&[listing("Jan 6", "", "5K", "Open", "Park")]);
        let parsed = parse_calendar(&html);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.races[0].time, "");
    }

    #[test]
    fn duplicate_titles_keep_first_block() {
        let html = page(&[
            listing("Jan 6", "8am", "5K", "Open", "Park"),
            listing("Jan 7", "9am", "5K", "Closed", "Pier"),
        ]);

        let parsed = parse_calendar(&html);

        assert_eq!(parsed.duplicates, 1);
        assert_eq!(parsed.races.len(), 1);
        assert_eq!(parsed.races[0].date, "Jan 6");
    }

    #[test]
    fn page_without_listings_is_empty() {
        let parsed = parse_calendar("<html><body><p>No races</p></body></html>");
        assert_eq!(parsed, ParsedCalendar::default());
    }
}
