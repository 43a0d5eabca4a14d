// src/schedule/page.rs
// =============================================================================
// Everything we assume about the registration site's HTML lives here.
//
// Two page shapes:
// - Listing pages (all departments, department, course): a table whose rows
//   carry class "section1" / "section2", each row linking one level down
// - Section detail pages: the 4th <table> holds the seat summary, e.g.
//     General Seats Remaining:5  Restricted Seats Remaining*:2  Currently Registered:30
//
// If the site's markup changes, this is the only file that should need to.
// =============================================================================

use super::model::SectionAvailability;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Rows on a listing page that link to the next level down
pub const SECTION_ROW_SELECTOR: &str = ".section1, .section2";

/// Header text that marks a listing with an activity column (lecture/lab/...)
pub const ACTIVITY_HEADER: &str = "Activity";

/// Zero-based cell index of the activity column
pub const ACTIVITY_CELL_INDEX: usize = 2;

/// Activities that are followed; labs, tutorials etc. are skipped
pub const FOLLOWED_ACTIVITIES: [&str; 2] = ["Lecture", "Web-Oriented Course"];

/// Zero-based index of the seat summary table on a section detail page
pub const SUMMARY_TABLE_INDEX: usize = 3;

pub const GENERAL_SEATS_LABEL: &str = "General Seats Remaining";
pub const RESTRICTED_SEATS_LABEL: &str = "Restricted Seats Remaining";
pub const CURRENTLY_REGISTERED_LABEL: &str = "Currently Registered";

/// The restricted/registered labels sometimes carry a trailing '*'
pub const GENERAL_SEATS_PATTERN: &str = r"General Seats Remaining:\s*(\d+)";
pub const RESTRICTED_SEATS_PATTERN: &str = r"Restricted Seats Remaining\*?:\s*(\d+)";
pub const CURRENTLY_REGISTERED_PATTERN: &str = r"Currently Registered\*?:\s*(\d+)";

// Selectors and patterns are constants, so parsing them can't fail at runtime
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector is valid")
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("hard-coded pattern is valid")
}

static SECTION_ROWS: Lazy<Selector> = Lazy::new(|| selector(SECTION_ROW_SELECTOR));
static TABLE_ROWS: Lazy<Selector> = Lazy::new(|| selector("tr"));
static CELLS: Lazy<Selector> = Lazy::new(|| selector("td"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| selector("a"));
static TABLES: Lazy<Selector> = Lazy::new(|| selector("table"));

static GENERAL_SEATS: Lazy<Regex> = Lazy::new(|| pattern(GENERAL_SEATS_PATTERN));
static RESTRICTED_SEATS: Lazy<Regex> = Lazy::new(|| pattern(RESTRICTED_SEATS_PATTERN));
static CURRENTLY_REGISTERED: Lazy<Regex> = Lazy::new(|| pattern(CURRENTLY_REGISTERED_PATTERN));

// Why a section detail page didn't yield seat counts
//
// These are "the page isn't shaped like we expect" failures. They mean
// "no data for this section", never "stop the run".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    #[error("page has {found} table(s), the seat summary should be table #{}", SUMMARY_TABLE_INDEX + 1)]
    MissingSummaryTable { found: usize },

    #[error("seat summary has no '{0}' field")]
    MissingField(&'static str),

    #[error("seat summary field '{0}' is not a valid count")]
    InvalidCount(&'static str),
}

// Extracts the links to follow from a listing page
//
// Parameters:
//   html: the listing page
//   base: site root that relative hrefs are resolved against
//
// Returns: absolute URLs in row order. Rows without a link are skipped, and
// when the listing has an activity column only lecture-like rows are kept.
pub fn extract_section_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let filter_activities = lists_activities(&document);

    let mut links = Vec::new();
    for row in document.select(&SECTION_ROWS) {
        if filter_activities && !is_followed_activity(row) {
            continue;
        }

        let Some(href) = row
            .select(&ANCHORS)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            continue;
        };

        match base.join(href) {
            Ok(url) => links.push(url.to_string()),
            Err(e) => debug!(href, error = %e, "skipping unresolvable link"),
        }
    }

    links
}

// The first row of the page is the header; an "Activity" column there means
// rows need filtering by activity type
fn lists_activities(document: &Html) -> bool {
    document
        .select(&TABLE_ROWS)
        .next()
        .map(|header| element_text(header).contains(ACTIVITY_HEADER))
        .unwrap_or(false)
}

fn is_followed_activity(row: ElementRef<'_>) -> bool {
    row.select(&CELLS)
        .nth(ACTIVITY_CELL_INDEX)
        .map(|cell| {
            let activity = element_text(cell);
            FOLLOWED_ACTIVITIES.contains(&activity.trim())
        })
        .unwrap_or(false)
}

// Reads the seat counts from a section detail page
//
// Example summary text (label and number in adjacent cells):
//   "General Seats Remaining:5Restricted Seats Remaining*:2Currently Registered:30"
pub fn parse_section_summary(html: &str) -> Result<SectionAvailability, SummaryError> {
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef<'_>> = document.select(&TABLES).collect();

    let summary = tables
        .get(SUMMARY_TABLE_INDEX)
        .ok_or(SummaryError::MissingSummaryTable {
            found: tables.len(),
        })?;
    let text = element_text(*summary);

    Ok(SectionAvailability {
        general_seats_remaining: read_count(&text, &GENERAL_SEATS, GENERAL_SEATS_LABEL)?,
        restricted_seats_remaining: read_count(&text, &RESTRICTED_SEATS, RESTRICTED_SEATS_LABEL)?,
        currently_registered: read_count(
            &text,
            &CURRENTLY_REGISTERED,
            CURRENTLY_REGISTERED_LABEL,
        )?,
    })
}

fn read_count(text: &str, pattern: &Regex, label: &'static str) -> Result<u32, SummaryError> {
    let captures = pattern
        .captures(text)
        .ok_or(SummaryError::MissingField(label))?;
    captures[1]
        .parse()
        .map_err(|_| SummaryError::InvalidCount(label))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Lazy statics?
//    - Selectors and regexes are compiled once on first use and shared
//    - Every page of a department traversal reuses the same compiled ones
//
// 2. Why `let ... else`?
//    - Binds the value or runs the else block, which must leave the loop or
//      function (here: `continue` / `return`)
//
// 3. Document order:
//    - ".section1, .section2" matches both classes in one pass, so rows come
//      back in the order the page lists them
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://courses.students.ubc.ca/";

    fn base() -> Url {
        Url::parse(BASE).unwrap()
    }

    fn summary_page(summary_rows: &str) -> String {
        format!(
            r#"<html><body>
            <table><tr><td>nav</td></tr></table>
            <table><tr><td>header</td></tr></table>
            <table><tr><td>CPSC 110 101</td></tr></table>
            <table>{summary_rows}</table>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_section_summary() {
        let html = summary_page(
            "<tr><td>Total Seats Remaining:</td><td><strong>7</strong></td></tr>\
             <tr><td>Currently Registered:</td><td><strong>30</strong></td></tr>\
             <tr><td>General Seats Remaining:</td><td><strong>5</strong></td></tr>\
             <tr><td>Restricted Seats Remaining*:</td><td><strong>2</strong></td></tr>",
        );
        assert_eq!(
            parse_section_summary(&html),
            Ok(SectionAvailability {
                general_seats_remaining: 5,
                restricted_seats_remaining: 2,
                currently_registered: 30,
            })
        );
    }

    #[test]
    fn test_parse_summary_with_starred_registered_label() {
        let html = summary_page(
            "<tr><td>General Seats Remaining:0</td></tr>\
             <tr><td>Restricted Seats Remaining:0</td></tr>\
             <tr><td>Currently Registered*:150</td></tr>",
        );
        let seats = parse_section_summary(&html).unwrap();
        assert_eq!(seats.general_seats_remaining, 0);
        assert_eq!(seats.currently_registered, 150);
    }

    #[test]
    fn test_missing_summary_table() {
        let html = "<table><tr><td>only</td></tr></table><table></table>";
        assert_eq!(
            parse_section_summary(html),
            Err(SummaryError::MissingSummaryTable { found: 2 })
        );
    }

    #[test]
    fn test_missing_summary_field() {
        let html = summary_page(
            "<tr><td>General Seats Remaining:5</td></tr>\
             <tr><td>Currently Registered:30</td></tr>",
        );
        assert_eq!(
            parse_section_summary(&html),
            Err(SummaryError::MissingField(RESTRICTED_SEATS_LABEL))
        );
    }

    #[test]
    fn test_summary_count_overflow_is_invalid() {
        let html = summary_page(
            "<tr><td>General Seats Remaining:99999999999</td></tr>\
             <tr><td>Restricted Seats Remaining:0</td></tr>\
             <tr><td>Currently Registered:0</td></tr>",
        );
        assert_eq!(
            parse_section_summary(&html),
            Err(SummaryError::InvalidCount(GENERAL_SEATS_LABEL))
        );
    }

    #[test]
    fn test_extract_links_without_activity_column() {
        let html = r#"<table>
            <tr><th>Course</th><th>Title</th></tr>
            <tr class="section1"><td><a href="/cs/courseschedule?pname=subjarea&amp;tname=subj-course&amp;dept=CPSC&amp;course=110">CPSC 110</a></td><td>Computation</td></tr>
            <tr class="section2"><td><a href="/cs/courseschedule?pname=subjarea&amp;tname=subj-course&amp;dept=CPSC&amp;course=121">CPSC 121</a></td><td>Logic</td></tr>
            <tr class="section1"><td>CPSC 298 (no link)</td><td>Co-op</td></tr>
        </table>"#;
        let links = extract_section_links(html, &base());
        assert_eq!(
            links,
            vec![
                "https://courses.students.ubc.ca/cs/courseschedule?pname=subjarea&tname=subj-course&dept=CPSC&course=110",
                "https://courses.students.ubc.ca/cs/courseschedule?pname=subjarea&tname=subj-course&dept=CPSC&course=121",
            ]
        );
    }

    #[test]
    fn test_extract_links_keeps_only_lectures_when_activity_listed() {
        let html = r#"<table>
            <tr><th>Status</th><th>Section</th><th>Activity</th></tr>
            <tr class="section1"><td></td><td><a href="/cs/courseschedule?dept=CPSC&amp;course=110&amp;section=L1A">CPSC 110 L1A</a></td><td>Laboratory</td></tr>
            <tr class="section2"><td></td><td><a href="/cs/courseschedule?dept=CPSC&amp;course=110&amp;section=101">CPSC 110 101</a></td><td>Lecture</td></tr>
        </table>"#;
        let links = extract_section_links(html, &base());
        assert_eq!(
            links,
            vec!["https://courses.students.ubc.ca/cs/courseschedule?dept=CPSC&course=110&section=101"]
        );
    }

    #[test]
    fn test_extract_links_keeps_web_oriented_courses() {
        let html = r#"<table>
            <tr><th>Status</th><th>Section</th><th>Activity</th></tr>
            <tr class="section1"><td></td><td><a href="/s?section=99A">99A</a></td><td> Web-Oriented Course </td></tr>
            <tr class="section2"><td></td><td><a href="/s?section=T1A">T1A</a></td><td>Tutorial</td></tr>
        </table>"#;
        let links = extract_section_links(html, &base());
        assert_eq!(links, vec!["https://courses.students.ubc.ca/s?section=99A"]);
    }

    #[test]
    fn test_extract_links_preserves_page_order_and_duplicates() {
        let html = r#"<table>
            <tr><th>Course</th></tr>
            <tr class="section2"><td><a href="/b">B</a></td></tr>
            <tr class="section1"><td><a href="/a">A</a></td></tr>
            <tr class="section2"><td><a href="/b">B</a></td></tr>
        </table>"#;
        let links = extract_section_links(html, &base());
        assert_eq!(
            links,
            vec![
                "https://courses.students.ubc.ca/b",
                "https://courses.students.ubc.ca/a",
                "https://courses.students.ubc.ca/b",
            ]
        );
    }

    #[test]
    fn test_extract_links_from_empty_page() {
        assert!(extract_section_links("<html></html>", &base()).is_empty());
    }
}
