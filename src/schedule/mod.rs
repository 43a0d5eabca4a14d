// src/schedule/mod.rs
// =============================================================================
// Talks to the course schedule site.
//
// Submodules:
// - model: query context, identifiers and seat counts
// - urls: builds page URLs and reads identifiers back out of links
// - fetch: GETs a page
// - page: parses listing pages and section detail pages
// =============================================================================

mod fetch;
mod model;
mod page;
mod urls;

pub use fetch::{build_client, fetch_page};
pub use model::{AvailabilityRecord, CourseId, QueryContext, SectionAvailability, Term};
pub use page::{extract_section_links, parse_section_summary};
pub use urls::{parse_course_id, Granularity, UrlBuilder, BASE_URL};
