// src/search/traversal.rs
// =============================================================================
// Walks the schedule site top-down and collects seat counts per section.
//
// How it works:
// 1. Fetch a listing page (all departments / department / course)
// 2. Extract the links to the next level down
// 3. For each link, in page order, go one level deeper
// 4. At the bottom, parse each section detail page into seat counts
//
// Requests are made one after another; nothing runs concurrently. The only
// failure that's absorbed is a detail page that doesn't look like a detail
// page. Network errors end the whole run.
// =============================================================================

use crate::schedule::{
    build_client, extract_section_links, fetch_page, parse_course_id, parse_section_summary,
    AvailabilityRecord, CourseId, Granularity, QueryContext, SectionAvailability, UrlBuilder,
    BASE_URL,
};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

// Resolves availability for one session (year + term)
pub struct Searcher {
    client: Client,
    urls: UrlBuilder,
}

impl Searcher {
    // Creates a searcher against the live site
    pub fn new(context: QueryContext, timeout: Option<Duration>) -> Result<Self> {
        Self::with_base_url(BASE_URL, context, timeout)
    }

    // Creates a searcher against another site root (a mirror, or a test server)
    //
    // The base should end with '/', e.g. "http://127.0.0.1:8080/"
    pub fn with_base_url(
        base_url: &str,
        context: QueryContext,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid base URL '{}'", base_url))?;

        Ok(Self {
            client: build_client(timeout)?,
            urls: UrlBuilder::new(base, context),
        })
    }

    pub fn context(&self) -> QueryContext {
        self.urls.context()
    }

    /// Every section of every course in every department
    pub async fn search_all(&self) -> Result<Vec<AvailabilityRecord>> {
        let listing_url = self.urls.all_departments();
        let department_links = self.listing_links(listing_url.as_str()).await?;
        info!(departments = department_links.len(), "searching all departments");

        let mut records = Vec::new();
        for link in department_links {
            let department = parse_course_id(&link).department;
            let url = self
                .urls
                .build(&CourseId::department(department), Granularity::Department);
            records.extend(self.department_records(url.as_str()).await?);
        }

        Ok(records)
    }

    /// Every section of every course in one department
    pub async fn search_department(&self, department: &str) -> Result<Vec<AvailabilityRecord>> {
        let url = self
            .urls
            .build(&CourseId::department(department), Granularity::Department);
        self.department_records(url.as_str()).await
    }

    /// Every section of one course
    pub async fn search_course(
        &self,
        department: &str,
        course: &str,
    ) -> Result<Vec<AvailabilityRecord>> {
        let url = self
            .urls
            .build(&CourseId::course(department, course), Granularity::Course);
        self.course_records(url.as_str()).await
    }

    /// One section's seat counts, or None if its page had none to read
    pub async fn watch_section(
        &self,
        department: &str,
        course: &str,
        section: &str,
    ) -> Result<Option<SectionAvailability>> {
        let url = self.urls.build(
            &CourseId::section(department, course, section),
            Granularity::Section,
        );
        self.section_availability(url.as_str()).await
    }

    // Department listing -> course pages
    //
    // Course links are reduced to their identifiers and rebuilt for this
    // session, so every course page is fetched for the same year and term.
    async fn department_records(&self, url: &str) -> Result<Vec<AvailabilityRecord>> {
        let course_links = self.listing_links(url).await?;
        info!(url, courses = course_links.len(), "searching department");

        let mut records = Vec::new();
        for link in course_links {
            let id = parse_course_id(&link);
            let course_url = self.urls.build(&id, Granularity::Course);
            records.extend(self.course_records(course_url.as_str()).await?);
        }

        Ok(records)
    }

    // Course listing -> section detail pages
    async fn course_records(&self, url: &str) -> Result<Vec<AvailabilityRecord>> {
        let section_links = self.listing_links(url).await?;
        debug!(url, sections = section_links.len(), "searching course");

        let mut records = Vec::new();
        for link in section_links {
            let label = parse_course_id(&link).label();
            if let Some(availability) = self.section_availability(&link).await? {
                records.push(AvailabilityRecord::new(label, availability));
            }
        }

        Ok(records)
    }

    // Fetch errors propagate; a page without a readable summary is None
    async fn section_availability(&self, url: &str) -> Result<Option<SectionAvailability>> {
        let html = fetch_page(&self.client, url).await?;

        match parse_section_summary(&html) {
            Ok(availability) => Ok(Some(availability)),
            Err(reason) => {
                debug!(url, %reason, "no seat summary on section page");
                Ok(None)
            }
        }
    }

    async fn listing_links(&self, url: &str) -> Result<Vec<String>> {
        let html = fetch_page(&self.client, url).await?;
        Ok(extract_section_links(&html, self.urls.base()))
    }
}
