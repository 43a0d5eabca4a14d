// src/schedule/urls.rs
// =============================================================================
// Builds course-schedule query URLs and reads identifiers back out of them.
//
// Every page on the registration site is the same path with a different
// query string:
//   <base>cs/courseschedule?tname=subj-course&sessyr=2024&sesscd=W&dept=CPSC&course=110&pname=subjarea
//
// The key names and casing are what the site expects; don't rename them.
// =============================================================================

use super::model::{CourseId, QueryContext};
use url::Url;

/// Root of the live registration site
pub const BASE_URL: &str = "https://courses.students.ubc.ca/";

const SCHEDULE_PATH: &str = "cs/courseschedule";
const PAGE_NAME: &str = "subjarea";

// Which listing/detail page to build a URL for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Every department for the session
    AllDepartments,
    /// One department's course list
    Department,
    /// One course's section list
    Course,
    /// One section's detail page (seat summary)
    Section,
}

impl Granularity {
    fn template_name(self) -> &'static str {
        match self {
            Granularity::AllDepartments => "subj-all-departments",
            Granularity::Department => "subj-department",
            Granularity::Course => "subj-course",
            Granularity::Section => "subj-section",
        }
    }
}

// Builds URLs for one session against one site root
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    context: QueryContext,
}

impl UrlBuilder {
    pub fn new(base: Url, context: QueryContext) -> Self {
        Self { base, context }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn context(&self) -> QueryContext {
        self.context
    }

    // Builds the URL for `granularity` from whatever fields `id` carries
    //
    // Fields the granularity needs but `id` lacks are sent as empty values
    // (e.g. `course=`). The site then just returns a page with nothing on it.
    pub fn build(&self, id: &CourseId, granularity: Granularity) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}/{}", self.base.path().trim_end_matches('/'), SCHEDULE_PATH);
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("tname", granularity.template_name());
            query.append_pair("sessyr", &self.context.year.to_string());
            query.append_pair("sesscd", self.context.term.code());

            if granularity != Granularity::AllDepartments {
                query.append_pair("dept", &id.department);
            }
            if matches!(granularity, Granularity::Course | Granularity::Section) {
                query.append_pair("course", id.course.as_deref().unwrap_or(""));
            }
            if granularity == Granularity::Section {
                query.append_pair("section", id.section.as_deref().unwrap_or(""));
            }

            query.append_pair("pname", PAGE_NAME);
        }

        url
    }

    pub fn all_departments(&self) -> Url {
        self.build(&CourseId::default(), Granularity::AllDepartments)
    }
}

// Reads department/course/section back out of a schedule URL
//
// Never fails: anything missing (or an unparseable URL) comes back empty.
pub fn parse_course_id(url: &str) -> CourseId {
    let mut id = CourseId::default();

    let Ok(parsed) = Url::parse(url) else {
        return id;
    };

    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "dept" => id.department = value.into_owned(),
            "course" if !value.is_empty() => id.course = Some(value.into_owned()),
            "section" if !value.is_empty() => id.section = Some(value.into_owned()),
            _ => {}
        }
    }

    id
}
