//! Sample data for tests and the demo binary.

use crate::models::{Comic, Page, PageType, Preference, User};
use chrono::{DateTime, Duration, Utc};

/// 2019-01-01 00:00:00 UTC
fn base_date() -> DateTime<Utc> {
    DateTime::from_timestamp(1_546_300_800, 0).unwrap_or_default()
}

/// Administrator with a scraping key stored as a preference.
#[must_use]
pub fn user_admin() -> User {
    User {
        id: 1,
        email: "comixedadmin@localhost".to_string(),
        first_login_date: base_date(),
        last_login_date: base_date() + Duration::days(30),
        roles: vec!["ADMIN".to_string(), "READER".to_string()],
        preferences: vec![
            Preference::new("api_key", "1234567890ABCDEF"),
            Preference::new("library_display_rows", "10"),
        ],
    }
}

/// Reader without preferences.
#[must_use]
pub fn user_reader() -> User {
    User {
        id: 2,
        email: "comixedreader@localhost".to_string(),
        first_login_date: base_date(),
        last_login_date: base_date() + Duration::days(2),
        roles: vec!["READER".to_string()],
        preferences: Vec::new(),
    }
}

/// Issue `id` of a Batman run, imported `id` days after the base date.
#[must_use]
pub fn comic(id: u64) -> Comic {
    let added = base_date() + Duration::days(i64::try_from(id).unwrap_or(0));
    Comic {
        id,
        filename: format!("/library/DC Comics/Batman/Batman #{id:03}.cbz"),
        publisher: Some("DC Comics".to_string()),
        series: Some("Batman".to_string()),
        volume: Some("2011".to_string()),
        issue_number: Some(id.to_string()),
        added_date: added,
        last_updated_date: added + Duration::hours(1),
        page_count: 24,
    }
}

/// Comics 1, 3 and 5.
#[must_use]
pub fn comics() -> Vec<Comic> {
    vec![comic(1), comic(3), comic(5)]
}

/// Regular story page type.
#[must_use]
pub fn page_type_story() -> PageType {
    PageType {
        id: 1,
        name: "story".to_string(),
    }
}

/// Front cover page type.
#[must_use]
pub fn page_type_front_cover() -> PageType {
    PageType {
        id: 2,
        name: "front-cover".to_string(),
    }
}

/// Every page type the library knows about.
#[must_use]
pub fn page_types() -> Vec<PageType> {
    vec![
        page_type_story(),
        page_type_front_cover(),
        PageType {
            id: 3,
            name: "back-cover".to_string(),
        },
        PageType {
            id: 4,
            name: "advertisement".to_string(),
        },
    ]
}

/// First page of comic 1, classified as a story page.
#[must_use]
pub fn page() -> Page {
    Page {
        id: 1000,
        comic_id: 1,
        filename: "Batman #001/page-001.jpg".to_string(),
        hash: "0123456789abcdef".to_string(),
        width: 1988,
        height: 3056,
        page_type: page_type_story(),
        deleted: false,
    }
}
