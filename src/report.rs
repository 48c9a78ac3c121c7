use chrono::NaiveDate;
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reports the analytics API can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    InReview,
}

impl ReportKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::InReview => "in-review",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ReportKind::InReview => "/reports/in-review/v1",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub date: NaiveDate,
}

impl ReportRequest {
    pub fn in_review(date: NaiveDate) -> Self {
        Self {
            kind: ReportKind::InReview,
            date,
        }
    }

    /// Path and query string relative to the API base URL.
    pub fn path_and_query(&self) -> String {
        format!(
            "{}?rptg_date={}",
            self.kind.path(),
            self.date.format(DATE_FORMAT)
        )
    }

    /// Default output file name, e.g. `in-review-2024-03-05.tsv`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.tsv", self.kind.slug(), self.date.format(DATE_FORMAT))
    }
}

/// Parse a strict `YYYY-MM-DD` reporting date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let well_formed = raw.len() == 10
        && raw
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(format!("expected a date in YYYY-MM-DD format, got {raw:?}"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| format!("{raw:?}: {e}"))
}
