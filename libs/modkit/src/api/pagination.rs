//! List normalisation shared by every `GET /` collection endpoint.

use std::str::FromStr;

use crate::wire::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Missing or blank means the default (`desc`).
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, UnknownVariant> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::default()),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownVariant::new("sortOrder", s, &["asc", "desc"])),
        }
    }
}

/// Page size bounds, usually taken from module config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Normalised 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// `page < 1` clamps to 1; a missing or non-positive `limit` takes the
    /// default; `limit` is capped at `max_limit`. `page` is capped so that
    /// `offset()` always fits in an `i64` SQL parameter.
    pub fn normalize(page: Option<i64>, limit: Option<i64>, limits: PageLimits) -> Self {
        let max = limits.max_limit.max(1);
        let limit = limit
            .filter(|l| *l >= 1)
            .map_or(limits.default_limit, |l| l as u64)
            .clamp(1, max);
        let max_page = MAX_OFFSET / limit;
        let page = page
            .filter(|p| *p >= 1)
            .map_or(1, |p| p as u64)
            .min(max_page);
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of domain items plus the total match count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// `ceil(total / limit)`; 0 for an empty collection.
    pub fn pages(&self) -> u64 {
        self.total.div_ceil(self.request.limit.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let r = PageRequest::normalize(None, None, PageLimits::default());
        assert_eq!(r, PageRequest { page: 1, limit: 10 });
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let limits = PageLimits::default();
        assert_eq!(PageRequest::normalize(Some(0), Some(500), limits).limit, 100);
        assert_eq!(PageRequest::normalize(Some(-3), Some(5), limits).page, 1);
        assert_eq!(PageRequest::normalize(Some(2), Some(0), limits).limit, 10);
    }

    #[test]
    fn huge_page_keeps_offset_in_sql_range() {
        for limit in [1, 10, 100] {
            let r = PageRequest::normalize(Some(i64::MAX), Some(limit), PageLimits::default());
            assert!(r.page > 1);
            assert!(i64::try_from(r.offset()).is_ok());
        }
    }

    #[test]
    fn second_page_offset() {
        let r = PageRequest::normalize(Some(2), Some(10), PageLimits::default());
        assert_eq!(r.offset(), 10);
    }

    #[test]
    fn pages_round_up() {
        let page = |total| Page::<()> {
            items: vec![],
            total,
            request: PageRequest { page: 1, limit: 10 },
        };
        assert_eq!(page(0).pages(), 0);
        assert_eq!(page(10).pages(), 1);
        assert_eq!(page(25).pages(), 3);
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse_opt(None).unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse_opt(Some(" ")).unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse_opt(Some("ASC")).unwrap(), SortOrder::Asc);
        let err = SortOrder::parse_opt(Some("sideways")).unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }
}
