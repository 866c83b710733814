//! Page selection.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Which pages of a document to process (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Process all pages
    #[default]
    All,
    /// Process a range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Process specific pages
    Pages(Vec<u32>),
    /// Process several ranges, sorted and non-overlapping
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => {
                let idx = ranges.partition_point(|r| *r.end() < page);
                ranges.get(idx).is_some_and(|r| r.contains(&page))
            }
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            let range = parse_range(s)?;
            return Ok(PageSelection::Range(range));
        }

        let mut ranges = s
            .split(',')
            .map(parse_range)
            .collect::<Result<Vec<_>>>()?;
        ranges.sort_unstable_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Ok(PageSelection::Ranges(merged))
    }
}

/// Parse `"N"` or `"A-B"` into an inclusive range.
fn parse_range(part: &str) -> Result<RangeInclusive<u32>> {
    let part = part.trim();
    let Some((start, end)) = part.split_once('-') else {
        let page = parse_page_number(part)?;
        return Ok(page..=page);
    };
    let start = parse_page_number(start)?;
    let end = parse_page_number(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "start {} is after end {}",
            start, end
        )));
    }
    Ok(start..=end)
}

fn parse_page_number(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(Error::InvalidPageRange("pages are numbered from 1".into())),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidPageRange(format!("'{}' is not a page number", s))),
    }
}
