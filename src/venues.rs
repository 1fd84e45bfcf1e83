//! Venue discovery support: typed search filters for the marketplace listing
//! endpoint and server-driven page navigation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Capacity filter band, from the marketplace's labeled ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityBand {
    Between(u32, u32),
    AtLeast(u32),
}

impl CapacityBand {
    /// Parse a range label like `"100-300"` or `"1000+"`
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if let Some(min) = label.strip_suffix('+') {
            return min.trim().parse().ok().map(CapacityBand::AtLeast);
        }
        let (min, max) = label.split_once('-')?;
        Some(CapacityBand::Between(
            min.trim().parse().ok()?,
            max.trim().parse().ok()?,
        ))
    }
}

/// Sort orders the venue list offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueSort {
    PriceAscending,
    PriceDescending,
    RatingDescending,
}

impl VenueSort {
    fn wire(&self) -> (&'static str, &'static str) {
        match self {
            VenueSort::PriceAscending => ("price", "asc"),
            VenueSort::PriceDescending => ("price", "desc"),
            VenueSort::RatingDescending => ("rating", "desc"),
        }
    }
}

/// Filters for the venue listing endpoint; unset fields are omitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub venue_type: Option<String>,
    pub capacity: Option<CapacityBand>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub sort: Option<VenueSort>,
    pub page: Option<u32>,
}

impl VenueQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire query pairs; only set filters appear
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city".to_string(), city.clone()));
        }
        if let Some(venue_type) = &self.venue_type {
            pairs.push(("type".to_string(), venue_type.clone()));
        }
        match self.capacity {
            Some(CapacityBand::Between(min, max)) => {
                pairs.push(("capacity_min".to_string(), min.to_string()));
                pairs.push(("capacity_max".to_string(), max.to_string()));
            }
            Some(CapacityBand::AtLeast(min)) => {
                pairs.push(("capacity_min".to_string(), min.to_string()));
            }
            None => {}
        }
        if let Some(price_min) = self.price_min {
            pairs.push(("price_min".to_string(), price_min.to_string()));
        }
        if let Some(price_max) = self.price_max {
            pairs.push(("price_max".to_string(), price_max.to_string()));
        }
        if let Some(sort) = self.sort {
            let (sort_by, sort_order) = sort.wire();
            pairs.push(("sort_by".to_string(), sort_by.to_string()));
            pairs.push(("sort_order".to_string(), sort_order.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }

        pairs
    }
}

/// One venue row in the listing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Listing endpoint envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueListing {
    #[serde(default)]
    pub venues: Vec<VenueSummary>,
    #[serde(default)]
    pub total_venues: u64,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

/// Server-driven page navigation: 1-based, out-of-range moves are no-ops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Record the page count from a listing response; current page is pulled
    /// back in range if the result set shrank under it
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
        }
    }

    /// Jump to a page; ignored when outside `[1, total_pages]`
    pub fn goto(&mut self, page: u32) {
        if page >= 1 && page <= self.total_pages {
            self.current_page = page;
        }
    }

    pub fn next(&mut self) {
        if self.current_page < self.total_pages {
            self.current_page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("100-300", Some(CapacityBand::Between(100, 300)) ; "bounded range")]
    #[test_case("1000+", Some(CapacityBand::AtLeast(1000)) ; "open range")]
    #[test_case(" 100 - 300 ", Some(CapacityBand::Between(100, 300)) ; "whitespace tolerated")]
    #[test_case("lots", None ; "junk rejected")]
    #[test_case("", None ; "empty rejected")]
    fn test_capacity_band_parse(label: &str, expected: Option<CapacityBand>) {
        assert_eq!(CapacityBand::parse(label), expected);
    }

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(VenueQuery::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_full_query_pairs() {
        let query = VenueQuery {
            search: Some("palace".to_string()),
            city: Some("Lahore".to_string()),
            venue_type: Some("Banquet".to_string()),
            capacity: Some(CapacityBand::Between(100, 300)),
            price_min: Some(dec!(50000)),
            price_max: Some(dec!(100000)),
            sort: Some(VenueSort::PriceAscending),
            page: Some(2),
        };

        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("search".to_string(), "palace".to_string()),
                ("city".to_string(), "Lahore".to_string()),
                ("type".to_string(), "Banquet".to_string()),
                ("capacity_min".to_string(), "100".to_string()),
                ("capacity_max".to_string(), "300".to_string()),
                ("price_min".to_string(), "50000".to_string()),
                ("price_max".to_string(), "100000".to_string()),
                ("sort_by".to_string(), "price".to_string()),
                ("sort_order".to_string(), "asc".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_open_price_band() {
        // "Under 50,000" carries only a ceiling; "200,000+" only a floor
        let under = VenueQuery {
            price_max: Some(dec!(50000)),
            ..VenueQuery::new()
        };
        assert_eq!(
            under.to_query_pairs(),
            vec![("price_max".to_string(), "50000".to_string())]
        );

        let above = VenueQuery {
            price_min: Some(dec!(200000)),
            ..VenueQuery::new()
        };
        assert_eq!(
            above.to_query_pairs(),
            vec![("price_min".to_string(), "200000".to_string())]
        );
    }

    #[test]
    fn test_rating_sort_is_descending() {
        let query = VenueQuery {
            sort: Some(VenueSort::RatingDescending),
            ..VenueQuery::new()
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("sort_by".to_string(), "rating".to_string()),
                ("sort_order".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_listing_envelope_defaults() {
        let listing: VenueListing = serde_json::from_str("{}").unwrap();
        assert!(listing.venues.is_empty());
        assert_eq!(listing.total_pages, 1);

        let listing: VenueListing = serde_json::from_str(
            r#"{"venues":[{"id":3,"name":"Grand Palace","city":"Lahore","base_price":150000}],"total_venues":1,"total_pages":1}"#,
        )
        .unwrap();
        assert_eq!(listing.venues.len(), 1);
        assert_eq!(listing.venues[0].base_price, Some(dec!(150000)));
        assert!(listing.venues[0].rating.is_none());
    }

    #[test]
    fn test_pager_guards_bounds() {
        let mut pager = Pager::new();
        pager.set_total_pages(3);

        pager.goto(0);
        assert_eq!(pager.current_page(), 1);
        pager.goto(5);
        assert_eq!(pager.current_page(), 1);
        pager.goto(3);
        assert_eq!(pager.current_page(), 3);

        pager.next();
        assert_eq!(pager.current_page(), 3);
        pager.prev();
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn test_pager_pulls_back_when_results_shrink() {
        let mut pager = Pager::new();
        pager.set_total_pages(5);
        pager.goto(5);
        pager.set_total_pages(2);
        assert_eq!(pager.current_page(), 2);
        assert!(pager.has_prev());
        assert!(!pager.has_next());
    }
}
