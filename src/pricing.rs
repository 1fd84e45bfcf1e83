//! Pricing for a booking: venue base price plus selected add-on services,
//! with a flat 5% tax. Deterministic and pure; quotes are recomputed from the
//! current draft on demand, never cached.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat tax rate applied to the subtotal
pub const TAX_RATE: Decimal = dec!(0.05);

/// A priced add-on service a booking can include
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
        }
    }
}

/// The add-on services offered with a booking, in presentation order
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// The standard service table offered on every venue
    pub fn standard() -> Self {
        Self::new(vec![
            Service::new(
                "catering",
                "Catering Service",
                "Professional catering with variety of menu options",
                dec!(50000),
            ),
            Service::new(
                "stageLighting",
                "Stage & Lighting",
                "Professional stage setup with LED lighting",
                dec!(15000),
            ),
            Service::new(
                "decoration",
                "Decoration",
                "Complete venue decoration as per theme",
                dec!(25000),
            ),
            Service::new(
                "photography",
                "Photography & Videography",
                "Professional photographer and videographer team",
                dec!(30000),
            ),
            Service::new(
                "projector",
                "Projector & Screen",
                "HD projector with large screen for presentations",
                dec!(8000),
            ),
            Service::new(
                "security",
                "Security Services",
                "Professional security personnel for event",
                dec!(10000),
            ),
        ])
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Price of a service id; unknown ids price at zero rather than erroring
    pub fn price_of(&self, id: &str) -> Decimal {
        self.get(id).map(|s| s.price).unwrap_or(Decimal::ZERO)
    }

    /// Titles for a set of selected ids, skipping unknown ones
    pub fn titles_for<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| self.get(id).map(|s| s.title.clone()))
            .collect()
    }

    /// Quote a booking: base price plus selected services, then 5% tax
    pub fn quote<'a>(
        &self,
        base_price: Decimal,
        service_ids: impl IntoIterator<Item = &'a str>,
    ) -> PriceQuote {
        let lines: Vec<PriceLine> = service_ids
            .into_iter()
            .filter_map(|id| {
                self.get(id).map(|s| PriceLine {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    price: s.price,
                })
            })
            .collect();

        let services_total: Decimal = lines.iter().map(|l| l.price).sum();
        let subtotal = base_price + services_total;
        let tax = subtotal * TAX_RATE;
        let total = subtotal + tax;

        PriceQuote {
            base_price,
            lines,
            subtotal,
            tax,
            total,
        }
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// One resolved service line in a quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub id: String,
    pub title: String,
    pub price: Decimal,
}

/// Computed pricing for the current draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub base_price: Decimal,
    pub lines: Vec<PriceLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Render an amount with thousands separators for display, e.g. `218,400`
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
