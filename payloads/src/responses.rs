use crate::{ClientId, ZoneId};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend resource paths, relative to the api root.
pub mod resources {
    pub const IMPLANTATION_SUIVI: &str = "/implantation-suivi/";
    pub const ZONE_OCCUPATION: &str = "/kpi/zone-occupation/";
    pub const CLIENT_PORTFOLIO: &str = "/kpi/client-portfolio/";
    pub const AGED_RECEIVABLES: &str = "/kpi/aged-receivables/";
    pub const FINANCIAL_SUMMARY: &str = "/kpi/financial-summary/";
}

/// The envelope list endpoints wrap their rows in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub count: u64,
}

impl<T> Paginated<T> {
    /// Number of pages needed to show `count` rows `page_size` at a time.
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(page_size)
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            count: 0,
        }
    }
}

/// One client's occupation of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplantationSuivi {
    pub id: i64,
    pub zone_id: ZoneId,
    pub zone: String,
    pub client_id: ClientId,
    pub client: String,
    pub surface_m2: Decimal,
    /// Share of the zone's surface this client occupies, in percent.
    pub occupation_rate: Decimal,
    pub start_date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOccupation {
    pub zone_id: ZoneId,
    pub zone: String,
    pub total_surface: Decimal,
    pub occupied_surface: Decimal,
    pub occupation_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPortfolio {
    pub client_id: ClientId,
    pub client: String,
    pub sector: Option<String>,
    pub contract_count: u32,
    pub annual_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub year: i16,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub margin: Decimal,
}

/// Outstanding receivables for a client, bucketed by age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgedReceivable {
    pub client_id: ClientId,
    pub client: String,
    pub current: Decimal,
    pub days_30: Decimal,
    pub days_60: Decimal,
    pub days_90_plus: Decimal,
}

impl AgedReceivable {
    pub fn total(&self) -> Decimal {
        self.current + self.days_30 + self.days_60 + self.days_90_plus
    }
}
