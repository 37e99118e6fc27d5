//! Fixture KPI data for the mock backend
//!
//! The same dataset backs the integration tests and the dev-server, so the
//! numbers are deterministic: 42 implantation rows spread over four zones
//! and seven clients, with occupation, portfolio and receivable figures
//! derived from them.

use jiff::civil::date;
use payloads::{
    ClientId, ZoneId,
    responses::{
        AgedReceivable, ClientPortfolio, FinancialSummary, ImplantationSuivi,
        ZoneOccupation,
    },
};
use rust_decimal::Decimal;

/// (id, name, total surface in m²)
pub const ZONES: [(i64, &str, i64); 4] = [
    (1, "Zone A", 12_000),
    (2, "Zone B", 8_000),
    (3, "Zone C", 15_000),
    (4, "Zone D", 5_000),
];

/// (id, name, sector)
pub const CLIENTS: [(i64, &str, Option<&str>); 7] = [
    (11, "Atlas Logistique", Some("Logistics")),
    (12, "Boréal Textiles", Some("Manufacturing")),
    (13, "Cèdre Agro", Some("Agrifood")),
    (14, "Delta Composants", Some("Electronics")),
    (15, "Émeraude Pharma", Some("Pharmaceuticals")),
    (16, "Fennec Auto", Some("Automotive")),
    (17, "Gazelle Services", None),
];

pub const IMPLANTATION_COUNT: usize = 42;

/// Yearly rent per m², used to derive revenue figures.
const RENT_PER_M2: i64 = 85;

#[derive(Clone, Debug)]
pub struct MockDataset {
    pub implantations: Vec<ImplantationSuivi>,
    pub zones: Vec<ZoneOccupation>,
    pub portfolio: Vec<ClientPortfolio>,
    pub receivables: Vec<AgedReceivable>,
    pub financials: Vec<FinancialSummary>,
}

impl Default for MockDataset {
    fn default() -> Self {
        Self::create()
    }
}

impl MockDataset {
    pub fn create() -> Self {
        let implantations = implantations();
        let zones = zone_occupation(&implantations);
        let portfolio = client_portfolio(&implantations);
        let receivables = aged_receivables(&portfolio);
        let financials = financial_summary();
        Self {
            implantations,
            zones,
            portfolio,
            receivables,
            financials,
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("📊 Mock dataset:");
        tracing::info!("   {} implantation rows", self.implantations.len());
        for zone in &self.zones {
            tracing::info!(
                "   {} (id {}): {}% occupied",
                zone.zone,
                zone.zone_id,
                zone.occupation_rate
            );
        }
        tracing::info!("   {} clients", self.portfolio.len());
        tracing::info!("   {} years of financials", self.financials.len());
    }
}

fn implantations() -> Vec<ImplantationSuivi> {
    (0..IMPLANTATION_COUNT)
        .map(|i| {
            let (zone_id, zone, zone_surface) = ZONES[i % ZONES.len()];
            let (client_id, client, _) = CLIENTS[i % CLIENTS.len()];
            let surface_m2 = Decimal::from(150 + (i as i64 * 37) % 900);
            let occupation_rate = (surface_m2 * Decimal::ONE_HUNDRED
                / Decimal::from(zone_surface))
            .round_dp(2);
            ImplantationSuivi {
                id: i as i64 + 1,
                zone_id: ZoneId(zone_id),
                zone: zone.to_string(),
                client_id: ClientId(client_id),
                client: client.to_string(),
                surface_m2,
                occupation_rate,
                start_date: date(
                    2019 + (i % 5) as i16,
                    (i % 12) as i8 + 1,
                    ((i * 3) % 28) as i8 + 1,
                ),
            }
        })
        .collect()
}

fn zone_occupation(implantations: &[ImplantationSuivi]) -> Vec<ZoneOccupation> {
    ZONES
        .iter()
        .map(|&(zone_id, zone, total)| {
            let total_surface = Decimal::from(total);
            let occupied_surface: Decimal = implantations
                .iter()
                .filter(|row| row.zone_id == ZoneId(zone_id))
                .map(|row| row.surface_m2)
                .sum();
            ZoneOccupation {
                zone_id: ZoneId(zone_id),
                zone: zone.to_string(),
                total_surface,
                occupied_surface,
                occupation_rate: (occupied_surface * Decimal::ONE_HUNDRED
                    / total_surface)
                    .round_dp(2),
            }
        })
        .collect()
}

fn client_portfolio(
    implantations: &[ImplantationSuivi],
) -> Vec<ClientPortfolio> {
    CLIENTS
        .iter()
        .map(|&(client_id, client, sector)| {
            let rows: Vec<_> = implantations
                .iter()
                .filter(|row| row.client_id == ClientId(client_id))
                .collect();
            let surface: Decimal = rows.iter().map(|row| row.surface_m2).sum();
            ClientPortfolio {
                client_id: ClientId(client_id),
                client: client.to_string(),
                sector: sector.map(str::to_string),
                contract_count: rows.len() as u32,
                annual_revenue: surface * Decimal::from(RENT_PER_M2),
            }
        })
        .collect()
}

fn aged_receivables(portfolio: &[ClientPortfolio]) -> Vec<AgedReceivable> {
    portfolio
        .iter()
        .enumerate()
        .map(|(i, client)| {
            // one month of rent outstanding, pushed further out for later
            // clients
            let monthly =
                (client.annual_revenue / Decimal::from(12)).round_dp(2);
            let bucket = |n: usize| {
                if i % 4 == n { monthly } else { Decimal::ZERO }
            };
            AgedReceivable {
                client_id: client.client_id,
                client: client.client.clone(),
                current: monthly,
                days_30: bucket(1),
                days_60: bucket(2),
                days_90_plus: bucket(3),
            }
        })
        .collect()
}

fn financial_summary() -> Vec<FinancialSummary> {
    (2020..=2024)
        .map(|year: i16| {
            let step = Decimal::from(i64::from(year - 2020));
            let revenue =
                Decimal::from(2_400_000) + step * Decimal::from(180_000);
            let expenses =
                Decimal::from(1_900_000) + step * Decimal::from(95_000);
            FinancialSummary {
                year,
                revenue,
                expenses,
                margin: revenue - expenses,
            }
        })
        .collect()
}
