//! RFP entity type - a sales Request for Proposal moving through the pipeline

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pipeline status of an RFP
///
/// Status is recorded independently of the milestone dates and is never
/// cross-checked against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum RfpStatus {
    QuotationPending,
    OrderPending,
    InProduction,
    Delivered,
    Fulfilled,
    Cancelled,
}

/// Win/loss classification derived from a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
    Pending,
}

impl RfpStatus {
    /// All statuses in pipeline order
    pub fn all() -> &'static [RfpStatus] {
        &[
            RfpStatus::QuotationPending,
            RfpStatus::OrderPending,
            RfpStatus::InProduction,
            RfpStatus::Delivered,
            RfpStatus::Fulfilled,
            RfpStatus::Cancelled,
        ]
    }

    /// Human-readable label, also used in exports
    pub fn label(&self) -> &'static str {
        match self {
            RfpStatus::QuotationPending => "Quotation Pending",
            RfpStatus::OrderPending => "Order Pending",
            RfpStatus::InProduction => "In Production",
            RfpStatus::Delivered => "Delivered",
            RfpStatus::Fulfilled => "Fulfilled",
            RfpStatus::Cancelled => "Cancelled",
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            RfpStatus::Delivered | RfpStatus::Fulfilled => Outcome::Won,
            RfpStatus::Cancelled => Outcome::Lost,
            RfpStatus::QuotationPending | RfpStatus::OrderPending | RfpStatus::InProduction => {
                Outcome::Pending
            }
        }
    }

    pub fn is_won(&self) -> bool {
        self.outcome() == Outcome::Won
    }

    pub fn is_lost(&self) -> bool {
        self.outcome() == Outcome::Lost
    }

    pub fn is_pending(&self) -> bool {
        self.outcome() == Outcome::Pending
    }
}

impl std::fmt::Display for RfpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for RfpStatus {
    type Err = String;

    /// Accepts the display label as well as snake_case / kebab-case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "quotationpending" => Ok(RfpStatus::QuotationPending),
            "orderpending" => Ok(RfpStatus::OrderPending),
            "inproduction" => Ok(RfpStatus::InProduction),
            "delivered" => Ok(RfpStatus::Delivered),
            "fulfilled" => Ok(RfpStatus::Fulfilled),
            "cancelled" | "canceled" => Ok(RfpStatus::Cancelled),
            _ => Err(format!(
                "Unknown RFP status: {}. Use one of: Quotation Pending, Order Pending, \
                 In Production, Delivered, Fulfilled, Cancelled",
                s
            )),
        }
    }
}

impl Serialize for RfpStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RfpStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single RFP record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfp {
    /// Short unique identifier (e.g., "RFP001")
    pub id: String,

    pub client_name: String,

    pub product_type: String,

    pub submission_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,

    pub status: RfpStatus,

    /// Quoted amount; absent until quoted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Owning team identifier (e.g., "Sales_A")
    pub assigned_to: String,
}

impl Rfp {
    /// Create a new RFP with only the required fields set
    pub fn new(
        id: impl Into<String>,
        client_name: impl Into<String>,
        product_type: impl Into<String>,
        submission_date: NaiveDate,
        status: RfpStatus,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            client_name: client_name.into(),
            product_type: product_type.into(),
            submission_date,
            quotation_date: None,
            order_date: None,
            delivery_date: None,
            status,
            value: None,
            assigned_to: assigned_to.into(),
        }
    }

    pub fn with_quotation_date(mut self, date: NaiveDate) -> Self {
        self.quotation_date = Some(date);
        self
    }

    pub fn with_order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Value with "not quoted" treated as zero
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    pub fn is_quoted(&self) -> bool {
        self.quotation_date.is_some()
    }

    /// An order counts as received whenever an order date is recorded
    pub fn is_ordered(&self) -> bool {
        self.order_date.is_some()
    }

    pub fn is_delivered(&self) -> bool {
        self.delivery_date.is_some()
    }

    pub fn is_won(&self) -> bool {
        self.status.is_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "Quotation Pending".parse::<RfpStatus>().unwrap(),
            RfpStatus::QuotationPending
        );
        assert_eq!(
            "order_pending".parse::<RfpStatus>().unwrap(),
            RfpStatus::OrderPending
        );
        assert_eq!(
            "in-production".parse::<RfpStatus>().unwrap(),
            RfpStatus::InProduction
        );
        assert_eq!(
            "FULFILLED".parse::<RfpStatus>().unwrap(),
            RfpStatus::Fulfilled
        );
        assert!("shipped".parse::<RfpStatus>().is_err());
    }

    #[test]
    fn test_status_label_round_trips() {
        for status in RfpStatus::all() {
            assert_eq!(status.label().parse::<RfpStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_outcomes_are_exclusive_and_exhaustive() {
        for status in RfpStatus::all() {
            let flags = [status.is_won(), status.is_lost(), status.is_pending()];
            assert_eq!(
                flags.iter().filter(|f| **f).count(),
                1,
                "{} must have exactly one outcome",
                status
            );
        }
        assert!(RfpStatus::Delivered.is_won());
        assert!(RfpStatus::Fulfilled.is_won());
        assert!(RfpStatus::Cancelled.is_lost());
        assert!(RfpStatus::InProduction.is_pending());
    }

    #[test]
    fn test_rfp_builder() {
        let rfp = Rfp::new(
            "RFP100",
            "ABC Corp",
            "Gears",
            date("2024-10-01"),
            RfpStatus::OrderPending,
            "Sales_A",
        )
        .with_quotation_date(date("2024-10-03"))
        .with_value(1200.0);

        assert!(rfp.is_quoted());
        assert!(!rfp.is_ordered());
        assert_eq!(rfp.value_or_zero(), 1200.0);
        assert!(!rfp.is_won());
    }

    #[test]
    fn test_rfp_deserialization() {
        let yaml = r#"
id: RFP005
client_name: Innovation Labs
product_type: Sensors
submission_date: 2024-10-05
quotation_date: 2024-10-07
status: Order Pending
value: 8000
assigned_to: Sales_B
"#;
        let rfp: Rfp = serde_yml::from_str(yaml).unwrap();
        assert_eq!(rfp.id, "RFP005");
        assert_eq!(rfp.status, RfpStatus::OrderPending);
        assert_eq!(rfp.quotation_date, Some(date("2024-10-07")));
        assert_eq!(rfp.order_date, None);
        assert_eq!(rfp.value, Some(8000.0));
    }

    #[test]
    fn test_rfp_serialization_skips_missing_milestones() {
        let rfp = Rfp::new(
            "RFP002",
            "Delta Inc",
            "Bearings",
            date("2024-10-02"),
            RfpStatus::QuotationPending,
            "Sales_B",
        );
        let yaml = serde_yml::to_string(&rfp).unwrap();
        assert!(yaml.contains("Quotation Pending"));
        assert!(!yaml.contains("order_date"));
        assert!(!yaml.contains("value"));
    }
}
