use crate::decode::{json_object, null_as_default};
use crate::flexible_date::FlexibleDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

// ============ Meter Point Lookup ============

/// An electricity meter point as returned by `/electricity-meter-points/{mpan}/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct MeterPoint {
    /// Grid Supply Point code, e.g. `_C`.
    #[serde(deserialize_with = "null_as_default")]
    pub gsp: String,
    /// Meter Point Administration Number.
    #[serde(deserialize_with = "null_as_default")]
    pub mpan: String,
    /// Consumption profile classification.
    #[serde(deserialize_with = "null_as_default")]
    pub profile_class: i64,
}

// ============ Account Lookup ============

/// An account as returned by `/accounts/{number}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Account {
    /// Account number, e.g. `A-93DD6C62`.
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    /// Properties on the account, in upstream order.
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Vec<Property>,
}

/// A supply address on an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Property {
    /// Upstream property identifier.
    pub id: PropertyId,
    /// Date the customer moved in.
    pub moved_in_at: FlexibleDate,
    /// Date the customer moved out, usually absent.
    pub moved_out_at: FlexibleDate,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line_1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line_2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line_3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub town: String,
    #[serde(deserialize_with = "null_as_default")]
    pub county: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postcode: String,
    /// Electricity supply points at this property, in upstream order.
    #[serde(deserialize_with = "null_as_default")]
    pub electricity_meter_points: Vec<ElectricityMeterPoint>,
    /// Gas supply points. Their schema is not fixed upstream, so they are kept
    /// as raw JSON values.
    #[serde(deserialize_with = "null_as_default")]
    pub gas_meter_points: Vec<Value>,
}

/// An electricity supply point nested under a [`Property`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct ElectricityMeterPoint {
    #[serde(deserialize_with = "null_as_default")]
    pub mpan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_class: i64,
    /// Estimated annual consumption in kWh.
    #[serde(deserialize_with = "null_as_default")]
    pub consumption_standard: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub meters: Vec<Meter>,
    /// Tariff agreements, in upstream order.
    #[serde(deserialize_with = "null_as_default")]
    pub agreements: Vec<Agreement>,
}

/// A physical meter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Meter {
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub registers: Vec<Register>,
}

/// A register on a [`Meter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Register {
    /// Register code, e.g. `01`.
    #[serde(deserialize_with = "null_as_default")]
    pub identifier: String,
    /// Rate label, e.g. `STANDARD`.
    #[serde(deserialize_with = "null_as_default")]
    pub rate: String,
    /// Whether billing settlement uses this register.
    #[serde(deserialize_with = "null_as_default")]
    pub is_settlement_register: bool,
}

/// A tariff contract period on an electricity meter point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Agreement {
    #[serde(deserialize_with = "null_as_default")]
    pub tariff_code: String,
    pub valid_from: FlexibleDate,
    /// Absent for open-ended agreements.
    pub valid_to: FlexibleDate,
}

json_object!(
    MeterPoint,
    Account,
    Property,
    ElectricityMeterPoint,
    Meter,
    Register,
    Agreement,
);

// ============ Property Identifier ============

/// A property identifier kept as its exact decimal text.
///
/// Upstream sends the id as a JSON number. The number's literal text is kept
/// as written (serde_json `arbitrary_precision`), so large or fractional
/// values keep every digit. A `null` id is the empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id as an unsigned integer, if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    fn from_digits(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .then(|| PropertyId(s.to_string()))
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for PropertyId {
    fn from(id: u64) -> Self {
        PropertyId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PropertyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(PropertyId::default()),
            Value::Number(n) => Ok(PropertyId(n.to_string())),
            Value::String(s) => PropertyId::from_digits(&s).ok_or_else(|| {
                de::Error::invalid_value(de::Unexpected::Str(&s), &"a numeric property id")
            }),
            other => Err(de::Error::custom(format!(
                "invalid type for property id: {}",
                other
            ))),
        }
    }
}

impl Serialize for PropertyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
