//! Car Sale Record Module
//! Record type, field catalogue and group keys.

use std::fmt;

/// Column headers of the persisted table, in file order.
pub const HEADER: [&str; 5] = ["Car_Brand", "Model", "Year", "Price", "Units_Sold"];

/// One car-sale observation.
#[derive(Debug, Clone, PartialEq)]
pub struct CarSale {
    pub car_brand: String,
    pub model: String,
    pub year: i64,
    pub price: f64,
    pub units_sold: i64,
}

impl CarSale {
    pub fn new(
        car_brand: impl Into<String>,
        model: impl Into<String>,
        year: i64,
        price: f64,
        units_sold: i64,
    ) -> Self {
        Self {
            car_brand: car_brand.into(),
            model: model.into(),
            year,
            price,
            units_sold,
        }
    }

    /// Numeric value of a field, `None` for text fields.
    pub fn numeric(&self, field: SaleField) -> Option<f64> {
        match field {
            SaleField::Year => Some(self.year as f64),
            SaleField::Price => Some(self.price),
            SaleField::UnitsSold => Some(self.units_sold as f64),
            SaleField::CarBrand | SaleField::Model => None,
        }
    }

    /// Integer value of a field, `None` for text and decimal fields.
    pub fn integer(&self, field: SaleField) -> Option<i64> {
        match field {
            SaleField::Year => Some(self.year),
            SaleField::UnitsSold => Some(self.units_sold),
            SaleField::CarBrand | SaleField::Model | SaleField::Price => None,
        }
    }

    /// Grouping key for a field, `None` for the decimal price.
    pub fn group_key(&self, field: SaleField) -> Option<GroupKey> {
        match field {
            SaleField::CarBrand => Some(GroupKey::Text(self.car_brand.clone())),
            SaleField::Model => Some(GroupKey::Text(self.model.clone())),
            SaleField::Year => Some(GroupKey::Int(self.year)),
            SaleField::UnitsSold => Some(GroupKey::Int(self.units_sold)),
            SaleField::Price => None,
        }
    }
}

/// The five fixed fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleField {
    CarBrand,
    Model,
    Year,
    Price,
    UnitsSold,
}

impl SaleField {
    pub const ALL: [SaleField; 5] = [
        SaleField::CarBrand,
        SaleField::Model,
        SaleField::Year,
        SaleField::Price,
        SaleField::UnitsSold,
    ];

    /// Column name in the persisted table.
    pub fn column_name(self) -> &'static str {
        match self {
            SaleField::CarBrand => HEADER[0],
            SaleField::Model => HEADER[1],
            SaleField::Year => HEADER[2],
            SaleField::Price => HEADER[3],
            SaleField::UnitsSold => HEADER[4],
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, SaleField::Year | SaleField::Price | SaleField::UnitsSold)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, SaleField::Year | SaleField::UnitsSold)
    }

    pub fn is_groupable(self) -> bool {
        self != SaleField::Price
    }
}

impl fmt::Display for SaleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Value of a groupable field. Integer keys sort numerically, text keys
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Int(i64),
    Text(String),
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Text(value.to_string())
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey::Int(value)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Int(v) => write!(f, "{}", v),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}
