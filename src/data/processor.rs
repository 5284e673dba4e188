//! Data Processor Module
//! Converts between car-sale records and Polars DataFrames.

use super::record::{CarSale, SaleField};
use polars::prelude::*;
use std::sync::Arc;
use tracing::warn;

/// Handles record/frame conversion.
pub struct DataProcessor;

impl DataProcessor {
    /// Fixed schema of the persisted table.
    pub fn schema() -> SchemaRef {
        let fields = SaleField::ALL.iter().map(|f| {
            let dtype = if f.is_integer() {
                DataType::Int64
            } else if f.is_numeric() {
                DataType::Float64
            } else {
                DataType::String
            };
            Field::new(f.column_name().into(), dtype)
        });
        Arc::new(Schema::from_iter(fields))
    }

    /// Build a DataFrame from records, preserving order.
    pub fn to_frame(records: &[CarSale]) -> PolarsResult<DataFrame> {
        let brands: Vec<&str> = records.iter().map(|r| r.car_brand.as_str()).collect();
        let models: Vec<&str> = records.iter().map(|r| r.model.as_str()).collect();
        let years: Vec<i64> = records.iter().map(|r| r.year).collect();
        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        let units: Vec<i64> = records.iter().map(|r| r.units_sold).collect();

        DataFrame::new(vec![
            Column::new(SaleField::CarBrand.column_name().into(), brands),
            Column::new(SaleField::Model.column_name().into(), models),
            Column::new(SaleField::Year.column_name().into(), years),
            Column::new(SaleField::Price.column_name().into(), prices),
            Column::new(SaleField::UnitsSold.column_name().into(), units),
        ])
    }

    /// Extract records from a DataFrame in row order.
    ///
    /// Empty text cells become empty strings. Rows with an empty numeric cell
    /// are skipped.
    pub fn to_records(df: &DataFrame) -> PolarsResult<Vec<CarSale>> {
        let brands = df.column(SaleField::CarBrand.column_name())?.str()?;
        let models = df.column(SaleField::Model.column_name())?.str()?;
        let years = df.column(SaleField::Year.column_name())?.i64()?;
        let prices = df.column(SaleField::Price.column_name())?.f64()?;
        let units = df.column(SaleField::UnitsSold.column_name())?.i64()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            match (years.get(i), prices.get(i), units.get(i)) {
                (Some(year), Some(price), Some(units_sold)) => records.push(CarSale {
                    car_brand: brands.get(i).unwrap_or_default().to_string(),
                    model: models.get(i).unwrap_or_default().to_string(),
                    year,
                    price,
                    units_sold,
                }),
                _ => warn!(row = i, "skipping row with missing numeric value"),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_round_trip_keeps_order() {
        let records = vec![
            CarSale::new("Ford", "Focus", 2018, 15000.0, 12),
            CarSale::new("BMW", "X5", 2021, 62000.5, 4),
        ];
        let df = DataProcessor::to_frame(&records).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.schema().len(), 5);

        let back = DataProcessor::to_records(&df).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_rows_with_missing_numbers_are_skipped() {
        let df = DataFrame::new(vec![
            Column::new("Car_Brand".into(), [Some("Kia"), None]),
            Column::new("Model".into(), [Some("Rio"), Some("Soul")]),
            Column::new("Year".into(), [Some(2019i64), Some(2020)]),
            Column::new("Price".into(), [Some(9000.0f64), None]),
            Column::new("Units_Sold".into(), [Some(7i64), Some(1)]),
        ])
        .unwrap();

        let records = DataProcessor::to_records(&df).unwrap();
        assert_eq!(records, vec![CarSale::new("Kia", "Rio", 2019, 9000.0, 7)]);
    }

    #[test]
    fn test_frame_matches_schema() {
        let df = DataProcessor::to_frame(&[CarSale::new("A", "B", 2000, 1.0, 1)]).unwrap();
        let schema = DataProcessor::schema();
        for (name, dtype) in schema.iter() {
            assert_eq!(df.column(name.as_str()).unwrap().dtype(), dtype);
        }
    }
}
