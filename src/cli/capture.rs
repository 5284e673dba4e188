//! Interactive capture of new car-sale records.

use super::console::Console;
use crate::data::{CarSale, SaleField};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Brand-prompt answer that ends capture (case-insensitive).
pub const DONE_KEYWORD: &str = "done";

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("invalid {field} value {input:?}")]
    InvalidNumericInput { field: SaleField, input: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parse one numeric field of an entry.
pub fn parse_field<T: FromStr>(field: SaleField, input: &str) -> Result<T, CaptureError> {
    input
        .trim()
        .parse()
        .map_err(|_| CaptureError::InvalidNumericInput {
            field,
            input: input.to_string(),
        })
}

/// Outcome of prompting for a single entry.
enum Entry {
    Complete(CarSale),
    Finished,
}

/// Prompt for records until the user types `done` or input ends.
///
/// An entry with a non-numeric Year, Price or Units Sold is discarded and
/// capture restarts at the brand prompt; earlier entries are kept.
pub fn capture_records<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Vec<CarSale>> {
    console.say("\n🆕 Enter new car sales data. Type 'done' at any time to stop.")?;

    let mut records = Vec::new();
    loop {
        match capture_entry(console) {
            Ok(Entry::Complete(sale)) => records.push(sale),
            Ok(Entry::Finished) => break,
            Err(CaptureError::InvalidNumericInput { field, input }) => {
                tracing::debug!(%field, %input, "discarding entry");
                console.say(
                    "❌ Invalid input. Please enter valid numerical values for Year, Price, and Units Sold.",
                )?;
            }
            Err(CaptureError::Io(e)) => return Err(e),
        }
    }
    Ok(records)
}

fn capture_entry<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Entry, CaptureError> {
    let Some(brand) = console.ask("Enter Car Brand (or 'done' to finish): ")? else {
        return Ok(Entry::Finished);
    };
    if brand.eq_ignore_ascii_case(DONE_KEYWORD) {
        return Ok(Entry::Finished);
    }

    let Some(model) = console.ask("Enter Model: ")? else {
        return Ok(Entry::Finished);
    };

    let Some(year) = console.ask("Enter Year: ")? else {
        return Ok(Entry::Finished);
    };
    let year = parse_field(SaleField::Year, &year)?;

    let Some(price) = console.ask("Enter Price: ")? else {
        return Ok(Entry::Finished);
    };
    let price = parse_field(SaleField::Price, &price)?;

    let Some(units_sold) = console.ask("Enter Units Sold: ")? else {
        return Ok(Entry::Finished);
    };
    let units_sold = parse_field(SaleField::UnitsSold, &units_sold)?;

    Ok(Entry::Complete(CarSale::new(brand, model, year, price, units_sold)))
}
