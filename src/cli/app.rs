//! Car Sales Main Application
//! Menu loop dispatching to the add, view, analyze and visualize commands.

use super::capture::capture_records;
use super::console::Console;
use super::menu::{MenuState, MENU_OPTIONS};
use crate::charts::{ChartError, ChartRenderer, ChartSpec};
use crate::config::AppConfig;
use crate::data::{DatasetError, DatasetManager, SaleField};
use crate::stats::Aggregate;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Console error: {0}")]
    Io(#[from] io::Error),
}

/// Interactive session over a console.
pub struct SalesApp<R, W> {
    manager: DatasetManager,
    renderer: ChartRenderer,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> SalesApp<R, W> {
    pub fn new(config: &AppConfig, console: Console<R, W>) -> Self {
        Self {
            manager: DatasetManager::new(&config.data_file),
            renderer: ChartRenderer::new(
                &config.chart_dir,
                config.chart_width,
                config.chart_height,
                config.open_charts,
            ),
            console,
        }
    }

    #[cfg(test)]
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::MainMenu;
        while !state.is_terminal() {
            state = match state {
                MenuState::MainMenu => self.main_menu()?,
                command => {
                    self.dispatch(command)?;
                    command.next()
                }
            };
        }
        Ok(())
    }

    fn main_menu(&mut self) -> io::Result<MenuState> {
        self.console.say("\n🚗 Car Sales Analysis Software")?;
        for option in MENU_OPTIONS {
            self.console.say(option)?;
        }

        let Some(choice) = self.console.ask("Enter your choice (1-5): ")? else {
            info!("input closed, leaving menu");
            return Ok(MenuState::Exit);
        };

        match MenuState::from_choice(&choice) {
            Some(MenuState::Exit) => {
                self.console
                    .say("👋 Thank you for using the software. Goodbye!")?;
                Ok(MenuState::Exit)
            }
            Some(state) => Ok(state),
            None => {
                self.console
                    .say("❌ Invalid choice. Please enter a number between 1 and 5.")?;
                Ok(MenuState::MainMenu)
            }
        }
    }

    /// Run one command. Dataset and chart failures are reported on the
    /// console; only console failures propagate.
    fn dispatch(&mut self, state: MenuState) -> io::Result<()> {
        let result = match state {
            MenuState::AddingData => self.add_data(),
            MenuState::Viewing => self.view_data(),
            MenuState::Analyzing => self.analyze_data(),
            MenuState::Visualizing => self.visualize_data(),
            MenuState::MainMenu | MenuState::Exit => Ok(()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(AppError::Io(e)) => Err(e),
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, error: &AppError) -> io::Result<()> {
        match error {
            AppError::Dataset(DatasetError::MissingDataset(_)) => self
                .console
                .say("⚠ No dataset found. Please add data first."),
            AppError::Dataset(DatasetError::EmptyEntry) => self.console.say("⚠ No data entered."),
            other => {
                warn!(error = %other, "command failed");
                self.console.say(format!("❌ {}", other))
            }
        }
    }

    /// Capture new records and append them to the dataset.
    pub fn add_data(&mut self) -> Result<(), AppError> {
        let records = capture_records(&mut self.console)?;
        let total = self.manager.append(&records)?;
        info!(
            path = %self.manager.file_path().display(),
            added = records.len(),
            total,
            "saved records"
        );
        self.console.say("✅ Data has been successfully saved!")?;
        Ok(())
    }

    /// Print the persisted table.
    pub fn view_data(&mut self) -> Result<(), AppError> {
        let df = self.manager.load_frame()?;
        self.console.say("\n📊 Current Dataset:")?;
        self.console.say(&df)?;
        Ok(())
    }

    /// Print total units sold and average price per brand.
    pub fn analyze_data(&mut self) -> Result<(), AppError> {
        let units = self
            .manager
            .aggregate_sum(SaleField::UnitsSold, SaleField::CarBrand)?;
        let prices = self
            .manager
            .aggregate_mean(SaleField::Price, SaleField::CarBrand)?;

        self.console.say("\n📈 Analysis Results:")?;
        self.console.say("Total Units Sold by Brand:")?;
        self.console
            .say(format_aggregate(SaleField::CarBrand, &units))?;
        self.console.say("\nAverage Car Price by Brand:")?;
        self.console
            .say(format_aggregate(SaleField::CarBrand, &prices))?;
        Ok(())
    }

    /// Render and open the three charts in order.
    pub fn visualize_data(&mut self) -> Result<(), AppError> {
        for spec in ChartSpec::ALL {
            let projection = self.manager.project(spec)?;
            if projection.is_empty() {
                warn!(chart = spec.file_stem(), "no rows to plot");
            }
            let path = self.renderer.render(&projection)?;
            self.console
                .say(format!("🖼 {} saved to {}", spec.title(), path.display()))?;
        }
        Ok(())
    }
}

/// Two-column text table of an aggregate, headed by the grouping column.
/// Integer totals print exactly, decimal values with two places.
pub fn format_aggregate(group_by: SaleField, aggregate: &Aggregate) -> String {
    let rows: Vec<(String, String)> = aggregate
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let key_width = rows
        .iter()
        .map(|(k, _)| k.chars().count())
        .chain(std::iter::once(group_by.column_name().len()))
        .max()
        .unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    let mut lines = vec![group_by.column_name().to_string()];
    for (key, value) in rows {
        lines.push(format!(
            "{:<kw$}    {:>vw$}",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GroupKey;
    use crate::stats::AggregateValue;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn session(input: &str) -> (TempDir, SalesApp<Cursor<String>, Vec<u8>>) {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_file: dir.path().join("car_sales.csv"),
            chart_dir: dir.path().join("charts"),
            open_charts: false,
            ..AppConfig::default()
        };
        let console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let app = SalesApp::new(&config, console);
        (dir, app)
    }

    fn output(app: &SalesApp<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8_lossy(app.console().output()).to_string()
    }

    #[test]
    fn test_exit_ends_session_with_goodbye() {
        let (_dir, mut app) = session("5\n");
        app.run().unwrap();
        let out = output(&app);
        assert!(out.contains("🚗 Car Sales Analysis Software"));
        assert!(out.contains("👋 Thank you for using the software. Goodbye!"));
    }

    #[test]
    fn test_invalid_choice_returns_to_menu() {
        let (_dir, mut app) = session("9\n5\n");
        app.run().unwrap();
        let out = output(&app);
        assert!(out.contains("❌ Invalid choice. Please enter a number between 1 and 5."));
        assert_eq!(out.matches("🚗 Car Sales Analysis Software").count(), 2);
    }

    #[test]
    fn test_commands_without_dataset_warn_and_continue() {
        let (dir, mut app) = session("2\n3\n4\n5\n");
        app.run().unwrap();
        let out = output(&app);
        assert_eq!(out.matches("⚠ No dataset found. Please add data first.").count(), 3);
        assert!(out.contains("Goodbye!"));
        assert!(!dir.path().join("charts").exists());
    }

    #[test]
    fn test_add_with_no_entries_writes_nothing() {
        let (dir, mut app) = session("1\ndone\n5\n");
        app.run().unwrap();
        assert!(output(&app).contains("⚠ No data entered."));
        assert!(!dir.path().join("car_sales.csv").exists());
    }

    #[test]
    fn test_add_keeps_valid_entries_around_invalid_one() {
        let input = "1\n\
                     A\nX1\n2020\n100\n10\n\
                     B\nY1\nlast year\n\
                     A\nX2\n2021\n200\n20\n\
                     done\n\
                     3\n5\n";
        let (dir, mut app) = session(input);
        app.run().unwrap();

        let out = output(&app);
        assert!(out.contains("❌ Invalid input."));
        assert!(out.contains("✅ Data has been successfully saved!"));
        assert!(out.contains("📈 Analysis Results:"));

        let manager = DatasetManager::new(dir.path().join("car_sales.csv"));
        let dataset = manager.load().unwrap();
        assert_eq!(dataset.records().len(), 2);
        assert_eq!(dataset.records()[1].model, "X2");
    }

    #[test]
    fn test_view_prints_table() {
        let (_dir, mut app) = session("1\nSubaru\nOutback\n2023\n35000\n8\ndone\n2\n5\n");
        app.run().unwrap();
        let out = output(&app);
        assert!(out.contains("📊 Current Dataset:"));
        assert!(out.contains("Subaru"));
        assert!(out.contains("Outback"));
    }

    #[test]
    fn test_end_of_input_leaves_menu() {
        let (_dir, mut app) = session("");
        app.run().unwrap();
        assert!(!output(&app).contains("Goodbye!"));
    }

    #[test]
    fn test_analyze_prints_totals_and_averages_per_brand() {
        let input = "1\n\
                     A\nX1\n2020\n100\n10\n\
                     A\nX2\n2021\n200\n20\n\
                     B\nY1\n2020\n80\n5\n\
                     done\n\
                     3\n5\n";
        let (_dir, mut app) = session(input);
        app.run().unwrap();

        let out = output(&app);
        let units = "Total Units Sold by Brand:\nCar_Brand\nA            30\nB             5\n";
        let prices =
            "Average Car Price by Brand:\nCar_Brand\nA            150.00\nB             80.00\n";
        assert!(out.contains(units), "missing unit totals in:\n{}", out);
        assert!(out.contains(prices), "missing average prices in:\n{}", out);
        assert!(out.find(units).unwrap() < out.find(prices).unwrap());
    }

    #[test]
    fn test_analyze_prints_large_unit_totals_exactly() {
        let input = "1\n\
                     A\nX1\n2020\n100\n9007199254740993\n\
                     A\nX2\n2021\n100\n1\n\
                     done\n\
                     3\n5\n";
        let (_dir, mut app) = session(input);
        app.run().unwrap();
        assert!(output(&app).contains("A            9007199254740994\n"));
    }

    #[test]
    fn test_visualize_writes_three_charts_in_order() {
        let input = "1\n\
                     Toyota\nCamry\n2021\n25000\n10\n\
                     Ford\nF-150\n2020\n40000\n7\n\
                     done\n\
                     4\n5\n";
        let (dir, mut app) = session(input);
        app.run().unwrap();

        let out = output(&app);
        let charts = dir.path().join("charts");
        let mut last = 0;
        for spec in ChartSpec::ALL {
            let path = charts.join(format!("{}.png", spec.file_stem()));
            assert!(path.is_file(), "{} was not written", path.display());

            let line = format!("🖼 {} saved to {}", spec.title(), path.display());
            let pos = out.find(&line).unwrap_or_else(|| panic!("missing `{}` in:\n{}", line, out));
            assert!(pos >= last);
            last = pos;
        }
        assert!(!out.contains("❌"));
    }

    #[test]
    fn test_format_aggregate_aligns_columns() {
        let aggregate: Aggregate = [
            (GroupKey::from("A"), AggregateValue::Int(30)),
            (GroupKey::from("Bmw"), AggregateValue::Int(5)),
        ]
        .into_iter()
        .collect();
        let table = format_aggregate(SaleField::CarBrand, &aggregate);
        assert_eq!(table, "Car_Brand\nA            30\nBmw           5");

        let means: Aggregate = [(GroupKey::from("A"), AggregateValue::Float(150.0))]
            .into_iter()
            .collect();
        assert_eq!(
            format_aggregate(SaleField::CarBrand, &means),
            "Car_Brand\nA            150.00"
        );
    }
}
