//! Countries table driven from the command line.
//!
//! Prints each page as plain text while replaying a few clicks: sort by
//! population, select some rows, delete them through the toolbar action.
//! Logs go to `countries.log`.

use std::fs::File;
use std::sync::{Arc, OnceLock};

use datatable::prelude::*;
use datatable::{CellPadding, TableView};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone)]
struct Country {
    name: String,
    last_name: String,
    code: String,
    population: i64,
    size: i64,
}

impl Country {
    fn new(name: &str, code: &str, population: i64, size: i64, last_name: &str) -> Self {
        Self {
            name: name.to_string(),
            last_name: last_name.to_string(),
            code: code.to_string(),
            population,
            size,
        }
    }

    fn density(&self) -> f64 {
        self.population as f64 / self.size as f64
    }

    fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.name)
    }
}

impl Row for Country {
    fn field(&self, id: &str) -> Option<Value> {
        match id {
            "name" => Some(self.name.as_str().into()),
            "lastName" => Some(self.last_name.as_str().into()),
            "code" => Some(self.code.as_str().into()),
            "population" => Some(self.population.into()),
            "size" => Some(self.size.into()),
            "density" => Some(self.density().into()),
            _ => None,
        }
    }
}

fn countries() -> Vec<Country> {
    vec![
        Country::new("India", "IN", 1_324_171_354, 3_287_263, "R"),
        Country::new("China", "CN", 1_403_500_365, 9_596_961, "X"),
        Country::new("Italy", "IT", 60_483_973, 301_340, "R"),
        Country::new("United States", "US", 327_167_434, 9_833_520, "F"),
        Country::new("Canada", "CA", 37_602_103, 9_984_670, "X"),
        Country::new("Australia", "AU", 25_475_400, 7_692_024, "Z"),
        Country::new("Germany", "DE", 83_019_200, 357_578, "T"),
        Country::new("Ireland", "IE", 4_857_000, 70_273, "R"),
        Country::new("Mexico", "MX", 126_577_691, 1_972_550, "N"),
        Country::new("Japan", "JP", 126_317_000, 377_973, "Q"),
        Country::new("France", "FR", 67_022_000, 640_679, "U"),
        Country::new("United Kingdom", "GB", 67_545_757, 242_495, "F"),
        Country::new("Russia", "RU", 146_793_744, 17_098_246, "I"),
        Country::new("Nigeria", "NG", 200_962_417, 923_768, "M"),
        Country::new("Brazil", "BR", 210_147_125, 8_515_767, "Y"),
    ]
}

fn columns() -> Vec<Column<Country>> {
    vec![
        Column::new("name", "Name")
            .formatter(Country::display_name)
            .comparator(|a: &Country, b: &Country| a.display_name().cmp(&b.display_name()))
            .default_sort(SortDirection::Asc),
        Column::new("code", "ISO Code").unsortable(),
        Column::new("population", "Population").numeric(),
        Column::new("size", "Size (km²)").numeric(),
        Column::new("density", "Density")
            .numeric()
            .padding(CellPadding::None)
            .formatter(|c: &Country| format!("{:.2}", c.density())),
    ]
}

fn print_view(table: &DataTable<Country>, view: &TableView<Country>) {
    let headers: Vec<String> = table
        .headers()
        .iter()
        .map(|h| match (h.active, h.direction) {
            (true, SortDirection::Asc) => format!("{} ^", h.label),
            (true, SortDirection::Desc) => format!("{} v", h.label),
            (false, _) => h.label.clone(),
        })
        .collect();
    println!("    {}", headers.join(" | "));

    for row in &view.rows {
        let mark = match (row.disabled, row.selected) {
            (true, _) => "[-]",
            (false, true) => "[x]",
            (false, false) => "[ ]",
        };
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.cell_text(&row.row))
            .collect();
        println!("{} {}", mark, cells.join(" | "));
    }
    for _ in 0..view.padding {
        println!();
    }
    if view.is_empty_placeholder() {
        println!("    No rows");
    }
    println!("    {}", table.page_info().label());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("countries.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let handle: Arc<OnceLock<DataTable<Country>>> = Arc::new(OnceLock::new());
    let delete_handle = Arc::clone(&handle);

    let options = TableOptions::default()
        .with_selection(true)
        .with_selection_color(datatable::SelectionColor::Primary)
        .with_sorting(true)
        .with_paging(true)
        .with_show_empty_rows(true)
        .with_dense(true);

    let config = TableConfig::new(columns())
        .primary_key("code")
        .title("Countries")
        .options(options)
        .disabled(|c: &Country| c.code == "US")
        .detail_panel(|c: &Country| c.name.clone())
        .on_selection_change(|rows: &[Country]| {
            let codes: Vec<&str> = rows.iter().map(|c| c.code.as_str()).collect();
            println!("selection: {:?}", codes);
        })
        .action(SelectionAction::new("Delete", "delete", move |rows: &[Country]| {
            let Some(table) = delete_handle.get() else {
                return;
            };
            let remaining: Vec<Country> = table
                .data()
                .iter()
                .filter(|c| !rows.iter().any(|r| r.code == c.code))
                .cloned()
                .collect();
            table.set_data(remaining);
        }))
        .action(SelectionAction::new("Archive", "archive", |rows: &[Country]| {
            println!("archive these: {} rows", rows.len());
        }));

    let table = DataTable::with_data(config, countries())?;
    let table = handle.get_or_init(|| table);

    println!("== initial");
    print_view(table, &table.view());

    table.dispatch(TableAction::SortBy("population".into()))?;
    table.dispatch(TableAction::SortBy("population".into()))?;
    println!("== by population, descending");
    print_view(table, &table.view());

    table.dispatch(TableAction::ToggleRow(RowKey::from("CN")))?;
    table.dispatch(TableAction::ToggleRow(RowKey::from("IN")))?;
    table.dispatch(TableAction::SetPage(1))?;
    println!("== page 2");
    print_view(table, &table.view());

    let expanded = RowKey::from("BR");
    table.dispatch(TableAction::ToggleExpanded(expanded.clone()))?;
    if let Some(detail) = table.detail(&expanded) {
        println!("detail of {}: {}", expanded, detail);
    }

    table.dispatch(TableAction::RunAction("Archive".into()))?;
    table.dispatch(TableAction::RunAction("Delete".into()))?;
    println!("== after delete");
    print_view(table, &table.view());

    Ok(())
}
