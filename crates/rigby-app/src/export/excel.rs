//! Excel export of the dashboard

use std::path::Path;

use rigby_domain::model::ExpenseCategory;
use rigby_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::app::Dashboard;

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the dashboard to an Excel file with Summary, Drivers and Loads sheets
pub fn export_dashboard(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, dashboard)?;

    let drivers_sheet = workbook.add_worksheet();
    write_drivers_sheet(drivers_sheet, dashboard)?;

    let loads_sheet = workbook.add_worksheet();
    write_loads_sheet(loads_sheet, dashboard)?;

    workbook.save(output_path).map_err(excel_err)?;
    tracing::info!(path = %output_path.display(), "dashboard exported");

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, dashboard: &Dashboard) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");
    let percent = Format::new().set_num_format("0.0\"%\"");
    let s = &dashboard.summary;

    sheet
        .write_string_with_format(0, 0, "Fleet Financials", &header_format)
        .map_err(excel_err)?;
    sheet.write_string(1, 0, "Period:").map_err(excel_err)?;
    sheet
        .write_string(1, 1, dashboard.period.label())
        .map_err(excel_err)?;
    sheet.write_string(2, 0, "As of:").map_err(excel_err)?;
    sheet
        .write_string(2, 1, dashboard.as_of.format("%Y-%m-%d").to_string())
        .map_err(excel_err)?;
    sheet.write_string(3, 0, "Factoring rate:").map_err(excel_err)?;
    sheet
        .write_number_with_format(3, 1, dashboard.factoring_rate_percent, &percent)
        .map_err(excel_err)?;

    let money_rows: [(&str, f64); 12] = [
        ("Total revenue", s.total_revenue),
        ("Factoring fee", s.factoring_fee),
        ("Net revenue", s.net_revenue),
        ("Fixed expenses", s.fixed_expenses),
        ("Variable expenses", s.variable_expenses),
        ("Driver pay", s.driver_pay),
        ("Total expenses", s.total_expenses),
        ("Net profit", s.net_profit),
        ("Avg RPM", s.avg_rpm),
        ("Avg CPM", s.avg_cpm),
        ("Fixed CPM", s.fixed_cpm),
        ("Variable CPM", s.variable_cpm),
    ];

    let mut row = 5;
    for (label, value) in money_rows {
        sheet.write_string(row, 0, label).map_err(excel_err)?;
        sheet
            .write_number_with_format(row, 1, value, &money)
            .map_err(excel_err)?;
        row += 1;
    }
    sheet.write_string(row, 0, "Profit per mile").map_err(excel_err)?;
    sheet
        .write_number_with_format(row, 1, s.profit_per_mile, &money)
        .map_err(excel_err)?;
    row += 1;
    sheet.write_string(row, 0, "Profit margin").map_err(excel_err)?;
    sheet
        .write_number_with_format(row, 1, s.profit_margin, &percent)
        .map_err(excel_err)?;
    row += 1;
    sheet.write_string(row, 0, "Total miles").map_err(excel_err)?;
    sheet
        .write_number(row, 1, s.total_miles as f64)
        .map_err(excel_err)?;
    row += 1;
    sheet.write_string(row, 0, "Loads").map_err(excel_err)?;
    sheet
        .write_number(row, 1, s.load_count as f64)
        .map_err(excel_err)?;

    sheet.set_column_width(0, 20).map_err(excel_err)?;
    sheet.set_column_width(1, 16).map_err(excel_err)?;

    Ok(())
}

fn write_drivers_sheet(sheet: &mut Worksheet, dashboard: &Dashboard) -> Result<()> {
    sheet.set_name("Drivers").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    let mut headers = vec![
        "Driver",
        "Loads",
        "Miles",
        "Revenue",
        "Factoring",
        "Driver Pay",
        "Fixed",
        "Variable",
        "Total Expenses",
        "Net Profit",
        "RPM",
        "Fixed CPM",
        "Variable CPM",
        "Total CPM",
        "Profit/Mile",
    ];
    let first_category_col = headers.len();
    headers.extend(ExpenseCategory::all().map(|c| c.label()));

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, d) in dashboard.drivers.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &d.driver_name).map_err(excel_err)?;
        sheet
            .write_number(row, 1, d.loads.len() as f64)
            .map_err(excel_err)?;
        sheet
            .write_number(row, 2, d.total_miles as f64)
            .map_err(excel_err)?;

        let values = [
            d.gross_revenue,
            d.factoring_fee,
            d.driver_pay,
            d.fixed_expenses,
            d.variable_expenses,
            d.total_expenses,
            d.net_profit,
            d.rpm,
            d.fixed_cpm,
            d.variable_cpm,
            d.total_cpm,
            d.profit_per_mile,
        ];
        for (offset, value) in values.into_iter().enumerate() {
            sheet
                .write_number_with_format(row, (3 + offset) as u16, value, &money)
                .map_err(excel_err)?;
        }

        for (offset, category) in ExpenseCategory::all().enumerate() {
            let amount = d.expenses.amount(category);
            if amount != 0.0 {
                sheet
                    .write_number_with_format(
                        row,
                        (first_category_col + offset) as u16,
                        amount,
                        &money,
                    )
                    .map_err(excel_err)?;
            }
        }
    }

    sheet.set_column_width(0, 22).map_err(excel_err)?;

    Ok(())
}

fn write_loads_sheet(sheet: &mut Worksheet, dashboard: &Dashboard) -> Result<()> {
    sheet.set_name("Loads").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    let headers = [
        "Load #",
        "Driver",
        "Pickup",
        "Dropoff",
        "Pickup Date",
        "Miles",
        "Gross",
        "Net",
        "Rate/Mile",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    let mut row = 1u32;
    for load in dashboard.drivers.iter().flat_map(|d| d.loads.iter()) {
        sheet.write_string(row, 0, &load.load_number).map_err(excel_err)?;
        sheet.write_string(row, 1, &load.driver_name).map_err(excel_err)?;
        sheet
            .write_string(row, 2, &load.pickup_location)
            .map_err(excel_err)?;
        sheet
            .write_string(row, 3, &load.dropoff_location)
            .map_err(excel_err)?;
        if let Some(date) = load.pickup_date {
            sheet
                .write_string(row, 4, date.format("%Y-%m-%d").to_string())
                .map_err(excel_err)?;
        }
        sheet
            .write_number(row, 5, f64::from(load.miles))
            .map_err(excel_err)?;
        sheet
            .write_number_with_format(row, 6, load.gross_amount, &money)
            .map_err(excel_err)?;
        sheet
            .write_number_with_format(row, 7, load.net_amount, &money)
            .map_err(excel_err)?;
        sheet
            .write_number_with_format(row, 8, load.rate_per_mile(), &money)
            .map_err(excel_err)?;
        row += 1;
    }

    sheet.set_column_width(0, 14).map_err(excel_err)?;
    sheet.set_column_width(2, 24).map_err(excel_err)?;
    sheet.set_column_width(3, 24).map_err(excel_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{build_dashboard, DashboardOptions};
    use crate::repository::Stores;
    use chrono::NaiveDate;
    use rigby_domain::model::{ExpenseEntry, Load};
    use rigby_domain::repository::{ExpenseRepository, LoadRepository};
    use rigby_types::Period;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempdir().unwrap();
        let stores = Stores::open_at(dir.path().join("data")).unwrap();
        stores
            .loads
            .insert_many(vec![Load {
                id: 0,
                load_number: "RC-1".to_string(),
                driver_name: "Dana Ruiz".to_string(),
                gross_amount: 2000.0,
                net_amount: 1956.0,
                miles: 800,
                pickup_location: "Dallas, TX".to_string(),
                dropoff_location: "Memphis, TN".to_string(),
                pickup_date: NaiveDate::from_ymd_opt(2024, 1, 5),
                dropoff_date: None,
                batch_id: None,
            }])
            .unwrap();
        stores
            .expenses
            .insert_many(vec![ExpenseEntry {
                id: 0,
                driver_name: "Dana Ruiz".to_string(),
                category: "fuel".to_string(),
                amount: 400.0,
                date: None,
                batch_id: None,
            }])
            .unwrap();

        let options = DashboardOptions::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
            .with_period(Period::All);
        let dashboard =
            build_dashboard(&stores.loads, &stores.expenses, &stores.drivers, &options).unwrap();

        let out = dir.path().join("dashboard.xlsx");
        export_dashboard(&dashboard, &out).unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }
}
