use crate::domain::comparables::{ComparableProperty, ListingStatus};
use crate::domain::metrics::MarketMetrics;
use crate::domain::property::PropertyRecord;
use crate::domain::valuation::Valuation;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

/// Builds the downloadable valuation report: one worksheet with the
/// adjustment breakdown, one with the comparables.
pub fn export_valuation_xlsx(
    record: &PropertyRecord,
    valuation: &Valuation,
    comparables: &[ComparableProperty],
    metrics: Option<&MarketMetrics>,
) -> ResultResp {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Valuation")
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {}", e)))?;

    sheet
        .write_string(0, 0, "Property")
        .and_then(|s| s.write_string(0, 1, record.address.as_str()))
        .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

    let mut write_label_value = |row: u32, label: &str, value: f64| {
        sheet
            .write_string(row, 0, label)
            .and_then(|s| s.write_number(row, 1, value))
            .map(|_| ())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write '{}': {}", label, e)))
    };

    write_label_value(1, "Municipal assessment", valuation.base_value as f64)?;
    write_label_value(2, "Roof adjustment", valuation.roof_adjustment as f64)?;
    write_label_value(3, "Windows adjustment", valuation.windows_adjustment as f64)?;
    write_label_value(4, "Flooring adjustment", valuation.flooring_adjustment as f64)?;
    write_label_value(5, "Bathroom adjustment", valuation.bathroom_adjustment as f64)?;
    write_label_value(6, "Kitchen adjustment", valuation.kitchen_adjustment as f64)?;
    write_label_value(7, "Estimated value", valuation.final_value as f64)?;
    write_label_value(8, "Range low", valuation.lower_range as f64)?;
    write_label_value(9, "Range high", valuation.upper_range as f64)?;

    if let Some(metrics) = metrics {
        sheet
            .write_string(11, 0, "Average comparable price")
            .and_then(|s| s.write_number(11, 1, metrics.avg_price as f64))
            .and_then(|s| s.write_string(12, 0, "Average price per sq ft"))
            .and_then(|s| s.write_number(12, 1, metrics.avg_price_per_sqft as f64))
            .and_then(|s| s.write_string(13, 0, "Market trend"))
            .and_then(|s| s.write_string(13, 1, metrics.market_trend.label()))
            .and_then(|s| s.write_string(14, 0, "Confidence"))
            .and_then(|s| s.write_string(14, 1, metrics.confidence.label()))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write metrics: {}", e)))?;
    } else {
        sheet
            .write_string(11, 0, "Market summary")
            .and_then(|s| s.write_string(11, 1, "Insufficient market data"))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write metrics: {}", e)))?;
    }

    let comps_sheet = workbook.add_worksheet();
    comps_sheet
        .set_name("Comparables")
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {}", e)))?;

    let headers = [
        "Address",
        "Price",
        "Status",
        "Days on Market",
        "Sold",
        "Beds",
        "Baths",
        "Sq Ft",
    ];
    for (col, header) in headers.iter().enumerate() {
        comps_sheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, comp) in comparables.iter().enumerate() {
        let r = (i + 1) as u32;

        comps_sheet
            .write_string(r, 0, comp.address.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

        comps_sheet
            .write_number(r, 1, comp.price as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;

        comps_sheet
            .write_string(r, 2, comp.status.label())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write status: {}", e)))?;

        match &comp.status {
            ListingStatus::Listed { days_on_market } => {
                comps_sheet
                    .write_number(r, 3, *days_on_market as f64)
                    .map_err(|e| {
                        ServerError::XlsxError(format!("Failed to write days on market: {}", e))
                    })?;
            }
            ListingStatus::Sold { sold_date } => {
                comps_sheet
                    .write_string(r, 4, sold_date.as_str())
                    .map_err(|e| {
                        ServerError::XlsxError(format!("Failed to write sold date: {}", e))
                    })?;
            }
        }

        comps_sheet
            .write_number(r, 5, comp.bedrooms as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write bedrooms: {}", e)))?;

        comps_sheet
            .write_number(r, 6, comp.bathrooms)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write bathrooms: {}", e)))?;

        comps_sheet
            .write_number(r, 7, comp.square_feet as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write square feet: {}", e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to build workbook: {}", e)))?;

    xlsx_response(buffer, "valuation_report.xlsx")
}
