use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::model::{QUOTE_COLUMNS, QuoteRow};
use crate::normalize::parse_locale_number;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("no <table class=\"{0}\"> in page")]
    MissingTable(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    CellCount {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid selector `{0}`")]
    Selector(String),
}

/// Extract the quote rows from the board HTML.
///
/// The first `<tr>` of the table is the header. Every other row must carry
/// exactly [`QUOTE_COLUMNS`] `<td>` cells; `row` in errors is 1-based over
/// the data rows.
pub fn parse_quote_table(html: &str, table_class: &str) -> Result<Vec<QuoteRow>, TableError> {
    let document = Html::parse_document(html);
    let table_sel = selector(&format!("table.{table_class}"))?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| TableError::MissingTable(table_class.to_string()))?;

    table
        .select(&row_sel)
        .skip(1)
        .enumerate()
        .map(|(i, tr)| {
            let cells: Vec<String> = tr.select(&cell_sel).map(cell_text).collect();
            quote_from_cells(&cells).ok_or(TableError::CellCount {
                row: i + 1,
                found: cells.len(),
                expected: QUOTE_COLUMNS,
            })
        })
        .collect()
}

/// Build a row from the 16 board cells in source order.
pub fn quote_from_cells(cells: &[String]) -> Option<QuoteRow> {
    let [
        underlying,
        code,
        bid_size,
        bid,
        ask,
        ask_size,
        last,
        change,
        open,
        high,
        low,
        prev_close,
        volume,
        turnover,
        trades,
        time,
    ] = cells
    else {
        return None;
    };

    Some(QuoteRow {
        underlying: underlying.clone(),
        code: code.clone(),
        bid_size: parse_locale_number(bid_size),
        bid: parse_locale_number(bid),
        ask: parse_locale_number(ask),
        ask_size: parse_locale_number(ask_size),
        last: parse_locale_number(last),
        change: parse_locale_number(change),
        open: parse_locale_number(open),
        high: parse_locale_number(high),
        low: parse_locale_number(low),
        prev_close: parse_locale_number(prev_close),
        volume: parse_locale_number(volume),
        turnover: parse_locale_number(turnover),
        trades: parse_locale_number(trades),
        time: time.clone(),
    })
}

/// Concatenated text of the cell with each text node trimmed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

fn selector(css: &str) -> Result<Selector, TableError> {
    Selector::parse(css).map_err(|_| TableError::Selector(css.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &str) -> String {
        format!(
            r#"<html><body>
            <table class="otra"><tr><td>ignored</td></tr></table>
            <table class="tabla_cierre">
              <tr><th>Activo Subyacente</th><th>Especie</th></tr>
              {rows}
            </table></body></html>"#
        )
    }

    const GGAL_ROW: &str = "<tr><td>GGAL</td><td> GFGC2380OC </td><td>10</td>\
        <td>1.150,50</td><td>1.200</td><td>5</td><td><b>1.180</b>,00</td><td>-2,5</td>\
        <td>1.100</td><td>1.250</td><td>1.090</td><td>1.210</td><td>120</td>\
        <td>14.160.000</td><td>37</td><td>16:59:58</td></tr>";

    #[test]
    fn test_parses_rows() {
        let rows = parse_quote_table(&board(GGAL_ROW), "tabla_cierre").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.underlying, "GGAL");
        assert_eq!(row.code, "GFGC2380OC");
        assert_eq!(row.bid.value(), Some(1150.5));
        assert_eq!(row.last.value(), Some(1180.0));
        assert_eq!(row.change.value(), Some(-2.5));
        assert_eq!(row.turnover.value(), Some(14_160_000.0));
        assert_eq!(row.time, "16:59:58");
    }

    #[test]
    fn test_dash_cells_are_missing() {
        let row = GGAL_ROW.replace("<td>1.150,50</td>", "<td>-</td>");
        let rows = parse_quote_table(&board(&row), "tabla_cierre").unwrap();
        assert!(rows[0].bid.is_missing());
    }

    #[test]
    fn test_missing_table() {
        let err = parse_quote_table("<html><table></table></html>", "tabla_cierre").unwrap_err();
        assert_eq!(err, TableError::MissingTable("tabla_cierre".into()));
    }

    #[test]
    fn test_wrong_cell_count() {
        let rows = format!("{GGAL_ROW}<tr><td>GGAL</td><td>GFGC2480OC</td></tr>");
        let err = parse_quote_table(&board(&rows), "tabla_cierre").unwrap_err();
        assert_eq!(
            err,
            TableError::CellCount {
                row: 2,
                found: 2,
                expected: 16
            }
        );
    }
}
