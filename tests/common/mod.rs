#![allow(dead_code)]

use std::collections::HashMap;

use bull_spread::enrich;
use bull_spread::model::{EnrichedRow, Num, QuoteRow};

// ── Rows ────────────────────────────────────────────────────────────

pub fn quote(underlying: &str, code: &str, last: Option<f64>) -> QuoteRow {
    QuoteRow {
        underlying: underlying.into(),
        code: code.into(),
        bid_size: Num::missing(),
        bid: Num::missing(),
        ask: Num::missing(),
        ask_size: Num::missing(),
        last: last.into(),
        change: Num::missing(),
        open: Num::missing(),
        high: Num::missing(),
        low: Num::missing(),
        prev_close: Num::missing(),
        volume: Num::missing(),
        turnover: Num::missing(),
        trades: Num::missing(),
        time: "17:00".into(),
    }
}

/// Enrich `(underlying, code, last)` rows against `spots`.
pub fn rows(
    specs: &[(&str, &str, Option<f64>)],
    spots: &[(&str, f64)],
    spot_multiplier: f64,
) -> Vec<EnrichedRow> {
    let quotes = specs
        .iter()
        .map(|(u, c, last)| quote(u, c, *last))
        .collect();
    let spots: HashMap<String, Num> = spots
        .iter()
        .map(|(s, p)| (s.to_string(), Num::new(*p)))
        .collect();
    enrich::enrich(quotes, &spots, spot_multiplier).unwrap()
}

// ── HTML ────────────────────────────────────────────────────────────

/// A board page with one 16-cell row per `(underlying, code, last)`.
pub fn board_html(specs: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (underlying, code, last) in specs {
        body.push_str(&format!(
            "<tr><td>{underlying}</td><td>{code}</td><td>10</td><td>-</td><td>-</td>\
             <td>5</td><td>{last}</td><td>0,00</td><td>{last}</td><td>{last}</td>\
             <td>{last}</td><td>{last}</td><td>1.000</td><td>8.000,00</td><td>3</td>\
             <td>16:59:00</td></tr>\n"
        ));
    }
    format!(
        "<html><body><table class=\"tabla_cierre\">\n\
         <tr><th>Activo Subyacente</th><th>Especie</th><th>Último</th></tr>\n\
         {body}</table></body></html>"
    )
}

/// Two calls on GGAL, strikes 100/110, last 8/3 (a textbook spread).
pub fn simple_board() -> String {
    board_html(&[
        ("GGAL", "GFGC100OC", "8,00"),
        ("GGAL", "GFGC110OC", "3,00"),
    ])
}
