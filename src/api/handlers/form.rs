use std::fmt::Write as _;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::analysis::{NO_PAIRS_NOTICE, SpreadReport};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::SpreadParams;
use crate::config::SpreadConfig;
use crate::visualize::{self, ChartLabels};

/// Parameter form plus one chart per selected spread.
pub async fn show_form(
    State(state): State<AppState>,
    params: Result<Query<SpreadParams>, QueryRejection>,
) -> (StatusCode, Html<String>) {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let e = ApiError::from(rejection);
            tracing::warn!(error = e.message(), "form parameters rejected");
            let page = render_page(&state.inner.settings.spread, Err(e.message()));
            return (e.status(), Html(page));
        }
    };
    let config = params.apply(state.inner.settings.spread);
    match super::run_pipeline(&state, &params).await {
        Ok(report) => (StatusCode::OK, Html(render_page(&config, Ok(&report)))),
        Err(e) => {
            tracing::warn!(error = e.message(), "form request failed");
            (e.status(), Html(render_page(&config, Err(e.message()))))
        }
    }
}

pub fn render_page(config: &SpreadConfig, result: Result<&SpreadReport, &str>) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\">\
         <title>Bull Spread</title>\
         <style>body{font-family:sans-serif;margin:2em;max-width:860px}\
         label{display:block;margin:.5em 0}.error{color:#b00}\
         table{border-collapse:collapse}td{padding:0 1em 0 0}</style></head>\n<body>\n",
    );
    html.push_str("<h1>Bull Spread</h1>\n<form method=\"get\" action=\"/\">\n");
    let _ = writeln!(
        html,
        r#"<label>Lotes <input type="number" name="lot_size" min="1" step="1" value="{}"></label>"#,
        config.lot_size
    );
    let _ = writeln!(
        html,
        r#"<label>Diferencia porcentual máxima <input type="number" name="max_percentage_difference" min="0" max="100" step="1" value="{}"></label>"#,
        config.max_percentage_difference
    );
    let _ = writeln!(
        html,
        r#"<label>Multiplicador del precio actual <input type="number" name="spot_multiplier" min="1" max="2" step="0.01" value="{}"></label>"#,
        config.spot_multiplier
    );
    html.push_str("<button type=\"submit\">Calcular</button>\n</form>\n");

    match result {
        Err(message) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(message));
        }
        Ok(report) if report.is_empty() => {
            let _ = writeln!(html, "<p>{NO_PAIRS_NOTICE}</p>");
        }
        Ok(report) => {
            let _ = writeln!(
                html,
                "<p>{} of {} candidate pairs selected from {} quotes.</p>",
                report.spreads.len(),
                report.candidates,
                report.quotes
            );
            for entry in &report.spreads {
                let labels = ChartLabels::for_pair(&entry.pair, entry.number);
                let _ = writeln!(html, "<section>\n<h2>{}</h2>", escape_html(&labels.subtitle));
                match &entry.curve {
                    Some(curve) => {
                        html.push_str(&visualize::render_svg(curve, &labels));
                        let _ = writeln!(
                            html,
                            "<table><tr><td>Compra {} @ {:.2}</td><td>Venta {} @ {:.2}</td>\
                             <td>Máx. ganancia {:+.0}</td><td>Máx. pérdida {:+.0}</td></tr></table>",
                            escape_html(&entry.buy.code),
                            entry.buy.price,
                            escape_html(&entry.sell.code),
                            entry.sell.price,
                            curve.max_profit(),
                            curve.max_loss(),
                        );
                    }
                    None => {
                        let _ = writeln!(html, "<p>{}: sin último precio</p>", escape_html(&labels.title));
                    }
                }
                html.push_str("</section>\n");
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
