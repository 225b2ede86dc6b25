//! Minimal HTML pages for browsing the data without a client.

use core_types::{Metric, PriceSeries};
use std::fmt::Write;

const COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// The landing page, linking to the preview and the analytics endpoints.
pub fn render_index() -> String {
    let mut links = String::from("<li><a href='/data'>/data</a> (dataset as an HTML table)</li>");
    for metric in Metric::ALL {
        let _ = write!(
            links,
            "<li><a href='/api/analytics/{m}'>/api/analytics/{m}</a></li>",
            m = metric
        );
    }
    page("Price history", &format!("<ul>{links}</ul>"))
}

/// Renders every record of `series` as one table row.
pub fn render_price_table(series: &PriceSeries) -> String {
    let mut table = String::from("<table class=\"dataframe\"><thead><tr>");
    for column in COLUMNS {
        let _ = write!(table, "<th>{column}</th>");
    }
    table.push_str("</tr></thead><tbody>");

    for r in series {
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.high,
            r.low,
            r.close,
            r.volume
        );
    }
    table.push_str("</tbody></table>");

    page("Dataset", &table)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><meta charset='utf-8'><title>{title}</title></head><body>{body}</body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::PriceRecord;

    #[test]
    fn test_table_has_one_row_per_record() {
        let series = PriceSeries::new(vec![
            PriceRecord {
                date: NaiveDate::from_ymd_opt(2017, 11, 10).unwrap(),
                open: 101.5,
                high: 103.0,
                low: 100.25,
                close: 102.0,
                volume: 8_250_000.0,
            },
            PriceRecord::from_close(NaiveDate::from_ymd_opt(2017, 11, 13).unwrap(), 99.0),
        ])
        .unwrap();

        let html = render_price_table(&series);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<th>Close</th>"));
        assert!(html.contains(
            "<td>2017-11-10</td><td>101.5</td><td>103</td><td>100.25</td><td>102</td><td>8250000</td>"
        ));
    }

    #[test]
    fn test_index_links_every_metric() {
        let html = render_index();
        assert!(html.contains("/data"));
        for metric in Metric::ALL {
            assert!(html.contains(&format!("/api/analytics/{metric}")));
        }
    }
}
