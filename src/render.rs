/// HTML rendering for the listing page
///
/// Purely presentational: takes the page data and produces a document. All
/// dynamic text goes through `escape`.

use crate::filter::{AppliedFilters, MAX_PRICE_FIELD, MIN_PRICE_FIELD};
use crate::normalize::PRICE_COLUMN;
use crate::query::{ListingPage, DATASET_FIELD};
use crate::table::Row;

const STYLE: &str = "body{font-family:sans-serif;margin:1.5rem}\
table{border-collapse:collapse;margin-top:1rem}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:left}\
th{background:#f3f3f3}\
form .fields{display:flex;flex-wrap:wrap;gap:.5rem}\
form label{display:flex;flex-direction:column;font-size:.85rem}\
.applied{color:#555}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a full listing page from its parts.
pub fn render(
    columns: &[String],
    rows: &[Row],
    selected: &str,
    datasets: &[String],
    filters: &AppliedFilters,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Vehicle listings</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>Vehicle listings: {}</h1>\n", escape(selected)));

    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(&dataset_selector(selected, datasets));
    html.push_str("<div class=\"fields\">\n");
    html.push_str(&text_input(MIN_PRICE_FIELD, "Min price", filters));
    html.push_str(&text_input(MAX_PRICE_FIELD, "Max price", filters));
    for column in columns.iter().filter(|c| c.as_str() != PRICE_COLUMN) {
        html.push_str(&text_input(column, column, filters));
    }
    html.push_str("</div>\n<button type=\"submit\">Filter</button>\n</form>\n");

    if !filters.is_empty() {
        html.push_str("<p class=\"applied\">Applied filters: ");
        let applied: Vec<String> = filters
            .iter()
            .map(|(k, v)| format!("<strong>{}</strong> = {}", escape(k), escape(v)))
            .collect();
        html.push_str(&applied.join(", "));
        html.push_str("</p>\n");
    }

    html.push_str(&results_table(columns, rows));
    html.push_str("</body>\n</html>\n");
    html
}

/// Render the page produced by a listing query.
pub fn render_page(page: &ListingPage) -> String {
    render(
        &page.columns,
        &page.rows,
        &page.selected,
        &page.datasets,
        &page.filters,
    )
}

/// Minimal page for a failed request.
pub fn render_error(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to listings</a></p>\n\
         </body>\n</html>\n",
        title = escape(title),
        style = STYLE,
        message = escape(message),
    )
}

fn dataset_selector(selected: &str, datasets: &[String]) -> String {
    let mut html = format!(
        "<label>Dataset <select name=\"{0}\" onchange=\"this.form.submit()\">\n",
        DATASET_FIELD
    );
    for key in datasets {
        let marker = if key == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            escape(key),
            marker
        ));
    }
    html.push_str("</select></label>\n");
    html
}

fn text_input(name: &str, label: &str, filters: &AppliedFilters) -> String {
    format!(
        "<label>{} <input type=\"text\" name=\"{}\" value=\"{}\"></label>\n",
        escape(label),
        escape(name),
        escape(filters.get(name).unwrap_or(""))
    )
}

fn results_table(columns: &[String], rows: &[Row]) -> String {
    if rows.is_empty() {
        return "<p>No matching listings.</p>\n".to_string();
    }

    let mut html = String::from("<table>\n<thead><tr>");
    for column in columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for column in columns {
            let cell = row.get(column).map(|v| v.as_text()).unwrap_or("");
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnValue;
    use std::collections::HashMap;

    fn row(make: &str, price: &str) -> Row {
        let mut row = HashMap::new();
        row.insert("Make".to_string(), ColumnValue::from(make));
        row.insert("price".to_string(), ColumnValue::from(price));
        row
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Ford\" & 'Kia'</b>"), "&lt;b&gt;&quot;Ford&quot; &amp; &#39;Kia&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_render_page_contents() {
        let mut filters = AppliedFilters::new();
        filters.insert("min_price", "20000");
        filters.insert("Make", "tes");

        let html = render(
            &["Make".to_string(), "price".to_string()],
            &[row("Tesla S", "45000"), row("Ford <Focus>", "")],
            "ev.com",
            &["cars.com".to_string(), "ev.com".to_string()],
            &filters,
        );

        assert!(html.contains("<option value=\"ev.com\" selected>ev.com</option>"));
        assert!(html.contains("<option value=\"cars.com\">cars.com</option>"));
        assert!(html.contains("name=\"min_price\" value=\"20000\""));
        assert!(html.contains("name=\"max_price\" value=\"\""));
        assert!(html.contains("name=\"Make\" value=\"tes\""));
        assert!(!html.contains("name=\"price\""));
        assert!(html.contains("<th>Make</th><th>price</th>"));
        assert!(html.contains("<td>Tesla S</td><td>45000</td>"));
        assert!(html.contains("<td>Ford &lt;Focus&gt;</td><td></td>"));
        assert!(html.contains("Applied filters"));
    }

    #[test]
    fn test_render_empty_result() {
        let html = render(
            &["Make".to_string()],
            &[],
            "cars.com",
            &["cars.com".to_string()],
            &AppliedFilters::new(),
        );

        assert!(html.contains("No matching listings."));
        assert!(!html.contains("Applied filters"));
    }

    #[test]
    fn test_render_error() {
        let html = render_error("Dataset not found", "unknown dataset '<x>'");
        assert!(html.contains("<h1>Dataset not found</h1>"));
        assert!(html.contains("unknown dataset &#39;&lt;x&gt;&#39;"));
    }
}
