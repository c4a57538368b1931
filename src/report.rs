use serde_json::json;

use crate::{building::Building, series::DailySeries, summary_scraper::Availability};

const STYLE: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f5f5f5; color: #333; padding: 20px; max-width: 1100px; margin: 0 auto; }
h1 { font-size: 1.8em; margin-bottom: 4px; }
.subtitle { color: #888; margin-bottom: 24px; font-size: 0.95em; }
.cards { display: flex; gap: 16px; margin-bottom: 32px; flex-wrap: wrap; }
.card { background: #fff; border-radius: 8px; padding: 20px; flex: 1; min-width: 200px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.card h3 { margin-bottom: 8px; font-size: 1.1em; }
.card .big { font-size: 2em; font-weight: bold; }
.card .unit { color: #888; font-size: 0.9em; }
.chart-container { background: #fff; border-radius: 8px; padding: 20px; margin-bottom: 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.chart-container h2 { margin-bottom: 12px; font-size: 1.2em; }
table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1); margin-bottom: 24px; }
th, td { padding: 10px 14px; text-align: left; border-bottom: 1px solid #eee; }
th { background: #fafafa; font-weight: 600; font-size: 0.9em; }
details { margin-bottom: 24px; }
summary { cursor: pointer; font-weight: 600; font-size: 1.1em; margin-bottom: 8px; }
footer { text-align: center; color: #aaa; font-size: 0.85em; margin-top: 32px; }"#;

const TOTAL_PALETTE: (&str, &str) = ("#2ecc71", "rgba(46,204,113,0.1)");

fn palette(building: Building) -> (&'static str, &'static str) {
    match building {
        Building::Scala => ("#e74c3c", "rgba(231,76,60,0.1)"),
        Building::Jakub => ("#3498db", "rgba(52,152,219,0.1)"),
    }
}

/// Render the whole report document from an aggregated series. Pure; the
/// caller decides where the artifact lands.
pub fn render(series: &DailySeries) -> String {
    let updated = series
        .latest
        .map(|date| date.to_string())
        .unwrap_or_else(|| "&mdash;".to_owned());

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"cs\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>ScalaWatch - Monitor volných kanceláří</title>\n");
    html.push_str("<script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>\n");
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");

    html.push_str("<h1>ScalaWatch</h1>\n");
    html.push_str(&format!(
        "<p class=\"subtitle\">Monitor volných kanceláří v domech Scala a Jakub, Brno &mdash; aktualizace: {updated}</p>\n"
    ));

    html.push_str("<div class=\"cards\">\n");
    for building in Building::ALL {
        html.push_str(&card(
            &format!("Dům {building}"),
            series.current[&building],
        ));
    }
    html.push_str(&card("Celkem", series.current_total()));
    html.push_str("</div>\n");

    html.push_str(
        "<div class=\"chart-container\">\n<h2>Dostupná plocha (m²) v čase</h2>\n<canvas id=\"chartM2\"></canvas>\n</div>\n",
    );
    html.push_str(
        "<div class=\"chart-container\">\n<h2>Počet dostupných kanceláří v čase</h2>\n<canvas id=\"chartCount\"></canvas>\n</div>\n",
    );

    html.push_str(&history_table(series));

    html.push_str(
        "<footer>\n  ScalaWatch &mdash; data z <a href=\"https://www.dumscala.cz/cs/\">dumscala.cz</a>\n</footer>\n",
    );

    html.push_str("<script>\n");
    html.push_str(&chart_script(series));
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn card(title: &str, availability: Availability) -> String {
    format!(
        "  <div class=\"card\">\n    <h3>{title}</h3>\n    <span class=\"big\">{}</span> <span class=\"unit\">kanceláří</span><br>\n    <span class=\"big\">{}</span> <span class=\"unit\">m²</span>\n  </div>\n",
        availability.offices, availability.m2
    )
}

fn history_table(series: &DailySeries) -> String {
    let mut table = String::new();
    table.push_str("<details>\n  <summary>Historie (všechny dny)</summary>\n  <table>\n  <thead><tr>\n    <th>Datum</th>\n");
    for building in Building::ALL {
        table.push_str(&format!(
            "    <th>{building} kanceláří</th><th>{building} m²</th>\n"
        ));
    }
    table.push_str("    <th>Celkem kanceláří</th><th>Celkem m²</th>\n  </tr></thead>\n  <tbody>\n");
    for row in &series.history {
        table.push_str(&format!("  <tr>\n    <td>{}</td>\n", row.date));
        for building in Building::ALL {
            let availability = row.by_building[&building];
            table.push_str(&format!(
                "    <td>{}</td><td>{}</td>\n",
                availability.offices, availability.m2
            ));
        }
        table.push_str(&format!(
            "    <td>{}</td><td>{}</td>\n  </tr>\n",
            row.total.offices, row.total.m2
        ));
    }
    table.push_str("  </tbody>\n  </table>\n</details>\n");
    table
}

fn chart_script(series: &DailySeries) -> String {
    let labels: Vec<String> = series.dates.iter().map(|date| date.to_string()).collect();

    let m2_datasets: Vec<serde_json::Value> = Building::ALL
        .iter()
        .map(|&building| {
            line_dataset(
                &format!("{building} m²"),
                &series.per_building[&building].m2,
                palette(building),
                false,
            )
        })
        .chain(std::iter::once(line_dataset(
            "Celkem m²",
            &series.total.m2,
            TOTAL_PALETTE,
            true,
        )))
        .collect();

    let count_datasets: Vec<serde_json::Value> = Building::ALL
        .iter()
        .map(|&building| {
            line_dataset(
                building.label(),
                &series.per_building[&building].offices,
                palette(building),
                false,
            )
        })
        .chain(std::iter::once(line_dataset(
            "Celkem",
            &series.total.offices,
            TOTAL_PALETTE,
            true,
        )))
        .collect();

    format!(
        "new Chart(document.getElementById('chartM2'), {});\nnew Chart(document.getElementById('chartCount'), {});\n",
        chart_config(&labels, m2_datasets, "m²"),
        chart_config(&labels, count_datasets, "Počet kanceláří"),
    )
}

fn line_dataset(
    label: &str,
    data: &[u32],
    (border, background): (&str, &str),
    dashed: bool,
) -> serde_json::Value {
    let mut dataset = json!({
        "label": label,
        "data": data,
        "borderColor": border,
        "tension": 0.2
    });
    if dashed {
        dataset["borderDash"] = json!([5, 5]);
        dataset["fill"] = json!(false);
    } else {
        dataset["backgroundColor"] = json!(background);
        dataset["fill"] = json!(true);
    }
    dataset
}

fn chart_config(labels: &[String], datasets: Vec<serde_json::Value>, y_title: &str) -> String {
    json!({
        "type": "line",
        "data": { "labels": labels, "datasets": datasets },
        "options": {
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } },
            "scales": {
                "y": { "beginAtZero": true, "title": { "display": true, "text": y_title } }
            }
        }
    })
    .to_string()
}
