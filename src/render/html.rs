use std::fmt::Write;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::{Link, Theme};
use crate::model::{AdRow, Metrics, PrevalenceRow};

const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5",
    "https://cdn.jsdelivr.net/npm/vega-lite@5",
    "https://cdn.jsdelivr.net/npm/vega-embed@6",
];

pub struct DashboardPage<'a> {
    pub title: &'a str,
    pub generated_at: String,
    pub theme: &'a Theme,
    pub tabs: Vec<TabSection>,
}

pub struct TabSection {
    pub id: &'static str,
    pub label: &'static str,
    pub panels: Vec<Panel>,
}

pub enum Panel {
    Metrics(Metrics),
    AdsTable(Vec<AdRow>),
    Chart(Value),
    Prevalence { title: String, rows: Vec<PrevalenceRow> },
    Links(Vec<Link>),
    Note(String),
}

pub fn render_dashboard(page: &DashboardPage<'_>) -> Result<String> {
    let mut html = String::new();
    let mut charts = Vec::<(String, &Value)>::new();

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"pt-BR\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{}</title>", escape_html(page.title))?;
    for script in VEGA_SCRIPTS {
        writeln!(html, "<script src=\"{script}\"></script>")?;
    }
    writeln!(html, "<style>{}</style>", stylesheet(page.theme.accent()))?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<main>")?;
    writeln!(html, "<h1>{}</h1>", escape_html(page.title))?;

    writeln!(html, "<nav class=\"tabs\">")?;
    for (index, tab) in page.tabs.iter().enumerate() {
        let active = if index == 0 { " active" } else { "" };
        writeln!(
            html,
            "<button class=\"tab{active}\" data-tab=\"{}\">{}</button>",
            tab.id,
            escape_html(tab.label)
        )?;
    }
    writeln!(html, "</nav>")?;

    for (index, tab) in page.tabs.iter().enumerate() {
        let hidden = if index == 0 { "" } else { " hidden" };
        writeln!(html, "<section class=\"tab-panel\" id=\"tab-{}\"{hidden}>", tab.id)?;
        for panel in &tab.panels {
            match panel {
                Panel::Metrics(metrics) => write_metrics(&mut html, metrics)?,
                Panel::AdsTable(rows) => write_ads_table(&mut html, rows)?,
                Panel::Chart(spec) => {
                    let id = format!("chart-{}", charts.len() + 1);
                    writeln!(html, "<div class=\"chart\" id=\"{id}\"></div>")?;
                    charts.push((id, spec));
                }
                Panel::Prevalence { title, rows } => write_prevalence_table(&mut html, title, rows)?,
                Panel::Links(links) => write_links(&mut html, links)?,
                Panel::Note(text) => writeln!(html, "<p class=\"note\">{}</p>", escape_html(text))?,
            }
        }
        writeln!(html, "</section>")?;
    }

    writeln!(
        html,
        "<footer>Gerado em {}</footer>",
        escape_html(&page.generated_at)
    )?;
    writeln!(html, "</main>")?;

    writeln!(html, "<script>")?;
    writeln!(html, "{}", BEHAVIOUR_SCRIPT)?;
    for (id, spec) in charts {
        let json = serde_json::to_string(spec).context("failed to serialize chart spec")?;
        writeln!(
            html,
            "vegaEmbed('#{id}', {}, {{actions: false}});",
            escape_script(&json)
        )?;
    }
    writeln!(html, "</script>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}

fn write_metrics(html: &mut String, metrics: &Metrics) -> Result<()> {
    writeln!(html, "<div class=\"metrics\">")?;
    for (label, value) in [
        ("Edições", metrics.editions),
        ("Anúncios Fármacos", metrics.ads_placed),
        ("Anúncios Analisados", metrics.ads_analyzed),
    ] {
        writeln!(
            html,
            "<div class=\"metric\"><span class=\"metric-label\">{label}</span><span class=\"metric-value\">{value}</span></div>"
        )?;
    }
    writeln!(html, "</div>")?;
    Ok(())
}

fn write_ads_table(html: &mut String, rows: &[AdRow]) -> Result<()> {
    let max = rows.iter().map(|row| row.placements).max().unwrap_or(0);

    writeln!(html, "<table class=\"sortable\">")?;
    writeln!(
        html,
        "<thead><tr><th>Anúncio</th><th data-sort>Produto ofertado (título completo)</th><th data-sort>Veiculações</th><th data-sort>Identificador</th></tr></thead>"
    )?;
    writeln!(html, "<tbody>")?;
    for row in rows {
        let image = match &row.image_url {
            Some(url) => format!("<img src=\"{}\" loading=\"lazy\" alt=\"\">", escape_html(url)),
            None => String::new(),
        };
        let title = row.title.as_deref().unwrap_or("");
        writeln!(
            html,
            "<tr><td>{image}</td><td data-value=\"{title}\">{title}</td>{}<td data-value=\"{id}\">{id}</td></tr>",
            bar_cell(row.placements, max),
            title = escape_html(title),
            id = escape_html(&row.identifier),
        )?;
    }
    writeln!(html, "</tbody>")?;
    writeln!(html, "</table>")?;
    Ok(())
}

fn write_prevalence_table(html: &mut String, title: &str, rows: &[PrevalenceRow]) -> Result<()> {
    let max_ads = rows.iter().map(|row| row.ads).max().unwrap_or(0);
    let max_placements = rows.iter().map(|row| row.placements).max().unwrap_or(0);

    writeln!(html, "<h3>{}</h3>", escape_html(title))?;
    writeln!(html, "<table class=\"sortable\">")?;
    writeln!(
        html,
        "<thead><tr><th data-sort>{}</th><th data-sort>Anúncios</th><th data-sort>Veiculações</th><th data-sort>Prevalência</th></tr></thead>",
        escape_html(title)
    )?;
    writeln!(html, "<tbody>")?;
    for row in rows {
        writeln!(
            html,
            "<tr><td data-value=\"{value}\">{value}</td>{}{}{}</tr>",
            bar_cell(row.ads, max_ads),
            bar_cell(row.placements, max_placements),
            score_cell(row.prevalence_score),
            value = escape_html(&row.value),
        )?;
    }
    writeln!(html, "</tbody>")?;
    writeln!(html, "</table>")?;
    Ok(())
}

fn write_links(html: &mut String, links: &[Link]) -> Result<()> {
    writeln!(html, "<ul class=\"links\">")?;
    for link in links {
        writeln!(
            html,
            "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>",
            escape_html(&link.url),
            escape_html(&link.label)
        )?;
    }
    writeln!(html, "</ul>")?;
    Ok(())
}

fn bar_cell(value: i64, max: i64) -> String {
    let width = if max > 0 {
        value as f64 * 100.0 / max as f64
    } else {
        0.0
    };
    format!(
        "<td class=\"bar-cell\" data-value=\"{value}\"><div class=\"bar\" style=\"width:{width:.1}%\"></div><span>{value}</span></td>"
    )
}

fn score_cell(score: f64) -> String {
    format!(
        "<td class=\"bar-cell\" data-value=\"{score:.4}\"><div class=\"bar\" style=\"width:{score:.1}%\"></div><span>{score:.0}</span></td>"
    )
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn stylesheet(accent: &str) -> String {
    format!(
        "body{{font-family:system-ui,sans-serif;margin:0;background:#FFFCF0;color:#100F0F}}\
main{{max-width:960px;margin:0 auto;padding:1.5rem}}\
.tabs{{display:flex;gap:.25rem;border-bottom:2px solid {accent};margin-bottom:1rem}}\
.tab{{border:0;background:none;padding:.5rem 1rem;cursor:pointer;font-size:1rem}}\
.tab.active{{background:{accent};color:#fff}}\
.metrics{{display:flex;gap:2rem;margin:1rem 0}}\
.metric{{display:flex;flex-direction:column}}\
.metric-label{{font-size:.85rem;color:#6F6E69}}\
.metric-value{{font-size:2rem}}\
table{{width:100%;border-collapse:collapse;margin:1rem 0}}\
th,td{{padding:.3rem .5rem;border-bottom:1px solid #E6E4D9;text-align:left;vertical-align:middle}}\
th[data-sort]{{cursor:pointer}}\
td img{{max-height:80px}}\
.bar-cell{{position:relative;min-width:120px}}\
.bar{{position:absolute;left:0;top:25%;height:50%;background:{accent};opacity:.35}}\
.bar-cell span{{position:relative}}\
.chart{{width:100%;margin:1.5rem 0}}\
footer{{margin-top:2rem;font-size:.8rem;color:#6F6E69}}"
    )
}

const BEHAVIOUR_SCRIPT: &str = r#"document.querySelectorAll('.tab').forEach(function (button) {
  button.addEventListener('click', function () {
    document.querySelectorAll('.tab').forEach(function (b) { b.classList.remove('active'); });
    document.querySelectorAll('.tab-panel').forEach(function (p) { p.hidden = true; });
    button.classList.add('active');
    document.getElementById('tab-' + button.dataset.tab).hidden = false;
    window.dispatchEvent(new Event('resize'));
  });
});
document.querySelectorAll('table.sortable th[data-sort]').forEach(function (th) {
  th.addEventListener('click', function () {
    var table = th.closest('table');
    var body = table.tBodies[0];
    var column = Array.prototype.indexOf.call(th.parentNode.children, th);
    var descending = th.dataset.dir !== 'desc';
    th.dataset.dir = descending ? 'desc' : 'asc';
    var rows = Array.prototype.slice.call(body.rows);
    rows.sort(function (a, b) {
      var x = a.cells[column].dataset.value || '';
      var y = b.cells[column].dataset.value || '';
      var nx = parseFloat(x), ny = parseFloat(y);
      var order = (!isNaN(nx) && !isNaN(ny)) ? nx - ny : x.localeCompare(y, 'pt-BR');
      return descending ? -order : order;
    });
    rows.forEach(function (row) { body.appendChild(row); });
  });
});"#;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn page_with(panels: Vec<Panel>, theme: &Theme) -> DashboardPage<'_> {
        DashboardPage {
            title: "Monitor <Campista>",
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            theme,
            tabs: vec![
                TabSection {
                    id: "geral",
                    label: "Geral",
                    panels,
                },
                TabSection {
                    id: "links",
                    label: "Links",
                    panels: vec![Panel::Note("vazio".to_string())],
                },
            ],
        }
    }

    #[test]
    fn escapes_markup_in_titles_and_cells() {
        assert_eq!(
            escape_html("<b>\"Xarope\" & 'Elixir'</b>"),
            "&lt;b&gt;&quot;Xarope&quot; &amp; &#39;Elixir&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn first_tab_is_visible_and_the_rest_hidden() {
        let theme = Theme::default();
        let html = render_dashboard(&page_with(Vec::new(), &theme)).unwrap();
        assert!(html.contains("<title>Monitor &lt;Campista&gt;</title>"));
        assert!(html.contains("<section class=\"tab-panel\" id=\"tab-geral\">"));
        assert!(html.contains("<section class=\"tab-panel\" id=\"tab-links\" hidden>"));
        assert!(html.contains("<button class=\"tab active\" data-tab=\"geral\">Geral</button>"));
    }

    #[test]
    fn charts_are_embedded_without_breaking_the_script_element() {
        let theme = Theme::default();
        let spec = json!({ "title": "</script><script>alert(1)" });
        let html = render_dashboard(&page_with(vec![Panel::Chart(spec)], &theme)).unwrap();

        assert!(html.contains("<div class=\"chart\" id=\"chart-1\"></div>"));
        assert!(html.contains("vegaEmbed('#chart-1', "));
        assert!(!html.contains("</script><script>alert"));
    }

    #[test]
    fn tables_render_images_and_proportional_bars() {
        let theme = Theme::default();
        let rows = vec![
            AdRow {
                identifier: "B".to_string(),
                title: Some("Pílulas".to_string()),
                image_url: Some("https://img.example/b.png".to_string()),
                placements: 6,
            },
            AdRow {
                identifier: "C".to_string(),
                title: None,
                image_url: None,
                placements: 3,
            },
        ];
        let html = render_dashboard(&page_with(vec![Panel::AdsTable(rows)], &theme)).unwrap();

        assert!(html.contains("<img src=\"https://img.example/b.png\""));
        assert!(html.contains("style=\"width:100.0%\""));
        assert!(html.contains("style=\"width:50.0%\""));
    }

    #[test]
    fn prevalence_table_shows_scores() {
        let theme = Theme::default();
        let rows = vec![PrevalenceRow {
            value: "Febre".to_string(),
            ads: 2,
            placements: 9,
            prevalence: 18,
            prevalence_score: 100.0,
        }];
        let html = render_dashboard(&page_with(
            vec![Panel::Prevalence {
                title: "Doença mencionada".to_string(),
                rows,
            }],
            &theme,
        ))
        .unwrap();
        assert!(html.contains("<h3>Doença mencionada</h3>"));
        assert!(html.contains("data-value=\"100.0000\""));
    }

    #[test]
    fn bar_cell_handles_zero_max() {
        assert!(bar_cell(0, 0).contains("width:0.0%"));
    }
}
