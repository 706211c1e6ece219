// File: ./src/page.rs
// Pulls raw schedule records and page text out of what the league site serves
use crate::model::{Field, RawRecord};
use anyhow::{Context, Result};
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const SCHEDULE_ROWS: &str = "table#grdSchedule tr, table.schedule tr";

// Date | Time | Rink | Home | Home Score | Away | Away Score
const TABLE_COLUMNS: [Field; 7] = [
    Field::Date,
    Field::Time,
    Field::Rink,
    Field::HomeTeam,
    Field::HomeScore,
    Field::AwayTeam,
    Field::AwayScore,
];

/// Rows with fewer cells are headers or spacers.
const MIN_CELLS: usize = 4;

/// Records from a schedule grid payload: `{"dt": {"it": [...]}}` or a bare array.
pub fn records_from_payload(payload: &Value) -> Vec<RawRecord> {
    let items = match payload {
        Value::Array(items) => items,
        other => match other.pointer("/dt/it") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!("Schedule payload has no 'dt.it' list: {}", payload);
                return Vec::new();
            }
        },
    };

    if items.is_empty() {
        tracing::warn!("Schedule endpoint responded but 'dt.it' is empty. Full payload: {}", payload);
    }

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(RawRecord::from(map.clone())),
            other => {
                tracing::debug!("Ignoring non-object schedule item: {}", other);
                None
            }
        })
        .collect()
}

pub fn records_from_json(text: &str) -> Result<Vec<RawRecord>> {
    let payload: Value = serde_json::from_str(text).context("Schedule payload is not JSON")?;
    Ok(records_from_payload(&payload))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Visible text of the page body, whitespace collapsed.
pub fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| doc.select(&sel).next());
    let root = body.unwrap_or_else(|| doc.root_element());
    root.descendants()
        .filter(|node| {
            !node
                .ancestors()
                .any(|a| a.value().as_element().is_some_and(is_hidden))
        })
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// Elements whose text never renders.
fn is_hidden(el: &Element) -> bool {
    matches!(el.name(), "script" | "style" | "noscript" | "template")
}

/// Reads game rows straight from the rendered schedule table. Column order is
/// assumed, so this is only a fallback for when the JSON grid is unavailable.
pub fn records_from_table(html: &str) -> Vec<RawRecord> {
    let doc = Html::parse_document(html);
    let (Ok(rows), Ok(cells)) = (Selector::parse(SCHEDULE_ROWS), Selector::parse("td")) else {
        return Vec::new();
    };

    let games: Vec<RawRecord> = doc
        .select(&rows)
        .filter_map(|row| {
            let texts: Vec<String> = row.select(&cells).map(cell_text).collect();
            if texts.len() < MIN_CELLS {
                return None;
            }
            Some(
                TABLE_COLUMNS
                    .iter()
                    .enumerate()
                    .map(|(i, field)| (field.key(), texts.get(i).cloned().unwrap_or_default()))
                    .collect::<RawRecord>(),
            )
        })
        .collect();

    if games.is_empty() {
        tracing::info!("DOM fallback found no rows.");
    } else {
        tracing::info!("DOM fallback found {} rows.", games.len());
    }
    games
}
