use std::collections::HashSet;

use tabled::builder::Builder;
use tabled::settings::Style;
use wastearr_core::pipeline::{SelectionOptions, Summary};
use wastearr_core::units::format_size;
use wastearr_core::{Item, ItemType};

const NAME_WIDTH: usize = 60;

/// Render the final item table plus context lines. A mixed-type run gets an
/// extra Type column; an empty selection still prints a well-formed table.
pub fn print_report(
    items: &[Item],
    summary: &Summary,
    requested: &[ItemType],
    options: &SelectionOptions,
) {
    if let Some(title) = heading(requested, options) {
        println!("{}", title);
        println!("{}", "=".repeat(60));
    }

    let show_type_column = requested.len() > 1;
    println!("{}", render_table(items, summary, show_type_column));

    match requested {
        [ItemType::Tv] => println!("\nTotal series shown: {}", items.len()),
        [ItemType::Movie] => println!("\nTotal movies shown: {}", items.len()),
        _ => {
            let tv_count = items
                .iter()
                .filter(|item| item.item_type == ItemType::Tv)
                .count();
            println!(
                "\nTotal items: {} ({} series, {} movies)",
                items.len(),
                tv_count,
                items.len() - tv_count
            );
        }
    }
}

fn heading(requested: &[ItemType], options: &SelectionOptions) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(min_score) = options.min_waste_score {
        parts.push(format!("Waste Score >= {}", min_score));
    }
    if let Some(min_size) = options.min_size_bytes {
        parts.push(format!("Size >= {}", format_size(min_size)));
    }
    if let Some(max_rating) = options.max_rating {
        parts.push(format!("Rating <= {}", max_rating));
    }
    if let Some(top) = options.top {
        parts.push(format!("Top {} Highest Waste Scores", top));
    }

    if parts.is_empty() {
        return None;
    }

    let prefix = match requested {
        [ItemType::Tv] => "Series with",
        [ItemType::Movie] => "Movies with",
        _ => "Items with",
    };

    Some(format!("{} {}", prefix, parts.join(", ")))
}

fn render_table(items: &[Item], summary: &Summary, show_type_column: bool) -> String {
    let mut builder = Builder::default();

    let mut header = vec![
        "Name".to_string(),
        "Year".to_string(),
        "TMDB Score".to_string(),
        "Size".to_string(),
        "Waste Score".to_string(),
    ];
    if show_type_column {
        header.insert(1, "Type".to_string());
    }
    builder.push_record(header);

    for item in items {
        let mut row = vec![
            truncate(&item.name, NAME_WIDTH),
            item.year.to_string(),
            item.rating.to_string(),
            format_size(item.size_bytes),
            item.waste_score.to_string(),
        ];
        if show_type_column {
            row.insert(1, item.item_type.label().to_string());
        }
        builder.push_record(row);
    }

    if summary.count > 0 {
        let rating_display = match &summary.rating_stats {
            Some(stats) => format!(
                "{:.1} ({:.1}/{:.1})",
                stats.mean, stats.mode, stats.median
            ),
            None => "N/A".to_string(),
        };

        let mut totals = vec![
            format!("Total ({})", summary.count),
            String::new(),
            rating_display,
            format_size(summary.total_size_bytes),
            summary.avg_waste_score.to_string(),
        ];
        if show_type_column {
            let type_count: usize = items
                .iter()
                .map(|item| item.item_type)
                .collect::<HashSet<_>>()
                .len();
            totals.insert(
                1,
                format!("{} type{}", type_count, if type_count == 1 { "" } else { "s" }),
            );
        }
        builder.push_record(totals);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wastearr_core::pipeline::summarize;
    use wastearr_core::Rating;

    fn item(name: &str, item_type: ItemType) -> Item {
        let mut item = Item::new(
            name.to_string(),
            2021,
            1 << 30,
            Rating::Known(7.0),
            item_type,
            Some(1),
        );
        item.waste_score = 10;
        item
    }

    #[test]
    fn type_column_appears_only_for_mixed_runs() {
        let items = vec![item("a", ItemType::Tv), item("b", ItemType::Movie)];
        let summary = summarize(&items);

        let mixed = render_table(&items, &summary, true);
        assert!(mixed.contains("Type"));
        assert!(mixed.contains("2 types"));

        let single = render_table(&items, &summary, false);
        assert!(!single.contains("Type"));
    }

    #[test]
    fn empty_selection_renders_header_only_table() {
        let summary = summarize(&[]);
        let table = render_table(&[], &summary, false);
        assert!(table.contains("Waste Score"));
        assert!(!table.contains("Total"));
    }

    #[test]
    fn heading_lists_active_filters() {
        let options = SelectionOptions {
            min_waste_score: Some(40),
            min_size_bytes: Some(500 * (1 << 20)),
            max_rating: None,
            top: None,
        };

        let title = heading(&[ItemType::Movie], &options).unwrap();
        assert_eq!(title, "Movies with Waste Score >= 40, Size >= 500.0 MB");
    }

    #[test]
    fn heading_is_absent_without_filters() {
        assert!(heading(&[ItemType::Tv], &SelectionOptions::default()).is_none());
    }

    #[test]
    fn long_names_are_truncated_on_a_char_boundary() {
        let long = "x".repeat(80);
        let out = truncate(&long, 60);
        assert_eq!(out.chars().count(), 60);
        assert!(out.ends_with('…'));

        // Multibyte names must not split inside a character.
        let multibyte = "é".repeat(80);
        assert_eq!(truncate(&multibyte, 60).chars().count(), 60);
    }
}
