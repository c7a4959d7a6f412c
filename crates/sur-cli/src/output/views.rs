//! Rendering of listings and detail views.

use super::Theme;
use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};
use sur_core::{ConfigOption, Specification, base_name};
use sur_repository::ListingRow;

/// Numbered listing: index, name, versions, installed marker, then the
/// description and tags indented below.
pub fn listing(rows: &[ListingRow], theme: Theme) -> String {
    let mut out = String::new();

    for (i, row) in rows.iter().enumerate() {
        let installed = row
            .installed
            .as_ref()
            .map(|v| format!(" [{v} installed]"))
            .unwrap_or_default();

        out.push_str(&format!(
            "{} {} ({}){}\n",
            theme.badge(&(i + 1).to_string()),
            theme.name(&row.name.to_lowercase()),
            theme.version(&row.versions.join(", ")),
            installed
        ));
        out.push_str(&format!("   {}\n", row.description));

        if !row.tags.is_empty() {
            let tags: Vec<_> = row.tags.iter().map(|t| theme.tag(t)).collect();
            out.push_str(&format!("   {}\n", tags.join(" ")));
        }
    }

    out
}

/// Labelled metadata block.
pub fn info(spec: &Specification, theme: Theme) -> String {
    let tags: Vec<_> = spec.tags.iter().map(|t| theme.tag(t)).collect();
    let icons: Vec<_> = spec.icons.iter().map(|i| base_name(i)).collect();
    let deps: Vec<_> = spec
        .dependencies
        .iter()
        .map(|(name, constraint)| format!("{name} ({})", theme.version(constraint)))
        .collect();

    let fields = [
        ("Name:", spec.name.clone()),
        ("Version:", theme.version(&spec.version)),
        ("Authors:", spec.authors.join(", ")),
        ("Contact:", theme.contact(&spec.contact)),
        ("Tags:", tags.join(" ")),
        ("Files:", spec.files.join(", ")),
        ("Icons:", icons.join(", ")),
        ("Deps:", deps.join(", ")),
    ];

    let mut out = String::from("\n");
    for (label, value) in fields {
        out.push_str(&format!("{}  {value}\n", theme.header(&format!("{label:<8}"))));
    }
    out
}

fn table(header: &[&str], theme: Theme) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| theme.header(h)));
    table
}

/// Config options as a table.
pub fn config(options: &[ConfigOption], theme: Theme) -> String {
    let mut table = table(&["Name", "Type", "Default value", "Description"], theme);
    for option in options {
        table.add_row(vec![
            theme.name(&option.name),
            option.kind.clone(),
            theme.value(&option.default_display()),
            option.description.clone(),
        ]);
    }
    table.to_string()
}

/// Grabs as a table; empty when the sublet has none.
pub fn grabs(spec: &Specification, theme: Theme) -> String {
    if spec.grabs.is_empty() {
        return String::new();
    }

    let mut table = table(&["Name", "Description"], theme);
    for (name, description) in &spec.grabs {
        table.add_row(vec![theme.name(name), description.clone()]);
    }
    table.to_string()
}

/// `See also: info, config, ...`
pub fn see_also(views: &[&str]) -> String {
    format!("See also: {}", views.join(", "))
}
