//! Format loader views and users as text or JSON.

use crate::error::ApiError;
use crate::loader::LoaderView;
use crate::types::User;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render a committed view as human-readable text.
pub fn format_view_text(view: &LoaderView) -> String {
    let mut out = String::new();

    let title = match &view.folder {
        Some(folder) => format!("Folder: {}", folder.name),
        None => "Root".to_string(),
    };
    out.push_str(&format!("{}\n\n", format_section_heading(&title)));

    if let Some(message) = &view.blocking_error {
        out.push_str(&format!("{}\n", message.red()));
        return out;
    }

    out.push_str(&format!("{}\n", format_section_heading("Folders")));
    if view.subfolders.is_empty() {
        out.push_str("  (none)\n\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Name", "ID", "Group"]);
        for folder in &view.subfolders {
            table.add_row(vec![
                folder.name.clone(),
                folder.id.to_string(),
                folder
                    .assigned_group
                    .as_ref()
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    // Files only exist inside folders
    if view.folder.is_some() {
        out.push_str(&format!("{}\n", format_section_heading("Files")));
        if view.files.is_empty() {
            out.push_str("  (none)\n\n");
        } else {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Name", "Type", "Tags", "URL"]);
            for file in &view.files {
                let tags = file
                    .tags
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                // Links point outside the file store
                let name = if file.file_type.is_link() {
                    format!("{} (link)", file.filename)
                } else {
                    file.filename.clone()
                };
                table.add_row(vec![
                    name,
                    file.file_type.to_string(),
                    tags,
                    file.secure_url.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            out.push_str(&format!("{}\n\n", table));
        }
    }

    if let Some(summary) = view.error_summary() {
        out.push_str(&format!("{}\n", summary.yellow()));
    }

    out
}

pub fn format_view_json(view: &LoaderView) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub fn format_user_text(user: &User) -> String {
    let groups = if user.groups.is_empty() {
        "-".to_string()
    } else {
        user.groups
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{}\n  Username: {}\n  Email: {}\n  Role: {}\n  Groups: {}\n",
        format_section_heading("Current user"),
        user.username,
        user.email,
        if user.is_admin() { "admin" } else { "user" },
        groups
    )
}
