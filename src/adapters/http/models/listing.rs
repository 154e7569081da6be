//! HTML directory listing.

use crate::domain::artifacts::ArtifactEntry;

/// Renders a directory listing with links to each entry and to the parent.
pub fn render_listing(rel_path: &str, parent_path: Option<&str>, entries: &[ArtifactEntry]) -> String {
    let title = if rel_path.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", rel_path)
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Models in {}</title>\n", escape(&title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>Models in {}</h1>\n", escape(&title)));

    if let Some(parent) = parent_path {
        html.push_str(&format!(
            "<p><a href=\"/{}\">Parent directory</a></p>\n",
            escape(parent)
        ));
    }

    if entries.is_empty() {
        html.push_str("<p>No models found.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Name</th><th>Size</th><th>Created</th><th>Modified</th></tr>\n");
        for entry in entries {
            let suffix = if entry.is_dir { "/" } else { "" };
            html.push_str(&format!(
                "<tr><td><a href=\"/{}\">{}{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&entry.rel_path),
                escape(&entry.name),
                suffix,
                escape(&entry.size),
                entry.created_time.format("%Y-%m-%d %H:%M:%S"),
                entry.modified_time.format("%Y-%m-%d %H:%M:%S"),
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
