// src/file.rs

use std::{
    fs,
    path::{ Path, PathBuf },
};

use crate::{
    collection::AssembledCollection,
    config::{ consts::ID_RECORD_COLLECTION, options::ExportOptions },
    core::html::{ find_ci, find_element_by_id, Tags },
};

/// Write the assembled collection as a page, into the template from
/// `export.template` when one is set. Returns the final path written to.
pub fn write_collection(
    export: &ExportOptions,
    collection: &AssembledCollection,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path();
    write_collection_to(&path, export.template.as_deref(), collection)?;
    Ok(path)
}

pub fn write_collection_to(
    path: &Path,
    template: Option<&Path>,
    collection: &AssembledCollection,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let template = match template {
        Some(t) => Some(fs::read_to_string(t)?),
        None => None,
    };
    let contents = render_page(collection, template.as_deref());

    fs::write(path, contents)?;
    logf!("Export: {} record(s) → {}", collection.records.len(), path.display());
    Ok(())
}

/// Whole HTML document for a collection.
pub fn render_page(collection: &AssembledCollection, template: Option<&str>) -> String {
    match template {
        Some(t) => inject_into_template(t, collection),
        None => format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
            html_escape::encode_text(&collection.title),
            collection.render_html()
        ),
    }
}

/// Place the collection into a page template.
///
/// An existing `#recordCollection` element keeps its open tag and is filled,
/// with the heading placed just before it. Otherwise heading + container go
/// at the end of `<main>`, else the end of `<body>`, else the end of input.
pub fn inject_into_template(template: &str, collection: &AssembledCollection) -> String {
    if let Some((start, end)) = find_element_by_id(template, ID_RECORD_COLLECTION) {
        let heading = format!("<h2>{}</h2>\n", html_escape::encode_text(&collection.title));
        let mut fill = s!("\n");
        for placed in &collection.records {
            fill.push_str(&placed.fragment.to_html());
            fill.push('\n');
        }

        let open_end = Tags::starting_at(template, start).next().map_or(end, |t| t.end);
        let close_start = Tags::starting_at(template, open_end)
            .take_while(|t| t.end <= end)
            .filter(|t| t.is_close && t.end == end)
            .map(|t| t.start)
            .last();

        let mut out = String::with_capacity(template.len() + fill.len() + heading.len());
        out.push_str(&template[..start]);
        out.push_str(&heading);
        out.push_str(&template[start..open_end]);
        out.push_str(&fill);
        match close_start {
            Some(cs) => out.push_str(&template[cs..]),
            None => {
                // container never closed in the template
                out.push_str("</div>");
                out.push_str(&template[end..]);
            }
        }
        return out;
    }

    let block = collection.render_html();
    let at = find_ci(template, "</main>", 0).or_else(|| find_ci(template, "</body>", 0));
    match at {
        Some(i) => join!(&template[..i], &block, &template[i..]),
        None => join!(template, &block),
    }
}

/// `-o` handling: empty → default name, trailing separator or existing
/// directory → default name inside it.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
