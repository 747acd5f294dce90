//! # Rendering Logic
//!
//! This module draws the generation result and the status line based on the
//! current application state. Everything writes to a `Write` so it can be
//! rendered to stdout or captured in tests.

use crate::app::App;
use contentgen::{ContentResponse, GenerationState};
use serde_json::Value;
use std::io::{self, Write};

/// Renders the selected result in its friendliest available form.
pub fn render_result(out: &mut impl Write, state: &GenerationState) -> io::Result<()> {
    let Some(result) = &state.result else {
        return Ok(());
    };

    match result.as_content() {
        Some(content) => render_content(out, &content, state.selected_version),
        None if !result.versions().is_empty() => {
            render_versions(out, result.versions(), state.selected_version)
        }
        None => render_json(out, result.as_value()),
    }
}

/// Writes the raw payload as pretty JSON.
pub fn render_json(out: &mut impl Write, value: &Value) -> io::Result<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{pretty}")
}

/// Renders a full content response: the selected version, then tags and images.
fn render_content(
    out: &mut impl Write,
    content: &ContentResponse,
    selected: usize,
) -> io::Result<()> {
    let total = content.refined_versions.len();
    if let Some(version) = content.refined_versions.get(selected) {
        writeln!(out, "── Version {}/{total}: {} ──", selected + 1, version.style)?;
        writeln!(out, "{}", version.content)?;
        if !version.description.is_empty() {
            writeln!(out, "({})", version.description)?;
        }
    }

    // The other versions are listed by style so the user knows what /next shows.
    if total > 1 {
        let styles: Vec<String> = content
            .refined_versions
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == selected {
                    format!("[{}]", v.style)
                } else {
                    v.style.clone()
                }
            })
            .collect();
        writeln!(out, "Styles: {}", styles.join(" | "))?;
    }

    if !content.tags.is_empty() {
        writeln!(out, "Tags: {}", content.tags.join(" "))?;
    }

    if !content.image_suggestions.is_empty() {
        writeln!(out, "Image ideas:")?;
        for suggestion in &content.image_suggestions {
            writeln!(
                out,
                "  • {} [{}] ({})",
                suggestion.description, suggestion.style, suggestion.keywords
            )?;
        }
    }
    Ok(())
}

/// Renders a generic list of versions, marking the selected one.
fn render_versions(out: &mut impl Write, versions: &[Value], selected: usize) -> io::Result<()> {
    for (i, version) in versions.iter().enumerate() {
        let marker = if i == selected { '▶' } else { ' ' };
        let text = match version {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        writeln!(out, "{marker} {}. {text}", i + 1)?;
    }
    Ok(())
}

/// Renders the status line, if there is anything to say.
pub fn render_status_bar(out: &mut impl Write, app: &App) -> io::Result<()> {
    if app.status.is_empty() {
        return Ok(());
    }
    writeln!(out, "» {}", app.status)
}

/// Redraws whatever the last input changed, then the status line.
pub fn ui(out: &mut impl Write, app: &App) -> io::Result<()> {
    if app.needs_render {
        render_result(out, &app.state())?;
    }
    render_status_bar(out, app)?;
    out.flush()
}
