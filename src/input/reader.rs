use crate::config::InputSource;
use crate::input::{Label, LabeledUrl};
use crate::InputError;
use std::path::Path;

/// Parses one line of a URL list
///
/// Returns `Ok(None)` for blank lines and `#` comments. A trailing `,0` or
/// `,1` is taken as the label; a line without a comma uses `default_label`.
/// URLs may themselves contain commas, so only the last field is inspected.
///
/// # Errors
///
/// Returns the offending label text if the last field is a bare token other
/// than `0` or `1`.
pub fn parse_line(line: &str, default_label: Label) -> Result<Option<LabeledUrl>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match line.rsplit_once(',') {
        Some((url, label)) if looks_like_label(label.trim()) => match label.trim() {
            "0" => Ok(Some(LabeledUrl::new(url.trim(), Label::Legitimate))),
            "1" => Ok(Some(LabeledUrl::new(url.trim(), Label::Phishing))),
            other => Err(other.to_string()),
        },
        Some((url, label)) if label.trim().is_empty() => {
            Ok(Some(LabeledUrl::new(url.trim(), default_label)))
        }
        _ => Ok(Some(LabeledUrl::new(line, default_label))),
    }
}

/// A label column is a bare alphanumeric token; anything else after the last
/// comma (`b=2`, `/path`) is part of the URL.
fn looks_like_label(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Reads a labeled URL list from a file
///
/// Malformed label columns are logged and the line is skipped. Failing to
/// read the file at all is fatal.
pub fn read_labeled_urls(path: &Path, default_label: Label) -> Result<Vec<LabeledUrl>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut urls = Vec::new();
    for (index, line) in content.lines().enumerate() {
        match parse_line(line, default_label) {
            Ok(Some(labeled)) => urls.push(labeled),
            Ok(None) => {}
            Err(label) => {
                tracing::warn!(
                    "Skipping line {} of {}: invalid label '{}'",
                    index + 1,
                    path.display(),
                    label
                );
            }
        }
    }

    tracing::debug!("Read {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// Reads every configured source and concatenates them in order
pub fn read_sources(sources: &[InputSource]) -> Result<Vec<LabeledUrl>, InputError> {
    let mut all = Vec::new();
    for source in sources {
        // Validated to 0 or 1 when the config was loaded
        let default_label = Label::try_from(source.default_label).unwrap_or(Label::Legitimate);
        let mut urls = read_labeled_urls(Path::new(&source.path), default_label)?;
        tracing::info!("Loaded {} URLs from {}", urls.len(), source.path);
        all.append(&mut urls);
    }
    Ok(all)
}
