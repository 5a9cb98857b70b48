//! Extraction pipeline: match, group, build and write.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::{debug, info, warn};

use crate::builder::{build_document, find_assessment_metadata, key_ident};
use crate::config::{DEBUG_SAMPLE_SIZE, IDENT_ATTR, ITEM_TAG, MISCELLANEOUS_KEY, SECTION_TAG};
use crate::error::Result;
use crate::filename::{derive_filename, has_safe_characters};
use crate::grouping::group_by_key;
use crate::matcher::{element_matches, element_title};
use crate::types::{
    ContainerKind, ExtractionMode, ExtractionOutcome, ExtractionReport, SkippedSection,
    WrittenFile,
};
use crate::xml::{
    describe_element, find_descendants, get_attribute_or_empty, has_tag, parse_source,
    read_source, write_document,
};

/// One output file to be built.
#[derive(Debug)]
struct OutputPlan<'a, 'input> {
    kind: ContainerKind,
    key: String,
    filename: String,
    items: Vec<Node<'a, 'input>>,
}

/// Extract items matching `pattern` from `input` into new files.
///
/// When `output_dir` is `None`, files are written next to the input file.
/// The output directory is created if needed.
///
/// # Returns
/// * `ExtractionOutcome::Extracted` with one entry per written file
/// * `ExtractionOutcome::NoMatch` listing every title in the source when
///   the pattern matched nothing
pub fn extract(
    input: &Path,
    pattern: &str,
    output_dir: Option<&Path>,
    mode: ExtractionMode,
) -> Result<ExtractionOutcome> {
    let text = read_source(input)?;
    let doc = parse_source(&text, input)?;
    let output_dir = resolve_output_dir(input, output_dir);

    extract_from_document(&doc, pattern, &output_dir, mode)
}

/// The explicit output directory, or the input file's directory.
pub fn resolve_output_dir(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Run the pipeline over an already parsed document.
pub fn extract_from_document(
    doc: &Document<'_>,
    pattern: &str,
    output_dir: &Path,
    mode: ExtractionMode,
) -> Result<ExtractionOutcome> {
    trace_document(doc);
    debug!(%mode, pattern, "Starting extraction");

    let mut report = ExtractionReport::default();
    let plans = match mode {
        ExtractionMode::Flat => plan_item_groups(doc, pattern, mode),
        ExtractionMode::SectionAware => plan_sections(doc, pattern, &mut report),
    };

    if plans.is_empty() && report.skipped.is_empty() {
        info!(pattern, "No titles matched");
        return Ok(ExtractionOutcome::NoMatch {
            available_titles: available_titles(doc),
        });
    }

    report.matched_items = plans.iter().map(|p| p.items.len()).sum();
    if plans.is_empty() {
        return Ok(ExtractionOutcome::Extracted(report));
    }

    fs::create_dir_all(output_dir)?;
    let metadata = find_assessment_metadata(doc);

    for plan in plans {
        let document = build_document(&plan.kind, &plan.items, metadata);
        let path = output_dir.join(&plan.filename);
        write_document(&document, &path)?;

        info!(
            path = %path.display(),
            items = plan.items.len(),
            group = %plan.key,
            "Wrote output file"
        );
        report.written.push(WrittenFile {
            path,
            group_key: plan.key,
            item_count: plan.items.len(),
        });
    }

    Ok(ExtractionOutcome::Extracted(report))
}

/// Every distinct non-empty item and section title, sorted.
pub fn available_titles(doc: &Document<'_>) -> Vec<String> {
    doc.descendants()
        .filter(|n| has_tag(*n, ITEM_TAG) || has_tag(*n, SECTION_TAG))
        .map(element_title)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Plan one assessment per matching section, falling back to item groups
/// when no section matches.
fn plan_sections<'a, 'input>(
    doc: &'a Document<'input>,
    pattern: &str,
    report: &mut ExtractionReport,
) -> Vec<OutputPlan<'a, 'input>> {
    let sections: Vec<_> = find_descendants(doc.root(), SECTION_TAG)
        .filter(|section| element_matches(pattern, *section))
        .collect();
    debug!(count = sections.len(), "Matching sections");

    if sections.is_empty() {
        debug!("No section matched, matching items directly");
        return plan_item_groups(doc, pattern, ExtractionMode::SectionAware);
    }
    report.matched_sections = sections.len();

    let mut plans = Vec::new();
    for section in sections {
        let title = element_title(section);
        let ident = get_attribute_or_empty(section, IDENT_ATTR);
        let items: Vec<_> = find_descendants(section, ITEM_TAG).collect();

        if items.is_empty() {
            warn!(title, ident, "Section has no items, skipping");
            report.skipped.push(SkippedSection {
                title: title.to_string(),
                ident: ident.to_string(),
            });
            continue;
        }

        let name = section_file_key(title, ident);
        let section_ident = if ident.is_empty() {
            key_ident(&name)
        } else {
            ident.to_string()
        };
        debug!(title, ident, items = items.len(), "Matched section");

        plans.push(OutputPlan {
            kind: ContainerKind::Assessment {
                ident: section_ident,
                title: title.to_string(),
            },
            filename: derive_filename(&name, ExtractionMode::SectionAware.section_prefix()),
            key: name,
            items,
        });
    }

    plans
}

/// Plan one file per group of matching items.
fn plan_item_groups<'a, 'input>(
    doc: &'a Document<'input>,
    pattern: &str,
    mode: ExtractionMode,
) -> Vec<OutputPlan<'a, 'input>> {
    let matching = find_descendants(doc.root(), ITEM_TAG).filter(|item| {
        let matched = element_matches(pattern, *item);
        if matched {
            debug!(title = element_title(*item), "Matching item");
        }
        matched
    });

    group_by_key(matching, mode.word_count())
        .into_iter()
        .map(|group| {
            let kind = match mode {
                ExtractionMode::Flat => ContainerKind::Flat {
                    group_key: group.key.clone(),
                },
                ExtractionMode::SectionAware => ContainerKind::Assessment {
                    ident: key_ident(&group.key),
                    title: group.key.clone(),
                },
            };
            OutputPlan {
                kind,
                filename: derive_filename(&group.key, mode.group_prefix()),
                key: group.key,
                items: group.items,
            }
        })
        .collect()
}

/// Name a section's output file after its title, then its identifier.
fn section_file_key(title: &str, ident: &str) -> String {
    if has_safe_characters(title) {
        title.to_string()
    } else if has_safe_characters(ident) {
        ident.to_string()
    } else {
        MISCELLANEOUS_KEY.to_string()
    }
}

fn trace_document(doc: &Document<'_>) {
    let root = doc.root_element();
    let attributes: Vec<(&str, &str)> = root.attributes().map(|a| (a.name(), a.value())).collect();
    debug!(root = %describe_element(root), ?attributes, "Parsed source document");

    let items: Vec<_> = find_descendants(doc.root(), ITEM_TAG).collect();
    debug!(count = items.len(), "Found items");
    for (i, item) in items.iter().take(DEBUG_SAMPLE_SIZE).enumerate() {
        debug!(
            sample = i + 1,
            title = element_title(*item),
            ident = get_attribute_or_empty(*item, IDENT_ATTR),
            "Sample item"
        );
    }
}
