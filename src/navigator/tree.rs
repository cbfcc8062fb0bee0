// src/navigator/tree.rs
//! Section trees: building them from a flat table of contents and finding
//! a section's neighbourhood again.

use crate::api::responses::MwSection;
use crate::error::WikiError;
use crate::formatting::html_to_plain_text;
use crate::model::Section;

/// A table-of-contents entry with its HTML title already flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub index: u32,
    pub title: String,
    pub level: u32,
}

impl TocEntry {
    pub fn new(index: u32, title: impl Into<String>, level: u32) -> Self {
        Self {
            index,
            title: title.into(),
            level,
        }
    }
}

/// Converts API sections to entries, shifting levels below the lead.
///
/// Sections transcluded from templates have indices like `T-1` that cannot
/// be fetched by number; they are left out.
pub fn toc_entries(sections: &[MwSection]) -> Vec<TocEntry> {
    sections
        .iter()
        .filter_map(|section| match section.index.parse::<u32>() {
            Ok(index) => Some(TocEntry::new(
                index,
                html_to_plain_text(&section.line),
                section.toclevel + 1,
            )),
            Err(_) => {
                log::debug!(
                    "Skipping section {:?} with non-numeric index {:?}",
                    section.line,
                    section.index
                );
                None
            }
        })
        .collect()
}

/// Builds the section forest from entries in depth-first pre-order.
///
/// Keeps a stack of open ancestors: each entry closes every open section at
/// its level or deeper, then opens itself. Closed sections are attached to
/// the next open ancestor or become roots.
pub fn build_section_tree(entries: Vec<TocEntry>) -> Vec<Section> {
    let mut roots = Vec::new();
    let mut open: Vec<Section> = Vec::new();

    for entry in entries {
        while let Some(top) = open.pop() {
            if top.level < entry.level {
                open.push(top);
                break;
            }
            attach(&mut open, &mut roots, top);
        }
        open.push(Section::heading(entry.index, entry.title, entry.level));
    }

    while let Some(top) = open.pop() {
        attach(&mut open, &mut roots, top);
    }
    roots
}

fn attach(open: &mut [Section], roots: &mut Vec<Section>, closed: Section) {
    match open.last_mut() {
        Some(parent) => parent.subsections.push(closed),
        None => roots.push(closed),
    }
}

/// Depth-first pre-order listing of every section in the forest.
pub fn flatten_sections(sections: &[Section]) -> Vec<&Section> {
    let mut flat = Vec::new();
    collect(sections, &mut flat);
    flat
}

fn collect<'a>(sections: &'a [Section], flat: &mut Vec<&'a Section>) {
    for section in sections {
        flat.push(section);
        collect(&section.subsections, flat);
    }
}

/// Sum of every section's word count, each section counted once.
pub fn total_word_count(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|section| section.word_count + total_word_count(&section.subsections))
        .sum()
}

/// A section and its neighbours in reading order.
#[derive(Debug, Clone, Copy)]
pub struct SectionLocation<'a> {
    pub target: &'a Section,
    /// Nearest preceding section with a strictly lower level.
    pub parent: Option<&'a Section>,
    pub previous: Option<&'a Section>,
    pub next: Option<&'a Section>,
}

/// Finds `index` in a flattened forest.
pub fn locate_section<'a>(flat: &[&'a Section], index: u32) -> Result<SectionLocation<'a>, WikiError> {
    let position = flat
        .iter()
        .position(|section| section.index == index)
        .ok_or(WikiError::SectionNotFound {
            index,
            available: flat.len(),
        })?;

    let target = flat[position];
    let parent = flat[..position]
        .iter()
        .rev()
        .find(|candidate| candidate.level < target.level)
        .copied();
    let previous = position.checked_sub(1).map(|i| flat[i]);
    let next = flat.get(position + 1).copied();

    Ok(SectionLocation {
        target,
        parent,
        previous,
        next,
    })
}
