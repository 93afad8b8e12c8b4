//! Country-level panel built from the processed speeches.
//!
//! [`merge`] maps each speech to a country through its institution and
//! attaches the populism dummies of that country-year. [`collapse`] then
//! averages the merged speeches by year and country.

use crate::institutions;
use crate::models::{CollapsedRow, MergedSpeech, ProcessedSpeech};
use crate::populism;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Join processed speeches with the populism panel.
///
/// Speeches without a year, without a known country, or without a panel
/// cell for their country-year are dropped.
#[instrument(level = "info", skip_all, fields(rows = speeches.len()))]
pub fn merge(speeches: Vec<ProcessedSpeech>) -> Vec<MergedSpeech> {
    let total = speeches.len();
    let merged: Vec<MergedSpeech> = speeches.into_iter().filter_map(merge_speech).collect();
    info!(rows = merged.len(), dropped = total - merged.len(), "Merged speeches with populism panel");
    merged
}

fn merge_speech(row: ProcessedSpeech) -> Option<MergedSpeech> {
    let metadata = row.speech.metadata;
    let year = row.year?;
    let Some(country) = institutions::country_of(&metadata.institution) else {
        debug!(document_id = %metadata.document_id, institution = %metadata.institution, "No country for institution");
        return None;
    };
    let Some(cell) = populism::status(country, year) else {
        debug!(document_id = %metadata.document_id, country, year, "No panel cell");
        return None;
    };

    Some(MergedSpeech {
        document_id: metadata.document_id,
        date: metadata.date,
        author_name: metadata.author_name,
        institution: metadata.institution,
        country: country.to_string(),
        year,
        num_words: row.num_words,
        growth_count: row.growth_count,
        inflation_count: row.inflation_count,
        inequality_count: row.inequality_count,
        climate_count: row.climate_count,
        populism: cell,
    })
}

fn mean(rows: &[&MergedSpeech], value: impl Fn(&MergedSpeech) -> usize) -> f64 {
    rows.iter().map(|&row| value(row) as f64).sum::<f64>() / rows.len() as f64
}

/// Average merged speeches by `(year, country)`, ordered by year then country.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn collapse(rows: &[MergedSpeech]) -> Vec<CollapsedRow> {
    let collapsed: Vec<CollapsedRow> = rows
        .iter()
        .into_group_map_by(|row| (row.year, row.country.clone()))
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|((year, country), group)| CollapsedRow {
            year,
            country,
            speeches: group.len(),
            num_words: mean(&group, |r| r.num_words),
            growth_count: mean(&group, |r| r.growth_count),
            inflation_count: mean(&group, |r| r.inflation_count),
            inequality_count: mean(&group, |r| r.inequality_count),
            climate_count: mean(&group, |r| r.climate_count),
            // One panel cell per country-year, so every row of a group agrees.
            populism: group[0].populism,
        })
        .collect();

    info!(rows = collapsed.len(), "Collapsed to country-year rows");
    collapsed
}
