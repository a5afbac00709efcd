//! Adds analyzer references to a project file

use std::collections::HashSet;
use super::asset_classifier::{AssetEntry, AssetKind};
use super::constants::{ADDITIONAL_FILES, ANALYZER, CODE_ANALYSIS_RULE_SET, INCLUDE, ITEM_GROUP};
use super::document::ProjectDocument;
use super::property_editor::set_or_update;

/// Appends one new `ItemGroup` holding an `Analyzer` item per analyzer binary and an
/// `AdditionalFiles` item per additional file, in iteration order.
///
/// Rulesets are not items: each one is assigned to `CodeAnalysisRuleSet`, so the last
/// ruleset wins. The group is appended even when it ends up empty.
pub fn inject<I>(doc: &mut ProjectDocument, entries: I)
where
    I: IntoIterator<Item = AssetEntry>,
{
    let mut item_group = doc.create_element(ITEM_GROUP);

    for entry in entries {
        let path = entry.include_path();
        let item_name = match entry.kind {
            AssetKind::AnalyzerBinary => ANALYZER,
            AssetKind::AdditionalFile => ADDITIONAL_FILES,
            AssetKind::RulesetFile => {
                set_or_update(doc, CODE_ANALYSIS_RULE_SET, |_| path);
                continue;
            }
        };

        let mut item = doc.create_element(item_name);
        item.set_attribute(INCLUDE, path);
        item_group.push_child(item);
    }

    doc.root_mut().push_child(item_group);
}

/// Like [`inject`], but skips binaries and additional files whose path is already the
/// `Include` of an `Analyzer` or `AdditionalFiles` item anywhere in the document.
///
/// No group is appended when nothing is left to add, so running this over its own output
/// leaves the document unchanged. Returns the number of items added.
pub fn inject_missing<I>(doc: &mut ProjectDocument, entries: I) -> usize
where
    I: IntoIterator<Item = AssetEntry>,
{
    let present: HashSet<String> = doc
        .root()
        .descendants()
        .into_iter()
        .filter(|e| matches!(e.local_name(), ANALYZER | ADDITIONAL_FILES))
        .filter_map(|e| e.attribute(INCLUDE).map(str::to_string))
        .collect();

    let missing: Vec<_> = entries
        .into_iter()
        .filter(|entry| {
            let known = entry.kind != AssetKind::RulesetFile && present.contains(&entry.include_path());
            if known {
                log::debug!("{} is already referenced", entry.include_path());
            }
            !known
        })
        .collect();

    let added = missing.iter().filter(|e| e.kind != AssetKind::RulesetFile).count();
    if added == 0 {
        for entry in missing {
            set_or_update(doc, CODE_ANALYSIS_RULE_SET, |_| entry.include_path());
        }
        return 0;
    }

    inject(doc, missing);
    added
}
