//! Finds or creates MSBuild properties

use super::constants::{CONDITION, PROPERTY_GROUP};
use super::document::{ProjectDocument, XmlElement};

/// Ensures property `name` holds `update(current value)`.
///
/// The first `<name>` element directly inside any `PropertyGroup` (document order) is
/// updated. If there is none, `update("")` is added to the first unconditioned
/// `PropertyGroup` of the root, which is created as the root's first child if missing.
pub fn set_or_update<F>(doc: &mut ProjectDocument, name: &str, update: F)
where
    F: FnOnce(&str) -> String,
{
    let path = doc.root().find_descendant_path(&|parent: &XmlElement, child: &XmlElement| {
        parent.local_name() == PROPERTY_GROUP && child.local_name() == name
    });

    if let Some(path) = path {
        if let Some(element) = doc.root_mut().element_at_path_mut(&path) {
            let current = element.text();
            let result = update(&current);
            if result != current {
                log::info!(
                    "Overriding existing project property {}. Old value: {}, new value: {}",
                    name, current, result
                );
                element.set_text(result);
            } else {
                log::info!("Property {} already set. Old value: {}, new value: {}", name, current, result);
            }
            return;
        }
    }

    let value = update("");
    add_property(doc, name, &value);
}

/// Adds a property to the first property group without a condition
fn add_property(doc: &mut ProjectDocument, name: &str, value: &str) {
    log::debug!("Adding project property {}. Value: {}", name, value);
    let property = doc.create_text_element(name, value);

    let existing = doc
        .root_mut()
        .child_elements_mut()
        .find(|e| e.local_name() == PROPERTY_GROUP && e.attribute(CONDITION).is_none());

    match existing {
        Some(group) => group.push_child(property),
        None => {
            let mut group = doc.create_element(PROPERTY_GROUP);
            group.push_child(property);
            doc.root_mut().push_front_child(group);
        }
    }
}
