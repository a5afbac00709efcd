//! Forces the C# language version of configuration scoped property groups

use super::constants::{CONDITION, CONFIGURATION_PLATFORM_MARKER, LANG_VERSION, PROPERTY_GROUP};
use super::document::{ProjectDocument, XmlElement};

/// Gives every `PropertyGroup` whose `Condition` mentions `'$(Configuration)|$(Platform)'`
/// a `LangVersion` of `version`. Returns the number of groups stamped.
///
/// A group that already has a `LangVersion` child gets that child's value replaced,
/// so stamping twice does not duplicate elements.
pub fn stamp_version(doc: &mut ProjectDocument, version: &str) -> usize {
    let template = doc.create_text_element(LANG_VERSION, version);
    let mut stamped = 0;

    doc.root_mut().visit_descendants_mut(&mut |element: &mut XmlElement| {
        let scoped = element.local_name() == PROPERTY_GROUP
            && element
                .attribute(CONDITION)
                .is_some_and(|condition| condition.contains(CONFIGURATION_PLATFORM_MARKER));
        if !scoped {
            return;
        }

        let existing = element.child_elements_mut().find(|e| e.local_name() == LANG_VERSION);
        match existing {
            Some(existing) => existing.set_text(version),
            None => element.push_child(template.clone()),
        }
        stamped += 1;
    });

    stamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SAMPLE_CSPROJ;

    fn lang_versions(doc: &ProjectDocument) -> Vec<String> {
        doc.root()
            .descendants()
            .into_iter()
            .filter(|e| e.name() == "LangVersion")
            .map(|e| e.text())
            .collect()
    }

    #[test]
    fn test_stamps_each_scoped_group() {
        let mut doc = ProjectDocument::parse(SAMPLE_CSPROJ).unwrap();
        let stamped = stamp_version(&mut doc, "7.3");

        assert_eq!(stamped, 2);
        // The unconditioned group keeps its own LangVersion
        assert_eq!(lang_versions(&doc), vec!["9.0", "7.3", "7.3"]);

        for group in doc.root().child_elements().filter(|e| e.attribute("Condition").is_some()) {
            assert_eq!(group.child_elements().last().unwrap().name(), "LangVersion");
        }
    }

    #[test]
    fn test_only_marker_conditions_match() {
        let mut doc = ProjectDocument::parse(
            "<Project>\
               <PropertyGroup Condition=\" '$(Configuration)' == 'Debug' \" />\
               <PropertyGroup Condition=\"'$(Configuration)|$(Platform)'=='Release|x64'\" />\
               <PropertyGroup />\
               <ItemGroup Condition=\" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' \" />\
             </Project>",
        )
        .unwrap();

        assert_eq!(stamp_version(&mut doc, "7.3"), 1);
        let stamped: Vec<_> = doc.root().child_elements().map(|e| e.child_elements().count()).collect();
        assert_eq!(stamped, vec![0, 1, 0, 0]);
    }

    #[test]
    fn test_nested_groups_are_stamped() {
        let mut doc = ProjectDocument::parse(
            "<Project><Choose><When Condition=\"true\">\
               <PropertyGroup Condition=\" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' \" />\
             </When></Choose></Project>",
        )
        .unwrap();

        assert_eq!(stamp_version(&mut doc, "8.0"), 1);
        assert_eq!(lang_versions(&doc), vec!["8.0"]);
    }

    #[test]
    fn test_stamping_twice_does_not_duplicate() {
        let mut doc = ProjectDocument::parse(SAMPLE_CSPROJ).unwrap();
        stamp_version(&mut doc, "7.3");
        stamp_version(&mut doc, "8.0");

        assert_eq!(lang_versions(&doc), vec!["9.0", "8.0", "8.0"]);
    }

    #[test]
    fn test_no_property_groups() {
        let mut doc = ProjectDocument::parse("<Project><ItemGroup /></Project>").unwrap();
        let before = doc.clone();

        assert_eq!(stamp_version(&mut doc, "7.3"), 0);
        assert_eq!(doc, before);
    }
}
