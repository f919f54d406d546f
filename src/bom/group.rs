//! Grouping of identical components into BOM lines.

use std::collections::HashMap;

use crate::netlist::Component;

/// Components sharing the same value and footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub members: Vec<&'a Component>,
}

impl<'a> Group<'a> {
    /// Number of physical parts on this line.
    pub fn quantity(&self) -> usize {
        self.members.len()
    }

    /// Member whose non-key data is reported for the whole group.
    ///
    /// This is the last member in reference order. Description, datasheet
    /// and user fields of the other members are not checked for agreement.
    pub fn representative(&self) -> Option<&'a Component> {
        self.members.last().copied()
    }
}

/// Group components by `(value, footprint)`.
///
/// Groups come out in order of first occurrence; members are sorted
/// naturally by reference (R2 before R10).
pub fn group_components(components: &[Component]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for component in components {
        let key = (component.value.as_str(), component.footprint.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(component);
    }

    // Stable sort keeps input order for equal references
    for group in &mut groups {
        group
            .members
            .sort_by(|a, b| natord::compare(&a.reference, &b.reference));
    }

    log::debug!(
        "Grouped {} components into {} lines",
        components.len(),
        groups.len()
    );

    groups
}
