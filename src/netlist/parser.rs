//! Parser for the KiCad generic XML netlist.
//!
//! The export looks like:
//!
//! ```text
//! <export version="E">
//!   <design><source>..</source><date>..</date><tool>..</tool></design>
//!   <components>
//!     <comp ref="R1">
//!       <value>10k</value>
//!       <footprint>Resistor_SMD:R_0805_2012Metric</footprint>
//!       <fields><field name="Vendor">Digikey</field></fields>
//!       <libsource lib="Device" part="R" description="Resistor"/>
//!       <property name="Sheetname" value=""/>
//!     </comp>
//!   </components>
//!   <libparts>..</libparts>
//!   <nets>..</nets>
//! </export>
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{Component, Design, Netlist, NetlistError};

/// Placeholder KiCad writes for "no datasheet".
const NO_DATASHEET: &str = "~";

// ── XML deserialization structs ───────────────────────────────────────────────

#[derive(Deserialize)]
struct XmlExport {
    #[serde(default)]
    design: XmlDesign,
    #[serde(default)]
    components: XmlComponents,
    #[serde(default)]
    libparts: XmlLibParts,
}

#[derive(Deserialize, Default)]
struct XmlDesign {
    #[serde(default)]
    source: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    tool: String,
}

#[derive(Deserialize, Default)]
struct XmlComponents {
    #[serde(default, rename = "comp")]
    comps: Vec<XmlComp>,
}

#[derive(Deserialize)]
struct XmlComp {
    #[serde(rename = "@ref")]
    reference: Option<String>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    footprint: String,
    #[serde(default)]
    datasheet: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    fields: XmlFields,
    #[serde(default)]
    libsource: XmlLibSource,
    #[serde(default, rename = "property")]
    properties: Vec<XmlProperty>,
}

#[derive(Deserialize, Default)]
struct XmlFields {
    #[serde(default, rename = "field")]
    fields: Vec<XmlField>,
}

#[derive(Deserialize)]
struct XmlField {
    #[serde(rename = "@name")]
    name: String,
    #[serde(default, rename = "$text")]
    value: String,
}

#[derive(Deserialize, Default)]
struct XmlLibSource {
    #[serde(default, rename = "@lib")]
    lib: String,
    #[serde(default, rename = "@part")]
    part: String,
    #[serde(default, rename = "@description")]
    description: String,
}

#[derive(Deserialize)]
struct XmlProperty {
    #[serde(rename = "@name")]
    name: String,
    #[serde(default, rename = "@value")]
    value: String,
}

#[derive(Deserialize, Default)]
struct XmlLibParts {
    #[serde(default, rename = "libpart")]
    libparts: Vec<XmlLibPart>,
}

#[derive(Deserialize)]
struct XmlLibPart {
    #[serde(default, rename = "@lib")]
    lib: String,
    #[serde(default, rename = "@part")]
    part: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    docs: String,
    #[serde(default)]
    fields: XmlFields,
}

/// Parse netlist XML into components.
///
/// Missing component data is filled in from the matching library part:
/// description and datasheet when the instance leaves them empty, and any
/// user field the instance does not override.
pub fn parse_netlist(content: &str) -> Result<Netlist, NetlistError> {
    let export: XmlExport = quick_xml::de::from_str(content)?;

    let libparts: HashMap<(&str, &str), &XmlLibPart> = export
        .libparts
        .libparts
        .iter()
        .map(|lp| ((lp.lib.as_str(), lp.part.as_str()), lp))
        .collect();

    let components = export
        .components
        .comps
        .iter()
        .enumerate()
        .map(|(index, comp)| {
            let libpart = libparts
                .get(&(comp.libsource.lib.as_str(), comp.libsource.part.as_str()))
                .copied();
            build_component(index, comp, libpart)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let XmlDesign { source, date, tool } = export.design;

    Ok(Netlist {
        design: Design { source, date, tool },
        components,
    })
}

fn build_component(
    index: usize,
    comp: &XmlComp,
    libpart: Option<&XmlLibPart>,
) -> Result<Component, NetlistError> {
    let reference = comp
        .reference
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(NetlistError::MissingReference { index })?;

    let description = first_non_empty([
        comp.description.as_str(),
        comp.libsource.description.as_str(),
        libpart.map(|lp| lp.description.as_str()).unwrap_or(""),
    ]);

    let datasheet = if has_datasheet(&comp.datasheet) {
        comp.datasheet.clone()
    } else {
        match libpart {
            Some(lp) if has_datasheet(&lp.docs) => lp.docs.clone(),
            _ => comp.datasheet.clone(),
        }
    };

    // Lowest precedence first; an empty value never hides a filled one
    let mut fields = BTreeMap::new();
    let libpart_fields = libpart.into_iter().flat_map(|lp| &lp.fields.fields);
    let entries = libpart_fields
        .map(|f| (&f.name, &f.value))
        .chain(comp.properties.iter().map(|p| (&p.name, &p.value)))
        .chain(comp.fields.fields.iter().map(|f| (&f.name, &f.value)));
    for (name, value) in entries {
        if !value.is_empty() || !fields.contains_key(name) {
            fields.insert(name.clone(), value.clone());
        }
    }

    Ok(Component {
        reference: reference.to_string(),
        value: comp.value.clone(),
        footprint: comp.footprint.clone(),
        part_name: comp.libsource.part.clone(),
        description,
        datasheet,
        fields,
    })
}

fn has_datasheet(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s != NO_DATASHEET
}

fn first_non_empty<const N: usize>(candidates: [&str; N]) -> String {
    candidates
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}
