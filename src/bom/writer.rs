//! BOM serialization.
//!
//! Rows are `;`-separated with every field quoted and `\n` line endings on
//! all platforms.

use std::io::Write;

use serde::Serialize;

use super::group::Group;

/// Column names, in output order.
pub const HEADER: [&str; 9] = [
    "Ref",
    "Qnty",
    "Value",
    "Cmp name",
    "Footprint",
    "Description",
    "Vendor",
    "IPN",
    "Datasheet",
];

/// Separator appended after every reference, including the last one.
const REF_SEPARATOR: &str = ", ";

/// One BOM line. Field order matches [`HEADER`].
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BomRow<'a> {
    pub refs: String,
    pub quantity: usize,
    pub value: &'a str,
    pub part_name: &'a str,
    pub footprint: &'a str,
    pub description: &'a str,
    pub vendor: &'a str,
    pub ipn: &'a str,
    pub datasheet: &'a str,
}

impl<'a> BomRow<'a> {
    /// Build the line for a group, `None` for an empty group.
    pub fn from_group(group: &Group<'a>) -> Option<Self> {
        let c = group.representative()?;

        let refs: String = group
            .members
            .iter()
            .map(|m| format!("{}{}", m.reference, REF_SEPARATOR))
            .collect();

        Some(BomRow {
            refs,
            quantity: group.quantity(),
            value: &c.value,
            part_name: &c.part_name,
            footprint: &c.footprint,
            description: &c.description,
            vendor: c.field("Vendor"),
            ipn: c.field("IPN"),
            datasheet: &c.datasheet,
        })
    }
}

/// Write the header and one row per group to `out`.
///
/// The header is written even when there are no groups.
pub fn write_bom<W: Write>(out: W, groups: &[Group]) -> csv::Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(out);

    writer.write_record(HEADER)?;

    let mut rows = 0;
    for row in groups.iter().filter_map(BomRow::from_group) {
        writer.serialize(row)?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::group::group_components;
    use crate::netlist::Component;

    const HEADER_LINE: &str =
        "\"Ref\";\"Qnty\";\"Value\";\"Cmp name\";\"Footprint\";\"Description\";\"Vendor\";\"IPN\";\"Datasheet\"\n";

    fn component(reference: &str, value: &str, footprint: &str) -> Component {
        Component {
            reference: reference.to_string(),
            value: value.to_string(),
            footprint: footprint.to_string(),
            part_name: if reference.starts_with('R') { "R" } else { "C" }.to_string(),
            ..Default::default()
        }
    }

    fn render(components: &[Component]) -> String {
        let groups = group_components(components);
        let mut out = Vec::new();
        write_bom(&mut out, &groups).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_input() {
        assert_eq!(render(&[]), HEADER_LINE);
    }

    #[test]
    fn test_end_to_end_rows() {
        let components = vec![
            component("R1", "10k", "0805"),
            component("R2", "10k", "0805"),
            component("C1", "100nF", "0603"),
        ];

        let output = render(&components);
        let lines: Vec<&str> = output.split_terminator('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(format!("{}\n", lines[0]), HEADER_LINE);
        assert_eq!(
            lines[1],
            "\"R1, R2, \";\"2\";\"10k\";\"R\";\"0805\";\"\";\"\";\"\";\"\""
        );
        assert_eq!(
            lines[2],
            "\"C1, \";\"1\";\"100nF\";\"C\";\"0603\";\"\";\"\";\"\";\"\""
        );
        assert!(!output.contains('\r'));
    }

    #[test]
    fn test_row_uses_last_member_fields() {
        let mut first = component("R1", "10k", "0805");
        first.description = "first".to_string();
        first.fields.insert("IPN".to_string(), "RES-1".to_string());
        let mut last = component("R10", "10k", "0805");
        last.description = "last".to_string();
        last.datasheet = "https://example.com/r.pdf".to_string();
        last.fields.insert("Vendor".to_string(), "Yageo".to_string());
        let components = vec![last, first];

        let groups = group_components(&components);
        let row = BomRow::from_group(&groups[0]).unwrap();

        assert_eq!(row.refs, "R1, R10, ");
        assert_eq!(row.quantity, 2);
        assert_eq!(row.description, "last");
        assert_eq!(row.vendor, "Yageo");
        assert_eq!(row.ipn, "");
        assert_eq!(row.datasheet, "https://example.com/r.pdf");
    }

    #[test]
    fn test_embedded_quotes_and_delimiters() {
        let mut c = component("J1", "Conn \"USB\"", "USB_C;Receptacle");
        c.description = "line1\nline2".to_string();

        let output = render(&[c]);
        let row = output.strip_prefix(HEADER_LINE).unwrap();

        assert!(row.starts_with(
            "\"J1, \";\"1\";\"Conn \"\"USB\"\"\";\"C\";\"USB_C;Receptacle\";\"line1\nline2\";"
        ));
    }

    #[test]
    fn test_write_returns_row_count() {
        let components = vec![
            component("R1", "10k", "0805"),
            component("R2", "1k", "0805"),
            component("R3", "10k", "0805"),
        ];
        let groups = group_components(&components);

        assert_eq!(write_bom(Vec::new(), &groups).unwrap(), 2);
    }
}
