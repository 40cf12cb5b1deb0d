//! Region-area allocation and aggregation.
//!
//! Pasted spreadsheet rows assign fractions of a parcel's total area to one
//! or more regions:
//!
//! ```text
//! RE                 PERCENT   TotalArea_ha
//! 1.11.2a/1.7.7a     65/35     0.002374634
//! ```
//!
//! The pipeline is three pure stages:
//! 1. [`parse_raw_input`]: text to [`InputRow`]s
//! 2. [`expand_regions`]: one [`ExpandedRow`] per (row, region), sorted by region
//! 3. [`sum_region_areas`]: one [`ResultRow`] per region
//!
//! Malformed numbers never fail: they become `NaN` and flow into the output.

use crate::region_area::grouping::OrderedGroups;
use crate::text;
use areakit_core::number::{js_round, parse_float};
use areakit_core::{Header, Table, TableRecord, TableRow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scale used to round away floating-point noise in area products.
pub const AREA_SCALE: f64 = 1e15;

/// Built-in sample table shown on first load.
pub const SAMPLE_INPUT: &str = "
RE      PERCENT TotalArea_ha
1.11.2a/1.7.7a/1.11.8   65/30/5 0.002374634
1.7.7a/1.11.2a  60/40   0.007693042
1.11.8  100     0.102844507
1.3.6a/1.3.7    50/50   0.117788037
1.11.2a 100     0.134855322
1.7.5b/1.7.5    70/30   0.151183447
1.7.5b/1.7.5    70/30   0.171210474
1.11.2a/1.3.6a  95/5    0.207005737
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRow {
    /// 1-based position after the header line
    pub id: usize,
    /// Region identifiers, in cell order
    pub regions: Vec<String>,
    /// Percentages paired positionally with `regions`
    pub proportions: Vec<f64>,
    /// Total area of the row in hectares
    pub total_area_ha: f64,
}

/// Parsed input: header cells plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTable {
    /// Header cells (not validated)
    pub header: Vec<String>,
    /// Data rows
    pub rows: Vec<InputRow>,
}

/// One region's share of one input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedRow {
    /// Id of the originating input row
    pub id: usize,
    /// Region identifier
    pub region: String,
    /// Percentage for this region; `None` when the row lists fewer
    /// percentages than regions
    pub proportion: Option<f64>,
    /// Total area of the originating row
    pub total_area_ha: f64,
    /// Area attributed to the region
    pub area_ha: f64,
}

/// Aggregated area for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Region identifier
    pub region: String,
    /// Sum of the region's areas
    pub total_area_ha: f64,
}

/// A contribution to a region total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPart {
    /// Id of the originating input row
    pub id: usize,
    /// Percentage for this region
    pub proportion: Option<f64>,
    /// Total area of the originating row
    pub total_area_ha: f64,
    /// Area attributed to the region
    pub area_ha: f64,
}

/// All contributions to one region, with their running sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup {
    /// Region identifier
    pub region: String,
    /// Sum of `parts[*].area_ha`, accumulated in order
    pub total_area_ha: f64,
    /// Contributions in input order
    pub parts: Vec<RegionPart>,
}

impl RegionGroup {
    fn start(row: &ExpandedRow) -> Self {
        Self {
            region: row.region.clone(),
            total_area_ha: row.area_ha,
            parts: vec![RegionPart::from(row)],
        }
    }

    fn add(&mut self, row: &ExpandedRow) {
        self.total_area_ha += row.area_ha;
        self.parts.push(RegionPart::from(row));
    }
}

impl From<&ExpandedRow> for RegionPart {
    fn from(row: &ExpandedRow) -> Self {
        Self {
            id: row.id,
            proportion: row.proportion,
            total_area_ha: row.total_area_ha,
            area_ha: row.area_ha,
        }
    }
}

impl From<&RegionGroup> for ResultRow {
    fn from(group: &RegionGroup) -> Self {
        Self {
            region: group.region.clone(),
            total_area_ha: group.total_area_ha,
        }
    }
}

mod grouping {
    use std::collections::HashMap;

    /// Insertion-ordered map of groups keyed by string.
    pub(super) struct OrderedGroups<G> {
        groups: Vec<G>,
        index: HashMap<String, usize>,
    }

    impl<G> OrderedGroups<G> {
        pub(super) fn new() -> Self {
            Self {
                groups: Vec::new(),
                index: HashMap::new(),
            }
        }

        /// Update the group for `key`, creating it on first sight.
        pub(super) fn upsert(
            &mut self,
            key: &str,
            create: impl FnOnce() -> G,
            update: impl FnOnce(&mut G),
        ) {
            if let Some(&i) = self.index.get(key) {
                if let Some(group) = self.groups.get_mut(i) {
                    update(group);
                }
            } else {
                self.index.insert(key.to_string(), self.groups.len());
                self.groups.push(create());
            }
        }

        pub(super) fn into_vec(self) -> Vec<G> {
            self.groups
        }
    }
}

/// Split a line on runs of whitespace.
///
/// Leading or trailing whitespace produces an empty first or last cell, and
/// an empty line produces a single empty cell.
pub fn split_cells(line: &str) -> Vec<&str> {
    text::split_whitespace_runs(line)
}

/// Parse pasted text into header cells and input rows.
///
/// The first line is the header. Each following line holds a `/`-separated
/// region list, a `/`-separated percentage list and a total area. Missing
/// cells yield no percentages and a `NaN` area.
pub fn parse_raw_input(text: &str) -> InputTable {
    let mut lines = text::trim(text).split('\n');
    let header = lines
        .next()
        .map(|line| split_cells(line).into_iter().map(str::to_string).collect())
        .unwrap_or_default();

    let rows: Vec<InputRow> = lines
        .enumerate()
        .map(|(i, line)| {
            let cells = split_cells(line);
            let regions = cells
                .first()
                .map(|cell| cell.split('/').map(str::to_string).collect())
                .unwrap_or_default();
            let proportions = cells
                .get(1)
                .map(|cell| cell.split('/').map(parse_float).collect())
                .unwrap_or_default();
            let total_area_ha = cells.get(2).map_or(f64::NAN, |cell| parse_float(cell));

            InputRow {
                id: i + 1,
                regions,
                proportions,
                total_area_ha,
            }
        })
        .collect();

    tracing::debug!(rows = rows.len(), "parsed region input");
    InputTable { header, rows }
}

/// Area for a percentage of a total, rounded to [`AREA_SCALE`].
pub fn region_area(proportion: f64, total_area_ha: f64) -> f64 {
    js_round(proportion / 100.0 * total_area_ha * AREA_SCALE) / AREA_SCALE
}

/// Order two region identifiers by code point.
pub fn compare_regions(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Expand each row into one row per region, sorted by region.
///
/// The sort is stable: rows for the same region keep their input order.
pub fn expand_regions(rows: &[InputRow]) -> Vec<ExpandedRow> {
    let mut expanded: Vec<ExpandedRow> = rows
        .iter()
        .flat_map(|row| {
            row.regions.iter().enumerate().map(move |(i, region)| {
                let proportion = row.proportions.get(i).copied();
                ExpandedRow {
                    id: row.id,
                    region: region.clone(),
                    proportion,
                    total_area_ha: row.total_area_ha,
                    area_ha: proportion.map_or(f64::NAN, |p| region_area(p, row.total_area_ha)),
                }
            })
        })
        .collect();

    expanded.sort_by(|a, b| compare_regions(&a.region, &b.region));
    tracing::debug!(rows = rows.len(), expanded = expanded.len(), "expanded regions");
    expanded
}

/// Group expanded rows by region in first-seen order.
pub fn group_region_areas(rows: &[ExpandedRow]) -> Vec<RegionGroup> {
    let mut groups = OrderedGroups::new();
    for row in rows {
        groups.upsert(&row.region, || RegionGroup::start(row), |g| g.add(row));
    }
    groups.into_vec()
}

/// Total area per region in first-seen order.
pub fn sum_region_areas(rows: &[ExpandedRow]) -> Vec<ResultRow> {
    let results: Vec<ResultRow> = group_region_areas(rows)
        .iter()
        .map(ResultRow::from)
        .collect();
    tracing::debug!(regions = results.len(), "summed region areas");
    results
}

impl TableRecord for ExpandedRow {
    fn headers() -> Vec<Header> {
        vec![
            Header::new("region", "Region"),
            Header::new("id", "Row Number"),
            Header::new("totalAreaHa", "Total Area (Ha)"),
            Header::new("proportion", "Proportion"),
            Header::new("areaHa", "Region Area (Ha)"),
        ]
    }

    fn to_row(&self) -> TableRow {
        TableRow::new()
            .cell("region", self.region.as_str())
            .cell("id", self.id)
            .cell("totalAreaHa", self.total_area_ha)
            .cell("proportion", self.proportion)
            .cell("areaHa", self.area_ha)
    }
}

impl TableRecord for ResultRow {
    fn headers() -> Vec<Header> {
        vec![
            Header::new("region", "Region"),
            Header::new("totalAreaHa", "Total Area (Ha)"),
        ]
    }

    fn to_row(&self) -> TableRow {
        TableRow::new()
            .cell("region", self.region.as_str())
            .cell("totalAreaHa", self.total_area_ha)
    }
}

/// Table of per-region contributions.
pub fn intermediate_table(rows: &[ExpandedRow]) -> Table {
    Table::from_records(rows)
}

/// Table of per-region totals.
pub fn result_table(rows: &[ResultRow]) -> Table {
    Table::from_records(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn expanded(id: usize, region: &str, area_ha: f64) -> ExpandedRow {
        ExpandedRow {
            id,
            region: region.to_string(),
            proportion: Some(100.0),
            total_area_ha: area_ha,
            area_ha,
        }
    }

    // ===== Cell Splitting Tests =====

    #[test]
    fn test_split_cells_runs() {
        assert_eq!(split_cells("a  b\t\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_cells_edges() {
        assert_eq!(split_cells(" a"), vec!["", "a"]);
        assert_eq!(split_cells("a "), vec!["a", ""]);
        assert_eq!(split_cells(""), vec![""]);
        assert_eq!(split_cells("   "), vec!["", ""]);
    }

    #[test]
    fn test_split_cells_crlf() {
        assert_eq!(split_cells("1.3.7 100 2\r"), vec!["1.3.7", "100", "2", ""]);
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let table = parse_raw_input("\u{FEFF}RE PERCENT TotalArea_ha\na 100 1");
        assert_eq!(table.header, vec!["RE", "PERCENT", "TotalArea_ha"]);
        assert_eq!(split_cells("a\u{FEFF}b"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_cells_keeps_next_line_char() {
        assert_eq!(split_cells("1.2\u{85} 100"), vec!["1.2\u{85}", "100"]);
    }

    // ===== Parser Tests =====

    #[test]
    fn test_parse_header_and_ids() {
        let table = parse_raw_input("RE PERCENT TotalArea_ha\na 100 1\nb 100 2");
        assert_eq!(table.header, vec!["RE", "PERCENT", "TotalArea_ha"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].id, 1);
        assert_eq!(table.rows[1].id, 2);
        assert_eq!(table.rows[1].total_area_ha, 2.0);
    }

    #[test]
    fn test_parse_multi_region_row() {
        let table = parse_raw_input("RE PERCENT AREA\n1.11.2a/1.7.7a 65/35 0.002374634");
        let row = &table.rows[0];
        assert_eq!(row.regions, vec!["1.11.2a", "1.7.7a"]);
        assert_eq!(row.proportions, vec![65.0, 35.0]);
        assert_eq!(row.total_area_ha, 0.002_374_634);
    }

    #[test]
    fn test_parse_trims_surrounding_blank_lines() {
        let table = parse_raw_input("\n\n  RE P A\nx 100 1\n\n");
        assert_eq!(table.header, vec!["RE", "P", "A"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_raw_input("RE PERCENT TotalArea_ha");
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_empty_text() {
        let table = parse_raw_input("");
        assert_eq!(table.header, vec![""]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_missing_cells_are_lenient() {
        let table = parse_raw_input("H\nonly-region");
        let row = &table.rows[0];
        assert_eq!(row.regions, vec!["only-region"]);
        assert!(row.proportions.is_empty());
        assert!(row.total_area_ha.is_nan());
    }

    #[test]
    fn test_parse_non_numeric_cells_are_nan() {
        let table = parse_raw_input("H\na/b x/50 ha");
        let row = &table.rows[0];
        assert!(row.proportions[0].is_nan());
        assert_eq!(row.proportions[1], 50.0);
        assert!(row.total_area_ha.is_nan());
    }

    #[test]
    fn test_parse_leading_whitespace_shifts_cells() {
        let table = parse_raw_input("H\n x 100 1\n y 50 2");
        let row = &table.rows[1];
        assert_eq!(row.regions, vec![""]);
        assert_eq!(row.proportions.len(), 1);
        assert!(row.proportions[0].is_nan());
        assert_eq!(row.total_area_ha, 50.0);
    }

    // ===== Expander Tests =====

    #[test]
    fn test_region_area_rounding() {
        assert_eq!(region_area(100.0, 0.1), 0.1);
        assert_eq!(region_area(50.0, 0.117_788_037), 0.058_894_018_5);
        assert!(region_area(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_expand_sorts_by_region() {
        let input = parse_raw_input("H\nb/a 60/40 10\nc/a 50/50 2");
        let rows = expand_regions(&input.rows);
        let regions: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["a", "a", "b", "c"]);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[0].area_ha, 4.0);
        assert_eq!(rows[1].area_ha, 1.0);
    }

    #[test]
    fn test_expand_code_point_order() {
        let input = parse_raw_input("H\nb 100 1\nB 100 1\n1.3.7 100 1\n1.11.8 100 1");
        let rows = expand_regions(&input.rows);
        let regions: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["1.11.8", "1.3.7", "B", "b"]);
    }

    #[test]
    fn test_expand_missing_proportion() {
        let input = parse_raw_input("H\na/b 100 5");
        let rows = expand_regions(&input.rows);
        assert_eq!(rows[0].proportion, Some(100.0));
        assert_eq!(rows[0].area_ha, 5.0);
        assert_eq!(rows[1].proportion, None);
        assert!(rows[1].area_ha.is_nan());
    }

    #[test]
    fn test_compare_regions_three_way() {
        assert_eq!(compare_regions("a", "b"), Ordering::Less);
        assert_eq!(compare_regions("b", "a"), Ordering::Greater);
        assert_eq!(compare_regions("a", "a"), Ordering::Equal);
    }

    // ===== Aggregator Tests =====

    #[test]
    fn test_group_keeps_parts_in_order() {
        let rows = vec![
            expanded(1, "x", 0.10),
            expanded(2, "x", 0.05),
            expanded(3, "y", 1.0),
        ];
        let groups = group_region_areas(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].region, "x");
        assert_eq!(groups[0].total_area_ha, 0.10 + 0.05);
        assert_eq!(
            groups[0].parts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(groups[1].parts.len(), 1);
    }

    #[test]
    fn test_sum_first_seen_order() {
        let rows = vec![expanded(1, "z", 1.0), expanded(2, "a", 2.0), expanded(3, "z", 3.0)];
        let results = sum_region_areas(&rows);
        assert_eq!(
            results,
            vec![
                ResultRow {
                    region: "z".to_string(),
                    total_area_ha: 4.0
                },
                ResultRow {
                    region: "a".to_string(),
                    total_area_ha: 2.0
                },
            ]
        );
    }

    #[test]
    fn test_sum_nan_propagates() {
        let mut bad = expanded(2, "x", 1.0);
        bad.area_ha = f64::NAN;
        let results = sum_region_areas(&[expanded(1, "x", 1.0), bad]);
        assert!(results[0].total_area_ha.is_nan());
    }

    #[test]
    fn test_sum_empty() {
        assert!(sum_region_areas(&[]).is_empty());
        assert!(group_region_areas(&[]).is_empty());
    }

    // ===== Table Tests =====

    #[test]
    fn test_intermediate_table_csv() {
        let input = parse_raw_input("H\n1.3.6a/1.3.7 50/50 2");
        let table = intermediate_table(&expand_regions(&input.rows));
        assert!(table.validate().is_ok());
        assert_eq!(
            table.to_csv(","),
            "Region,Row Number,Total Area (Ha),Proportion,Region Area (Ha)\n\
             1.3.6a,1,2,50,1\n\
             1.3.7,1,2,50,1"
        );
    }

    #[test]
    fn test_intermediate_table_missing_proportion_is_empty_cell() {
        let input = parse_raw_input("H\na/b 100 5");
        let csv = intermediate_table(&expand_regions(&input.rows)).to_csv(",");
        assert!(csv.ends_with("b,1,5,,NaN"));
    }

    #[test]
    fn test_result_table_csv() {
        let table = result_table(&[ResultRow {
            region: "1.11.8".to_string(),
            total_area_ha: 0.15,
        }]);
        assert!(table.validate().is_ok());
        assert_eq!(table.to_csv(","), "Region,Total Area (Ha)\n1.11.8,0.15");
    }

    #[test]
    fn test_sample_input_pipeline() {
        let input = parse_raw_input(SAMPLE_INPUT);
        assert_eq!(input.header, vec!["RE", "PERCENT", "TotalArea_ha"]);
        assert_eq!(input.rows.len(), 8);

        let rows = expand_regions(&input.rows);
        assert_eq!(rows.len(), 15);

        let results = sum_region_areas(&rows);
        let regions: Vec<&str> = results.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(
            regions,
            vec!["1.11.2a", "1.11.8", "1.3.6a", "1.3.7", "1.7.5", "1.7.5b", "1.7.7a"]
        );
    }

    proptest! {
        #[test]
        fn prop_results_unique_and_sorted(
            lines in prop::collection::vec(("[a-c]{1,2}", 0u32..=100, 0u32..1000), 0..20)
        ) {
            let text = std::iter::once("RE P A".to_string())
                .chain(lines.iter().map(|(r, p, a)| format!("{r} {p} {a}")))
                .collect::<Vec<_>>()
                .join("\n");
            let results = sum_region_areas(&expand_regions(&parse_raw_input(&text).rows));
            for pair in results.windows(2) {
                prop_assert_eq!(compare_regions(&pair[0].region, &pair[1].region), Ordering::Less);
            }
        }
    }
}
