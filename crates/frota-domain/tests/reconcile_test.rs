//! End-to-end behaviour of the reconciliation engine

use std::collections::BTreeSet;

use frota_domain::model::{CellValue, ColumnAliases, StatusRules, Table, TargetSchema};
use frota_domain::service::{reconcile, Reconciler};
use frota_types::{Error, FieldRole, TableKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const ACTIVE: &str = "ATIVO - BIPANDO";
const IDLE: &str = "FROTA OCIOSA";

fn fleet(rows: &[(&str, &str)]) -> Table {
    Table::from_rows(
        ["PLACA", "ESTADO"],
        rows.iter()
            .map(|(p, s)| vec![CellValue::from(*p), CellValue::from(*s)])
            .collect(),
    )
}

fn availability(plates: &[&str]) -> Table {
    Table::from_rows(
        ["VEÍCULO"],
        plates.iter().map(|p| vec![CellValue::from(*p)]).collect(),
    )
}

fn schema() -> TargetSchema {
    TargetSchema::fleet_update()
}

#[test]
fn test_active_vehicle_listed_as_available_goes_idle() {
    let result = reconcile(
        &fleet(&[("ABC1234", ACTIVE)]),
        &availability(&["ABC1234"]),
        &schema(),
    )
    .unwrap();

    assert_eq!(result.output.len(), 1);
    assert_eq!(result.output.get(0, "Dominio"), Some("ABC1234"));
    assert_eq!(result.output.get(0, "Estado"), Some(IDLE));
    assert_eq!(result.output.get(0, "Base"), Some(""));
}

#[test]
fn test_idle_vehicle_missing_from_availability_goes_active() {
    let result = reconcile(&fleet(&[("XYZ9999", IDLE)]), &availability(&[]), &schema()).unwrap();

    assert_eq!(result.output.len(), 1);
    assert_eq!(result.output.get(0, "Dominio"), Some("XYZ9999"));
    assert_eq!(result.output.get(0, "Estado"), Some(ACTIVE));
}

#[test]
fn test_empty_fleet_is_not_an_error() {
    let result = reconcile(&fleet(&[]), &availability(&["ABC1234"]), &schema()).unwrap();

    assert!(result.output.is_empty());
    assert_eq!(result.summary.total_records, 0);
    assert_eq!(result.summary.to_idle.percentage, 0.0);
    assert_eq!(result.summary.to_active.percentage, 0.0);
    assert_eq!(result.summary.status_changes.percentage, 0.0);
    assert!(result.summary.status_distribution.is_empty());
}

#[rstest]
#[case(&["PLACA", "ESTADO"])]
#[case(&[" placa ", "estado"])]
#[case(&["Placa", " Estado "])]
fn test_header_variants_resolve_identically(#[case] headers: &[&str]) {
    let table = Table::from_rows(
        headers.iter().copied(),
        vec![vec!["abc1234".into(), ACTIVE.into()]],
    );
    let result = reconcile(&table, &availability(&["ABC1234"]), &schema()).unwrap();
    assert_eq!(result.output.get(0, "Dominio"), Some("ABC1234"));
}

#[rstest]
#[case(&["Estado", "Base"], FieldRole::Plate)]
#[case(&["Dominio", "Base"], FieldRole::Status)]
fn test_template_missing_required_role_fails(#[case] columns: &[&str], #[case] role: FieldRole) {
    let err = reconcile(
        &fleet(&[("A", ACTIVE)]),
        &availability(&[]),
        &TargetSchema::new(columns.iter().copied()),
    )
    .unwrap_err();
    match err {
        Error::MissingColumn { role: r, table } => {
            assert_eq!((r, table), (role, TableKind::Template));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fleet_without_status_fails_with_named_role() {
    let table = Table::from_rows(["Placa", "Modelo"], vec![]);
    let err = reconcile(&table, &availability(&[]), &schema()).unwrap_err();
    assert_eq!(err.to_string(), "Missing 'Status' column in fleet file");
}

fn full_fleet() -> Table {
    Table::from_rows(
        ["Placa", "Estado", "Base", "Centro de Custo"],
        vec![
            vec!["AAA0001".into(), ACTIVE.into(), "SP01".into(), "CC10".into()],
            vec!["BBB0002".into(), IDLE.into(), "SP01".into(), "CC10".into()],
            vec!["CCC0003".into(), ACTIVE.into(), "RJ02".into(), "CC20".into()],
            vec!["DDD0004".into(), "EM MANUTENÇÃO".into(), "RJ02".into(), CellValue::Empty],
        ],
    )
}

fn full_availability() -> Table {
    Table::from_rows(
        ["Veiculo", "Base", "Centro de Custo"],
        vec![
            vec!["aaa0001".into(), "SP01".into(), "CC10".into()],
            vec!["CCC0003".into(), "MG03".into(), "CC20".into()],
            vec!["CCC0003".into(), "MG03".into(), "CC20".into()],
            vec!["CCC0003".into(), "RJ02".into(), "CC20".into()],
            vec!["DDD0004".into(), "RJ02".into(), "CC30".into()],
        ],
    )
}

#[test]
fn test_attribute_and_status_changes_combine_per_plate() {
    let result = reconcile(&full_fleet(), &full_availability(), &schema()).unwrap();
    let out = &result.output;

    let plates: Vec<&str> = (0..out.len()).filter_map(|r| out.get(r, "Dominio")).collect();
    assert_eq!(plates, vec!["AAA0001", "BBB0002", "CCC0003", "DDD0004"]);

    // AAA0001: listed, active -> idle; attributes agree
    assert_eq!(out.rows[0], vec!["AAA0001", "", "", IDLE]);
    // BBB0002: idle, not listed -> active
    assert_eq!(out.rows[1], vec!["BBB0002", "", "", ACTIVE]);
    // CCC0003: active and listed, base mode MG03
    assert_eq!(out.rows[2], vec!["CCC0003", "MG03", "", IDLE]);
    // DDD0004: unknown status untouched, empty cost center filled
    assert_eq!(out.rows[3], vec!["DDD0004", "", "CC30", ""]);

    let summary = &result.summary;
    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.to_idle.count, 2);
    assert_eq!(summary.to_idle.percentage, 50.0);
    assert_eq!(summary.to_active.count, 1);
    assert_eq!(summary.to_active.percentage, 25.0);
    assert_eq!(summary.status_changes.count, 3);
    assert_eq!(summary.base_changes, 1);
    assert_eq!(summary.cost_center_changes, 1);
    assert_eq!(summary.multi_change_plates, 1);
    assert_eq!(summary.total_change_rows, 4);
}

#[test]
fn test_attribute_ignored_when_template_lacks_column() {
    let schema = TargetSchema::new(["Dominio", "Estado"]);
    let result = reconcile(&full_fleet(), &full_availability(), &schema).unwrap();
    assert!(result.changes.base.is_empty());
    assert!(result.changes.cost_center.is_empty());
    // DDD0004 only had a cost center change
    assert_eq!(result.output.len(), 3);
}

#[test]
fn test_duplicate_fleet_plate_last_row_wins() {
    let fleet = Table::from_rows(
        ["Placa", "Estado", "Base"],
        vec![
            vec!["AAA0001".into(), "EM MANUTENÇÃO".into(), "MG03".into()],
            vec!["AAA0001".into(), "EM MANUTENÇÃO".into(), "SP01".into()],
        ],
    );
    let availability = Table::from_rows(
        ["Veículo", "Base"],
        vec![vec!["AAA0001".into(), "SP01".into()]],
    );
    let result = reconcile(&fleet, &availability, &schema()).unwrap();
    assert!(result.output.is_empty());
    assert_eq!(result.summary.total_records, 2);
}

#[test]
fn test_values_are_not_accent_folded() {
    let fleet = Table::from_rows(
        ["Placa", "Estado", "Base"],
        vec![vec!["AAA0001".into(), "EM MANUTENÇÃO".into(), "SAO PAULO".into()]],
    );
    let availability = Table::from_rows(
        ["Veículo", "Base"],
        vec![vec!["AAA0001".into(), "São Paulo".into()]],
    );
    let result = reconcile(&fleet, &availability, &schema()).unwrap();
    assert_eq!(result.changes.base.get("AAA0001").map(String::as_str), Some("SÃO PAULO"));
}

#[test]
fn test_custom_rules_and_aliases() {
    let mut aliases = ColumnAliases::default();
    aliases.fleet.plate.push("Matricula".to_string());
    let reconciler = Reconciler::new(
        aliases,
        StatusRules {
            active: "EM USO".to_string(),
            idle: "PARADO".to_string(),
        },
    );
    let fleet = Table::from_rows(
        ["Matricula", "Estado"],
        vec![vec!["AAA0001".into(), "EM USO".into()]],
    );
    let result = reconciler
        .reconcile(&fleet, &availability(&["AAA0001"]), &schema())
        .unwrap();
    assert_eq!(result.output.get(0, "Estado"), Some("PARADO"));
}

#[test]
fn test_status_variants_are_neither_corrected_nor_merged() {
    let fleet = fleet(&[
        ("AAA0001", "ativo - bipando"),
        ("BBB0002", " FROTA OCIOSA "),
        ("CCC0003", "Frota Ociosa"),
        ("DDD0004", IDLE),
    ]);
    let result = reconcile(&fleet, &availability(&["AAA0001", "DDD0004"]), &schema()).unwrap();

    assert!(result.corrections.to_idle.is_empty());
    assert!(result.corrections.to_active.is_empty());
    assert!(result.output.is_empty());

    let distribution: Vec<(&str, usize)> = result
        .summary
        .status_distribution
        .iter()
        .map(|s| (s.status.as_str(), s.count))
        .collect();
    assert_eq!(
        distribution,
        vec![
            (" FROTA OCIOSA ", 1),
            ("FROTA OCIOSA", 1),
            ("Frota Ociosa", 1),
            ("ativo - bipando", 1),
        ]
    );
}

fn status_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(ACTIVE), Just(IDLE), Just("EM MANUTENÇÃO")]
}

fn plate_strategy() -> impl Strategy<Value = String> {
    "[A-E][0-3]"
}

proptest! {
    #[test]
    fn prop_status_rule_and_output_invariants(
        fleet_rows in prop::collection::vec((plate_strategy(), status_strategy()), 0..20),
        listed in prop::collection::vec(plate_strategy(), 0..10),
    ) {
        let rows: Vec<(&str, &str)> = fleet_rows.iter().map(|(p, s)| (p.as_str(), *s)).collect();
        let listed_refs: Vec<&str> = listed.iter().map(String::as_str).collect();
        let fleet_table = fleet(&rows);
        let availability_table = availability(&listed_refs);
        let listed_set: BTreeSet<&str> = listed_refs.iter().copied().collect();

        let result = reconcile(&fleet_table, &availability_table, &schema()).unwrap();

        for (plate, status) in &rows {
            if *status == ACTIVE && listed_set.contains(plate) {
                prop_assert!(result.corrections.to_idle.contains(*plate));
            }
            if *status == IDLE && !listed_set.contains(plate) {
                prop_assert!(result.corrections.to_active.contains(*plate));
            }
        }
        for plate in &result.corrections.to_idle {
            prop_assert!(listed_set.contains(plate.as_str()));
            prop_assert!(rows.iter().any(|(p, s)| p == plate && *s == ACTIVE));
        }
        for plate in &result.corrections.to_active {
            prop_assert!(!listed_set.contains(plate.as_str()));
            prop_assert!(rows.iter().any(|(p, s)| p == plate && *s == IDLE));
        }
        prop_assert!(result.corrections.to_idle.is_disjoint(&result.corrections.to_active));

        // one row per changed plate, ascending
        let plates: Vec<&str> = (0..result.output.len())
            .filter_map(|r| result.output.get(r, "Dominio"))
            .collect();
        let mut sorted = plates.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&plates, &sorted);
        prop_assert_eq!(plates.len(), result.changes.changed_plates().len());

        let again = reconcile(&fleet_table, &availability_table, &schema()).unwrap();
        prop_assert_eq!(&again.output, &result.output);
        prop_assert_eq!(&again.summary, &result.summary);
    }
}
