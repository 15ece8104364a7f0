//! Row cleaning for the two input tables
//!
//! Plates and attribute values are trimmed and uppercased. Status text is
//! kept exactly as written. Accents in values are kept as-is; only header
//! matching folds them.

use frota_types::{FieldRole, Result, TableKind};
use tracing::{debug, warn};

use crate::model::{
    AvailabilityRecord, CellValue, FleetRecord, NormalizedAvailability, NormalizedFleet,
    RoleAliases, Table,
};
use crate::service::column_resolver::{resolve_index, ColumnResolver};

/// Trimmed, uppercased text of a cell; `None` for null or blank cells
pub fn normalize_value(cell: &CellValue) -> Option<String> {
    if cell.is_missing() {
        return None;
    }
    Some(cell.to_string().trim().to_uppercase())
}

/// Cell text as written; `None` for null or blank cells
pub fn raw_value(cell: &CellValue) -> Option<String> {
    if cell.is_missing() {
        return None;
    }
    Some(cell.to_string())
}

/// Column positions of the roles present in a table
#[derive(Debug, Clone, Copy)]
struct Columns {
    plate: usize,
    status: Option<usize>,
    base: Option<usize>,
    cost_center: Option<usize>,
}

fn locate(table: &Table, aliases: &RoleAliases, kind: TableKind) -> Result<Columns> {
    let headers = table.headers();
    let resolver = ColumnResolver::new(headers);
    let index_of = |header: &str| headers.iter().position(|h| h == header);

    let plate = resolver.resolve_required(&aliases.plate, FieldRole::Plate, kind)?;
    let status = if kind == TableKind::Fleet {
        Some(resolver.resolve_required(&aliases.status, FieldRole::Status, kind)?)
    } else {
        None
    };
    let base = resolve_index(headers, &aliases.base);
    let cost_center = resolve_index(headers, &aliases.cost_center);
    debug!(%kind, ?base, ?cost_center, "optional columns");

    Ok(Columns {
        plate: index_of(plate).unwrap_or_default(),
        status: status.and_then(index_of),
        base,
        cost_center,
    })
}

fn optional(row: &[CellValue], col: Option<usize>) -> Option<String> {
    col.and_then(|c| row.get(c)).and_then(normalize_value)
}

/// Clean the fleet roster; rows without plate or status are dropped
pub fn normalize_fleet(table: &Table, aliases: &RoleAliases) -> Result<NormalizedFleet> {
    let cols = locate(table, aliases, TableKind::Fleet)?;
    let mut normalized = NormalizedFleet {
        has_base: cols.base.is_some(),
        has_cost_center: cols.cost_center.is_some(),
        ..Default::default()
    };

    for row in table.rows() {
        let plate = row.get(cols.plate).and_then(normalize_value);
        let status = cols.status.and_then(|c| row.get(c)).and_then(raw_value);
        match (plate, status) {
            (Some(plate), Some(status)) => normalized.records.push(FleetRecord {
                plate,
                status,
                base: optional(row, cols.base),
                cost_center: optional(row, cols.cost_center),
            }),
            _ => normalized.dropped_rows += 1,
        }
    }

    if normalized.dropped_rows > 0 {
        warn!(
            dropped = normalized.dropped_rows,
            "fleet rows without plate or status were skipped"
        );
    }
    Ok(normalized)
}

/// Clean the availability sheet; rows without plate are dropped
pub fn normalize_availability(
    table: &Table,
    aliases: &RoleAliases,
) -> Result<NormalizedAvailability> {
    let cols = locate(table, aliases, TableKind::Availability)?;
    let mut normalized = NormalizedAvailability {
        has_base: cols.base.is_some(),
        has_cost_center: cols.cost_center.is_some(),
        ..Default::default()
    };

    for row in table.rows() {
        match row.get(cols.plate).and_then(normalize_value) {
            Some(plate) => normalized.records.push(AvailabilityRecord {
                plate,
                base: optional(row, cols.base),
                cost_center: optional(row, cols.cost_center),
            }),
            None => normalized.dropped_rows += 1,
        }
    }

    if normalized.dropped_rows > 0 {
        warn!(
            dropped = normalized.dropped_rows,
            "availability rows without plate were skipped"
        );
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnAliases;
    use frota_types::Error;

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value(&" abc1234 ".into()), Some("ABC1234".to_string()));
        assert_eq!(normalize_value(&CellValue::Float(4521.0)), Some("4521".to_string()));
        assert_eq!(normalize_value(&"   ".into()), None);
        assert_eq!(normalize_value(&CellValue::Empty), None);
    }

    #[test]
    fn test_raw_value_keeps_text_as_written() {
        assert_eq!(raw_value(&" Frota Ociosa ".into()), Some(" Frota Ociosa ".to_string()));
        assert_eq!(raw_value(&CellValue::Int(7)), Some("7".to_string()));
        assert_eq!(raw_value(&" \t".into()), None);
        assert_eq!(raw_value(&CellValue::Empty), None);
    }

    #[test]
    fn test_values_keep_accents() {
        // header matching folds accents, values do not
        assert_eq!(normalize_value(&"São Paulo".into()), Some("SÃO PAULO".to_string()));
        assert_ne!(normalize_value(&"SAO PAULO".into()), normalize_value(&"São Paulo".into()));
    }

    #[test]
    fn test_fleet_drops_rows_missing_required_fields() {
        let table = Table::from_rows(
            [" placa ", "ESTADO", "Base"],
            vec![
                vec![" abc1234".into(), "ATIVO - BIPANDO".into(), "sp01".into()],
                vec![CellValue::Empty, "FROTA OCIOSA".into()],
                vec!["XYZ9999".into(), CellValue::Empty],
                vec!["DEF5678".into(), " frota ociosa ".into()],
                vec!["GHI0001".into(), "   ".into()],
            ],
        );
        let fleet = normalize_fleet(&table, &ColumnAliases::default().fleet).unwrap();
        assert_eq!(fleet.records.len(), 2);
        assert_eq!(fleet.dropped_rows, 3);
        assert!(fleet.has_base);
        assert!(!fleet.has_cost_center);
        assert_eq!(fleet.records[0].plate, "ABC1234");
        assert_eq!(fleet.records[0].base.as_deref(), Some("SP01"));
        // status text is not trimmed or uppercased
        assert_eq!(fleet.records[1].status, " frota ociosa ");
        assert_eq!(fleet.records[1].base, None);
    }

    #[test]
    fn test_fleet_missing_status_column_is_error() {
        let table = Table::from_rows(["Placa"], vec![vec!["ABC1234".into()]]);
        let err = normalize_fleet(&table, &ColumnAliases::default().fleet).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                role: FieldRole::Status,
                table: TableKind::Fleet
            }
        ));
    }

    #[test]
    fn test_availability_resolves_unaccented_header() {
        let table = Table::from_rows(
            ["VEICULO", "Centro de Custo"],
            vec![
                vec!["abc1234".into(), "cc01".into()],
                vec![CellValue::Empty, "cc02".into()],
            ],
        );
        let availability =
            normalize_availability(&table, &ColumnAliases::default().availability).unwrap();
        assert_eq!(availability.records.len(), 1);
        assert_eq!(availability.dropped_rows, 1);
        assert!(availability.has_cost_center);
        assert_eq!(availability.records[0].cost_center.as_deref(), Some("CC01"));
    }

    #[test]
    fn test_availability_missing_plate_column_is_error() {
        let table = Table::from_rows(["Modelo"], vec![]);
        let err =
            normalize_availability(&table, &ColumnAliases::default().availability).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                role: FieldRole::Plate,
                table: TableKind::Availability
            }
        ));
    }
}
