//! Shape corrections into the output template

use frota_types::{FieldRole, Result, TableKind};
use tracing::debug;

use crate::model::{Attribute, ChangeSet, ProjectedTable, RoleAliases, TargetSchema};
use crate::service::column_resolver::{resolve_index, ColumnResolver};

/// Template column positions for each role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRoles {
    pub plate: usize,
    pub status: usize,
    pub base: Option<usize>,
    pub cost_center: Option<usize>,
}

impl SchemaRoles {
    pub fn attribute(&self, attribute: Attribute) -> Option<usize> {
        match attribute {
            Attribute::Base => self.base,
            Attribute::CostCenter => self.cost_center,
        }
    }
}

/// Locate the role columns in the template; plate and status are mandatory
pub fn resolve_schema_roles(schema: &TargetSchema, aliases: &RoleAliases) -> Result<SchemaRoles> {
    let columns = &schema.columns;
    let resolver = ColumnResolver::new(columns);
    let index_of = |header: &str| columns.iter().position(|c| c == header);

    let plate = resolver.resolve_required(&aliases.plate, FieldRole::Plate, TableKind::Template)?;
    let status =
        resolver.resolve_required(&aliases.status, FieldRole::Status, TableKind::Template)?;

    Ok(SchemaRoles {
        plate: index_of(plate).unwrap_or_default(),
        status: index_of(status).unwrap_or_default(),
        base: resolve_index(columns, &aliases.base),
        cost_center: resolve_index(columns, &aliases.cost_center),
    })
}

/// One row per changed plate, ascending by plate, unchanged cells left empty
pub fn project(
    schema: &TargetSchema,
    aliases: &RoleAliases,
    changes: &ChangeSet,
) -> Result<ProjectedTable> {
    let roles = resolve_schema_roles(schema, aliases)?;
    Ok(project_with_roles(schema, &roles, changes))
}

pub fn project_with_roles(
    schema: &TargetSchema,
    roles: &SchemaRoles,
    changes: &ChangeSet,
) -> ProjectedTable {
    let width = schema.columns.len();
    let rows: Vec<Vec<String>> = changes
        .changed_plates()
        .into_iter()
        .map(|plate| {
            let mut row = vec![String::new(); width];
            row[roles.plate] = plate.to_string();
            if let Some(target) = changes.status.get(plate) {
                row[roles.status] = target.clone();
            }
            for attribute in Attribute::ALL {
                if let (Some(col), Some(target)) =
                    (roles.attribute(attribute), changes.attribute(attribute).get(plate))
                {
                    row[col] = target.clone();
                }
            }
            row
        })
        .collect();

    debug!(rows = rows.len(), columns = width, "projected corrections");
    ProjectedTable {
        columns: schema.columns.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnAliases;
    use frota_types::Error;

    fn aliases() -> RoleAliases {
        ColumnAliases::default().template
    }

    #[test]
    fn test_rows_sorted_and_sparse() {
        let schema = TargetSchema::new(["Dominio", "Modelo", "Base", "Estado"]);
        let mut changes = ChangeSet::default();
        changes.status.insert("ZZZ0001".to_string(), "FROTA OCIOSA".to_string());
        changes.base.insert("AAA0001".to_string(), "SP01".to_string());

        let table = project(&schema, &aliases(), &changes).unwrap();
        assert_eq!(table.columns, schema.columns);
        assert_eq!(
            table.rows,
            vec![
                vec!["AAA0001".to_string(), String::new(), "SP01".to_string(), String::new()],
                vec!["ZZZ0001".to_string(), String::new(), String::new(), "FROTA OCIOSA".to_string()],
            ]
        );
    }

    #[test]
    fn test_missing_optional_role_left_unfilled() {
        let schema = TargetSchema::new(["Estado", "Dominio"]);
        let mut changes = ChangeSet::default();
        changes.cost_center.insert("AAA0001".to_string(), "CC1".to_string());

        let table = project(&schema, &aliases(), &changes).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Dominio"), Some("AAA0001"));
        assert_eq!(table.get(0, "Estado"), Some(""));
    }

    #[test]
    fn test_schema_without_plate_role_fails() {
        let schema = TargetSchema::new(["Estado", "Base"]);
        let err = project(&schema, &aliases(), &ChangeSet::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                role: FieldRole::Plate,
                table: TableKind::Template
            }
        ));
    }

    #[test]
    fn test_schema_roles_tolerate_case_and_accents() {
        let schema = TargetSchema::new([" dominio", "ESTADO ", "centro de costo"]);
        let roles = resolve_schema_roles(&schema, &aliases()).unwrap();
        assert_eq!(roles.plate, 0);
        assert_eq!(roles.status, 1);
        assert_eq!(roles.base, None);
        assert_eq!(roles.cost_center, Some(2));
    }
}
