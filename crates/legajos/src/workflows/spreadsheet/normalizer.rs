/// Columns recognised in employee import sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportColumn {
    Legajo,
    FirstName,
    LastName,
    Dni,
    Cuil,
    HireDate,
    ServiceId,
    SupervisorId,
}

/// Lowercase, drop BOM/zero-width marks, spaces and underscores, so that
/// `Fecha Ingreso`, `fecha_ingreso` and `FECHAINGRESO` compare equal.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn column_for(header: &str) -> Option<ImportColumn> {
    match normalize_header(header).as_str() {
        "legajo" => Some(ImportColumn::Legajo),
        "nombre" => Some(ImportColumn::FirstName),
        "apellido" => Some(ImportColumn::LastName),
        "dni" => Some(ImportColumn::Dni),
        "cuil" => Some(ImportColumn::Cuil),
        "fechaingreso" => Some(ImportColumn::HireDate),
        "servicioid" => Some(ImportColumn::ServiceId),
        "supervisorid" => Some(ImportColumn::SupervisorId),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_variants_resolve_to_the_same_column() {
        assert_eq!(column_for("Fecha Ingreso"), Some(ImportColumn::HireDate));
        assert_eq!(column_for("fecha_ingreso"), Some(ImportColumn::HireDate));
        assert_eq!(column_for("\u{feff}Legajo"), Some(ImportColumn::Legajo));
        assert_eq!(column_for("ServicioID"), Some(ImportColumn::ServiceId));
        assert_eq!(column_for("supervisor_id"), Some(ImportColumn::SupervisorId));
        assert_eq!(column_for(" DNI "), Some(ImportColumn::Dni));
        assert_eq!(column_for("Observaciones"), None);
    }
}
