use serde::{Deserialize, Serialize};

use crate::classify::fold;

/// Familia profesional controlada, deducida del rol en texto libre.
///
/// El orden de detección es fijo: supervisor > enfermería > auxiliar.
/// "TCAE" se trata como miembro de la familia auxiliar (decisión documentada
/// en DESIGN.md; el texto original solo comprobaba subcadenas y dejaba a
/// "TCAE" fuera de un predicado pero dentro del otro). Un rol mixto tipo
/// "Auxiliar de Enfermería" clasifica como enfermería por ese mismo orden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleFamily {
    Nurse,
    Auxiliary,
    Supervisor,
    Other,
}

/// Clasifica un rol en texto libre en su familia.
pub fn role_family(role: &str) -> RoleFamily {
    let folded = fold(role);
    if folded.contains("supervisor") {
        RoleFamily::Supervisor
    } else if folded.contains("enfermer") {
        RoleFamily::Nurse
    } else if folded.contains("auxiliar") || folded.contains("tcae") {
        RoleFamily::Auxiliary
    } else {
        RoleFamily::Other
    }
}

/// ¿Puede este rol participar en cambios de turno?
/// Supervisión queda excluida categóricamente; solo enfermería y auxiliares
/// entran en el mercado de cambios.
pub fn can_participate(role: &str) -> bool {
    matches!(role_family(role), RoleFamily::Nurse | RoleFamily::Auxiliary)
}

/// ¿Son dos roles intercambiables? Misma familia y familia participante:
/// enfermería con enfermería, auxiliar con auxiliar, nunca cruzados y nunca
/// con supervisión.
pub fn are_roles_compatible(role_a: &str, role_b: &str) -> bool {
    let family = role_family(role_a);
    family == role_family(role_b)
        && matches!(family, RoleFamily::Nurse | RoleFamily::Auxiliary)
}
