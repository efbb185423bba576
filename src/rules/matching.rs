use super::{validate_assignment, RuleOptions};
use crate::model::{Schedule, ShiftChangeRequest};
use crate::roles::are_roles_compatible;

/// ¿Son dos solicitudes mutuamente elegibles para un cambio?
///
/// Se evalúa en orden, cortando en el primer fallo:
/// 1. compatibilidad de familias profesionales;
/// 2. aceptación mutua de fechas (`offered_dates` vacío = acepta cualquiera);
/// 3. validación cruzada: cada parte debe poder trabajar el turno de la otra
///    sin incumplir las reglas sobre su propia agenda.
///
/// La ida y la vuelta se validan explícitamente: un cambio válido deja las
/// dos agendas en regla.
pub fn check_match(
    requester: &ShiftChangeRequest,
    candidate: &ShiftChangeRequest,
    requester_schedule: &Schedule,
    candidate_schedule: &Schedule,
    opts: RuleOptions,
) -> bool {
    if !are_roles_compatible(&requester.requester_role, &candidate.requester_role) {
        return false;
    }

    if !requester.accepts_date(candidate.shift_date) || !candidate.accepts_date(requester.shift_date)
    {
        return false;
    }

    validate_assignment(
        candidate.shift_date,
        &candidate.shift_name,
        requester_schedule,
        opts,
    )
    .is_none()
        && validate_assignment(
            requester.shift_date,
            &requester.shift_name,
            candidate_schedule,
            opts,
        )
        .is_none()
}
