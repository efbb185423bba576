use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Context, Result};

use crate::model::{PlantShift, RequestId, RequestStatus, Schedule, ShiftChangeRequest, UserId};
use crate::request::Actor;
use crate::roles::{are_roles_compatible, can_participate};
use crate::rules::{validate_assignment, RuleOptions};

/// Construye la agenda de cada usuario a partir de la planilla de planta.
/// La planilla debe cubrir al menos ±7 días alrededor de las fechas a
/// validar, o las reglas de descanso y racha contarán de menos.
pub fn build_schedules(roster: &[PlantShift]) -> HashMap<UserId, Schedule> {
    let mut out: HashMap<UserId, Schedule> = HashMap::new();
    for row in roster {
        out.entry(row.user_id.clone())
            .or_default()
            .assign(row.date, row.shift_name.clone());
    }
    out
}

/// Filtra la planilla buscando candidatos elegibles para la solicitud.
///
/// Se descartan, en orden: el propio solicitante, roles que no participan en
/// cambios, familias incompatibles, fechas que el solicitante no acepta, y
/// candidatos cuyo intercambio dejaría alguna de las dos agendas fuera de
/// regla. Función pura: no muta ninguna entrada.
pub fn search_candidates(
    request: &ShiftChangeRequest,
    roster: &[PlantShift],
    schedules: &HashMap<UserId, Schedule>,
    opts: RuleOptions,
) -> Vec<PlantShift> {
    let empty = Schedule::new();
    let requester_schedule = schedules.get(&request.requester_id).unwrap_or(&empty);

    roster
        .iter()
        .filter(|row| row.user_id != request.requester_id)
        .filter(|row| can_participate(&row.user_role))
        .filter(|row| are_roles_compatible(&request.requester_role, &row.user_role))
        .filter(|row| request.accepts_date(row.date))
        .filter(|row| {
            let candidate_schedule = schedules.get(&row.user_id).unwrap_or(&empty);
            validate_assignment(row.date, &row.shift_name, requester_schedule, opts).is_none()
                && validate_assignment(
                    request.shift_date,
                    &request.shift_name,
                    candidate_schedule,
                    opts,
                )
                .is_none()
        })
        .cloned()
        .collect()
}

/// Puerta de búsqueda: como mucho una búsqueda en vuelo; si ya hay una,
/// la nueva se descarta (política explícita en lugar de un bool suelto).
#[derive(Debug, Default)]
pub struct SearchGate {
    busy: AtomicBool,
}

impl SearchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve un pase si no hay búsqueda en curso; `None` = descartar.
    /// El pase libera la puerta al soltarse.
    pub fn try_acquire(&self) -> Option<SearchPass<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| SearchPass { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct SearchPass<'a> {
    gate: &'a SearchGate,
}

impl Drop for SearchPass<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Repositorio de solicitudes de una planta (frontera de almacenamiento).
///
/// `update_if` es una escritura condicional: solo aplica si el estado
/// almacenado coincide con el esperado, porque dos partes pueden competir
/// por aceptar/rechazar a la vez.
pub trait RequestRepository {
    fn list(&self) -> Result<Vec<ShiftChangeRequest>>;
    fn get(&self, id: &RequestId) -> Result<Option<ShiftChangeRequest>>;
    fn insert(&mut self, request: ShiftChangeRequest) -> Result<()>;
    /// `false` = el estado ya no era `expected` (carrera perdida).
    fn update_if(&mut self, expected: RequestStatus, request: &ShiftChangeRequest) -> Result<bool>;
}

/// `searching → pendingPartner` contra el repositorio, de forma condicional.
pub fn propose_candidate(
    repo: &mut dyn RequestRepository,
    actor: &Actor,
    id: &RequestId,
    candidate: &PlantShift,
) -> Result<ShiftChangeRequest> {
    let mut request = fetch(repo, id)?;
    let before = request.status;
    request.propose(actor, candidate)?;
    commit(repo, before, &request)?;
    Ok(request)
}

/// El compañero designado acepta o declina (`pendingPartner → …`).
pub fn answer_request(
    repo: &mut dyn RequestRepository,
    actor: &Actor,
    id: &RequestId,
    accept: bool,
) -> Result<ShiftChangeRequest> {
    let mut request = fetch(repo, id)?;
    let before = request.status;
    if accept {
        request.accept(actor)?;
    } else {
        request.decline(actor)?;
    }
    commit(repo, before, &request)?;
    Ok(request)
}

/// Resolución de supervisión (`awaitingSupervisor → approved|rejected`).
pub fn resolve_request(
    repo: &mut dyn RequestRepository,
    actor: &Actor,
    id: &RequestId,
    approve: bool,
) -> Result<ShiftChangeRequest> {
    let mut request = fetch(repo, id)?;
    let before = request.status;
    request.resolve(actor, approve)?;
    commit(repo, before, &request)?;
    Ok(request)
}

fn fetch(repo: &dyn RequestRepository, id: &RequestId) -> Result<ShiftChangeRequest> {
    repo.get(id)?
        .with_context(|| format!("unknown request: {}", id.as_str()))
}

fn commit(
    repo: &mut dyn RequestRepository,
    expected: RequestStatus,
    request: &ShiftChangeRequest,
) -> Result<()> {
    if !repo.update_if(expected, request)? {
        bail!(
            "request {} changed underneath (expected status {:?})",
            request.id.as_str(),
            expected
        );
    }
    Ok(())
}
