use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{classify_hardness, Hardness};

/// Identificador fuerte para un usuario de planta
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identificador fuerte para una solicitud de cambio
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Agenda de un usuario: fecha → nombre de turno.
///
/// Como máximo un turno por fecha; asignar dos veces el mismo día sobrescribe.
/// Los días libres NO se registran como entradas (la regla de días
/// consecutivos cuenta presencia de entrada, no su contenido).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule(BTreeMap<NaiveDate, String>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign<S: Into<String>>(&mut self, date: NaiveDate, shift_name: S) {
        self.0.insert(date, shift_name.into());
    }

    pub fn shift_on(&self, date: NaiveDate) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }

    pub fn is_working(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &str)> {
        self.0.iter().map(|(d, s)| (d, s.as_str()))
    }
}

impl FromIterator<(NaiveDate, String)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fila de la planilla de planta: un hueco cubierto un día concreto.
/// Registro de solo lectura, usado únicamente para la búsqueda de candidatos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantShift {
    pub user_id: UserId,
    pub user_name: String,
    pub user_role: String,
    pub date: NaiveDate,
    pub shift_name: String,
}

/// Tipo de solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestKind {
    Coverage,
    Swap,
}

/// Modo de aceptación de fechas: estricto (solo `offered_dates`) o flexible
/// (cualquier fecha; `offered_dates` vacío por convención).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestMode {
    Strict,
    Flexible,
}

/// Estados del ciclo de vida (ver `request` para las transiciones)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestStatus {
    Draft,
    Searching,
    PendingPartner,
    AwaitingSupervisor,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// `approved` y `rejected` no admiten más transiciones.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Mismo nombre que en el documento serializado.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Searching => "searching",
            Self::PendingPartner => "pendingPartner",
            Self::AwaitingSupervisor => "awaitingSupervisor",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solicitud de cambio de turno publicada por un miembro de la planta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftChangeRequest {
    pub id: RequestId,
    pub kind: RequestKind,
    pub status: RequestStatus,
    pub mode: RequestMode,
    /// Dureza del turno ofrecido, fijada al crear (informativa).
    pub hardness: Hardness,
    pub requester_id: UserId,
    pub requester_name: String,
    pub requester_role: String,
    /// Turno propio que se ofrece.
    pub shift_date: NaiveDate,
    pub shift_name: String,
    /// Fechas aceptadas a cambio; vacío = cualquiera (modo flexible).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offered_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub target_user_id: Option<UserId>,
    #[serde(default)]
    pub target_user_name: Option<String>,
    #[serde(default)]
    pub target_shift_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_shift_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ShiftChangeRequest {
    /// Crea una solicitud en borrador validando el invariante de modo:
    /// `Strict` exige `offered_dates` no vacío.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: RequestKind,
        mode: RequestMode,
        requester_id: UserId,
        requester_name: String,
        requester_role: String,
        shift_date: NaiveDate,
        shift_name: String,
        offered_dates: Vec<NaiveDate>,
    ) -> Result<Self, String> {
        if mode == RequestMode::Strict && offered_dates.is_empty() {
            return Err("strict mode requires at least one offered date".to_string());
        }
        let hardness = classify_hardness(shift_date, &shift_name);
        Ok(Self {
            id: RequestId::random(),
            kind,
            status: RequestStatus::Draft,
            mode,
            hardness,
            requester_id,
            requester_name,
            requester_role,
            shift_date,
            shift_name,
            offered_dates,
            target_user_id: None,
            target_user_name: None,
            target_shift_date: None,
            target_shift_name: None,
            created_at: Utc::now(),
        })
    }

    /// ¿Acepta la solicitud esta fecha como contrapartida?
    pub fn accepts_date(&self, date: NaiveDate) -> bool {
        self.offered_dates.is_empty() || self.offered_dates.contains(&date)
    }
}
