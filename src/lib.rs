#![forbid(unsafe_code)]
//! Guardias — motor de reglas y emparejamiento para cambios de turno
//! hospitalarios, con soporte local de ficheros (sin BD).
//!
//! - Clasificación canónica de turnos por nombre libre (franja y dureza).
//! - Reglas laborales: saliente tras noche, noche exige librar, tope de
//!   días consecutivos.
//! - Emparejamiento bidireccional de solicitudes y búsqueda de candidatos.
//! - Máquina de estados de solicitud con escrituras condicionales (CAS).
//! - Funciones del núcleo puras y síncronas; nunca mutan sus entradas.

pub mod classify;
pub mod io;
pub mod model;
pub mod notification;
pub mod request;
pub mod roles;
pub mod rules;
pub mod search;
pub mod storage;

pub use classify::{classify_hardness, classify_segment, Hardness, ShiftSegment};
pub use model::{
    PlantShift, RequestId, RequestKind, RequestMode, RequestStatus, Schedule,
    ShiftChangeRequest, UserId,
};
pub use notification::{diff_status, prepare_notices, Notice, NoticeRenderer, StatusChange, TextNotice};
pub use request::{Actor, RequestError};
pub use roles::{are_roles_compatible, can_participate, role_family, RoleFamily};
pub use rules::{check_match, validate_assignment, RuleOptions, Violation};
pub use search::{
    answer_request, build_schedules, propose_candidate, resolve_request, search_candidates,
    RequestRepository, SearchGate, SearchPass,
};
pub use storage::{JsonStorage, Plant, Storage};
