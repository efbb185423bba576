use thiserror::Error;

use crate::model::{PlantShift, RequestStatus, ShiftChangeRequest, UserId};
use crate::roles::{role_family, RoleFamily};

/// Quién ejecuta una transición (identidad + rol en texto libre).
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub display_name: String,
    pub role: String,
}

impl Actor {
    pub fn new<N: Into<String>, R: Into<String>>(user_id: UserId, display_name: N, role: R) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role: role.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("cannot {action} a request in status {status:?}")]
    WrongStatus {
        action: &'static str,
        status: RequestStatus,
    },
    #[error("only the requester may do this")]
    NotRequester,
    #[error("only the designated partner may do this")]
    NotTarget,
    #[error("only a supervisor may do this")]
    NotSupervisor,
}

/// Máquina de estados de una solicitud:
/// `draft → searching → pendingPartner → awaitingSupervisor → approved|rejected`,
/// con rechazo directo del compañero en `pendingPartner → rejected`.
/// `approved` y `rejected` son terminales.
impl ShiftChangeRequest {
    /// `draft → searching`: el solicitante publica su turno ofrecido.
    pub fn publish(&mut self, actor: &Actor) -> Result<(), RequestError> {
        if self.status != RequestStatus::Draft {
            return Err(RequestError::WrongStatus {
                action: "publish",
                status: self.status,
            });
        }
        if actor.user_id != self.requester_id {
            return Err(RequestError::NotRequester);
        }
        self.status = RequestStatus::Searching;
        Ok(())
    }

    /// `searching → pendingPartner`: el solicitante elige un candidato de la
    /// búsqueda; se rellenan los campos `target_*`.
    pub fn propose(&mut self, actor: &Actor, candidate: &PlantShift) -> Result<(), RequestError> {
        if self.status != RequestStatus::Searching {
            return Err(RequestError::WrongStatus {
                action: "propose",
                status: self.status,
            });
        }
        if actor.user_id != self.requester_id {
            return Err(RequestError::NotRequester);
        }
        self.target_user_id = Some(candidate.user_id.clone());
        self.target_user_name = Some(candidate.user_name.clone());
        self.target_shift_date = Some(candidate.date);
        self.target_shift_name = Some(candidate.shift_name.clone());
        self.status = RequestStatus::PendingPartner;
        Ok(())
    }

    /// `pendingPartner → awaitingSupervisor`: solo el compañero designado.
    pub fn accept(&mut self, actor: &Actor) -> Result<(), RequestError> {
        self.partner_guard("accept", actor)?;
        self.status = RequestStatus::AwaitingSupervisor;
        Ok(())
    }

    /// `pendingPartner → rejected`: el compañero designado declina.
    pub fn decline(&mut self, actor: &Actor) -> Result<(), RequestError> {
        self.partner_guard("decline", actor)?;
        self.status = RequestStatus::Rejected;
        Ok(())
    }

    /// `awaitingSupervisor → approved|rejected`: solo un rol de supervisión.
    pub fn resolve(&mut self, actor: &Actor, approve: bool) -> Result<(), RequestError> {
        if self.status != RequestStatus::AwaitingSupervisor {
            return Err(RequestError::WrongStatus {
                action: "resolve",
                status: self.status,
            });
        }
        if role_family(&actor.role) != RoleFamily::Supervisor {
            return Err(RequestError::NotSupervisor);
        }
        self.status = if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Rejected
        };
        Ok(())
    }

    /// ¿Puede el espectador actuar sobre esta solicitud?
    ///
    /// Solo en `pendingPartner`, y si su identidad coincide con
    /// `target_user_id` O su nombre visible coincide (sin mayúsculas, con
    /// espacios recortados) con `target_user_name`. El repliegue por nombre
    /// cubre registros históricos anteriores al campo de identidad; no es
    /// código muerto.
    pub fn is_actionable_by(&self, viewer_id: &UserId, viewer_name: &str) -> bool {
        if self.status != RequestStatus::PendingPartner {
            return false;
        }
        if self.target_user_id.as_ref() == Some(viewer_id) {
            return true;
        }
        self.target_user_name
            .as_deref()
            .is_some_and(|name| name.trim().to_lowercase() == viewer_name.trim().to_lowercase())
    }

    fn partner_guard(&self, action: &'static str, actor: &Actor) -> Result<(), RequestError> {
        if self.status != RequestStatus::PendingPartner {
            return Err(RequestError::WrongStatus {
                action,
                status: self.status,
            });
        }
        if !self.is_actionable_by(&actor.user_id, &actor.display_name) {
            return Err(RequestError::NotTarget);
        }
        Ok(())
    }
}
