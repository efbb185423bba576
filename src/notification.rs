use crate::model::{RequestId, RequestStatus, ShiftChangeRequest};

/// Cambio de estado detectado entre dos instantáneas de solicitudes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub request_id: RequestId,
    pub from: RequestStatus,
    pub to: RequestStatus,
}

/// Compara la instantánea anterior con la actual, por id. La instantánea
/// anterior entra como parámetro explícito (nada de caché mutable): misma
/// entrada, misma salida. Las solicitudes nuevas no generan cambio.
pub fn diff_status(
    previous: &[ShiftChangeRequest],
    current: &[ShiftChangeRequest],
) -> Vec<StatusChange> {
    current
        .iter()
        .filter_map(|now| {
            let before = previous.iter().find(|p| p.id == now.id)?;
            (before.status != now.status).then(|| StatusChange {
                request_id: now.id.clone(),
                from: before.status,
                to: now.status,
            })
        })
        .collect()
}

/// Aviso generado para el solicitante.
#[derive(Debug, Clone)]
pub struct Notice {
    pub request_id: RequestId,
    pub recipient: String,
    pub content: String,
}

/// Permite customizar el render del mensaje (texto, push, etc.).
pub trait NoticeRenderer {
    fn render(&self, request: &ShiftChangeRequest, from: RequestStatus) -> String;
}

/// Gabarito de texto plano pensado para un futuro push/correo.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, request: &ShiftChangeRequest, _from: RequestStatus) -> String {
        let estado = match request.status {
            RequestStatus::Draft => "en borrador",
            RequestStatus::Searching => "buscando candidato",
            RequestStatus::PendingPartner => "pendiente de compañero",
            RequestStatus::AwaitingSupervisor => "pendiente de supervisión",
            RequestStatus::Approved => "aprobada",
            RequestStatus::Rejected => "rechazada",
        };
        format!(
            "Hola {name},\n\nTu solicitud de cambio del turno \"{shift}\" del {date} ha cambiado: ahora está {estado}.\n",
            name = request.requester_name,
            shift = request.shift_name,
            date = request.shift_date,
        )
    }
}

/// Prepara los avisos derivados de los cambios entre dos instantáneas.
pub fn prepare_notices(
    previous: &[ShiftChangeRequest],
    current: &[ShiftChangeRequest],
    renderer: &dyn NoticeRenderer,
) -> Vec<Notice> {
    diff_status(previous, current)
        .into_iter()
        .filter_map(|change| {
            let request = current.iter().find(|r| r.id == change.request_id)?;
            Some(Notice {
                request_id: change.request_id,
                recipient: request.requester_name.clone(),
                content: renderer.render(request, change.from),
            })
        })
        .collect()
}
