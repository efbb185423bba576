use thiserror::Error;

/// Opciones de las reglas laborales
#[derive(Debug, Clone, Copy)]
pub struct RuleOptions {
    /// Máximo de días trabajados seguidos permitido.
    pub max_consecutive_days: u32,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            max_consecutive_days: 6,
        }
    }
}

/// Motivo por el que una asignación candidata incumple las reglas.
/// Resultado negativo normal, no una excepción: el llamante decide
/// qué hacer (descartar candidato, mostrar el motivo, reintentar).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("ya tiene un turno asignado ese día")]
    AlreadyAssigned,
    #[error("sale de un turno de noche y debe librar (saliente)")]
    RestAfterNight,
    #[error("un turno de noche exige librar el día siguiente")]
    NightNeedsFreeDay,
    #[error("superaría el límite de {limit} días consecutivos trabajados")]
    TooManyConsecutiveDays { limit: u32 },
}
