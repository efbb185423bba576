use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Franja horaria gruesa de un turno, deducida de su nombre.
/// Solo la usa el validador de reglas; `Off` cuenta como "no trabaja".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftSegment {
    Morning,
    Afternoon,
    Night,
    Off,
}

/// Dureza de una ocurrencia de turno (noche > fin de semana/festivo > normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Hardness {
    Night,
    Weekend,
    Holiday,
    Normal,
}

/// Tabla única de clasificación, en orden de prioridad: la primera palabra
/// clave encontrada gana ("noche" se comprueba siempre antes que el resto).
/// Las claves van ya normalizadas (minúsculas, sin tildes ni eñes).
const SEGMENT_KEYWORDS: &[(&str, ShiftSegment)] = &[
    ("noche", ShiftSegment::Night),
    ("manana", ShiftSegment::Morning),
    ("tarde", ShiftSegment::Afternoon),
];

/// Normalización canónica: minúsculas y plegado de diacríticos castellanos.
/// Todo consumidor de texto libre (nombres de turno, roles) pasa por aquí.
pub(crate) fn fold(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Clasifica el nombre libre de un turno en su franja horaria.
/// Nombres ambiguos o desconocidos caen en `Off`.
pub fn classify_segment(shift_name: &str) -> ShiftSegment {
    let folded = fold(shift_name);
    SEGMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| folded.contains(keyword))
        .map(|(_, segment)| *segment)
        .unwrap_or(ShiftSegment::Off)
}

/// Dureza de (fecha, nombre de turno): noche manda sea el día que sea;
/// después fin de semana; el resto es normal.
///
/// Limitación conocida: no hay calendario de festivos cableado, así que
/// `Hardness::Holiday` nunca se devuelve — la rama queda a la espera de que
/// producto aporte el calendario.
pub fn classify_hardness(date: NaiveDate, shift_name: &str) -> Hardness {
    if classify_segment(shift_name) == ShiftSegment::Night {
        return Hardness::Night;
    }
    // if is_holiday(date) { return Hardness::Holiday; }
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Hardness::Weekend;
    }
    Hardness::Normal
}
