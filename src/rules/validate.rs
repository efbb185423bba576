use chrono::NaiveDate;

use super::{util, RuleOptions, Violation};
use crate::classify::{classify_segment, ShiftSegment};
use crate::model::Schedule;

/// Valida que `date` + `shift_name` pueda añadirse a la agenda sin romper
/// las reglas de descanso y sobrecarga.
///
/// Las comprobaciones se aplican en este orden exacto y cortan en la primera
/// incumplida (el motivo devuelto depende del orden; no reordenar):
/// 1. ya hay turno ese día;
/// 2. saliente: la víspera fue de noche;
/// 3. el turno candidato es de noche y el día siguiente no está libre;
/// 4. la racha de días consecutivos superaría el máximo.
///
/// `None` significa asignación válida.
pub fn validate_assignment(
    date: NaiveDate,
    shift_name: &str,
    schedule: &Schedule,
    opts: RuleOptions,
) -> Option<Violation> {
    if schedule.is_working(date) {
        return Some(Violation::AlreadyAssigned);
    }

    if let Some(prev) = date.pred_opt() {
        if let Some(prev_shift) = schedule.shift_on(prev) {
            if classify_segment(prev_shift) == ShiftSegment::Night {
                return Some(Violation::RestAfterNight);
            }
        }
    }

    if classify_segment(shift_name) == ShiftSegment::Night {
        if let Some(next) = date.succ_opt() {
            if let Some(next_shift) = schedule.shift_on(next) {
                if classify_segment(next_shift) != ShiftSegment::Off {
                    return Some(Violation::NightNeedsFreeDay);
                }
            }
        }
    }

    if util::consecutive_run(schedule, date) > opts.max_consecutive_days {
        return Some(Violation::TooManyConsecutiveDays {
            limit: opts.max_consecutive_days,
        });
    }

    None
}
