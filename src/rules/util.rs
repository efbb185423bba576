use chrono::NaiveDate;

use crate::model::Schedule;

/// Longitud de la racha de días consecutivos trabajados que contendría
/// `pivot` si se le asignara turno: se cuenta el propio `pivot` y se camina
/// día a día hacia atrás y hacia delante mientras haya entrada en la agenda.
/// Cuenta presencia de entrada, no su franja.
pub(super) fn consecutive_run(schedule: &Schedule, pivot: NaiveDate) -> u32 {
    let mut run = 1u32;

    let mut day = pivot.pred_opt();
    while let Some(d) = day {
        if !schedule.is_working(d) {
            break;
        }
        run += 1;
        day = d.pred_opt();
    }

    let mut day = pivot.succ_opt();
    while let Some(d) = day {
        if !schedule.is_working(d) {
            break;
        }
        run += 1;
        day = d.succ_opt();
    }

    run
}
