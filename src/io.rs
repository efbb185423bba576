use std::path::Path;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};

use crate::model::{PlantShift, ShiftChangeRequest, UserId};

/// Import de planilla desde CSV: cabecera
/// `user_id,user_name,user_role,date,shift_name` (fecha `YYYY-MM-DD`).
///
/// Las filas malformadas NO se descartan en silencio: el error sube con el
/// número de fila, porque un descarte silencioso enmascara datos corruptos.
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<PlantShift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let row = idx + 2; // +1 por la cabecera, +1 por base 1
        let rec = rec.with_context(|| format!("reading roster row {row}"))?;
        let user_id = rec.get(0).context("missing user_id")?.trim();
        let user_name = rec.get(1).context("missing user_name")?.trim();
        let user_role = rec.get(2).context("missing user_role")?.trim();
        let date = rec.get(3).context("missing date")?.trim();
        let shift_name = rec.get(4).context("missing shift_name")?.trim();
        if user_id.is_empty() || user_name.is_empty() || shift_name.is_empty() {
            bail!("invalid roster row {row} (empty field)");
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date in roster row {row}: {date}"))?;
        out.push(PlantShift {
            user_id: UserId::new(user_id),
            user_name: user_name.to_string(),
            user_role: user_role.to_string(),
            date,
            shift_name: shift_name.to_string(),
        });
    }
    Ok(out)
}

/// Export CSV de solicitudes: cabecera
/// `id,status,requester,role,date,shift,target`
pub fn export_requests_csv<P: AsRef<Path>>(
    path: P,
    requests: &[ShiftChangeRequest],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "status", "requester", "role", "date", "shift", "target"])?;
    for r in requests {
        let status = r.status.as_str();
        let date = r.shift_date.to_string();
        w.write_record([
            r.id.as_str(),
            status,
            r.requester_name.as_str(),
            r.requester_role.as_str(),
            date.as_str(),
            r.shift_name.as_str(),
            r.target_user_name.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}
