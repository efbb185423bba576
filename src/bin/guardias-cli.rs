#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use guardias::{
    classify_hardness, classify_segment, io,
    model::{RequestKind, RequestMode, RequestId, ShiftChangeRequest, UserId},
    notification::{prepare_notices, TextNotice},
    request::Actor,
    rules::{validate_assignment, RuleOptions},
    search::{answer_request, build_schedules, propose_candidate, resolve_request, search_candidates},
    storage::{JsonStorage, Plant, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimalista de cambios de turno (sin base de datos)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Activa los logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichero JSON de planta
    #[arg(long, global = true, default_value = "plant.json")]
    plant: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importar la planilla de planta desde un CSV
    ImportRoster {
        #[arg(long)]
        csv: String,
    },

    /// Clasificar un turno (franja y dureza)
    Classify {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        name: String,
    },

    /// Validar una asignación candidata contra la agenda de un usuario
    Validate {
        #[arg(long)]
        user_id: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift: String,
        #[arg(long, default_value_t = 6)]
        max_consecutive_days: u32,
    },

    /// Publicar una solicitud de cambio para un turno propio
    Publish {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        role: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift: String,
        /// Tipo: swap o coverage
        #[arg(long, default_value = "swap")]
        kind: String,
        /// Lista "YYYY-MM-DD,YYYY-MM-DD,..."; vacío = modo flexible
        #[arg(long)]
        dates: Option<String>,
    },

    /// Buscar candidatos elegibles para una solicitud
    Search {
        #[arg(long)]
        request_id: String,
        #[arg(long, default_value_t = 6)]
        max_consecutive_days: u32,
    },

    /// Proponer el cambio a un candidato de la planilla
    Propose {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        candidate: String,
        /// Desambigua si el candidato tiene varios turnos (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// El compañero designado acepta la propuesta
    Accept {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        user_name: String,
    },

    /// El compañero designado declina la propuesta
    Decline {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        user_name: String,
    },

    /// Resolución de supervisión
    Resolve {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        user_name: String,
        #[arg(long, default_value = "Supervisor")]
        role: String,
        #[arg(long)]
        reject: bool,
    },

    /// Listar solicitudes y opcionalmente exportar
    List {
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Avisos de cambio de estado respecto a una instantánea anterior
    Notify {
        /// Fichero JSON de planta anterior
        #[arg(long)]
        previous: String,
        /// Fichero de salida (texto plano); por defecto imprime
        #[arg(long)]
        out: Option<String>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| anyhow::anyhow!("invalid date {raw}: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plant)?;
    let mut plant = storage.load().unwrap_or_else(|_| Plant::default());

    let code = match cli.cmd {
        Commands::ImportRoster { csv } => {
            let rows = io::import_roster_csv(csv)?;
            plant.shifts.extend(rows);
            storage.save(&plant)?;
            0
        }
        Commands::Classify { date, name } => {
            let date = parse_date(&date)?;
            println!(
                "{:?} / {:?}",
                classify_segment(&name),
                classify_hardness(date, &name)
            );
            0
        }
        Commands::Validate {
            user_id,
            date,
            shift,
            max_consecutive_days,
        } => {
            let date = parse_date(&date)?;
            let opts = RuleOptions {
                max_consecutive_days,
            };
            let schedules = build_schedules(&plant.shifts);
            let schedule = schedules
                .get(&UserId::new(&user_id))
                .cloned()
                .unwrap_or_default();
            match validate_assignment(date, &shift, &schedule, opts) {
                None => {
                    println!("OK");
                    0
                }
                Some(violation) => {
                    println!("NO: {violation}");
                    // Code 2 = asignación rechazada
                    2
                }
            }
        }
        Commands::Publish {
            user_id,
            user_name,
            role,
            date,
            shift,
            kind,
            dates,
        } => {
            let kind = match kind.as_str() {
                "swap" => RequestKind::Swap,
                "coverage" => RequestKind::Coverage,
                other => bail!("unknown request kind: {other}"),
            };
            let offered_dates = match dates.as_deref() {
                None | Some("") => Vec::new(),
                Some(list) => list
                    .split(',')
                    .map(|d| parse_date(d.trim()))
                    .collect::<Result<Vec<_>>>()?,
            };
            let mode = if offered_dates.is_empty() {
                RequestMode::Flexible
            } else {
                RequestMode::Strict
            };
            let date = parse_date(&date)?;
            let actor = Actor::new(UserId::new(&user_id), user_name.clone(), role.clone());
            let mut request = ShiftChangeRequest::new(
                kind,
                mode,
                UserId::new(&user_id),
                user_name,
                role,
                date,
                shift,
                offered_dates,
            )
            .map_err(anyhow::Error::msg)?;
            request.publish(&actor)?;
            println!("{}", request.id.as_str());
            plant.requests.push(request);
            storage.save(&plant)?;
            0
        }
        Commands::Search {
            request_id,
            max_consecutive_days,
        } => {
            let id = RequestId::new(&request_id);
            let Some(request) = plant.requests.iter().find(|r| r.id == id) else {
                bail!("unknown request: {request_id}");
            };
            let opts = RuleOptions {
                max_consecutive_days,
            };
            let schedules = build_schedules(&plant.shifts);
            let candidates = search_candidates(request, &plant.shifts, &schedules, opts);
            for c in &candidates {
                println!(
                    "{} | {} | {} | {} | {}",
                    c.user_id.as_str(),
                    c.user_name,
                    c.user_role,
                    c.date,
                    c.shift_name
                );
            }
            if candidates.is_empty() {
                // Code 2 = sin candidatos
                2
            } else {
                0
            }
        }
        Commands::Propose {
            request_id,
            candidate,
            date,
        } => {
            let id = RequestId::new(&request_id);
            let Some(request) = plant.requests.iter().find(|r| r.id == id) else {
                bail!("unknown request: {request_id}");
            };
            let actor = Actor::new(
                request.requester_id.clone(),
                request.requester_name.clone(),
                request.requester_role.clone(),
            );
            let candidate_id = UserId::new(&candidate);
            let wanted = date.as_deref().map(parse_date).transpose()?;
            let Some(row) = plant
                .shifts
                .iter()
                .find(|s| s.user_id == candidate_id && wanted.map_or(true, |d| s.date == d))
                .cloned()
            else {
                bail!("no roster shift found for candidate {candidate}");
            };
            let updated = propose_candidate(&mut plant, &actor, &id, &row)?;
            println!("{} -> {}", updated.id.as_str(), updated.status);
            storage.save(&plant)?;
            0
        }
        Commands::Accept {
            request_id,
            user_id,
            user_name,
        } => {
            let actor = Actor::new(UserId::new(&user_id), user_name, String::new());
            let updated = answer_request(&mut plant, &actor, &RequestId::new(&request_id), true)?;
            println!("{} -> {}", updated.id.as_str(), updated.status);
            storage.save(&plant)?;
            0
        }
        Commands::Decline {
            request_id,
            user_id,
            user_name,
        } => {
            let actor = Actor::new(UserId::new(&user_id), user_name, String::new());
            let updated = answer_request(&mut plant, &actor, &RequestId::new(&request_id), false)?;
            println!("{} -> {}", updated.id.as_str(), updated.status);
            storage.save(&plant)?;
            0
        }
        Commands::Resolve {
            request_id,
            user_id,
            user_name,
            role,
            reject,
        } => {
            let actor = Actor::new(UserId::new(&user_id), user_name, role);
            let updated =
                resolve_request(&mut plant, &actor, &RequestId::new(&request_id), !reject)?;
            println!("{} -> {}", updated.id.as_str(), updated.status);
            storage.save(&plant)?;
            0
        }
        Commands::List { out_csv } => {
            if let Some(path) = out_csv {
                io::export_requests_csv(path, &plant.requests)?;
            }
            // impresión compacta
            for r in &plant.requests {
                println!(
                    "{} | {} | {} {} | {} | {}",
                    r.id.as_str(),
                    r.status,
                    r.shift_date,
                    r.shift_name,
                    r.requester_name,
                    r.target_user_name.as_deref().unwrap_or("-")
                );
            }
            0
        }
        Commands::Notify { previous, out } => {
            let before = JsonStorage::open(&previous)?.load()?;
            let notices = prepare_notices(&before.requests, &plant.requests, &TextNotice);
            let body: String = notices
                .iter()
                .map(|n| n.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            match out {
                Some(path) => std::fs::write(&path, body)?,
                None => print!("{body}"),
            }
            println!("{} aviso(s)", notices.len());
            0
        }
    };

    std::process::exit(code);
}
