#![forbid(unsafe_code)]
use chrono::NaiveDate;
use guardias::{
    answer_request, build_schedules, diff_status, prepare_notices, propose_candidate,
    resolve_request, search_candidates, Actor, JsonStorage, Plant, PlantShift, RequestError,
    RequestKind, RequestMode, RequestRepository, RequestStatus, RuleOptions, SearchGate,
    ShiftChangeRequest, Storage, TextNotice, UserId,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn shift(user: &str, name: &str, role: &str, date: NaiveDate, shift_name: &str) -> PlantShift {
    PlantShift {
        user_id: UserId::new(user),
        user_name: name.to_string(),
        user_role: role.to_string(),
        date,
        shift_name: shift_name.to_string(),
    }
}

fn published(user: &str, name: &str, role: &str) -> ShiftChangeRequest {
    let mut request = ShiftChangeRequest::new(
        RequestKind::Swap,
        RequestMode::Flexible,
        UserId::new(user),
        name.to_string(),
        role.to_string(),
        d(2025, 1, 10),
        "Mañana".to_string(),
        vec![],
    )
    .unwrap();
    let actor = Actor::new(UserId::new(user), name, role);
    request.publish(&actor).unwrap();
    request
}

#[test]
fn strict_mode_requires_offered_dates() {
    let err = ShiftChangeRequest::new(
        RequestKind::Swap,
        RequestMode::Strict,
        UserId::new("ana"),
        "Ana".to_string(),
        "Enfermera".to_string(),
        d(2025, 1, 10),
        "Mañana".to_string(),
        vec![],
    );
    assert!(err.is_err());
}

#[test]
fn full_lifecycle_to_approval() {
    let mut request = published("ana", "Ana", "Enfermera");
    assert_eq!(request.status, RequestStatus::Searching);

    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let candidate = shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde");
    request.propose(&requester, &candidate).unwrap();
    assert_eq!(request.status, RequestStatus::PendingPartner);
    assert_eq!(request.target_user_id, Some(UserId::new("eva")));
    assert_eq!(request.target_shift_name.as_deref(), Some("Tarde"));

    let partner = Actor::new(UserId::new("eva"), "Eva", "Enfermero");
    request.accept(&partner).unwrap();
    assert_eq!(request.status, RequestStatus::AwaitingSupervisor);

    let boss = Actor::new(UserId::new("sup"), "Sole", "Supervisora de Planta");
    request.resolve(&boss, true).unwrap();
    assert_eq!(request.status, RequestStatus::Approved);
    assert!(request.status.is_terminal());
}

#[test]
fn partner_can_decline_before_supervision() {
    let mut request = published("ana", "Ana", "Enfermera");
    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let candidate = shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde");
    request.propose(&requester, &candidate).unwrap();

    let partner = Actor::new(UserId::new("eva"), "Eva", "Enfermero");
    request.decline(&partner).unwrap();
    assert_eq!(request.status, RequestStatus::Rejected);

    // terminal: nadie puede reactivarla
    assert!(matches!(
        request.accept(&partner),
        Err(RequestError::WrongStatus { .. })
    ));
}

#[test]
fn guards_reject_the_wrong_actor() {
    let mut request = published("ana", "Ana", "Enfermera");
    let intruder = Actor::new(UserId::new("leo"), "Leo", "Enfermero");
    let candidate = shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde");
    assert_eq!(
        request.propose(&intruder, &candidate),
        Err(RequestError::NotRequester)
    );

    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    request.propose(&requester, &candidate).unwrap();
    assert_eq!(request.accept(&intruder), Err(RequestError::NotTarget));

    let partner = Actor::new(UserId::new("eva"), "Eva", "Enfermero");
    request.accept(&partner).unwrap();
    assert_eq!(
        request.resolve(&partner, true),
        Err(RequestError::NotSupervisor)
    );
}

#[test]
fn actionable_by_id_or_legacy_name() {
    let mut request = published("ana", "Ana", "Enfermera");
    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let candidate = shift("eva", "Eva García", "Enfermero", d(2025, 1, 15), "Tarde");
    request.propose(&requester, &candidate).unwrap();

    // por identidad
    assert!(request.is_actionable_by(&UserId::new("eva"), "cualquiera"));
    // registro histórico: id distinto pero nombre coincide (trim + mayúsculas)
    assert!(request.is_actionable_by(&UserId::new("otro"), "  eva garcía "));
    // ni id ni nombre
    assert!(!request.is_actionable_by(&UserId::new("otro"), "Luis"));

    // fuera de pendingPartner nunca es accionable
    let partner = Actor::new(UserId::new("eva"), "Eva García", "Enfermero");
    request.accept(&partner).unwrap();
    assert!(!request.is_actionable_by(&UserId::new("eva"), "Eva García"));
}

#[test]
fn conditional_write_refuses_stale_status() {
    let mut plant = Plant::default();
    let request = published("ana", "Ana", "Enfermera");
    let id = request.id.clone();
    plant.insert(request.clone()).unwrap();

    // el estado esperado no coincide: la escritura no aplica
    let mut tampered = request.clone();
    tampered.status = RequestStatus::Approved;
    assert!(!plant
        .update_if(RequestStatus::PendingPartner, &tampered)
        .unwrap());
    assert_eq!(plant.get(&id).unwrap().unwrap().status, RequestStatus::Searching);

    assert!(plant.update_if(RequestStatus::Searching, &tampered).unwrap());
    assert_eq!(plant.get(&id).unwrap().unwrap().status, RequestStatus::Approved);
}

#[test]
fn racing_answers_only_land_once() {
    let mut plant = Plant::default();
    let mut request = published("ana", "Ana", "Enfermera");
    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let candidate = shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde");
    request.propose(&requester, &candidate).unwrap();
    let id = request.id.clone();
    plant.insert(request).unwrap();

    let partner = Actor::new(UserId::new("eva"), "Eva", "Enfermero");
    let first = answer_request(&mut plant, &partner, &id, true).unwrap();
    assert_eq!(first.status, RequestStatus::AwaitingSupervisor);

    // la segunda respuesta llega tarde: el estado ya no es pendingPartner
    assert!(answer_request(&mut plant, &partner, &id, false).is_err());
    assert_eq!(
        plant.get(&id).unwrap().unwrap().status,
        RequestStatus::AwaitingSupervisor
    );
}

#[test]
fn repository_flow_end_to_end() {
    let roster = vec![
        shift("ana", "Ana", "Enfermera", d(2025, 1, 10), "Mañana"),
        shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde"),
        shift("sup", "Sole", "Supervisora", d(2025, 1, 15), "Mañana"),
        shift("tom", "Tomás", "Auxiliar", d(2025, 1, 16), "Mañana"),
    ];
    let mut plant = Plant {
        id: "planta-3".to_string(),
        shifts: roster,
        requests: vec![],
    };

    let request = published("ana", "Ana", "Enfermera");
    let id = request.id.clone();
    plant.insert(request.clone()).unwrap();

    let schedules = build_schedules(&plant.shifts);
    let candidates =
        search_candidates(&request, &plant.shifts, &schedules, RuleOptions::default());
    // la supervisora y el auxiliar quedan fuera; solo Eva es elegible
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].user_id, UserId::new("eva"));

    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let updated = propose_candidate(&mut plant, &requester, &id, &candidates[0]).unwrap();
    assert_eq!(updated.status, RequestStatus::PendingPartner);

    let partner = Actor::new(UserId::new("eva"), "Eva", "Enfermero");
    answer_request(&mut plant, &partner, &id, true).unwrap();

    let boss = Actor::new(UserId::new("sup"), "Sole", "Supervisora");
    let resolved = resolve_request(&mut plant, &boss, &id, true).unwrap();
    assert_eq!(resolved.status, RequestStatus::Approved);
}

#[test]
fn search_skips_requester_and_busy_candidates() {
    let roster = vec![
        shift("ana", "Ana", "Enfermera", d(2025, 1, 10), "Mañana"),
        // Eva sale de noche el 9: no puede absorber el turno del 10
        shift("eva", "Eva", "Enfermero", d(2025, 1, 9), "Noche"),
        shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde"),
        shift("mar", "Mar", "Enfermera", d(2025, 1, 20), "Tarde"),
    ];
    let schedules = build_schedules(&roster);
    let request = published("ana", "Ana", "Enfermera");
    let candidates = search_candidates(&request, &roster, &schedules, RuleOptions::default());
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].user_id, UserId::new("mar"));
}

#[test]
fn search_gate_drops_second_request() {
    let gate = SearchGate::new();
    let pass = gate.try_acquire().expect("gate libre");
    assert!(gate.is_busy());
    assert!(gate.try_acquire().is_none());
    drop(pass);
    assert!(gate.try_acquire().is_some());
}

#[test]
fn status_diff_and_notices() {
    let before = vec![published("ana", "Ana", "Enfermera")];
    let mut after = before.clone();
    let requester = Actor::new(UserId::new("ana"), "Ana", "Enfermera");
    let candidate = shift("eva", "Eva", "Enfermero", d(2025, 1, 15), "Tarde");
    after[0].propose(&requester, &candidate).unwrap();

    let changes = diff_status(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].from, RequestStatus::Searching);
    assert_eq!(changes[0].to, RequestStatus::PendingPartner);

    // una solicitud nueva no genera cambio
    let newcomer = published("mar", "Mar", "Enfermera");
    let mut with_new = after.clone();
    with_new.push(newcomer);
    assert_eq!(diff_status(&before, &with_new).len(), 1);

    let notices = prepare_notices(&before, &with_new, &TextNotice);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].recipient, "Ana");
    assert!(notices[0].content.contains("pendiente de compañero"));
}

#[test]
fn plant_json_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plant.json");
    let storage = JsonStorage::open(&path).unwrap();

    let mut plant = Plant {
        id: "planta-3".to_string(),
        shifts: vec![shift("ana", "Ana", "Enfermera", d(2025, 1, 10), "Mañana")],
        requests: vec![],
    };
    plant.insert(published("ana", "Ana", "Enfermera")).unwrap();
    storage.save(&plant).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.id, "planta-3");
    assert_eq!(loaded.shifts.len(), 1);
    assert_eq!(loaded.requests[0].status, RequestStatus::Searching);
    assert_eq!(loaded.requests[0].hardness, guardias::Hardness::Normal);
}
