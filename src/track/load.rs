use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, warn};

use super::model::{Company, CompanyBoard, EventKind, LoggedEvent};

#[derive(Clone, Debug)]
pub enum BoardSource {
    File(PathBuf),
    Demo,
}

impl BoardSource {
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Demo => "built-in demo board".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    #[serde(default)]
    companies: Vec<RawCompany>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    id: String,
    name: String,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default)]
    company_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    company_id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    stage: Option<String>,
    happened_at: String,
    #[serde(default)]
    note: Option<String>,
}

pub fn collect_board(source: &BoardSource) -> Result<CompanyBoard> {
    let board = match source {
        BoardSource::Demo => demo_board(),
        BoardSource::File(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read rejection log {}", path.display()))?;
            parse_board(&raw, path.parent())?
        }
    };

    info!(
        companies = board.company_count(),
        events = board.events.len(),
        rejections = board.total_rejections(),
        "rejection board loaded"
    );

    Ok(board)
}

fn parse_board(raw: &str, base_dir: Option<&Path>) -> Result<CompanyBoard> {
    let parsed: RawBoard =
        serde_json::from_str(raw).context("invalid JSON in rejection log")?;

    let mut seen_ids = HashSet::with_capacity(parsed.companies.len());
    let mut companies = Vec::with_capacity(parsed.companies.len());
    for raw_company in parsed.companies {
        if raw_company.id.is_empty() {
            bail!("rejection log contains a company with an empty id");
        }
        if !seen_ids.insert(raw_company.id.clone()) {
            bail!("duplicate company id {} in rejection log", raw_company.id);
        }

        let logo = raw_company
            .logo_url
            .filter(|value| !value.is_empty())
            .map(|value| resolve_logo_path(&value, base_dir));

        companies.push(Company {
            id: raw_company.id,
            name: raw_company.name,
            logo,
            url: raw_company.company_url.filter(|value| !value.is_empty()),
        });
    }

    let mut events = Vec::with_capacity(parsed.events.len());
    for raw_event in parsed.events {
        let Some(kind) = EventKind::parse(&raw_event.kind) else {
            warn!(kind = %raw_event.kind, "skipping event with unknown type");
            continue;
        };

        if !seen_ids.contains(&raw_event.company_id) {
            warn!(
                company_id = %raw_event.company_id,
                "skipping event for unknown company"
            );
            continue;
        }

        events.push(LoggedEvent {
            company_id: raw_event.company_id,
            kind,
            stage: raw_event.stage.filter(|value| !value.is_empty()),
            happened_at: raw_event.happened_at,
            note: raw_event.note.filter(|value| !value.is_empty()),
        });
    }

    Ok(CompanyBoard::new(companies, events))
}

fn resolve_logo_path(value: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        return path;
    }

    match base_dir {
        Some(base) => base.join(path),
        None => path,
    }
}

fn demo_board() -> CompanyBoard {
    let companies = [
        ("acme", "Acme Corp"),
        ("globex", "Globex"),
        ("initech", "Initech"),
        ("umbrella", "Umbrella"),
        ("hooli", "Hooli"),
        ("piedpiper", "Pied Piper"),
    ]
    .into_iter()
    .map(|(id, name)| Company {
        id: id.to_owned(),
        name: name.to_owned(),
        logo: None,
        url: Some(format!("https://example.com/{id}")),
    })
    .collect::<Vec<_>>();

    let mut events = Vec::new();
    let mut log = |company_id: &str, kind: EventKind, stage: Option<&str>, happened_at: &str| {
        events.push(LoggedEvent {
            company_id: company_id.to_owned(),
            kind,
            stage: stage.map(str::to_owned),
            happened_at: happened_at.to_owned(),
            note: None,
        });
    };

    log("acme", EventKind::Reject, Some("OA"), "2026-05-02");
    log("acme", EventKind::Reject, Some("Phone"), "2026-06-14");
    log("acme", EventKind::Reject, Some("Onsite"), "2026-07-30");
    log("globex", EventKind::Interview, Some("Phone"), "2026-05-20");
    log("globex", EventKind::Reject, Some("Onsite"), "2026-06-02");
    log("initech", EventKind::Reject, Some("OA"), "2026-04-11");
    log("initech", EventKind::Reject, Some("OA"), "2026-05-28");
    log("initech", EventKind::Reject, Some("Phone"), "2026-06-19");
    log("initech", EventKind::Reject, Some("Behavioral"), "2026-07-22");
    log("initech", EventKind::Reject, Some("Onsite"), "2026-08-15");
    log("umbrella", EventKind::Ghost, None, "2026-06-30");
    log("hooli", EventKind::Reject, Some("HR"), "2026-07-07");
    log("piedpiper", EventKind::Offer, Some("Onsite"), "2026-08-01");

    CompanyBoard::new(companies, events)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "companies": [
            {"id": "a", "name": "Acme", "logo_url": "logos/acme.png", "company_url": "https://acme.example"},
            {"id": "b", "name": "Initech", "logo_url": null, "company_url": null}
        ],
        "events": [
            {"company_id": "a", "type": "reject", "stage": "Phone", "happened_at": "2026-03-01", "note": "generic email"},
            {"company_id": "a", "type": "interview", "stage": "OA", "happened_at": "2026-02-10"},
            {"company_id": "ghost-co", "type": "reject", "happened_at": "2026-01-01"},
            {"company_id": "b", "type": "celebration", "happened_at": "2026-01-02"}
        ]
    }"#;

    #[test]
    fn parses_board_and_derives_weights() {
        let board = parse_board(SAMPLE, Some(Path::new("/data"))).unwrap();

        assert_eq!(board.company_count(), 2);
        assert_eq!(board.rejections_for("a"), 1);
        assert_eq!(board.rejections_for("b"), 0);
        // unknown company and unknown event type are both dropped
        assert_eq!(board.events.len(), 2);
    }

    #[test]
    fn logo_paths_resolve_relative_to_the_data_file() {
        let board = parse_board(SAMPLE, Some(Path::new("/data"))).unwrap();
        let acme = board.company("a").unwrap();
        assert_eq!(acme.logo.as_deref(), Some(Path::new("/data/logos/acme.png")));

        let initech = board.company("b").unwrap();
        assert!(initech.logo.is_none());
    }

    #[test]
    fn duplicate_company_ids_are_rejected() {
        let raw = r#"{
            "companies": [
                {"id": "a", "name": "Acme"},
                {"id": "a", "name": "Acme again"}
            ],
            "events": []
        }"#;

        let error = parse_board(raw, None).unwrap_err();
        assert!(error.to_string().contains("duplicate company id"));
    }

    #[test]
    fn empty_board_is_valid() {
        let board = parse_board(r#"{"companies": [], "events": []}"#, None).unwrap();
        assert_eq!(board.company_count(), 0);
        assert!(board.bubble_seeds().is_empty());
    }

    #[test]
    fn demo_board_has_spread_out_weights() {
        let board = demo_board();
        assert!(board.company_count() >= 4);
        assert!(board.total_rejections() > board.company_count() as u32 / 2);

        let ranked = board.top_by_rejections(1);
        assert_eq!(ranked[0].id, "initech");
    }
}
