use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Reject,
    Interview,
    LaterApplied,
    Offer,
    Ghost,
}

impl EventKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "reject" => Some(Self::Reject),
            "interview" => Some(Self::Interview),
            "later_applied" => Some(Self::LaterApplied),
            "offer" => Some(Self::Offer),
            "ghost" => Some(Self::Ghost),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reject => "rejected",
            Self::Interview => "interviewed",
            Self::LaterApplied => "applied again",
            Self::Offer => "offer",
            Self::Ghost => "ghosted",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub logo: Option<PathBuf>,
    pub url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggedEvent {
    pub company_id: String,
    pub kind: EventKind,
    pub stage: Option<String>,
    pub happened_at: String,
    pub note: Option<String>,
}

/// One weighted entity handed to the bubble field.
#[derive(Clone, Debug)]
pub struct BubbleSeed {
    pub id: String,
    pub name: String,
    pub rejections: u32,
    pub logo: Option<PathBuf>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CompanyBoard {
    pub companies: Vec<Company>,
    pub events: Vec<LoggedEvent>,
    rejections: HashMap<String, u32>,
}

impl CompanyBoard {
    pub fn new(companies: Vec<Company>, events: Vec<LoggedEvent>) -> Self {
        let mut rejections: HashMap<String, u32> = HashMap::with_capacity(companies.len());
        for company in &companies {
            rejections.insert(company.id.clone(), 0);
        }
        for event in &events {
            if event.kind == EventKind::Reject
                && let Some(count) = rejections.get_mut(&event.company_id)
            {
                *count += 1;
            }
        }

        Self {
            companies,
            events,
            rejections,
        }
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    pub fn total_rejections(&self) -> u32 {
        self.rejections.values().sum()
    }

    pub fn rejections_for(&self, company_id: &str) -> u32 {
        self.rejections.get(company_id).copied().unwrap_or(0)
    }

    pub fn company(&self, company_id: &str) -> Option<&Company> {
        self.companies
            .iter()
            .find(|company| company.id == company_id)
    }

    pub fn top_by_rejections(&self, limit: usize) -> Vec<&Company> {
        let mut ranked = self.companies.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            self.rejections_for(&b.id)
                .cmp(&self.rejections_for(&a.id))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Events for one company, newest first (dates are ISO-8601 strings, so
    /// lexicographic order is chronological order).
    pub fn events_for(&self, company_id: &str) -> Vec<&LoggedEvent> {
        let mut events = self
            .events
            .iter()
            .filter(|event| event.company_id == company_id)
            .collect::<Vec<_>>();
        events.sort_by(|a, b| b.happened_at.cmp(&a.happened_at));
        events
    }

    pub fn bubble_seeds(&self) -> Vec<BubbleSeed> {
        self.companies
            .iter()
            .map(|company| BubbleSeed {
                id: company.id.clone(),
                name: company.name.clone(),
                rejections: self.rejections_for(&company.id),
                logo: company.logo.clone(),
                url: company.url.clone(),
            })
            .collect()
    }
}
