use serde::{Deserialize, Serialize};

use sift_core::Result;

/// A structured government/startup support program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Company age ceiling in years (None = no limit).
    #[serde(default)]
    pub max_company_age_years: Option<u32>,
    /// Accepted company stages, e.g. "seed", "series-a". Empty = any.
    #[serde(default)]
    pub stages: Vec<String>,
    /// Accepted industries. Empty = any.
    #[serde(default)]
    pub industries: Vec<String>,
    /// Industries explicitly excluded.
    #[serde(default)]
    pub excluded_industries: Vec<String>,
    /// Whether the program requires prior venture investment.
    #[serde(default)]
    pub requires_investment: bool,
}

/// A founder/company profile used for eligibility checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FounderProfile {
    #[serde(default)]
    pub company_age_years: Option<u32>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub has_investment: bool,
}

/// Outcome of matching a profile against one program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible: bool,
    pub reasons: Vec<String>,
}

/// A pre-loaded in-memory table of programs.
pub struct ProgramCatalog {
    programs: Vec<Program>,
}

impl ProgramCatalog {
    pub fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    /// Load from the JSON wire shape: `[{"id": ..., "name": ...}, ...]`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let programs: Vec<Program> = serde_json::from_str(raw)?;
        Ok(Self { programs })
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Filter programs by keyword overlap in name/description.
    /// Returns a possibly-empty list; never fails.
    pub fn search(&self, keywords: &str) -> Vec<&Program> {
        let keywords_lower = keywords.to_lowercase();
        let words: Vec<&str> = keywords_lower
            .split_whitespace()
            .filter(|w| w.len() >= 2)
            .collect();
        if words.is_empty() {
            return vec![];
        }

        let mut scored: Vec<(&Program, usize)> = self
            .programs
            .iter()
            .filter_map(|p| {
                let haystack = format!("{} {}", p.name, p.description).to_lowercase();
                let hits = words.iter().filter(|w| haystack.contains(*w)).count();
                (hits > 0).then_some((p, hits))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(p, _)| p).collect()
    }
}

/// Compare a profile against one program's constraints.
pub fn check_eligibility(profile: &FounderProfile, program: &Program) -> Eligibility {
    let mut reasons = Vec::new();
    let mut eligible = true;

    if let (Some(max_age), Some(age)) = (program.max_company_age_years, profile.company_age_years) {
        if age > max_age {
            eligible = false;
            reasons.push(format!(
                "company is {age} years old; {} accepts up to {max_age}",
                program.name
            ));
        } else {
            reasons.push(format!("company age {age} within limit {max_age}"));
        }
    }

    if !program.stages.is_empty() {
        match &profile.stage {
            Some(stage) if program.stages.iter().any(|s| s.eq_ignore_ascii_case(stage)) => {
                reasons.push(format!("stage '{stage}' accepted"));
            }
            Some(stage) => {
                eligible = false;
                reasons.push(format!(
                    "stage '{stage}' not among accepted stages {:?}",
                    program.stages
                ));
            }
            None => {
                reasons.push("stage unknown; program restricts stages".into());
            }
        }
    }

    if let Some(industry) = &profile.industry {
        if program
            .excluded_industries
            .iter()
            .any(|i| i.eq_ignore_ascii_case(industry))
        {
            eligible = false;
            reasons.push(format!("industry '{industry}' is excluded"));
        } else if !program.industries.is_empty()
            && !program
                .industries
                .iter()
                .any(|i| i.eq_ignore_ascii_case(industry))
        {
            eligible = false;
            reasons.push(format!(
                "industry '{industry}' not among accepted industries {:?}",
                program.industries
            ));
        }
    }

    if program.requires_investment && !profile.has_investment {
        eligible = false;
        reasons.push("program requires prior venture investment".into());
    }

    Eligibility { eligible, reasons }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips() -> Program {
        Program {
            id: "tips".into(),
            name: "TIPS".into(),
            description: "Tech incubator program for startups, venture investment required".into(),
            max_company_age_years: Some(7),
            stages: vec!["seed".into(), "pre-a".into()],
            industries: vec![],
            excluded_industries: vec!["gambling".into()],
            requires_investment: true,
        }
    }

    #[test]
    fn search_matches_keyword_overlap() {
        let catalog = ProgramCatalog::new(vec![tips()]);
        assert_eq!(catalog.search("tech incubator").len(), 1);
        assert_eq!(catalog.search("venture").len(), 1);
        assert!(catalog.search("fishing subsidies").is_empty());
    }

    #[test]
    fn search_with_empty_keywords_is_empty_not_everything() {
        let catalog = ProgramCatalog::new(vec![tips()]);
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("a").is_empty());
    }

    #[test]
    fn eligible_profile_passes() {
        let profile = FounderProfile {
            company_age_years: Some(3),
            stage: Some("seed".into()),
            industry: Some("biotech".into()),
            has_investment: true,
        };
        let result = check_eligibility(&profile, &tips());
        assert!(result.eligible);
        assert!(!result.reasons.is_empty());
    }

    #[test]
    fn too_old_company_fails_with_reason() {
        let profile = FounderProfile {
            company_age_years: Some(9),
            stage: Some("seed".into()),
            has_investment: true,
            ..Default::default()
        };
        let result = check_eligibility(&profile, &tips());
        assert!(!result.eligible);
        assert!(result.reasons.iter().any(|r| r.contains("9 years")));
    }

    #[test]
    fn excluded_industry_fails() {
        let profile = FounderProfile {
            company_age_years: Some(2),
            stage: Some("seed".into()),
            industry: Some("gambling".into()),
            has_investment: true,
        };
        let result = check_eligibility(&profile, &tips());
        assert!(!result.eligible);
        assert!(result.reasons.iter().any(|r| r.contains("excluded")));
    }

    #[test]
    fn missing_investment_fails_when_required() {
        let profile = FounderProfile {
            company_age_years: Some(2),
            stage: Some("seed".into()),
            has_investment: false,
            ..Default::default()
        };
        let result = check_eligibility(&profile, &tips());
        assert!(!result.eligible);
    }

    #[test]
    fn catalog_loads_from_json() {
        let raw = r#"[
            {"id": "tips", "name": "TIPS", "description": "incubator", "requires_investment": true},
            {"id": "voucher", "name": "Export Voucher", "description": "export support"}
        ]"#;
        let catalog = ProgramCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
