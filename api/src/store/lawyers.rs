//! Read-only directory of lawyer profiles.

use lawsphere_shared::Lawyer;
use serde::Deserialize;

use super::StoreError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerFilter {
    pub practice_area: Option<String>,
    pub service_type: Option<String>,
    pub city: Option<String>,
}

impl LawyerFilter {
    pub fn matches(&self, lawyer: &Lawyer) -> bool {
        let any_eq = |wanted: &Option<String>, values: &[String]| match wanted.as_deref() {
            Some(w) if !w.is_empty() && w != "all" => {
                values.iter().any(|v| v.eq_ignore_ascii_case(w))
            }
            _ => true,
        };
        any_eq(&self.practice_area, &lawyer.practice_areas)
            && any_eq(&self.service_type, &lawyer.service_types)
            && any_eq(
                &self.city,
                std::slice::from_ref(&lawyer.office_address.city),
            )
    }
}

#[derive(Debug, Default)]
pub struct LawyerDirectory {
    lawyers: Vec<Lawyer>,
}

impl LawyerDirectory {
    pub fn new(lawyers: Vec<Lawyer>) -> Self {
        Self { lawyers }
    }

    pub fn search(&self, filter: &LawyerFilter) -> Vec<Lawyer> {
        self.lawyers
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Lawyer, StoreError> {
        self.lawyers
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| StoreError::LawyerNotFound(id.to_string()))
    }
}
