use serde::Serialize;

use crate::models::service::ServiceCategory;

#[derive(Debug, Serialize)]
pub struct ServiceOption {
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub problem_type: u32,
    pub problem_subtype: u32,
}

pub fn service_catalog() -> Vec<ServiceOption> {
    ServiceCategory::ALL
        .into_iter()
        .map(|category| {
            let (problem_type, problem_subtype) = category.codes();
            ServiceOption {
                label: category.label(),
                description: category.description(),
                problem_type,
                problem_subtype,
            }
        })
        .collect()
}
