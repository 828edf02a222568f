//! Filter-option discovery models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Distinct values of each filterable column, for the dashboard dropdowns.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct FilterOptionsResponse {
    pub zones: Vec<String>,
    pub party_districts: Vec<String>,
    pub constituencies: Vec<String>,
    pub designations: Vec<String>,
}
