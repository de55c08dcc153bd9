use serde::Deserialize;
use utoipa::IntoParams;

/// Query flags accepted by every list endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Include soft-deleted records
    #[serde(default)]
    pub include_deleted: bool,
}
