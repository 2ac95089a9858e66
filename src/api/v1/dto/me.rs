use serde::{Deserialize, Serialize};

/// Response body for `GET /me`.
///
/// Ids are 0 when the request carried no resolved identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub caller_id: i64,
    pub client_id: i64,
    pub authenticated: bool,
}
