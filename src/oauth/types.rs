use serde::Deserialize;

/// Token record returned by the token service on a 2xx response.
///
/// Only `user_id` / `client_id` leave this type; they are copied into the
/// identity headers and the record is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}

/// Raw answer from the token service, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TokenServiceResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    // 2xx only (anything above 299 is an error body)
    pub fn is_error(&self) -> bool {
        self.status > 299
    }
}
