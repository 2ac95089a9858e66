/*
 * Responsibility
 * - Handler から見える「呼び出し元 identity」の型
 *
 * Notes
 * - 値は access middleware が token service で解決したものだけ
 * - header が壊れている場合も None (0 と区別したいときは Option のまま使う)
 */

/// Resolved identity of the request, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    pub caller_id: Option<i64>,
    pub client_id: Option<i64>,
}

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        self.caller_id.is_some()
    }

    pub fn caller_id_or_zero(&self) -> i64 {
        self.caller_id.unwrap_or(0)
    }

    pub fn client_id_or_zero(&self) -> i64 {
        self.client_id.unwrap_or(0)
    }
}
