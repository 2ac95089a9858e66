/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - authenticator: token service への問い合わせ + trust header の付与
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::oauth::RequestAuthenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: RequestAuthenticator,
}

impl AppState {
    pub fn new(authenticator: RequestAuthenticator) -> Self {
        Self { authenticator }
    }
}
