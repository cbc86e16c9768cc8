/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (PgPool は内部 Arc)
 */
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    // None は接続設定が壊れていて pool を作れなかった場合のみ
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(db: Option<PgPool>) -> Self {
        Self { db }
    }
}
