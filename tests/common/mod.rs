// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use carrera_challenge::config::Config;
use carrera_challenge::db::{MemoryConfigStore, MemoryMessageBoard};
use carrera_challenge::routes::create_router;
use carrera_challenge::services::ChallengeService;
use carrera_challenge::AppState;
use std::sync::Arc;

/// In-memory collaborators behind a service, kept for inspection.
#[allow(dead_code)]
pub struct TestBackend {
    pub store: Arc<MemoryConfigStore>,
    pub board: Arc<MemoryMessageBoard>,
    pub service: ChallengeService,
}

/// Create a challenge service with offline in-memory storage.
#[allow(dead_code)]
pub fn test_backend() -> TestBackend {
    let store = Arc::new(MemoryConfigStore::new());
    let board = Arc::new(MemoryMessageBoard::new());
    let service = ChallengeService::new(store.clone(), board.clone());
    TestBackend {
        store,
        board,
        service,
    }
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the backend behind it.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, TestBackend) {
    let backend = test_backend();
    let state = Arc::new(AppState {
        config: Config::test_default(),
        challenges: backend.service.clone(),
    });

    (create_router(state), backend)
}

/// Bearer header value for admin routes.
#[allow(dead_code)]
pub fn admin_auth() -> String {
    format!("Bearer {}", Config::test_default().admin_token)
}
