use crate::explorer_actors::app_controller::AppController;
use crate::gateway::{AssistantGateway, GatewayFuture};
use actix::Addr;
use colored::Color;
use common::errors::GatewayError;
use common::logger::{LogLevel, Logger};
use common::messages::GetSnapshot;
use common::types::app_state::AppSnapshot;
use common::types::assistant::{AssistantQuery, AssistantReply};
use futures_channel::oneshot;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

type Outcome = Result<AssistantReply, GatewayError>;

/// A scratch directory removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("street-food-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn silent_logger(name: &str) -> Logger {
    Logger::new(name, Color::White).with_level(LogLevel::Off)
}

/// Gateway whose requests stay pending until the test settles them, in any
/// order. Requests that are never settled never resolve.
#[derive(Default)]
pub struct ScriptedGateway {
    calls: Mutex<Vec<(AssistantQuery, Option<oneshot::Sender<Outcome>>)>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queries(&self) -> Vec<AssistantQuery> {
        let calls = self.calls.lock().unwrap();
        calls.iter().map(|(query, _)| query.clone()).collect()
    }

    /// Resolves the `index`-th request (in call order).
    pub fn settle(&self, index: usize, outcome: Outcome) {
        let mut calls = self.calls.lock().unwrap();
        let sender = calls[index].1.take().expect("request already settled");
        let _ = sender.send(outcome);
    }

    /// Drops the `index`-th request without answering it.
    pub fn abandon(&self, index: usize) {
        let mut calls = self.calls.lock().unwrap();
        calls[index].1.take().expect("request already settled");
    }
}

impl AssistantGateway for ScriptedGateway {
    fn ask(&self, query: AssistantQuery) -> GatewayFuture {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push((query, Some(tx)));
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(GatewayError::Network("request dropped".to_string())))
        })
    }
}

/// Polls the controller until `done` holds for its snapshot.
pub async fn wait_for<F>(controller: &Addr<AppController>, done: F) -> AppSnapshot
where
    F: Fn(&AppSnapshot) -> bool,
{
    for _ in 0..200 {
        let snapshot = controller.send(GetSnapshot).await.unwrap();
        if done(&snapshot) {
            return snapshot;
        }
        actix_rt::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("controller never reached the expected state");
}
