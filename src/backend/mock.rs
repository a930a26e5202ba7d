//! Test doubles for [`AnalysisBackend`].

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

use super::{
    AnalysisBackend, ChatReply, ChatRequest, ClientError, EfficiencyRecord, SummarySnapshot,
    WorkloadRecord,
};
use crate::graphs::GraphKind;

/// Scripted backend that records every request
#[derive(Default)]
pub struct MockBackend {
    chat_replies: Mutex<VecDeque<Result<ChatReply, ClientError>>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    summary: Mutex<Option<Result<SummarySnapshot, ClientError>>>,
    efficiency: Mutex<Option<Result<Vec<EfficiencyRecord>, ClientError>>>,
    summary_calls: AtomicUsize,
    efficiency_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chat(&self, reply: Result<ChatReply, ClientError>) {
        self.chat_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_summary(&self, summary: Result<SummarySnapshot, ClientError>) {
        *self.summary.lock().unwrap() = Some(summary);
    }

    pub fn set_efficiency(&self, records: Result<Vec<EfficiencyRecord>, ClientError>) {
        *self.efficiency.lock().unwrap() = Some(records);
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn efficiency_calls(&self) -> usize {
        self.efficiency_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ChatReply {
                    response: "ok".to_string(),
                    graph: None,
                })
            })
    }

    async fn summary(&self) -> Result<SummarySnapshot, ClientError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.summary
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(SummarySnapshot::default()))
    }

    async fn efficiency(&self) -> Result<Vec<EfficiencyRecord>, ClientError> {
        self.efficiency_calls.fetch_add(1, Ordering::SeqCst);
        self.efficiency
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn daily_workloads(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        Ok(Vec::new())
    }

    async fn graph(&self, _kind: GraphKind) -> Result<Vec<u8>, ClientError> {
        Ok(b"\x89PNG".to_vec())
    }

    fn graph_url(&self, kind: GraphKind) -> String {
        kind.url("http://mock")
    }
}

/// Backend whose chat call blocks until released
#[derive(Default)]
pub struct GatedBackend {
    entered: Notify,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisBackend for GatedBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(ChatReply {
            response: format!("echo: {}", request.message),
            graph: None,
        })
    }

    async fn summary(&self) -> Result<SummarySnapshot, ClientError> {
        Ok(SummarySnapshot::default())
    }

    async fn efficiency(&self) -> Result<Vec<EfficiencyRecord>, ClientError> {
        Ok(Vec::new())
    }

    async fn daily_workloads(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        Ok(Vec::new())
    }

    async fn graph(&self, _kind: GraphKind) -> Result<Vec<u8>, ClientError> {
        Ok(Vec::new())
    }

    fn graph_url(&self, kind: GraphKind) -> String {
        kind.url("http://gated")
    }
}
