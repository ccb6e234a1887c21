//! Runtime bridge - connects sync TUI thread with async Tokio runtime
#![allow(dead_code)]
//!
//! This module provides a bridge between the synchronous TUI (ratatui) thread
//! and the asynchronous Tokio runtime that talks to the analytics server.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::domain::browse::{Collection, CollectionId, CollectionItem};
use crate::domain::dashboard::{
    CardDataset, CardId, DashCard, DashCardId, Dashboard, DashboardId, ParameterId,
};
use crate::infrastructure::api::PermissionsMatrix;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch the collection tree
    FetchCollections,
    /// Fetch items in a collection (None = root)
    FetchCollectionItems { collection_id: Option<CollectionId> },
    /// Fetch a dashboard record with its placements
    FetchDashboard { dashboard_id: DashboardId },
    /// Run one round of card queries with the applied filters
    FetchCardData {
        dashboard_id: DashboardId,
        cards: Vec<CardRequest>,
        parameters: Vec<Value>,
    },
    /// Search a parameter's values for typeahead
    SearchParameterValues {
        dashboard_id: DashboardId,
        parameter_id: ParameterId,
        query: String,
    },
    /// Persist edited dashboard attributes
    SaveDashboard {
        dashboard_id: DashboardId,
        attributes: serde_json::Map<String, Value>,
    },
    /// Create a public link for a dashboard
    CreatePublicLink { dashboard_id: DashboardId },
    /// Revoke a dashboard's public link
    DeletePublicLink { dashboard_id: DashboardId },
    /// Toggle embedding for a dashboard
    SetEmbedding {
        dashboard_id: DashboardId,
        enabled: bool,
    },
    /// Fetch the permissions graph
    FetchPermissions,
    /// Read the approved embedding origins setting
    ReadApprovedDomains,
    /// Write the approved embedding origins setting
    WriteApprovedDomains { domains: String },
    /// Shutdown the worker
    Shutdown,
}

/// One card query within a round
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub dashcard_id: DashCardId,
    pub card_id: CardId,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Successfully connected to the server
    Connected {
        endpoint: String,
        status: String,
        user: Option<String>,
    },
    /// Collection tree ready
    CollectionsReady { collections: Vec<Collection> },
    /// Collection listing ready
    CollectionItemsReady {
        collection_id: Option<CollectionId>,
        items: Vec<CollectionItem>,
    },
    /// Dashboard record ready
    DashboardReady {
        dashboard: Dashboard,
        dashcards: Vec<DashCard>,
    },
    /// One card's query result landed
    CardDataReady {
        dashcard_id: DashCardId,
        card_id: CardId,
        dataset: CardDataset,
    },
    /// One card's query failed
    CardDataFailed {
        dashcard_id: DashCardId,
        card_id: CardId,
        error: String,
    },
    /// Parameter search results ready
    ParameterValuesReady {
        parameter_id: ParameterId,
        query: String,
        values: Vec<Value>,
    },
    /// Dashboard saved, server returned the fresh record
    DashboardSaved {
        dashboard: Dashboard,
        dashcards: Vec<DashCard>,
    },
    /// Public link created
    PublicLinkReady {
        dashboard_id: DashboardId,
        uuid: String,
    },
    /// Public link revoked
    PublicLinkRevoked { dashboard_id: DashboardId },
    /// Embedding toggled on the server
    EmbeddingUpdated { enabled: bool },
    /// Permissions matrix assembled
    PermissionsReady { matrix: PermissionsMatrix },
    /// Approved embedding origins read
    ApprovedDomainsReady { domains: Option<String> },
    /// Approved embedding origins written
    ApprovedDomainsSaved,
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Create a new runtime bridge pointed at the given server
    pub fn new(url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        // Spawn the worker thread with its own Tokio runtime
        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(async {
                if let Err(err) = run_async_worker(url, api_key, cmd_rx, evt_tx.clone()).await {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Worker exited: {:#}", err),
                    });
                }
            });
        });

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Try to receive a single event (non-blocking)
    pub fn try_recv(&self) -> Option<RuntimeEvent> {
        self.evt_rx.try_recv().ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        // Try to send shutdown command
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
