//! Async worker - runs in Tokio runtime and handles server calls

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::infrastructure::api::{create_api, AnalyticsApi};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const APPROVED_DOMAINS_SETTING: &str = "embedding-app-origins";

/// Run the async worker loop
pub async fn run_async_worker(
    url: String,
    api_key: Option<String>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("No server URL configured");
    }

    let mut api: Option<Arc<dyn AnalyticsApi>> = None;

    loop {
        // Try to connect if not connected
        if api.is_none() {
            match connect_to_server(&url, api_key.clone(), &evt_tx).await {
                Ok(connected) => {
                    api = Some(connected);
                }
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Connection failed ({}): {:#}", url, err),
                    });
                    tokio::time::sleep(Duration::from_millis(900)).await;
                    continue;
                }
            }
        }

        // Process commands (non-blocking)
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Shutdown => return Ok(()),

                RuntimeCommand::FetchCollections => {
                    if let Some(ref api) = api {
                        match api.list_collections().await {
                            Ok(collections) => {
                                let _ =
                                    evt_tx.send(RuntimeEvent::CollectionsReady { collections });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Collection fetch failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::FetchCollectionItems { collection_id } => {
                    if let Some(ref api) = api {
                        match api.collection_items(collection_id).await {
                            Ok(items) => {
                                let _ = evt_tx.send(RuntimeEvent::CollectionItemsReady {
                                    collection_id,
                                    items,
                                });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Listing fetch failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::FetchDashboard { dashboard_id } => {
                    if let Some(ref api) = api {
                        match api.fetch_dashboard(dashboard_id).await {
                            Ok(doc) => {
                                let (dashboard, dashcards) = doc.into_parts();
                                let _ = evt_tx.send(RuntimeEvent::DashboardReady {
                                    dashboard,
                                    dashcards,
                                });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!(
                                        "Dashboard {} fetch failed: {:#}",
                                        dashboard_id, err
                                    ),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::FetchCardData {
                    dashboard_id,
                    cards,
                    parameters,
                } => {
                    if let Some(ref api) = api {
                        // All placements of a round run concurrently, and
                        // each one reports as soon as its query lands
                        let queries: Vec<_> = cards
                            .into_iter()
                            .map(|card| {
                                let api = Arc::clone(api);
                                let evt_tx = evt_tx.clone();
                                let parameters = parameters.clone();
                                async move {
                                    let result = api
                                        .run_card_query(
                                            dashboard_id,
                                            card.dashcard_id,
                                            card.card_id,
                                            parameters,
                                        )
                                        .await;
                                    let event = match result {
                                        Ok(doc) => RuntimeEvent::CardDataReady {
                                            dashcard_id: card.dashcard_id,
                                            card_id: card.card_id,
                                            dataset: doc.into_dataset(),
                                        },
                                        Err(err) => RuntimeEvent::CardDataFailed {
                                            dashcard_id: card.dashcard_id,
                                            card_id: card.card_id,
                                            error: format!("{:#}", err),
                                        },
                                    };
                                    let _ = evt_tx.send(event);
                                }
                            })
                            .collect();
                        tokio::spawn(async move {
                            futures::future::join_all(queries).await;
                        });
                    }
                }

                RuntimeCommand::SearchParameterValues {
                    dashboard_id,
                    parameter_id,
                    query,
                } => {
                    if let Some(ref api) = api {
                        let api = Arc::clone(api);
                        let evt_tx = evt_tx.clone();
                        tokio::spawn(async move {
                            match api
                                .search_parameter_values(dashboard_id, &parameter_id, &query)
                                .await
                            {
                                Ok(doc) => {
                                    let _ = evt_tx.send(RuntimeEvent::ParameterValuesReady {
                                        parameter_id,
                                        query,
                                        values: doc.into_values(),
                                    });
                                }
                                Err(err) => {
                                    let _ = evt_tx.send(RuntimeEvent::Error {
                                        message: format!("Value search failed: {:#}", err),
                                    });
                                }
                            }
                        });
                    }
                }

                RuntimeCommand::SaveDashboard {
                    dashboard_id,
                    attributes,
                } => {
                    if let Some(ref api) = api {
                        match api.update_dashboard(dashboard_id, &attributes).await {
                            Ok(doc) => {
                                let (dashboard, dashcards) = doc.into_parts();
                                let _ = evt_tx.send(RuntimeEvent::DashboardSaved {
                                    dashboard,
                                    dashcards,
                                });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Save failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::CreatePublicLink { dashboard_id } => {
                    if let Some(ref api) = api {
                        match api.create_public_link(dashboard_id).await {
                            Ok(link) => {
                                let _ = evt_tx.send(RuntimeEvent::PublicLinkReady {
                                    dashboard_id,
                                    uuid: link.uuid,
                                });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Public link failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::DeletePublicLink { dashboard_id } => {
                    if let Some(ref api) = api {
                        match api.delete_public_link(dashboard_id).await {
                            Ok(()) => {
                                let _ =
                                    evt_tx.send(RuntimeEvent::PublicLinkRevoked { dashboard_id });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Revoke failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::SetEmbedding {
                    dashboard_id,
                    enabled,
                } => {
                    if let Some(ref api) = api {
                        let mut attributes = serde_json::Map::new();
                        attributes
                            .insert("enable_embedding".to_string(), serde_json::json!(enabled));
                        match api.update_dashboard(dashboard_id, &attributes).await {
                            Ok(doc) => {
                                let (dashboard, dashcards) = doc.into_parts();
                                let _ = evt_tx.send(RuntimeEvent::DashboardSaved {
                                    dashboard,
                                    dashcards,
                                });
                                let _ = evt_tx.send(RuntimeEvent::EmbeddingUpdated { enabled });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Embedding toggle failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::FetchPermissions => {
                    if let Some(ref api) = api {
                        match api.permissions_matrix().await {
                            Ok(matrix) => {
                                let _ = evt_tx.send(RuntimeEvent::PermissionsReady { matrix });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Permissions fetch failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::ReadApprovedDomains => {
                    if let Some(ref api) = api {
                        match api.read_setting(APPROVED_DOMAINS_SETTING).await {
                            Ok(value) => {
                                let domains =
                                    value.as_str().map(str::to_string).filter(|s| !s.is_empty());
                                let _ =
                                    evt_tx.send(RuntimeEvent::ApprovedDomainsReady { domains });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Domains read failed: {:#}", err),
                                });
                            }
                        }
                    }
                }

                RuntimeCommand::WriteApprovedDomains { domains } => {
                    if let Some(ref api) = api {
                        match api
                            .write_setting(APPROVED_DOMAINS_SETTING, serde_json::json!(domains))
                            .await
                        {
                            Ok(()) => {
                                let _ = evt_tx.send(RuntimeEvent::ApprovedDomainsSaved);
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::Error {
                                    message: format!("Domains write failed: {:#}", err),
                                });
                            }
                        }
                    }
                }
            }
        }

        // Small yield to prevent busy loop
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Connect to the server, probe it, and announce the session
async fn connect_to_server(
    url: &str,
    api_key: Option<String>,
    evt_tx: &Sender<RuntimeEvent>,
) -> Result<Arc<dyn AnalyticsApi>> {
    let api: Arc<dyn AnalyticsApi> = Arc::from(create_api(url, api_key)?);

    let status = api.health().await.context("Health check failed")?;
    let user = match api.current_user().await {
        Ok(user) => Some(user.display_name()),
        Err(_) => None,
    };

    let _ = evt_tx.send(RuntimeEvent::Connected {
        endpoint: api.endpoint_name(),
        status,
        user,
    });

    Ok(api)
}
