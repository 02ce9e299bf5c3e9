//! Client-side technique store.
//!
//! Owns the API backend, spawns background requests, and reports their
//! outcomes as typed [`StoreEvent`]s over an unbounded channel. The UI drains
//! the channel on tick, so all state mutation stays on the UI task and the
//! taxonomy tree is only ever replaced wholesale by a reload, never edited
//! in place.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{ApiError, TechniqueBackend};
use crate::selection::{CreationLevel, SubmitPlan};
use crate::techniques::{MediaInfo, TechniqueTreeData};

/// Events emitted by the store.
///
/// The five media/tree events mirror the lifecycle of the tree and of an
/// association attempt; the creation events let the assignment popup observe
/// the progress of its own chained node creations.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    TreeLoaded(TechniqueTreeData),
    TreeLoadFailed { message: String },
    MediaLoaded(MediaInfo),
    MediaLoadFailed { message: String },
    CategoryCreated {
        id: String,
        parent_id: Option<String>,
        level: CreationLevel,
    },
    CategoryCreationFailed { level: CreationLevel },
    MediaAdditionCompleted,
    MediaAdditionFailed,
    MediaAlreadyAdded,
}

pub type RequestId = u64;

struct PendingRequest {
    handle: JoinHandle<()>,
    description: String,
    #[allow(dead_code)]
    started_at: Instant,
}

/// Store front-end: action methods spawn tokio tasks, events come back on
/// the receiver returned by [`TechniqueStore::new`].
pub struct TechniqueStore {
    backend: Arc<dyn TechniqueBackend>,
    requests: HashMap<RequestId, PendingRequest>,
    next_request_id: RequestId,
    event_tx: mpsc::UnboundedSender<StoreEvent>,
}

impl TechniqueStore {
    pub fn new(backend: Arc<dyn TechniqueBackend>) -> (Self, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                requests: HashMap::new(),
                next_request_id: 1,
                event_tx: tx,
            },
            rx,
        )
    }

    fn spawn<F>(&mut self, description: String, fut: F) -> RequestId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let handle = tokio::spawn(fut);
        self.requests.insert(
            request_id,
            PendingRequest {
                handle,
                description,
                started_at: Instant::now(),
            },
        );
        request_id
    }

    /// Fetch the taxonomy tree.
    pub fn load_tree(&mut self) -> RequestId {
        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        self.spawn("Load technique tree".to_string(), async move {
            send_tree_load(backend.as_ref(), &tx).await;
        })
    }

    /// Fetch the media record used to pre-fill the assignment title.
    pub fn load_media(&mut self, friendly_token: &str) -> RequestId {
        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        let token = friendly_token.to_string();
        self.spawn(format!("Load media {token}"), async move {
            match backend.fetch_media(&token).await {
                Ok(media) => {
                    let _ = tx.send(StoreEvent::MediaLoaded(media));
                }
                Err(e) => {
                    warn!("failed to load media {token}: {e}");
                    let _ = tx.send(StoreEvent::MediaLoadFailed { message: e.to_string() });
                }
            }
        })
    }

    /// Create a single taxonomy node, the standalone Create button flow.
    /// A successful creation triggers a tree reload so the new node becomes
    /// selectable.
    pub fn create_category(&mut self, title: &str, parent_id: Option<&str>) -> RequestId {
        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        let title = title.trim().to_string();
        let parent = parent_id.map(str::to_string);
        let level = if parent.is_some() {
            CreationLevel::Subcategory
        } else {
            CreationLevel::Category
        };
        self.spawn(format!("Create category '{title}'"), async move {
            match backend.create_category(&title, parent.as_deref()).await {
                Ok(node) => {
                    info!("created {level:?} '{title}' as {}", node.id);
                    let _ = tx.send(StoreEvent::CategoryCreated {
                        id: node.id,
                        parent_id: parent,
                        level,
                    });
                    send_tree_load(backend.as_ref(), &tx).await;
                }
                Err(e) => {
                    warn!("failed to create {level:?} '{title}': {e}");
                    let _ = tx.send(StoreEvent::CategoryCreationFailed { level });
                }
            }
        })
    }

    /// Run an assignment submission to a terminal event.
    ///
    /// Chained creations are strictly sequential: a subcategory request
    /// carries the just-created category id as parent, so it is only issued
    /// once the category response has resolved. Every successful creation
    /// triggers a tree reload. A creation failure aborts the chain without
    /// rolling back nodes already created; both steps of a category chain
    /// report a category-level error.
    pub fn submit(&mut self, plan: SubmitPlan, media_token: &str, title: &str) -> RequestId {
        let backend = self.backend.clone();
        let tx = self.event_tx.clone();
        let token = media_token.to_string();
        let title = title.trim().to_string();
        self.spawn(format!("Assign media {token}"), async move {
            let target = match plan {
                SubmitPlan::CreateCategoryChain { category, subcategory } => {
                    let cat = match backend.create_category(&category, None).await {
                        Ok(node) => node,
                        Err(e) => {
                            warn!("category creation failed: {e}");
                            let _ = tx.send(StoreEvent::CategoryCreationFailed {
                                level: CreationLevel::Category,
                            });
                            return;
                        }
                    };
                    let _ = tx.send(StoreEvent::CategoryCreated {
                        id: cat.id.clone(),
                        parent_id: None,
                        level: CreationLevel::Category,
                    });
                    send_tree_load(backend.as_ref(), &tx).await;

                    match subcategory {
                        Some(name) => {
                            let sub = match backend.create_category(&name, Some(&cat.id)).await {
                                Ok(node) => node,
                                Err(e) => {
                                    warn!("subcategory creation failed under {}: {e}", cat.id);
                                    let _ = tx.send(StoreEvent::CategoryCreationFailed {
                                        level: CreationLevel::Category,
                                    });
                                    return;
                                }
                            };
                            let _ = tx.send(StoreEvent::CategoryCreated {
                                id: sub.id.clone(),
                                parent_id: Some(cat.id),
                                level: CreationLevel::Subcategory,
                            });
                            send_tree_load(backend.as_ref(), &tx).await;
                            sub.id
                        }
                        None => cat.id,
                    }
                }
                SubmitPlan::CreateSubcategory { parent, name } => {
                    let sub = match backend.create_category(&name, Some(&parent)).await {
                        Ok(node) => node,
                        Err(e) => {
                            warn!("subcategory creation failed under {parent}: {e}");
                            let _ = tx.send(StoreEvent::CategoryCreationFailed {
                                level: CreationLevel::Subcategory,
                            });
                            return;
                        }
                    };
                    let _ = tx.send(StoreEvent::CategoryCreated {
                        id: sub.id.clone(),
                        parent_id: Some(parent),
                        level: CreationLevel::Subcategory,
                    });
                    send_tree_load(backend.as_ref(), &tx).await;
                    sub.id
                }
                SubmitPlan::Associate { technique_id } => technique_id,
            };

            match backend.add_media(&target, &token, &title).await {
                Ok(()) => {
                    info!("media {token} added to technique {target}");
                    let _ = tx.send(StoreEvent::MediaAdditionCompleted);
                }
                Err(ApiError::AlreadyAdded) => {
                    info!("media {token} already added to technique {target}");
                    let _ = tx.send(StoreEvent::MediaAlreadyAdded);
                }
                Err(e) => {
                    warn!("failed to add media {token} to technique {target}: {e}");
                    let _ = tx.send(StoreEvent::MediaAdditionFailed);
                }
            }
        })
    }

    /// Drop the bookkeeping for requests whose task has finished.
    pub fn cleanup_finished(&mut self) -> usize {
        let finished: Vec<RequestId> = self
            .requests
            .iter()
            .filter(|(_, request)| request.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();
        for id in &finished {
            if let Some(request) = self.requests.remove(id) {
                log::debug!("request finished: {}", request.description);
            }
        }
        finished.len()
    }

    /// Number of requests still in flight.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    pub fn abort_all(&mut self) {
        for (_, request) in self.requests.drain() {
            request.handle.abort();
        }
    }
}

impl Drop for TechniqueStore {
    fn drop(&mut self) {
        self.abort_all();
    }
}

async fn send_tree_load(backend: &dyn TechniqueBackend, tx: &mpsc::UnboundedSender<StoreEvent>) {
    match backend.fetch_tree().await {
        Ok(data) => {
            let _ = tx.send(StoreEvent::TreeLoaded(data));
        }
        Err(e) => {
            warn!("failed to load technique tree: {e}");
            let message = match e {
                ApiError::AccessDenied => crate::constants::ERROR_ACCESS_DENIED.to_string(),
                _ => crate::constants::ERROR_TREE_LOAD_FAILED.to_string(),
            };
            let _ = tx.send(StoreEvent::TreeLoadFailed { message });
        }
    }
}
