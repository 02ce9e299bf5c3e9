//! Root component: owns the store, the child components, and the app state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::config::Config;
use crate::constants::{
    NOTIFY_CATEGORY_CREATE_FAILED, NOTIFY_MEDIA_ADDED, NOTIFY_MEDIA_ADD_FAILED,
    NOTIFY_MEDIA_ALREADY_ADDED, NOTIFY_SUBCATEGORY_CREATE_FAILED,
};
use crate::selection::CreationLevel;
use crate::store::{StoreEvent, TechniqueStore};
use crate::techniques::{MediaInfo, TechniqueTreeData};
use crate::ui::components::{AssignmentDialog, StatusBarComponent, TreeViewComponent};
use crate::ui::core::{Action, Component, EventType, NotificationKind};
use log::warn;
use tokio::sync::mpsc;

/// Shared view of what the store has delivered so far.
struct AppState {
    tree: Option<TechniqueTreeData>,
    media: Option<MediaInfo>,
}

pub struct AppComponent {
    state: AppState,
    tree_view: TreeViewComponent,
    dialog: AssignmentDialog,
    status_bar: StatusBarComponent,
    store: TechniqueStore,
    store_events: mpsc::UnboundedReceiver<StoreEvent>,
    media_token: Option<String>,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(
        config: &Config,
        store: TechniqueStore,
        store_events: mpsc::UnboundedReceiver<StoreEvent>,
        media_token: Option<String>,
    ) -> Self {
        Self {
            state: AppState {
                tree: None,
                media: None,
            },
            tree_view: TreeViewComponent::new(&config.ui),
            dialog: AssignmentDialog::new(),
            status_bar: StatusBarComponent::new(),
            store,
            store_events,
            media_token,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Kick off the initial requests.
    pub fn init(&mut self) {
        self.store.load_tree();
        if let Some(token) = self.media_token.clone() {
            self.store.load_media(&token);
        }
    }

    /// Called on every tick from the render loop.
    pub fn tick(&mut self) {
        self.process_store_events();
        self.store.cleanup_finished();
        self.status_bar.tick();
    }

    fn process_store_events(&mut self) {
        while let Ok(event) = self.store_events.try_recv() {
            let action = match event {
                StoreEvent::TreeLoaded(data) => Action::TreeLoaded(data),
                StoreEvent::TreeLoadFailed { message } => Action::TreeLoadFailed { message },
                StoreEvent::MediaLoaded(media) => Action::MediaLoaded(media),
                StoreEvent::MediaLoadFailed { message } => {
                    // The title pre-fill is best effort, the popup still works
                    warn!("media lookup failed: {message}");
                    Action::None
                }
                StoreEvent::CategoryCreated { id, parent_id, level } => {
                    Action::CategoryCreated { id, parent_id, level }
                }
                StoreEvent::CategoryCreationFailed { level } => {
                    Action::CategoryCreationFailed { level }
                }
                StoreEvent::MediaAdditionCompleted => Action::MediaAdditionCompleted,
                StoreEvent::MediaAdditionFailed => Action::MediaAdditionFailed,
                StoreEvent::MediaAlreadyAdded => Action::MediaAlreadyAdded,
            };
            self.handle_app_action(action);
        }
    }

    pub fn handle_event(&mut self, event: EventType) -> Result<()> {
        match event {
            EventType::Key(key) => self.handle_key(key),
            EventType::Tick => self.tick(),
            EventType::Resize(_, _) | EventType::Other => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // The popup captures all keys while open
        if self.dialog.is_visible() {
            let action = self.dialog.handle_key_events(key);
            self.handle_app_action(action);
            return;
        }

        let action = self.tree_view.handle_key_events(key);
        if !matches!(action, Action::None) {
            let leftover = self.tree_view.update(action);
            self.handle_app_action(leftover);
            return;
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::ReloadTree,
            KeyCode::Char('a') => Action::OpenAssignment,
            _ => Action::None,
        };
        self.handle_app_action(action);
    }

    fn handle_app_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::ReloadTree => {
                self.tree_view.set_loading(true);
                self.store.load_tree();
            }

            Action::OpenAssignment => {
                if self.media_token.is_none() {
                    self.status_bar.notify(
                        "No media selected, start with: matwork <media-token>".to_string(),
                        NotificationKind::Info,
                    );
                    return;
                }
                self.dialog.update_tree(self.state.tree.clone().unwrap_or_default());
                self.dialog.open(self.state.media.clone());
            }
            Action::CloseAssignment => self.dialog.close(),

            Action::CreateCategory { title, parent_id } => {
                self.store.create_category(&title, parent_id.as_deref());
            }
            Action::Submit { plan, title } => {
                if let Some(token) = self.media_token.clone() {
                    self.store.submit(plan, &token, &title);
                }
            }

            Action::TreeLoaded(data) => {
                self.dialog.update_tree(data.clone());
                self.tree_view.update_data(data.clone());
                self.state.tree = Some(data);
            }
            Action::TreeLoadFailed { message } => {
                // A failed reload keeps the last good tree on screen; only
                // the initial load puts the view into its error state.
                if self.state.tree.is_none() {
                    self.tree_view.set_error(message);
                } else {
                    self.tree_view.set_loading(false);
                    self.status_bar.notify(message, NotificationKind::Error);
                }
            }
            Action::MediaLoaded(media) => {
                self.dialog.set_media(media.clone());
                self.state.media = Some(media);
            }

            Action::CategoryCreated { id, level, .. } => {
                self.dialog.apply_created(&id, level);
            }
            Action::CategoryCreationFailed { level } => {
                self.dialog.creation_failed();
                let message = match level {
                    CreationLevel::Category => NOTIFY_CATEGORY_CREATE_FAILED,
                    CreationLevel::Subcategory => NOTIFY_SUBCATEGORY_CREATE_FAILED,
                };
                self.status_bar.notify(message.to_string(), NotificationKind::Error);
            }

            Action::MediaAdditionCompleted => {
                self.dialog.submission_finished(true);
                self.status_bar
                    .notify(NOTIFY_MEDIA_ADDED.to_string(), NotificationKind::Success);
            }
            Action::MediaAdditionFailed => {
                self.dialog.submission_finished(false);
                self.status_bar
                    .notify(NOTIFY_MEDIA_ADD_FAILED.to_string(), NotificationKind::Error);
            }
            Action::MediaAlreadyAdded => {
                self.dialog.submission_finished(false);
                self.status_bar
                    .notify(NOTIFY_MEDIA_ALREADY_ADDED.to_string(), NotificationKind::Info);
            }

            Action::Notify { message, kind } => self.status_bar.notify(message, kind),

            Action::ScrollUp | Action::ScrollDown | Action::ScrollToTop | Action::ScrollToBottom => {
                let leftover = self.tree_view.update(action);
                if !matches!(leftover, Action::None) {
                    self.handle_app_action(leftover);
                }
            }

            Action::None => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(rect);
        self.tree_view.render(f, chunks[0]);
        self.status_bar.render(f, chunks[1]);
        // Popup renders last, over everything else
        self.dialog.render(f, rect);
    }
}
