use crate::selection::{CreationLevel, SubmitPlan};
use crate::techniques::{MediaInfo, TechniqueTreeData};

/// Notification severity, drives the toast color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub enum Action {
    // Tree browsing
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,

    // Assignment popup control
    OpenAssignment,
    CloseAssignment,

    // Store-bound operations
    ReloadTree,
    CreateCategory {
        title: String,
        parent_id: Option<String>,
    },
    Submit {
        plan: SubmitPlan,
        title: String,
    },

    // Store events observed on tick
    TreeLoaded(TechniqueTreeData),
    TreeLoadFailed {
        message: String,
    },
    MediaLoaded(MediaInfo),
    CategoryCreated {
        id: String,
        parent_id: Option<String>,
        level: CreationLevel,
    },
    CategoryCreationFailed {
        level: CreationLevel,
    },
    MediaAdditionCompleted,
    MediaAdditionFailed,
    MediaAlreadyAdded,

    // UI feedback
    Notify {
        message: String,
        kind: NotificationKind,
    },

    // App control
    Quit,
    None,
}
