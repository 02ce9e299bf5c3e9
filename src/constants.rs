//! Constants used throughout the application
//!
//! This module centralizes API paths, user-visible notification texts, and
//! layout values to improve maintainability and consistency.

// API paths (relative to the configured server base URL)
pub const TECHNIQUES_PATH: &str = "/api/v1/techniques";
pub const TECHNIQUES_CATEGORIES_PATH: &str = "/api/v1/techniques/categories";
pub const MEDIA_PATH: &str = "/api/v1/media";

// Session / CSRF plumbing
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

// Notification texts
pub const NOTIFY_MEDIA_ADDED: &str = "Video added to technique";
pub const NOTIFY_MEDIA_ADD_FAILED: &str = "Failed to add video to technique";
pub const NOTIFY_MEDIA_ALREADY_ADDED: &str = "This video is already added to this technique";
pub const NOTIFY_CATEGORY_CREATE_FAILED: &str = "Failed to create category";
pub const NOTIFY_SUBCATEGORY_CREATE_FAILED: &str = "Failed to create subcategory";

// Tree error states
pub const ERROR_ACCESS_DENIED: &str = "You do not have access to this page.";
pub const ERROR_TREE_LOAD_FAILED: &str = "Failed to load techniques.";

// UI Layout Constants
/// Popup width as a percentage of the terminal width
pub const POPUP_WIDTH_PERCENT: u16 = 60;
/// Popup height as a percentage of the terminal height
pub const POPUP_HEIGHT_PERCENT: u16 = 70;
/// Indent width per tree depth level in columns
pub const TREE_INDENT: usize = 2;
/// How long a notification toast stays visible, in seconds
pub const NOTIFICATION_TTL_SECS: u64 = 4;
