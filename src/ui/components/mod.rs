pub mod assignment_dialog;
pub mod status_bar;
pub mod tree_view;

pub use assignment_dialog::AssignmentDialog;
pub use status_bar::StatusBarComponent;
pub use tree_view::TreeViewComponent;
