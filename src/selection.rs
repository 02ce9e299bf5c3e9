//! Assignment target selection.
//!
//! Tracks what the user has picked or typed in the assignment popup and
//! resolves it into a [`SubmitPlan`]. Typed names for nodes that do not exist
//! yet take precedence over selected existing nodes, so the submission can
//! create up to two nodes before associating the media.

/// Which taxonomy level a creation request targets. Drives the error message
/// when the request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationLevel {
    Category,
    Subcategory,
}

/// Resolved submission target, decided at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    /// Create a category and optionally a subcategory under it, then
    /// associate with the deepest node created.
    CreateCategoryChain {
        category: String,
        subcategory: Option<String>,
    },
    /// Create a subcategory under an existing category, then associate.
    CreateSubcategory { parent: String, name: String },
    /// Associate with an existing node.
    Associate { technique_id: String },
}

/// State of the assignment popup's form.
///
/// Selected ids are empty strings when nothing is selected, matching the
/// empty option of the selects they back.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub selected_category: String,
    pub selected_subcategory: String,
    pub new_category_name: String,
    pub new_subcategory_name: String,
    pub technique_title: String,
    pub submitting: bool,
    pub creating_category: bool,
    pub creating_subcategory: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the selected category. The subcategory selection belongs to
    /// the previous category and is always cleared.
    pub fn select_category(&mut self, id: String) {
        self.selected_category = id;
        self.selected_subcategory.clear();
    }

    pub fn select_subcategory(&mut self, id: String) {
        self.selected_subcategory = id;
    }

    /// Existing node the selection points at, subcategory over category.
    pub fn existing_target(&self) -> Option<&str> {
        if !self.selected_subcategory.is_empty() {
            Some(&self.selected_subcategory)
        } else if !self.selected_category.is_empty() {
            Some(&self.selected_category)
        } else {
            None
        }
    }

    /// A typed category name counts as pending only while no existing
    /// category is selected.
    fn pending_category(&self) -> Option<&str> {
        let name = self.new_category_name.trim();
        if !name.is_empty() && self.selected_category.is_empty() {
            Some(name)
        } else {
            None
        }
    }

    fn pending_subcategory(&self) -> Option<&str> {
        let name = self.new_subcategory_name.trim();
        if !name.is_empty() && self.selected_subcategory.is_empty() {
            Some(name)
        } else {
            None
        }
    }

    /// Resolve the submission target.
    ///
    /// Priority order: a pending category starts a creation chain (taking a
    /// pending subcategory along), a pending subcategory under a selected
    /// category creates just the subcategory, otherwise the selected
    /// existing node is used directly.
    pub fn resolve_target(&self) -> Option<SubmitPlan> {
        if let Some(category) = self.pending_category() {
            return Some(SubmitPlan::CreateCategoryChain {
                category: category.to_string(),
                subcategory: self.pending_subcategory().map(str::to_string),
            });
        }

        if !self.selected_category.is_empty() {
            if let Some(name) = self.pending_subcategory() {
                return Some(SubmitPlan::CreateSubcategory {
                    parent: self.selected_category.clone(),
                    name: name.to_string(),
                });
            }
        }

        self.existing_target().map(|id| SubmitPlan::Associate {
            technique_id: id.to_string(),
        })
    }

    /// Submission is allowed when nothing is in flight, a title is present
    /// and a target can be resolved.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.technique_title.trim().is_empty() && self.resolve_target().is_some()
    }

    /// A standalone creation resolved: select the new node and clear the
    /// input it came from.
    pub fn apply_created(&mut self, id: &str, level: CreationLevel) {
        match level {
            CreationLevel::Category => {
                self.select_category(id.to_string());
                self.new_category_name.clear();
                self.creating_category = false;
            }
            CreationLevel::Subcategory => {
                self.select_subcategory(id.to_string());
                self.new_subcategory_name.clear();
                self.creating_subcategory = false;
            }
        }
    }

    /// Reset the in-flight creation flags after a failure.
    pub fn clear_pending_flags(&mut self) {
        self.creating_category = false;
        self.creating_subcategory = false;
    }
}
