use crossterm::event::{KeyCode, KeyEvent};

use matwork::selection::{CreationLevel, SubmitPlan};
use matwork::techniques::{MediaInfo, TechniqueNode, TechniqueTreeData};
use matwork::ui::components::AssignmentDialog;
use matwork::ui::core::{Action, Component};

fn sample_tree() -> TechniqueTreeData {
    TechniqueTreeData {
        version: 1,
        tree: vec![TechniqueNode {
            id: "guard".to_string(),
            title: "Guard".to_string(),
            children: vec![TechniqueNode {
                id: "closed-guard".to_string(),
                title: "Closed Guard".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

fn sample_media() -> MediaInfo {
    MediaInfo {
        friendly_token: "tok123".to_string(),
        title: "Armbar drill".to_string(),
    }
}

fn open_dialog() -> AssignmentDialog {
    let mut dialog = AssignmentDialog::new();
    dialog.update_tree(sample_tree());
    dialog.open(Some(sample_media()));
    dialog
}

fn key(dialog: &mut AssignmentDialog, code: KeyCode) -> Action {
    dialog.handle_key_events(KeyEvent::from(code))
}

#[test]
fn test_open_prefills_title_from_media() {
    let dialog = open_dialog();
    assert!(dialog.is_visible());
    assert_eq!(dialog.selection.technique_title, "Armbar drill");
}

#[test]
fn test_escape_closes() {
    let mut dialog = open_dialog();
    assert!(matches!(key(&mut dialog, KeyCode::Esc), Action::CloseAssignment));
}

#[test]
fn test_enter_without_target_does_nothing() {
    let mut dialog = open_dialog();
    // Title is pre-filled but nothing is selected or typed
    assert!(matches!(key(&mut dialog, KeyCode::Enter), Action::None));
    assert!(!dialog.selection.submitting);
}

#[test]
fn test_select_category_and_submit() {
    let mut dialog = open_dialog();

    // Focus starts on the category select; Down moves off the empty option
    assert!(matches!(key(&mut dialog, KeyCode::Down), Action::None));
    assert_eq!(dialog.selection.selected_category, "guard");

    match key(&mut dialog, KeyCode::Enter) {
        Action::Submit { plan, title } => {
            assert_eq!(
                plan,
                SubmitPlan::Associate {
                    technique_id: "guard".to_string()
                }
            );
            assert_eq!(title, "Armbar drill");
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(dialog.selection.submitting);

    // A second Enter while submitting is ignored
    assert!(matches!(key(&mut dialog, KeyCode::Enter), Action::None));
}

#[test]
fn test_cycling_category_back_to_empty_clears_subcategory() {
    let mut dialog = open_dialog();
    key(&mut dialog, KeyCode::Down);
    key(&mut dialog, KeyCode::Tab); // new category
    key(&mut dialog, KeyCode::Tab); // subcategory select
    key(&mut dialog, KeyCode::Down);
    assert_eq!(dialog.selection.selected_subcategory, "closed-guard");

    key(&mut dialog, KeyCode::BackTab);
    key(&mut dialog, KeyCode::BackTab); // back on category select
    key(&mut dialog, KeyCode::Down); // wraps to the empty option
    assert!(dialog.selection.selected_category.is_empty());
    assert!(dialog.selection.selected_subcategory.is_empty());
}

#[test]
fn test_typing_new_category_and_creating() {
    let mut dialog = open_dialog();
    key(&mut dialog, KeyCode::Tab); // new category input
    for c in "Mount".chars() {
        key(&mut dialog, KeyCode::Char(c));
    }
    assert_eq!(dialog.selection.new_category_name, "Mount");

    match key(&mut dialog, KeyCode::Enter) {
        Action::CreateCategory { title, parent_id } => {
            assert_eq!(title, "Mount");
            assert_eq!(parent_id, None);
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(dialog.selection.creating_category);

    // Enter is ignored while the creation is in flight
    assert!(matches!(key(&mut dialog, KeyCode::Enter), Action::None));

    // The creation resolving selects the new node and clears the input
    dialog.apply_created("mount-1", CreationLevel::Category);
    assert_eq!(dialog.selection.selected_category, "mount-1");
    assert!(dialog.selection.new_category_name.is_empty());
    assert!(!dialog.selection.creating_category);
}

#[test]
fn test_new_subcategory_requires_selected_category() {
    let mut dialog = open_dialog();
    key(&mut dialog, KeyCode::Down); // select "guard"
    key(&mut dialog, KeyCode::Tab); // new category
    key(&mut dialog, KeyCode::Tab); // subcategory select
    key(&mut dialog, KeyCode::Tab); // new subcategory input
    for c in "Half Guard".chars() {
        key(&mut dialog, KeyCode::Char(c));
    }

    match key(&mut dialog, KeyCode::Enter) {
        Action::CreateCategory { title, parent_id } => {
            assert_eq!(title, "Half Guard");
            assert_eq!(parent_id.as_deref(), Some("guard"));
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(dialog.selection.creating_subcategory);
}

#[test]
fn test_chain_failure_releases_submitting_for_retry() {
    let mut dialog = open_dialog();
    key(&mut dialog, KeyCode::Tab); // new category input
    for c in "Mount".chars() {
        key(&mut dialog, KeyCode::Char(c));
    }
    key(&mut dialog, KeyCode::Tab); // title field

    match key(&mut dialog, KeyCode::Enter) {
        Action::Submit { plan, .. } => {
            assert_eq!(
                plan,
                SubmitPlan::CreateCategoryChain {
                    category: "Mount".to_string(),
                    subcategory: None,
                }
            );
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(dialog.selection.submitting);

    // The chain failing before the association is the only outcome; the
    // form must come back ready for another attempt
    dialog.creation_failed();
    assert!(!dialog.selection.submitting);
    assert!(dialog.is_visible());
    assert!(matches!(key(&mut dialog, KeyCode::Enter), Action::Submit { .. }));
}

#[test]
fn test_submission_outcome_controls_popup() {
    let mut dialog = open_dialog();
    dialog.selection.submitting = true;

    // Failure keeps the popup open for another attempt
    dialog.submission_finished(false);
    assert!(dialog.is_visible());
    assert!(!dialog.selection.submitting);

    // Success closes it
    dialog.selection.submitting = true;
    dialog.submission_finished(true);
    assert!(!dialog.is_visible());
}

#[test]
fn test_backspace_edits_focused_input() {
    let mut dialog = open_dialog();
    key(&mut dialog, KeyCode::Tab);
    key(&mut dialog, KeyCode::Char('a'));
    key(&mut dialog, KeyCode::Char('b'));
    key(&mut dialog, KeyCode::Backspace);
    assert_eq!(dialog.selection.new_category_name, "a");
}
