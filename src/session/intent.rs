use crate::entity::NotePatch;

/// Everything the list navigator and detail view can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add,
    Select(String),
    BeginEdit,
    Change(NotePatch),
    Save,
    Cancel,
    Delete,
}
