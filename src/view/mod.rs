//! Plain-text rendering of the list navigator and the detail/editor pane.

mod detail;
mod sidebar;

pub use detail::render_detail;
pub use sidebar::render_sidebar;

use crate::session::Session;
use crate::storage::KeyValueStore;

const BRAND: &str = "NoteKit";

/// Full screen: brand line, sidebar, then the detail pane.
pub fn render_screen<S: KeyValueStore>(session: &Session<S>) -> String {
    format!(
        "[{}]\n\n{}\n{}",
        BRAND,
        render_sidebar(session),
        render_detail(session)
    )
}
