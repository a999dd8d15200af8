//! Message dispatch
//!
//! All replayed input flows through [`update`], which forwards each message
//! to the matching [`EditorSurface`] hook.

use tracing::{debug, span, Level};

use crate::coords::CoordinateMapper;
use crate::document::DocumentFacade;
use crate::editor::Editor;
use crate::messages::Msg;
use crate::surface::{EditorSurface, EventResult};
use crate::tracing::SelectionSnapshot;

/// Apply one message, logging the selection/composition diff it caused
pub fn update<D: DocumentFacade, M: CoordinateMapper>(
    editor: &mut Editor<D, M>,
    msg: Msg,
) -> EventResult {
    let is_noisy = msg.is_noisy();
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = msg.name()).entered())
    };

    let before = snapshot(editor);
    if !is_noisy {
        debug!(target: "message", msg = ?msg, "processing");
    }

    let result = update_inner(editor, msg);

    if let Some(diff) = before.diff(&snapshot(editor)) {
        debug!(target: "selection", %diff, "state changed");
    }
    result
}

fn update_inner<D: DocumentFacade, M: CoordinateMapper>(
    editor: &mut Editor<D, M>,
    msg: Msg,
) -> EventResult {
    match msg {
        Msg::Key(event) => editor.on_key(&event),
        Msg::Pointer(event) => editor.on_pointer(&event),
        Msg::Touch(event) => editor.on_touch(&event),
        Msg::Wheel(event) => editor.on_wheel(&event),
        Msg::Ime(event) => editor.on_composition(&event),
        Msg::Focus { focused } => editor.on_focus(focused),
        Msg::Tick { time } => match editor.next_deadline() {
            Some(deadline) if deadline <= time => editor.on_timer(time),
            _ => EventResult::Bubble,
        },
        Msg::ReadOnly { read_only } => {
            editor.set_read_only(read_only);
            EventResult::consumed_redraw()
        }
        Msg::Select { anchor, caret } => {
            editor.set_selection(anchor, caret);
            EventResult::consumed_redraw()
        }
    }
}

fn snapshot<D: DocumentFacade, M: CoordinateMapper>(editor: &Editor<D, M>) -> SelectionSnapshot {
    SelectionSnapshot::capture(
        editor.selection(),
        editor.composition().phase,
        editor.document().len(),
    )
}
