//! The list synchronizer: an in-memory copy of the server's todo list plus
//! the transient edit state, updated only through the methods below.
//!
//! Operations never touch the network. They return a [`Request`] for the
//! caller to execute, and the caller feeds the outcome back through
//! [`ListSync::complete`], which may hand back a follow-up request (the
//! re-fetch after every mutation).

use crate::io::http::Completion;
use crate::model::request::Request;
use crate::model::todo::{TodoId, TodoItem};

/// Why an operation was refused before any request was made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("todo text is empty")]
    EmptyText,
    #[error("no todo is being edited")]
    NotEditing,
}

/// The one row currently in edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: TodoId,
    pub draft: String,
}

/// Which action controls are enabled for the current state.
///
/// Every control is off while a request is pending. The gate is advisory:
/// the [`ListSync`] methods themselves do not consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub add: bool,
    pub edit: bool,
    pub save: bool,
    pub cancel: bool,
    pub delete: bool,
    /// Text inputs accept typing
    pub input: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListSync {
    items: Vec<TodoItem>,
    pending: bool,
    draft: String,
    editing: Option<EditState>,
    stalled: Option<String>,
}

impl ListSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Text of the new-todo input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &TodoId) -> bool {
        self.editing.as_ref().is_some_and(|e| &e.id == id)
    }

    /// Draft of the row in edit, if any
    pub fn edit_draft_mut(&mut self) -> Option<&mut String> {
        self.editing.as_mut().map(|e| &mut e.draft)
    }

    /// The failure that left the list stuck in pending, if one happened
    pub fn stalled(&self) -> Option<&str> {
        self.stalled.as_deref()
    }

    pub fn controls(&self) -> Controls {
        let idle = !self.pending;
        let editing = self.editing.as_ref();
        Controls {
            add: idle && !is_blank(&self.draft),
            edit: idle,
            save: idle && editing.is_some_and(|e| !is_blank(&e.draft)),
            cancel: idle && editing.is_some(),
            delete: idle,
            input: idle,
        }
    }

    /// Fetch the whole list
    pub fn load(&mut self) -> Request {
        self.pending = true;
        Request::List
    }

    /// Submit the new-todo draft
    pub fn create(&mut self) -> Result<Request, Rejected> {
        if is_blank(&self.draft) {
            return Err(Rejected::EmptyText);
        }
        self.pending = true;
        Ok(Request::Create {
            text: self.draft.clone(),
        })
    }

    /// Put `id` in edit, seeding the draft with its current text. Replaces
    /// any edit already in progress.
    pub fn begin_edit(&mut self, id: TodoId, current_text: impl Into<String>) {
        self.editing = Some(EditState {
            id,
            draft: current_text.into(),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the edit draft for the row in edit
    pub fn update(&mut self) -> Result<Request, Rejected> {
        let edit = self.editing.as_ref().ok_or(Rejected::NotEditing)?;
        if is_blank(&edit.draft) {
            return Err(Rejected::EmptyText);
        }
        let request = Request::Update {
            id: edit.id.clone(),
            text: edit.draft.clone(),
        };
        self.pending = true;
        Ok(request)
    }

    pub fn delete(&mut self, id: TodoId) -> Request {
        self.pending = true;
        Request::Delete { id }
    }

    /// Apply the outcome of a request. Returns the follow-up request, which
    /// after a successful mutation is always a full [`Request::List`].
    ///
    /// A failure leaves `pending` set and issues nothing, so every control
    /// stays disabled from then on. A later success, only reachable when a
    /// caller bypassed the controls, clears the stall along with `pending`.
    pub fn complete(&mut self, completion: Completion) -> Option<Request> {
        if let Some(err) = completion.error() {
            tracing::warn!(error = %err, "request failed; list is stuck pending");
            self.stalled = Some(err.to_string());
            return None;
        }
        self.stalled = None;
        match completion {
            Completion::Listed(Ok(items)) => {
                tracing::debug!(count = items.len(), "list replaced");
                self.items = items;
                self.pending = false;
                None
            }
            Completion::Created(Ok(())) => {
                self.draft.clear();
                self.pending = false;
                Some(self.load())
            }
            Completion::Updated { id, result: Ok(()) } => {
                tracing::debug!(%id, "todo updated");
                self.editing = None;
                self.pending = false;
                Some(self.load())
            }
            Completion::Deleted { id, result: Ok(()) } => {
                tracing::debug!(%id, "todo deleted");
                self.pending = false;
                Some(self.load())
            }
            // Errors were handled above
            _ => None,
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::http::ApiError;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn item(id: i64, text: &str) -> TodoItem {
        TodoItem::new(TodoId::Int(id), text)
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            method: "GET",
            url: "http://test/todos".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A synchronizer whose initial load has completed with `items`
    fn loaded(items: Vec<TodoItem>) -> ListSync {
        let mut sync = ListSync::new();
        assert_eq!(sync.load(), Request::List);
        assert_eq!(sync.complete(Completion::Listed(Ok(items))), None);
        sync
    }

    #[test]
    fn load_replaces_list_in_server_order() {
        let mut sync = ListSync::new();
        assert!(!sync.is_pending());
        sync.load();
        assert!(sync.is_pending());

        let server = vec![item(3, "c"), item(1, "a"), item(2, "b")];
        sync.complete(Completion::Listed(Ok(server.clone())));
        assert_eq!(sync.items(), server.as_slice());
        assert!(!sync.is_pending());

        // Replaced wholesale, not merged
        sync.load();
        sync.complete(Completion::Listed(Ok(vec![item(9, "z")])));
        assert_eq!(sync.items(), &[item(9, "z")]);
    }

    #[test]
    fn create_rejects_blank_draft() {
        let mut sync = loaded(vec![]);
        assert_eq!(sync.create(), Err(Rejected::EmptyText));
        sync.set_draft("   \t");
        assert_eq!(sync.create(), Err(Rejected::EmptyText));
        assert!(!sync.is_pending());
        assert!(!sync.controls().add);
    }

    #[test]
    fn create_then_resync_shows_new_item() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.set_draft("bread");
        assert!(sync.controls().add);

        let req = sync.create().unwrap();
        assert_eq!(
            req,
            Request::Create {
                text: "bread".into()
            }
        );
        assert!(sync.is_pending());
        // Not optimistic
        assert_eq!(sync.items(), &[item(1, "milk")]);

        let follow_up = sync.complete(Completion::Created(Ok(())));
        assert_eq!(follow_up, Some(Request::List));
        assert_eq!(sync.draft(), "");
        assert!(sync.is_pending());

        sync.complete(Completion::Listed(Ok(vec![item(1, "milk"), item(2, "bread")])));
        assert_eq!(sync.items(), &[item(1, "milk"), item(2, "bread")]);
        assert!(!sync.is_pending());
    }

    #[test]
    fn create_keeps_surrounding_whitespace() {
        let mut sync = loaded(vec![]);
        sync.set_draft(" eggs ");
        assert_eq!(
            sync.create().unwrap(),
            Request::Create {
                text: " eggs ".into()
            }
        );
    }

    #[test]
    fn begin_and_cancel_edit_are_local() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.begin_edit(TodoId::Int(1), "milk");
        assert!(sync.is_editing(&TodoId::Int(1)));
        assert_eq!(sync.editing().unwrap().draft, "milk");
        assert!(!sync.is_pending());

        sync.edit_draft_mut().unwrap().push_str(" (oat)");
        sync.cancel_edit();
        assert!(sync.editing().is_none());
        assert!(!sync.is_pending());
        assert_eq!(sync.items(), &[item(1, "milk")]);
    }

    #[test]
    fn begin_edit_replaces_previous_edit() {
        let mut sync = loaded(vec![item(1, "milk"), item(2, "bread")]);
        sync.begin_edit(TodoId::Int(1), "milk");
        sync.begin_edit(TodoId::Int(2), "bread");
        assert!(!sync.is_editing(&TodoId::Int(1)));
        assert_eq!(sync.editing().unwrap().draft, "bread");
    }

    #[test]
    fn update_requires_an_edit_and_text() {
        let mut sync = loaded(vec![item(1, "milk")]);
        assert_eq!(sync.update(), Err(Rejected::NotEditing));

        sync.begin_edit(TodoId::Int(1), "milk");
        sync.edit_draft_mut().unwrap().clear();
        assert_eq!(sync.update(), Err(Rejected::EmptyText));
        assert!(!sync.controls().save);
        assert!(!sync.is_pending());
    }

    #[test]
    fn update_clears_edit_then_resyncs() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.begin_edit(TodoId::Int(1), "milk");
        *sync.edit_draft_mut().unwrap() = "oat milk".into();

        let req = sync.update().unwrap();
        assert_eq!(
            req,
            Request::Update {
                id: TodoId::Int(1),
                text: "oat milk".into()
            }
        );
        assert!(sync.is_pending());
        // Edit row stays open until the server answers
        assert!(sync.is_editing(&TodoId::Int(1)));

        let follow_up = sync.complete(Completion::Updated {
            id: TodoId::Int(1),
            result: Ok(()),
        });
        assert_eq!(follow_up, Some(Request::List));
        assert!(sync.editing().is_none());

        sync.complete(Completion::Listed(Ok(vec![item(1, "oat milk")])));
        assert_eq!(sync.items(), &[item(1, "oat milk")]);
        assert!(!sync.is_pending());
    }

    #[test]
    fn delete_then_resync_removes_only_that_item() {
        let mut sync = loaded(vec![item(1, "milk"), item(2, "bread"), item(3, "eggs")]);
        assert_eq!(
            sync.delete(TodoId::Int(2)),
            Request::Delete { id: TodoId::Int(2) }
        );
        assert!(sync.is_pending());

        let follow_up = sync.complete(Completion::Deleted {
            id: TodoId::Int(2),
            result: Ok(()),
        });
        assert_eq!(follow_up, Some(Request::List));
        sync.complete(Completion::Listed(Ok(vec![item(1, "milk"), item(3, "eggs")])));
        assert_eq!(sync.items(), &[item(1, "milk"), item(3, "eggs")]);
    }

    #[test]
    fn controls_disabled_while_pending_and_restored_after_load() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.set_draft("bread");
        sync.begin_edit(TodoId::Int(1), "milk");
        let idle = sync.controls();
        assert!(idle.add && idle.edit && idle.save && idle.cancel && idle.delete && idle.input);

        sync.delete(TodoId::Int(1));
        let busy = sync.controls();
        assert_eq!(
            busy,
            Controls {
                add: false,
                edit: false,
                save: false,
                cancel: false,
                delete: false,
                input: false,
            }
        );

        let follow_up = sync.complete(Completion::Deleted {
            id: TodoId::Int(1),
            result: Ok(()),
        });
        assert!(follow_up.is_some());
        assert!(!sync.controls().delete);

        sync.complete(Completion::Listed(Ok(vec![])));
        assert!(sync.controls().delete);
        assert!(sync.controls().add);
    }

    #[test]
    fn failure_freezes_in_pending() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.set_draft("bread");
        sync.create().unwrap();

        let follow_up = sync.complete(Completion::Created(Err(server_error())));
        assert_eq!(follow_up, None);
        assert!(sync.is_pending());
        assert!(sync.stalled().unwrap().contains("500"));
        // Draft is kept; nothing was created
        assert_eq!(sync.draft(), "bread");
        assert!(!sync.controls().add);
        assert!(!sync.controls().input);
    }

    #[test]
    fn failed_initial_load_freezes() {
        let mut sync = ListSync::new();
        sync.load();
        sync.complete(Completion::Listed(Err(server_error())));
        assert!(sync.is_pending());
        assert!(sync.items().is_empty());
        assert!(sync.stalled().is_some());
    }

    #[test]
    fn failed_update_keeps_edit_open() {
        let mut sync = loaded(vec![item(1, "milk")]);
        sync.begin_edit(TodoId::Int(1), "oat milk");
        sync.update().unwrap();
        sync.complete(Completion::Updated {
            id: TodoId::Int(1),
            result: Err(server_error()),
        });
        assert!(sync.is_editing(&TodoId::Int(1)));
        assert!(sync.is_pending());
    }

    #[test]
    fn later_success_clears_the_stall() {
        let mut sync = loaded(vec![item(1, "milk"), item(2, "bread")]);
        sync.delete(TodoId::Int(1));
        sync.delete(TodoId::Int(2));

        sync.complete(Completion::Deleted {
            id: TodoId::Int(1),
            result: Err(server_error()),
        });
        assert!(sync.stalled().is_some());

        let next = sync.complete(Completion::Deleted {
            id: TodoId::Int(2),
            result: Ok(()),
        });
        assert_eq!(next, Some(Request::List));
        sync.complete(Completion::Listed(Ok(vec![item(1, "milk")])));
        assert!(!sync.is_pending());
        assert_eq!(sync.stalled(), None);
        assert!(sync.controls().delete);
    }

    #[test]
    fn bypassing_the_gate_applies_completions_in_arrival_order() {
        let mut sync = loaded(vec![item(1, "milk"), item(2, "bread")]);

        // Two deletes issued back to back, ignoring the disabled controls
        sync.delete(TodoId::Int(1));
        sync.delete(TodoId::Int(2));

        // The second delete answers first
        let a = sync.complete(Completion::Deleted {
            id: TodoId::Int(2),
            result: Ok(()),
        });
        assert_eq!(a, Some(Request::List));
        let b = sync.complete(Completion::Deleted {
            id: TodoId::Int(1),
            result: Ok(()),
        });
        assert_eq!(b, Some(Request::List));

        // The list responses race too: the stale one lands last and wins
        sync.complete(Completion::Listed(Ok(vec![])));
        sync.complete(Completion::Listed(Ok(vec![item(1, "milk")])));
        assert_eq!(sync.items(), &[item(1, "milk")]);
        assert!(!sync.is_pending());
    }

    #[test]
    fn milk_and_bread_walkthrough() {
        let mut sync = loaded(vec![item(1, "milk")]);

        sync.set_draft("bread");
        sync.create().unwrap();
        let next = sync.complete(Completion::Created(Ok(()))).unwrap();
        assert_eq!(next, Request::List);
        sync.complete(Completion::Listed(Ok(vec![item(1, "milk"), item(2, "bread")])));
        assert_eq!(sync.items().len(), 2);

        sync.delete(TodoId::Int(1));
        sync.complete(Completion::Deleted {
            id: TodoId::Int(1),
            result: Ok(()),
        });
        sync.complete(Completion::Listed(Ok(vec![item(2, "bread")])));
        assert_eq!(sync.items(), &[item(2, "bread")]);
    }
}
