use crate::model::todo::TodoId;

/// One network call against the todo collection.
///
/// Produced by the synchronizer, executed by the HTTP layer. Carrying the
/// request as a value keeps the state transitions free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `GET /todos`
    List,
    /// `POST /todos`
    Create { text: String },
    /// `PUT /todos/{id}`
    Update { id: TodoId, text: String },
    /// `DELETE /todos/{id}`
    Delete { id: TodoId },
}

impl Request {
    pub fn method(&self) -> &'static str {
        match self {
            Request::List => "GET",
            Request::Create { .. } => "POST",
            Request::Update { .. } => "PUT",
            Request::Delete { .. } => "DELETE",
        }
    }

    /// The item id for item-scoped requests
    pub fn item_id(&self) -> Option<&TodoId> {
        match self {
            Request::List | Request::Create { .. } => None,
            Request::Update { id, .. } | Request::Delete { id } => Some(id),
        }
    }
}
