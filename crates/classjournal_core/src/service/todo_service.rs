//! Todo use-case service.
//!
//! # Responsibility
//! - Provide add/toggle/delete/move operations scoped to a selected date.
//! - Project date views from the store's current global list.
//!
//! # Invariants
//! - Every mutator reads the store's current list at call time; the service
//!   keeps no copy between calls.
//! - Every applied mutation is written back with exactly one
//!   `JournalStore::update_todos` call. No-ops never write.
//! - Missing ids are absence, not errors.

use crate::model::todo::{MoveDirection, TodoId, TodoItem, TodoList};
use crate::model::ModelValidationError;
use crate::store::{JournalStore, StoreError};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Errors from todo service operations.
#[derive(Debug)]
pub enum TodoServiceError {
    /// The store holds a list that violates todo invariants.
    InvalidList(ModelValidationError),
    /// The store rejected the replacement list.
    Store(StoreError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidList(err) => write!(f, "stored todo list is invalid: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidList(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ModelValidationError> for TodoServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidList(value)
    }
}

impl From<StoreError> for TodoServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a todo mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoChange {
    /// The list changed and was written back.
    Applied,
    /// Nothing to do; the store was not touched.
    Unchanged,
}

impl TodoChange {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Todo service facade over a journal store.
pub struct TodoService<S: JournalStore> {
    store: S,
}

impl<S: JournalStore> TodoService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Items due on `date`, in global order.
    ///
    /// Recomputed from the store on every call.
    pub fn view(&self, date: NaiveDate) -> impl Iterator<Item = &TodoItem> + '_ {
        self.store
            .todos()
            .iter()
            .filter(move |item| item.is_due_on(date))
    }

    /// Appends a new open item due on `selected_date`.
    ///
    /// Returns `None` without touching the store when `content` is blank.
    /// Content is stored as given.
    pub fn add(
        &mut self,
        selected_date: NaiveDate,
        content: impl Into<String>,
    ) -> TodoServiceResult<Option<TodoId>> {
        let content = content.into();
        if content.trim().is_empty() {
            debug!("event=todo_add module=todo status=skip reason=blank_content");
            return Ok(None);
        }

        let mut list = self.current_list()?;
        let id = list.next_id();
        list.push(TodoItem::new(id.clone(), content, selected_date))?;
        self.commit(list, "todo_add")?;
        Ok(Some(id))
    }

    /// Flips completion of one item.
    pub fn toggle(&mut self, id: &TodoId) -> TodoServiceResult<TodoChange> {
        let mut list = self.current_list()?;
        if !list.toggle(id) {
            debug!("event=todo_toggle module=todo status=skip reason=not_found");
            return Ok(TodoChange::Unchanged);
        }
        self.commit(list, "todo_toggle")?;
        Ok(TodoChange::Applied)
    }

    /// Removes one item, keeping the relative order of the rest.
    pub fn delete(&mut self, id: &TodoId) -> TodoServiceResult<TodoChange> {
        let mut list = self.current_list()?;
        if list.remove(id).is_none() {
            debug!("event=todo_delete module=todo status=skip reason=not_found");
            return Ok(TodoChange::Unchanged);
        }
        self.commit(list, "todo_delete")?;
        Ok(TodoChange::Applied)
    }

    /// Swaps an item with its predecessor in the `selected_date` view.
    pub fn move_up(
        &mut self,
        selected_date: NaiveDate,
        id: &TodoId,
    ) -> TodoServiceResult<TodoChange> {
        self.move_in_view(selected_date, id, MoveDirection::Up)
    }

    /// Swaps an item with its successor in the `selected_date` view.
    pub fn move_down(
        &mut self,
        selected_date: NaiveDate,
        id: &TodoId,
    ) -> TodoServiceResult<TodoChange> {
        self.move_in_view(selected_date, id, MoveDirection::Down)
    }

    fn move_in_view(
        &mut self,
        selected_date: NaiveDate,
        id: &TodoId,
        direction: MoveDirection,
    ) -> TodoServiceResult<TodoChange> {
        let event = match direction {
            MoveDirection::Up => "todo_move_up",
            MoveDirection::Down => "todo_move_down",
        };

        let mut list = self.current_list()?;
        if !list.move_within_view(selected_date, id, direction) {
            debug!("event={event} module=todo status=skip reason=edge_or_missing");
            return Ok(TodoChange::Unchanged);
        }
        self.commit(list, event)?;
        Ok(TodoChange::Applied)
    }

    fn current_list(&self) -> TodoServiceResult<TodoList> {
        Ok(TodoList::from_items(self.store.todos().iter().cloned())?)
    }

    fn commit(&mut self, list: TodoList, event: &'static str) -> TodoServiceResult<()> {
        let total = list.len();
        self.store.update_todos(list.into_items())?;
        info!("event={event} module=todo status=ok total={total}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TodoChange, TodoService};
    use crate::model::todo::TodoId;
    use crate::store::{JournalStore, MemoryJournalStore};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn blank_add_does_not_write() {
        let mut store = MemoryJournalStore::empty(day(1));
        let mut service = TodoService::new(&mut store);

        assert_eq!(service.add(day(1), "   ").unwrap(), None);
        assert_eq!(store.todo_writes(), 0);
    }

    #[test]
    fn toggle_missing_id_is_silent() {
        let mut store = MemoryJournalStore::empty(day(1));
        let mut service = TodoService::new(&mut store);
        let missing = TodoId::parse("missing").unwrap();

        assert_eq!(service.toggle(&missing).unwrap(), TodoChange::Unchanged);
        assert_eq!(service.delete(&missing).unwrap(), TodoChange::Unchanged);
        assert_eq!(store.todo_writes(), 0);
    }

    #[test]
    fn each_mutation_reads_latest_store_state() {
        let mut store = MemoryJournalStore::empty(day(1));
        {
            let mut service = TodoService::new(&mut store);
            service.add(day(1), "first").unwrap();
            service.add(day(1), "second").unwrap();
        }
        assert_eq!(store.todos().len(), 2);
        assert_eq!(store.todo_writes(), 2);
    }
}
