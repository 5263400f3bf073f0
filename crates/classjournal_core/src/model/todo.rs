//! Todo item model and the global ordered todo list.
//!
//! # Responsibility
//! - Define the todo item record and its stable identifier.
//! - Own the ordering rules for date-scoped views over one global list.
//!
//! # Invariants
//! - `TodoId` is never blank and is never reused for another item.
//! - `TodoList` order is the single source of truth for per-date order:
//!   every date view is a sub-sequence of the global order.
//! - Moving within a view swaps absolute positions in the global order;
//!   items of other dates keep their positions.

use crate::model::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable todo identifier.
///
/// Generated ids are UUID v4 strings. Ids that already exist in journal data
/// (for example timestamp strings) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoId(String);

impl TodoId {
    /// Draws a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, rejecting blank values.
    pub fn parse(value: impl Into<String>) -> Result<Self, ModelValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelValidationError::BlankTodoId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TodoId {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TodoId> for String {
    fn from(value: TodoId) -> Self {
        value.0
    }
}

/// One todo entry scheduled for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub content: String,
    pub completed: bool,
    pub due_date: NaiveDate,
}

impl TodoItem {
    /// Creates an open todo item.
    pub fn new(id: TodoId, content: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            content: content.into(),
            completed: false,
            due_date,
        }
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == date
    }
}

/// Direction of a move inside a date view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Global ordered todo list spanning all dates.
///
/// Items are indexed by id; order lives in a separate id vector so swaps
/// never move item payloads around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    order: Vec<TodoId>,
    items: HashMap<TodoId, TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from items in global order.
    ///
    /// # Errors
    /// - Returns `DuplicateTodoId` when two items share an id.
    pub fn from_items(
        items: impl IntoIterator<Item = TodoItem>,
    ) -> Result<Self, ModelValidationError> {
        let mut list = Self::new();
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.get(id)
    }

    /// Iterates all items in global order.
    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Iterates the items due on `date`, preserving global order.
    pub fn view(&self, date: NaiveDate) -> impl Iterator<Item = &TodoItem> + '_ {
        self.iter().filter(move |item| item.is_due_on(date))
    }

    /// Returns an id not used by any current item.
    pub fn next_id(&self) -> TodoId {
        loop {
            let candidate = TodoId::generate();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Appends an item at the tail of the global order.
    ///
    /// # Errors
    /// - Returns `DuplicateTodoId` when the id is already present.
    pub fn push(&mut self, item: TodoItem) -> Result<(), ModelValidationError> {
        if self.contains(&item.id) {
            return Err(ModelValidationError::DuplicateTodoId(item.id.to_string()));
        }
        self.order.push(item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Removes one item, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &TodoId) -> Option<TodoItem> {
        let removed = self.items.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Flips `completed`; returns `false` when the id is absent.
    pub fn toggle(&mut self, id: &TodoId) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Finds the neighbor of `id` inside the view for `date`.
    ///
    /// Returns `None` when `id` is not in that view or has no neighbor in
    /// the requested direction.
    pub fn view_neighbor(
        &self,
        date: NaiveDate,
        id: &TodoId,
        direction: MoveDirection,
    ) -> Option<TodoId> {
        let view: Vec<&TodoId> = self.view(date).map(|item| &item.id).collect();
        let index = view.iter().position(|candidate| *candidate == id)?;
        let neighbor = match direction {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => index + 1,
        };
        view.get(neighbor).map(|neighbor| (*neighbor).clone())
    }

    /// Swaps the global positions of two items.
    ///
    /// Returns `false` without changes when either id is absent.
    pub fn swap(&mut self, a: &TodoId, b: &TodoId) -> bool {
        let index_a = self.order.iter().position(|id| id == a);
        let index_b = self.order.iter().position(|id| id == b);
        match (index_a, index_b) {
            (Some(index_a), Some(index_b)) => {
                self.order.swap(index_a, index_b);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` one step within the view for `date`.
    ///
    /// Returns `false` for edge items and ids outside the view.
    pub fn move_within_view(
        &mut self,
        date: NaiveDate,
        id: &TodoId,
        direction: MoveDirection,
    ) -> bool {
        match self.view_neighbor(date, id, direction) {
            Some(neighbor) => self.swap(id, &neighbor),
            None => false,
        }
    }

    /// Consumes the list into items in global order.
    pub fn into_items(self) -> Vec<TodoItem> {
        let Self { order, mut items } = self;
        order
            .into_iter()
            .filter_map(|id| items.remove(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveDirection, TodoId, TodoItem, TodoList};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn item(id: &str, date: NaiveDate) -> TodoItem {
        TodoItem::new(TodoId::parse(id).unwrap(), format!("task {id}"), date)
    }

    fn ids(list: &TodoList) -> Vec<&str> {
        list.iter().map(|item| item.id.as_str()).collect()
    }

    fn interleaved() -> TodoList {
        TodoList::from_items([
            item("a", day(1)),
            item("x", day(2)),
            item("b", day(1)),
            item("y", day(2)),
            item("c", day(1)),
        ])
        .unwrap()
    }

    #[test]
    fn todo_id_rejects_blank_values() {
        assert!(TodoId::parse("   ").is_err());
        assert_eq!(TodoId::parse(" 1709251200000 ").unwrap().as_str(), "1709251200000");
    }

    #[test]
    fn from_items_rejects_duplicate_ids() {
        let err = TodoList::from_items([item("a", day(1)), item("a", day(2))]).unwrap_err();
        assert!(err.to_string().contains("duplicate todo id"));
    }

    #[test]
    fn view_preserves_global_order() {
        let list = interleaved();
        let view: Vec<_> = list.view(day(1)).map(|item| item.id.as_str()).collect();
        assert_eq!(view, vec!["a", "b", "c"]);
    }

    #[test]
    fn move_up_swaps_non_adjacent_global_positions() {
        let mut list = interleaved();
        let b = TodoId::parse("b").unwrap();

        assert!(list.move_within_view(day(1), &b, MoveDirection::Up));
        assert_eq!(ids(&list), vec!["b", "x", "a", "y", "c"]);
    }

    #[test]
    fn edge_moves_are_rejected() {
        let mut list = interleaved();
        let a = TodoId::parse("a").unwrap();
        let c = TodoId::parse("c").unwrap();

        assert!(!list.move_within_view(day(1), &a, MoveDirection::Up));
        assert!(!list.move_within_view(day(1), &c, MoveDirection::Down));
        assert_eq!(list, interleaved());
    }

    #[test]
    fn move_outside_selected_view_is_rejected() {
        let mut list = interleaved();
        let y = TodoId::parse("y").unwrap();

        assert!(!list.move_within_view(day(1), &y, MoveDirection::Up));
        assert_eq!(list, interleaved());
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut list = interleaved();
        let removed = list.remove(&TodoId::parse("x").unwrap()).unwrap();
        assert_eq!(removed.id.as_str(), "x");
        assert_eq!(ids(&list), vec!["a", "b", "y", "c"]);
        assert!(list.remove(&TodoId::parse("x").unwrap()).is_none());
    }

    #[test]
    fn next_id_is_unique_among_current_ids() {
        let mut list = TodoList::new();
        for _ in 0..200 {
            let id = list.next_id();
            list.push(TodoItem::new(id, "n", day(1))).unwrap();
        }
        assert_eq!(list.len(), 200);
    }

    #[test]
    fn into_items_returns_global_order() {
        let items = interleaved().into_items();
        let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "x", "b", "y", "c"]);
    }
}
