use std::collections::BTreeMap;
use std::sync::Mutex;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answers::AnswerMap;
use crate::spec::form::Form;

/// Column descriptor of an external board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Board descriptor of the external work-item system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// One column's display value on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnValue {
    pub id: String,
    pub text: String,
}

/// A record in the external work-item system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("board '{0}' not found")]
    BoardNotFound(String),
    #[error("item '{0}' not found")]
    ItemNotFound(String),
    #[error("work-item backend unavailable: {0}")]
    Backend(String),
}

/// Opaque client for the external work-item system.
///
/// The engine only reads items to seed prefill and writes column values
/// back after a submission; protocol details stay behind this trait.
pub trait WorkItemClient {
    fn boards(&self) -> Result<Vec<Board>, ItemError>;
    fn columns(&self, board_id: &str) -> Result<Vec<Column>, ItemError>;
    fn items(&self, board_id: &str) -> Result<Vec<WorkItem>, ItemError>;
    /// Creates an item and returns its id.
    fn create_item(
        &self,
        board_id: &str,
        name: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<String, ItemError>;
    fn update_item(
        &self,
        board_id: &str,
        item_id: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<(), ItemError>;
}

/// Seeds an answer map from an existing item's column values.
///
/// Only fields with a column link pick up values; columns the form does not
/// reference are ignored.
pub fn prefill_from_item(form: &Form, item: &WorkItem) -> AnswerMap {
    let mut answers = AnswerMap::new();
    for field in &form.fields {
        let Some(link) = &field.column else {
            continue;
        };
        if let Some(value) = item
            .column_values
            .iter()
            .find(|value| value.id == link.column_id)
        {
            answers.set(field.id.clone(), value.text.clone());
        }
    }
    answers
}

/// Maps a submission payload onto the linked column ids for write-back.
pub fn column_values(form: &Form, answers: &AnswerMap) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for field in &form.fields {
        let Some(link) = &field.column else {
            continue;
        };
        if answers.contains(&field.id) {
            values.insert(
                link.column_id.clone(),
                answers.value_of(&field.id).to_string(),
            );
        }
    }
    values
}

struct BoardState {
    board: Board,
    items: Vec<WorkItem>,
}

/// In-memory work-item backend for tests and demos.
pub struct MemoryBoard {
    inner: Mutex<Vec<BoardState>>,
    next_item: Mutex<u64>,
    /// When set, every write fails with this reason.
    offline: Option<String>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
            next_item: Mutex::new(0),
            offline: None,
        }
    }

    /// Backend whose writes always fail, for exercising the reconciliation
    /// path.
    pub fn offline(reason: impl Into<String>) -> Self {
        Self {
            offline: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn with_board(self, board: Board) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.push(BoardState {
                board,
                items: Vec::new(),
            });
        }
        self
    }

    pub fn push_item(&self, board_id: &str, item: WorkItem) -> Result<(), ItemError> {
        let mut inner = self.lock()?;
        let state = find_board(&mut inner, board_id)?;
        state.items.push(item);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<BoardState>>, ItemError> {
        self.inner
            .lock()
            .map_err(|_| ItemError::Backend("lock poisoned".to_string()))
    }

    fn check_online(&self) -> Result<(), ItemError> {
        match &self.offline {
            Some(reason) => Err(ItemError::Backend(reason.clone())),
            None => Ok(()),
        }
    }

    fn mint_item(&self) -> String {
        match self.next_item.lock() {
            Ok(mut next) => {
                *next += 1;
                format!("item-{}", next)
            }
            Err(_) => "item-0".to_string(),
        }
    }
}

impl Default for MemoryBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn find_board<'a>(
    states: &'a mut Vec<BoardState>,
    board_id: &str,
) -> Result<&'a mut BoardState, ItemError> {
    states
        .iter_mut()
        .find(|state| state.board.id == board_id)
        .ok_or_else(|| ItemError::BoardNotFound(board_id.to_string()))
}

impl WorkItemClient for MemoryBoard {
    fn boards(&self) -> Result<Vec<Board>, ItemError> {
        let inner = self.lock()?;
        Ok(inner.iter().map(|state| state.board.clone()).collect())
    }

    fn columns(&self, board_id: &str) -> Result<Vec<Column>, ItemError> {
        let mut inner = self.lock()?;
        Ok(find_board(&mut inner, board_id)?.board.columns.clone())
    }

    fn items(&self, board_id: &str) -> Result<Vec<WorkItem>, ItemError> {
        let mut inner = self.lock()?;
        Ok(find_board(&mut inner, board_id)?.items.clone())
    }

    fn create_item(
        &self,
        board_id: &str,
        name: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<String, ItemError> {
        self.check_online()?;
        let item_id = self.mint_item();
        let mut inner = self.lock()?;
        let state = find_board(&mut inner, board_id)?;
        state.items.push(WorkItem {
            id: item_id.clone(),
            name: name.to_string(),
            column_values: values
                .iter()
                .map(|(id, text)| ColumnValue {
                    id: id.clone(),
                    text: text.clone(),
                })
                .collect(),
        });
        Ok(item_id)
    }

    fn update_item(
        &self,
        board_id: &str,
        item_id: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<(), ItemError> {
        self.check_online()?;
        let mut inner = self.lock()?;
        let state = find_board(&mut inner, board_id)?;
        let Some(item) = state.items.iter_mut().find(|item| item.id == item_id) else {
            return Err(ItemError::ItemNotFound(item_id.to_string()));
        };
        for (id, text) in values {
            match item.column_values.iter_mut().find(|value| &value.id == id) {
                Some(value) => value.text = text.clone(),
                None => item.column_values.push(ColumnValue {
                    id: id.clone(),
                    text: text.clone(),
                }),
            }
        }
        Ok(())
    }
}
