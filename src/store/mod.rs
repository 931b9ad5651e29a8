use tracing::debug;

use crate::models::Todo;

type Subscriber = Box<dyn Fn(&TodoStore) + Send + Sync>;

/// The todo list and the text waiting in the entry field.
///
/// Every operation is total: unknown ids leave the list untouched instead of
/// failing. After each operation all subscribers are called with the updated
/// store so the view can be derived again.
#[derive(Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
    pending_input: String,
    subscribers: Vec<Subscriber>,
}
impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Reads
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }
    pub fn len(&self) -> usize {
        self.todos.len()
    }
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    // Mutations

    /// Appends a todo titled `current_text` and clears the pending input.
    ///
    /// Empty titles are accepted as-is.
    pub fn submit(&mut self, current_text: impl Into<String>) -> Todo {
        let todo = Todo::new(current_text);
        debug!(id = %todo.id, "submit todo");
        self.todos.push(todo.clone());
        self.pending_input.clear();
        self.notify();
        todo
    }

    /// Submits whatever is currently in the pending input.
    pub fn submit_pending(&mut self) -> Todo {
        let text = std::mem::take(&mut self.pending_input);
        self.submit(text)
    }

    /// Sets `completed` on the todo with `id`, returning the updated record.
    pub fn toggle(&mut self, id: &str, completed: bool) -> Option<Todo> {
        let updated = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .map(|todo| {
                todo.completed = completed;
                todo.clone()
            });
        debug!(id, completed, found = updated.is_some(), "toggle todo");
        self.notify();
        updated
    }

    /// Removes the todo with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Todo> {
        let removed = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .map(|index| self.todos.remove(index));
        debug!(id, found = removed.is_some(), "remove todo");
        self.notify();
        removed
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
        self.notify();
    }

    // Observers

    /// Registers a callback run after every operation, in registration order.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&TodoStore) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(self);
        }
    }
}

// Required Debug implementation for `TodoStore`
impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("todos", &self.todos)
            .field("pending_input", &self.pending_input)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
