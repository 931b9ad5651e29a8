use maud::{html, Markup, DOCTYPE};

use crate::{models::Todo, store::TodoStore};

// === Page ===
pub fn page(store: &TodoStore) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Todo List" }
                script src="https://unpkg.com/htmx.org@1.9.10" {}
                script src="https://cdn.tailwindcss.com" {}
            }
            body class="bg-gray-100 font-sans leading-normal tracking-normal" {
                div class="container mx-auto p-8" {
                    (new_todo_form(store.pending_input()))
                    h1 class="text-4xl text-center text-gray-700 my-6" { "Todo List" }
                    div id="todos" {
                        (todo_list(store.todos()))
                    }
                }
            }
        }
    }
}

// === Components ===
// the entry field; its value mirrors the pending input
pub fn new_todo_form(pending: &str) -> Markup {
    todo_form(pending, false)
}

// same form, swapped in out-of-band so the field clears after a submit
pub fn new_todo_form_oob(pending: &str) -> Markup {
    todo_form(pending, true)
}

fn todo_form(pending: &str, oob: bool) -> Markup {
    html! {
        form id="new-item-form" class="flex justify-between items-center" hx-put="/create_todo" hx-target="#todos" hx-swap="innerHTML"
            hx-swap-oob=[oob.then_some("true")] {
            label class="mr-4 text-gray-700" for="item" { "New Item" }
            input id="item" class="w-full rounded p-2 mr-4" type="text" name="title" value=(pending)
                hx-post="/pending_input" hx-trigger="input changed delay:200ms" hx-swap="none";
            button class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded" type="submit" { "Add" }
        }
    }
}

pub fn todo_list(todos: &[Todo]) -> Markup {
    html! {
        ul class="list-none p-0" {
            @if todos.is_empty() {
                "No Todos"
            }
            @for todo in todos {
                (todo_item(todo))
            }
        }
    }
}

// a single line item in the todo list
pub fn todo_item(todo: &Todo) -> Markup {
    let toggle = serde_json::json!({ "id": todo.id, "completed": !todo.completed });
    let delete = format!("/remove_todo?id={}", todo.id);
    html! {
        li class="flex items-center bg-white rounded-lg shadow-lg my-2 py-2 px-4" {
            label class="flex-grow" {
                input type="checkbox" class="mr-2" checked[todo.completed]
                    hx-post="/toggle_todo" hx-target="#todos" hx-swap="innerHTML" hx-vals=(toggle.to_string());
                span class=[todo.completed.then_some("line-through")] { (todo.title) }
            }
            button class="bg-red-500 hover:bg-red-700 text-white font-bold py-1 px-2 rounded"
                hx-delete=(delete) hx-target="#todos" hx-swap="innerHTML" { "Delete" }
        }
    }
}
