//! HTML rendering for the todo list. Every function here is pure and returns a complete
//! fragment; htmx on the client decides where each fragment gets swapped in.

use crate::domain::todo::Todo;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.6";
const TAILWIND_SRC: &str = "https://cdn.tailwindcss.com";
const HYPERSCRIPT_SRC: &str = "https://unpkg.com/hyperscript.org@0.9.7";

/// Wraps [body_markup] in a full HTML document which loads htmx, hyperscript and Tailwind
pub fn render_page(body_markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Todo List</title>
  <script src="{HTMX_SRC}"></script>
  <script src="{TAILWIND_SRC}"></script>
  <script src="{HYPERSCRIPT_SRC}"></script>
</head>
{body_markup}
</html>"#
    )
}

/// Body of the landing page. It starts empty and asks for the todo list as soon as it loads.
pub fn render_index_body() -> String {
    r#"<body class="flex w-full h-screen justify-center items-center" hx-get="/todos" hx-trigger="load" hx-swap="innerHTML"></body>"#
        .to_owned()
}

/// Renders a single todo. The root div is what htmx replaces on toggle and removes on delete.
pub fn render_todo_item(todo: &Todo) -> String {
    let content_class = if todo.completed {
        "text-xl line-through text-gray-400"
    } else {
        "text-xl"
    };
    let checked = if todo.completed { " checked" } else { "" };

    format!(
        r#"<div class="flex flex-row space-x-3">
  <p class="{content_class}">{content}</p>
  <input type="checkbox"{checked} hx-post="/todos/toggle/{id}" hx-target="closest div" hx-swap="outerHTML" />
  <button class="text-purple-700" hx-delete="/todos/{id}" hx-target="closest div" hx-swap="outerHTML">X</button>
</div>"#,
        content = escape_html(&todo.content),
        id = todo.id,
    )
}

pub fn render_todo_list(todos: &[Todo]) -> String {
    let mut list = String::from(
        r#"<div class="bg-slate-50 rounded shadow p-6 m-4 w-full lg:w-3/4 lg:max-w-lg">
<div class="mb-4">
  <h1 class="text-slate-900 text-3xl font-bold">Todo List</h1>
</div>
"#,
    );
    for todo in todos {
        list.push_str(&render_todo_item(todo));
        list.push('\n');
    }
    list.push_str(&render_todo_form());
    list.push_str("\n</div>");

    list
}

/// New todos get inserted right before the form. The hyperscript handler clears the input
/// once the form has been submitted.
pub fn render_todo_form() -> String {
    r#"<form class="h-100 w-full flex items-center justify-center" hx-post="/todos" hx-swap="beforebegin" _="on submit target.reset()">
  <div class="flex mt-4 flex-1">
    <input class="shadow appearance-none border rounded w-full py-2 px-3 mr-4 text-lg" type="text" name="content" placeholder="Add Todo" />
    <button class="flex-no-shrink p-2 border-2 rounded text-lg text-purple-700 border-purple-700 transition-all ease-in-out hover:text-white hover:bg-purple-700" type="submit">Add</button>
  </div>
</form>"#
        .to_owned()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    fn todo(id: i64, content: &str, completed: bool) -> Todo {
        Todo {
            id,
            content: content.to_owned(),
            completed,
        }
    }

    mod render_todo_item {
        use super::*;

        #[test]
        fn incomplete_todo_is_unchecked() {
            let rendered = render_todo_item(&todo(3, "buy milk", false));

            assert_that!(rendered).contains("buy milk");
            assert_that!(rendered).contains(r#"<input type="checkbox" hx-post="/todos/toggle/3""#);
            assert!(!rendered.contains("checked"));
            assert!(!rendered.contains("line-through"));
        }

        #[test]
        fn completed_todo_is_checked_and_struck_through() {
            let rendered = render_todo_item(&todo(3, "buy milk", true));

            assert_that!(rendered).contains(r#"<p class="text-xl line-through text-gray-400">buy milk</p>"#);
            assert_that!(rendered).contains(r#"type="checkbox" checked"#);
        }

        #[test]
        fn controls_target_their_own_todo() {
            let rendered = render_todo_item(&todo(17, "walk the dog", false));

            assert_that!(rendered).contains(r#"hx-delete="/todos/17""#);
            assert_that!(rendered).contains(r#"hx-post="/todos/toggle/17""#);
            assert_that!(rendered).starts_with("<div");
            assert_that!(rendered).ends_with("</div>");
        }

        #[test]
        fn escapes_markup_in_content() {
            let rendered = render_todo_item(&todo(1, r#"<script>alert("hi")</script> & 'more'"#, false));

            assert!(!rendered.contains("<script>"));
            assert_that!(rendered).contains(
                "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt; &amp; &#x27;more&#x27;",
            );
        }
    }

    mod render_todo_list {
        use super::*;

        #[test]
        fn keeps_todo_order_and_ends_with_form() {
            let rendered = render_todo_list(&[
                todo(1, "first", false),
                todo(2, "second", true),
                todo(3, "third", false),
            ]);

            let first = rendered.find("first").expect("first todo missing");
            let second = rendered.find("second").expect("second todo missing");
            let third = rendered.find("third").expect("third todo missing");
            let form = rendered.find("<form").expect("form missing");
            assert!(first < second && second < third && third < form);
        }

        #[test]
        fn empty_list_still_has_form() {
            let rendered = render_todo_list(&[]);

            assert_that!(rendered).contains("Todo List");
            assert_that!(rendered).contains(r#"hx-post="/todos""#);
            assert!(!rendered.contains("hx-delete"));
        }
    }

    #[test]
    fn form_resets_after_submit() {
        let rendered = render_todo_form();

        assert_that!(rendered).contains(r#"name="content""#);
        assert_that!(rendered).contains(r#"hx-swap="beforebegin""#);
        assert_that!(rendered).contains(r#"_="on submit target.reset()""#);
    }

    #[test]
    fn page_wraps_body_with_scripts() {
        let rendered = render_page(&render_index_body());

        assert_that!(rendered).starts_with("<!DOCTYPE html>");
        assert_that!(rendered).contains(r#"name="viewport""#);
        assert_that!(rendered).contains(HTMX_SRC);
        assert_that!(rendered).contains(HYPERSCRIPT_SRC);
        assert_that!(rendered).contains(r#"hx-get="/todos" hx-trigger="load""#);
        assert_that!(rendered).ends_with("</html>");
    }
}
