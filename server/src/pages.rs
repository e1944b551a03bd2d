//! Server-rendered pages: home, profile, config and important items.
//!
//! Markup is built with `format!`; every interpolated value goes through
//! [`escape`].

use axum::{extract::State, response::Html, routing::get, Router};

use crate::store::Todo;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/profile", get(profile))
        .route("/config", get(config))
        .route("/important", get(important))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn todo_line(todo: &Todo) -> String {
    format!(
        "<li>{}, {}, {}</li>",
        todo.id,
        escape(&todo.title),
        todo.completed
    )
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let body = format!(
        "<h1>ようこそ {} さん</h1>\n<ul><li><a href=\"/profile\">profile</a></li><li><a href=\"/config\">config</a></li><li><a href=\"/important\">important</a></li></ul>",
        escape(&state.site.user.name)
    );
    layout("Home", &body)
}

async fn profile(State(state): State<AppState>) -> Html<String> {
    let user = &state.site.user;
    let body = format!(
        "<h1>Profile</h1>\n<dl><dt>id</dt><dd>{}</dd><dt>name</dt><dd>{}</dd><dt>birthday</dt><dd>{}</dd><dt>hobby</dt><dd>{}</dd></dl>",
        escape(&user.id),
        escape(&user.name),
        escape(&user.birthday),
        escape(&user.hobby)
    );
    layout("Profile", &body)
}

async fn config(State(state): State<AppState>) -> Html<String> {
    let display = &state.site.display;
    let body = format!(
        "<h1>{} の設定</h1>\n<dl><dt>sortBy</dt><dd>{}</dd><dt>sortOrder</dt><dd>{}</dd><dt>lang</dt><dd>{}</dd></dl>",
        escape(&state.site.user.name),
        escape(&display.sort_by),
        escape(&display.sort_order),
        escape(&display.lang)
    );
    layout("Config", &body)
}

async fn important(State(state): State<AppState>) -> Html<String> {
    let items = state.db.read().await.important();
    let lines: Vec<String> = items.iter().map(todo_line).collect();
    let body = format!(
        "<h1>{} の重要な ToDo</h1>\n<ul>\n{}\n</ul>",
        escape(&state.site.user.name),
        lines.join("\n")
    );
    layout("Important", &body)
}
