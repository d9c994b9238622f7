//! Shared shell and centering layout for the auth pages.

use leptos::prelude::*;

/// Route the stylesheet is served from.
pub const AUTH_STYLESHEET_PATH: &str = "/assets/auth.css";

/// Stylesheet for every auth page, compiled into the binary.
pub const AUTH_STYLESHEET: &str = include_str!("../../assets/auth.css");

/// HTML document shell rendered around a page body.
#[component]
pub fn PageShell(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <link rel="stylesheet" href=AUTH_STYLESHEET_PATH/>
            </head>
            <body>{children()}</body>
        </html>
    }
}

/// Centers its children on both axes in a viewport-height container and
/// bounds them to a narrow column. Children render untouched.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-layout__content">{children()}</div>
        </div>
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
