//! Signup form page.

use leptos::prelude::*;

/// Route the form is served from and posts back to.
pub const SIGNUP_PATH: &str = "/signup";

/// Email + password form. `error` is the provider's message from a failed
/// submission; `email` refills the field so only the password is retyped.
#[component]
pub fn SignupPage(error: Option<String>, email: Option<String>) -> impl IntoView {
    view! {
        <div class="auth-card">
            <h1>"Create an account"</h1>
            <p class="auth-card__subtitle">"Enter your email and choose a password."</p>
            {error.map(|message| view! { <p class="auth-error" role="alert">{message}</p> })}
            <form class="auth-form" method="post" action=SIGNUP_PATH>
                <label for="email">"Email"</label>
                <input
                    class="auth-input"
                    id="email"
                    name="email"
                    type="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    required=true
                    value=email.unwrap_or_default()
                />
                <label for="password">"Password"</label>
                <input
                    class="auth-input"
                    id="password"
                    name="password"
                    type="password"
                    autocomplete="new-password"
                    required=true
                />
                <button class="auth-button" type="submit">"Sign up"</button>
            </form>
        </div>
    }
}
