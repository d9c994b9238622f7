//! Post-signup landing page.

use leptos::prelude::*;

#[component]
pub fn OnboardingPage() -> impl IntoView {
    view! {
        <div class="auth-card">
            <h1>"Welcome aboard"</h1>
            <p class="auth-card__subtitle">
                "Check your inbox for a confirmation link to activate your account."
            </p>
        </div>
    }
}
