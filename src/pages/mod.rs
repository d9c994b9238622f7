//! Server-rendered auth pages.
//!
//! ARCHITECTURE
//! ============
//! Each page is a Leptos component wrapped in `PageShell` + `AuthLayout` and
//! rendered to a string on the server. Forms post back with plain HTML, so
//! no client bundle is involved.

pub mod layout;
pub mod onboarding;
pub mod signup;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use layout::{AuthLayout, PageShell};
use onboarding::OnboardingPage;
use signup::SignupPage;

/// Full HTML for the signup page, optionally showing a provider error.
#[must_use]
pub fn render_signup(error: Option<String>, email: Option<String>) -> String {
    view! {
        <PageShell title="Sign up">
            <AuthLayout>
                <SignupPage error=error email=email/>
            </AuthLayout>
        </PageShell>
    }
    .to_html()
}

/// Full HTML for the onboarding landing page.
#[must_use]
pub fn render_onboarding() -> String {
    view! {
        <PageShell title="Welcome">
            <AuthLayout>
                <OnboardingPage/>
            </AuthLayout>
        </PageShell>
    }
    .to_html()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
