//! Login Form Component
//!
//! Sign-in / registration form shown while no session is active.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::models::Credentials;

const GENERIC_ERROR: &str = "An error occurred";

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (is_register, set_is_register) = signal(false);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let api = ctx.api();
        let session = ctx.session();
        let register = is_register.get();
        let user = username.get();
        let pass = password.get();

        spawn_local(async move {
            let credentials = Credentials {
                username: &user,
                password: &pass,
            };
            let result = if register {
                api.register(&credentials).await
            } else {
                api.login(&credentials).await
            };
            match result {
                Ok(identity) => session.establish(identity),
                Err(err) => {
                    let message = err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| GENERIC_ERROR.to_string());
                    set_error.set(Some(message));
                }
            }
        });
    };

    view! {
        <div class="login-screen">
            <div class="login-card">
                <h1 class="login-brand">"Sticky Notes"</h1>
                <h2>{move || if is_register.get() { "Create Account" } else { "Sign In" }}</h2>

                {move || error.get().map(|message| view! {
                    <div class="login-error" role="alert">{message}</div>
                })}

                <form on:submit=submit>
                    <input
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(input_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        autocomplete=move || {
                            if is_register.get() { "new-password" } else { "current-password" }
                        }
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(input_value(&ev))
                    />
                    <button type="submit" class="login-submit">
                        {move || if is_register.get() { "Register" } else { "Sign In" }}
                    </button>
                </form>

                <button
                    type="button"
                    class="login-toggle"
                    on:click=move |_| set_is_register.update(|v| *v = !*v)
                >
                    {move || {
                        if is_register.get() {
                            "Already have an account? Sign in"
                        } else {
                            "Don't have an account? Sign up"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
