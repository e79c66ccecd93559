//! Sign-in and sign-up pages, rendered outside the app layout.

use clinica::auth::{sign_in, LoginRequest};
use clinica::routes::Page;
use leptos::*;
use leptos_router::*;
use serde::Serialize;

use crate::api::use_api;
use crate::state::use_global_state;

/// Sign-in page component
#[component]
pub fn SignIn() -> impl IntoView {
    let api = use_api();
    let state = use_global_state();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let credentials = LoginRequest::new(email.get(), password.get());
        let api = api.clone();
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match sign_in(&*api.client, &*api.tokens, &credentials).await {
                Ok(response) => {
                    state.signed_in.set(true);
                    state.show_success(response.mensaje.as_deref().unwrap_or("Sesión iniciada"));
                    navigate("/", Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Sign-in failed: {}", e).into());
                    state.show_error(&format!("No se pudo iniciar sesión: {}", e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title=Page::SignIn.title()>
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Correo electrónico" kind="email" value=email set_value=set_email />
                <TextField label="Contraseña" kind="password" value=password set_value=set_password />
                <SubmitButton label="Ingresar" busy=submitting />
            </form>
            <p class="text-sm text-gray-400 mt-6">
                "¿No tiene cuenta? "
                <A href="/signup" class="text-primary-400 hover:underline">{Page::SignUp.title()}</A>
            </p>
        </AuthCard>
    }
}

/// Payload for `POST /usuarios/`
#[derive(Debug, Clone, Serialize)]
struct NewUser {
    nombre_usuario: String,
    nombre_completo: String,
    correo_electronico: String,
    #[serde(rename = "contraseña")]
    password: String,
    id_rol: u32,
}

/// Sign-up page component
#[component]
pub fn SignUp() -> impl IntoView {
    let api = use_api();
    let state = use_global_state();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (role_id, set_role_id) = create_signal("1".to_string());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Ok(id_rol) = role_id.get().trim().parse::<u32>() else {
            state.show_error("El rol debe ser un número");
            return;
        };
        let user = NewUser {
            nombre_usuario: username.get(),
            nombre_completo: full_name.get(),
            correo_electronico: email.get(),
            password: password.get(),
            id_rol,
        };

        set_submitting.set(true);
        let api = api.clone();
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.client.post("/usuarios/", &user).await {
                Ok(_) => {
                    state.show_success("Cuenta creada, ya puede iniciar sesión");
                    navigate("/signin", Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Sign-up failed: {}", e).into());
                    state.show_error(&format!("No se pudo crear la cuenta: {}", e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title=Page::SignUp.title()>
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Usuario" kind="text" value=username set_value=set_username />
                <TextField label="Nombre completo" kind="text" value=full_name set_value=set_full_name />
                <TextField label="Correo electrónico" kind="email" value=email set_value=set_email />
                <TextField label="Contraseña" kind="password" value=password set_value=set_password />
                <TextField label="Rol (id)" kind="number" value=role_id set_value=set_role_id />
                <SubmitButton label="Registrarse" busy=submitting />
            </form>
            <p class="text-sm text-gray-400 mt-6">
                "¿Ya tiene cuenta? "
                <A href="/signin" class="text-primary-400 hover:underline">{Page::SignIn.title()}</A>
            </p>
        </AuthCard>
    }
}

#[component]
fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 shadow-lg">
                <h1 class="text-2xl font-bold mb-6">{title}</h1>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-2">{label}</span>
            <input
                type=kind
                required=true
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </label>
    }
}

#[component]
fn SubmitButton(label: &'static str, busy: ReadSignal<bool>) -> impl IntoView {
    view! {
        <button
            type="submit"
            disabled=move || busy.get()
            class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                   rounded-lg font-medium transition-colors"
        >
            {move || if busy.get() { "Enviando..." } else { label }}
        </button>
    }
}
