//! Home Page
//!
//! Landing page with backend status and shortcuts into the clinical records.

use clinica::routes::Page;
use leptos::*;
use leptos_router::*;

use crate::api::{get_api_base, set_api_base, use_api};
use crate::app::use_page_lifetime;
use crate::components::Loading;
use crate::state::use_global_state;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    let api = use_api();
    let lifetime = use_page_lifetime();

    let (status, set_status) = create_signal(None::<Result<String, String>>);

    let client = api.client.clone();
    spawn_local(async move {
        if let Some(result) = lifetime.scope(client.ping()).await {
            set_status.set(Some(result.map_err(|e| e.to_string())));
        }
    });

    let shortcuts = [
        Page::Pacientes,
        Page::Admisiones,
        Page::Observaciones,
        Page::RevisionObservaciones,
        Page::Reportes,
        Page::Prediccion,
    ];

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">{Page::Home.title()}</h1>
                <p class="text-gray-400 mt-1">"Panel de administración de registros clínicos"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Estado del backend"</h2>
                {move || match status.get() {
                    None => view! { <Loading /> }.into_view(),
                    Some(Ok(message)) => view! {
                        <span class="text-green-400">{format!("✓ {}", message)}</span>
                    }.into_view(),
                    Some(Err(e)) => view! {
                        <span class="text-red-400">{format!("✕ {}", e)}</span>
                    }.into_view(),
                }}
                <ApiUrlSetting />
            </section>

            <section class="grid grid-cols-2 md:grid-cols-3 gap-4">
                {shortcuts
                    .into_iter()
                    .filter_map(|page| {
                        clinica::routes::app_routes().find(page).map(|route| view! {
                            <A
                                href=route.path().to_string()
                                class="bg-gray-800 hover:bg-gray-700 rounded-xl p-6 transition-colors"
                            >
                                <span class="text-lg font-medium">{page.title()}</span>
                            </A>
                        })
                    })
                    .collect_view()}
            </section>
        </div>
    }
}

/// Backend URL override, applied on next load
#[component]
fn ApiUrlSetting() -> impl IntoView {
    let state = use_global_state();
    let (api_url, set_api_url) = create_signal(get_api_base());

    let save_url = move |_| {
        set_api_base(&api_url.get());
        state.show_success("URL del backend guardada; recargue la página para aplicarla");
    };

    view! {
        <div class="mt-4 flex space-x-2">
            <input
                type="text"
                prop:value=move || api_url.get()
                on:input=move |ev| set_api_url.set(event_target_value(&ev))
                class="flex-1 bg-gray-700 rounded-lg px-4 py-2
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
            <button
                on:click=save_url
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Guardar"
            </button>
        </div>
    }
}
