//! Navigation Components
//!
//! Sidebar and header shared by every page inside the app layout.

use clinica::routes::{app_routes, Page};
use leptos::*;
use leptos_router::*;

use crate::api::use_api;
use crate::state::use_global_state;

/// Sidebar sections, in display order
const SECTIONS: &[(&str, &[Page])] = &[
    ("Menú", &[Page::Home, Page::Calendar, Page::Profile]),
    (
        "Registros clínicos",
        &[
            Page::Pacientes,
            Page::Admisiones,
            Page::Archivos,
            Page::OcrCrudo,
            Page::Observaciones,
            Page::TiposObservacion,
            Page::RevisionObservaciones,
        ],
    ),
    ("Usuarios", &[Page::Usuarios, Page::Roles]),
    ("Análisis", &[Page::Prediccion, Page::Reportes, Page::LineChart, Page::BarChart]),
    (
        "Interfaz",
        &[
            Page::FormElements,
            Page::BasicTables,
            Page::Alerts,
            Page::Avatars,
            Page::Badges,
            Page::Buttons,
            Page::Images,
            Page::Videos,
            Page::Blank,
        ],
    ),
];

/// Sidebar navigation component
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_global_state();

    let links = |pages: &'static [Page]| {
        pages
            .iter()
            .flat_map(|page| {
                // A page may be declared more than once (one entry per user role)
                app_routes()
                    .authenticated()
                    .filter(move |d| d.page == *page)
                    .map(|d| {
                        let label = match d.props.get("rol") {
                            Some(rol) => format!("{} ({})", d.page.title(), rol),
                            None => d.page.title().to_string(),
                        };
                        view! { <NavLink href=d.path().to_string() label=label /> }
                    })
            })
            .collect_view()
    };

    view! {
        <aside class=move || {
            if state.sidebar_collapsed.get() {
                "hidden"
            } else {
                "w-64 shrink-0 bg-gray-800 border-r border-gray-700 min-h-screen"
            }
        }>
            <A href="/" class="flex items-center space-x-3 px-6 h-16 border-b border-gray-700">
                <span class="text-2xl">"🩺"</span>
                <span class="text-xl font-bold text-white">"Clínica"</span>
            </A>

            <nav class="px-3 py-4 space-y-6">
                {SECTIONS
                    .iter()
                    .map(|(title, pages)| view! {
                        <div>
                            <h3 class="px-3 mb-2 text-xs uppercase text-gray-500">{*title}</h3>
                            <div class="flex flex-col space-y-1">{links(*pages)}</div>
                        </div>
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

/// Header bar with sidebar toggle and sign-out
#[component]
pub fn Header() -> impl IntoView {
    let state = use_global_state();
    let api = use_api();
    let navigate = use_navigate();

    let signed_in = state.signed_in;
    let state_for_toggle = state.clone();
    let sign_out = move |_: ev::MouseEvent| {
        match clinica::auth::sign_out(&*api.tokens) {
            Ok(()) => {
                state.signed_in.set(false);
                navigate("/signin", Default::default());
            }
            Err(e) => state.show_error(&format!("No se pudo cerrar sesión: {}", e)),
        }
    };

    view! {
        <header class="h-16 bg-gray-800 border-b border-gray-700 flex items-center justify-between px-6">
            <button
                on:click=move |_| state_for_toggle.toggle_sidebar()
                class="px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
            >
                "☰"
            </button>
            {move || if signed_in.get() {
                let sign_out = sign_out.clone();
                view! {
                    <button
                        on:click=sign_out
                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                    >
                        "Cerrar sesión"
                    </button>
                }.into_view()
            } else {
                view! {
                    <A
                        href="/signin"
                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                    >
                        {Page::SignIn.title()}
                    </A>
                }.into_view()
            }}
        </header>
    }
}

/// Individual navigation link
#[component]
fn NavLink(#[prop(into)] href: String, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
