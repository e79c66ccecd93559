//! 404 page, rendered without the app layout.

use clinica::routes::Page;
use leptos::*;
use leptos_router::*;

/// 404 Not Found page
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col items-center justify-center text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">{Page::NotFound.title()}</h1>
            <p class="text-gray-400 mb-6">"La página que busca no existe."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Volver al inicio"
            </A>
        </div>
    }
}
