//! Template pages without backend data yet.

use clinica::routes::Page;
use leptos::*;

#[component]
pub fn Placeholder(page: Page) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{page.title()}</h1>
            <section class="bg-gray-800 rounded-xl p-12 text-center text-gray-400">
                "Esta sección todavía no tiene contenido."
            </section>
        </div>
    }
}
