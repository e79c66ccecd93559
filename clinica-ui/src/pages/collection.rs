//! Collection Pages
//!
//! One list view for every backend collection (pacientes, roles, admisiones, ...).
//! Rows are shown as returned by the backend; columns come from the first row.

use clinica::client::ApiRequest;
use clinica::routes::Page;
use leptos::*;
use serde_json::Value;

use crate::api::use_api;
use crate::app::use_page_lifetime;
use crate::components::TableSkeleton;
use crate::state::use_global_state;

/// List page for a backend collection
#[component]
pub fn CollectionPage(page: Page, rol: Option<String>) -> impl IntoView {
    let api = use_api();
    let state = use_global_state();
    let lifetime = use_page_lifetime();

    let rows = create_rw_signal(None::<Vec<Value>>);

    if let Some(collection) = page.collection() {
        let mut request = ApiRequest::get(collection);
        if let Some(rol) = &rol {
            request = request.query("rol", rol);
        }

        let client = api.client.clone();
        let state = state.clone();
        spawn_local(async move {
            state.loading.set(true);
            let result = lifetime.scope(client.send(request)).await;
            state.loading.set(false);

            // Left the page while loading
            let Some(result) = result else { return };

            match result.and_then(|response| response.json::<Vec<Value>>()) {
                Ok(list) => rows.set(Some(list)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load {}: {}", collection, e).into());
                    if e.is_unauthorized() {
                        state.show_error("Sesión expirada, inicie sesión de nuevo");
                    } else {
                        state.show_error(&format!("Error al cargar {}: {}", page.title(), e));
                    }
                    rows.set(Some(Vec::new()));
                }
            }
        });
    }

    let subtitle = rol.map(|rol| format!("Rol: {}", rol));

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">{page.title()}</h1>
                {subtitle.map(|s| view! { <p class="text-gray-400 mt-1">{s}</p> })}
            </div>

            <section class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                {move || match rows.get() {
                    None => view! { <TableSkeleton /> }.into_view(),
                    Some(list) if list.is_empty() => view! {
                        <p class="text-gray-400">"Sin registros"</p>
                    }.into_view(),
                    Some(list) => view! { <RecordTable rows=list /> }.into_view(),
                }}
            </section>
        </div>
    }
}

/// Column names taken from the first object row
fn columns(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[component]
fn RecordTable(rows: Vec<Value>) -> impl IntoView {
    let columns = columns(&rows);

    view! {
        <table class="min-w-full text-sm">
            <thead>
                <tr class="text-left text-gray-400 border-b border-gray-700">
                    {columns.iter().map(|c| view! { <th class="px-3 py-2">{c.clone()}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {rows
                    .iter()
                    .map(|row| view! {
                        <tr class="border-b border-gray-700 hover:bg-gray-700/50">
                            {columns
                                .iter()
                                .map(|c| view! {
                                    <td class="px-3 py-2">{cell(row.get(c.as_str()).unwrap_or(&Value::Null))}</td>
                                })
                                .collect_view()}
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_columns_from_first_row() {
        let rows = vec![json!({"id_paciente": 1, "nombre": "Ana"}), json!({"id_paciente": 2})];
        assert_eq!(columns(&rows), vec!["id_paciente".to_string(), "nombre".to_string()]);
        assert!(columns(&[]).is_empty());
    }

    #[wasm_bindgen_test]
    fn test_cell_rendering() {
        assert_eq!(cell(&Value::Null), "-");
        assert_eq!(cell(&json!("activo")), "activo");
        assert_eq!(cell(&json!(42)), "42");
    }
}
